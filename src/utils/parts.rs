//! Utility functions for working with A2A Part objects.

use crate::types::Part;

/// Extracts text content from all text Parts in a list, in order.
///
/// File and data parts are skipped.
///
/// # Example
///
/// ```
/// use a2a_weather::types::Part;
/// use a2a_weather::utils::get_text_parts;
///
/// let parts = vec![Part::text("Sunny, "), Part::text("22°C")];
/// assert_eq!(get_text_parts(&parts), vec!["Sunny, ", "22°C"]);
/// ```
pub fn get_text_parts(parts: &[Part]) -> Vec<&str> {
    parts.iter().filter_map(Part::as_text).collect()
}

/// Concatenates the text of all text Parts with no separator.
///
/// This is how agent replies are rendered.
pub fn concat_text_parts(parts: &[Part]) -> String {
    get_text_parts(parts).concat()
}
