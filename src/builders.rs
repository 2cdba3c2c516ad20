//! Builders for outgoing `message/send` / `message/stream` requests.
//!
//! ```
//! use a2a_weather::builders::{weather_question, SendMessageBuilder};
//!
//! let params = SendMessageBuilder::new(weather_question("Lisbon"))
//!     .blocking(true)
//!     .build();
//! assert_eq!(params.configuration.unwrap().blocking, Some(true));
//! ```

use crate::types::{SendMessageConfiguration, SendMessageParams};
use crate::utils::new_user_text_message;

/// Output mode the weather clients can render.
pub const TEXT_PLAIN: &str = "text/plain";

/// The question sent to the weather agent for `city`.
///
/// ```
/// assert_eq!(
///     a2a_weather::builders::weather_question("Paris"),
///     "What's the weather in Paris?"
/// );
/// ```
pub fn weather_question(city: &str) -> String {
    format!("What's the weather in {city}?")
}

/// Builder for [`SendMessageParams`] carrying a single user text part.
///
/// Every built request gets a fresh message id and accepts `text/plain`
/// output only; `blocking` is only sent when set.
#[derive(Debug, Clone)]
pub struct SendMessageBuilder {
    text: String,
    blocking: Option<bool>,
}

impl SendMessageBuilder {
    /// Start a request whose message text is `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocking: None,
        }
    }

    /// Ask the agent to hold the response until the task is done.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = Some(blocking);
        self
    }

    /// Build the request parameters.
    pub fn build(self) -> SendMessageParams {
        SendMessageParams {
            message: new_user_text_message(self.text),
            configuration: Some(SendMessageConfiguration {
                accepted_output_modes: Some(vec![TEXT_PLAIN.to_string()]),
                history_length: None,
                blocking: self.blocking,
            }),
            metadata: None,
        }
    }
}
