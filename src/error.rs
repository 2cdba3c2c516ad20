//! Error types for the weather clients: JSON-RPC error codes and client-side failures.
//!
//! Remote errors arrive as JSON-RPC error objects and are kept verbatim in
//! [`A2AError::JsonRpc`]. Everything else (transport, decoding, waiting,
//! configuration) is a client-side variant.

use crate::types::JsonRpcError;

// ---------------------------------------------------------------------------
// Standard JSON-RPC 2.0 error codes
// ---------------------------------------------------------------------------

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i64 = -32700;

/// The JSON sent is not a valid Request object.
pub const INVALID_REQUEST: i64 = -32600;

/// The method does not exist / is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Invalid method parameter(s).
pub const INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;

// ---------------------------------------------------------------------------
// A2A-specific error codes
// ---------------------------------------------------------------------------

/// The requested task was not found.
pub const TASK_NOT_FOUND: i64 = -32001;

/// The task cannot be canceled in its current state.
pub const TASK_NOT_CANCELABLE: i64 = -32002;

/// Push notifications are not supported by this agent.
pub const PUSH_NOTIFICATION_NOT_SUPPORTED: i64 = -32003;

/// The requested operation is not supported.
pub const UNSUPPORTED_OPERATION: i64 = -32004;

/// The content type is not supported.
pub const CONTENT_TYPE_NOT_SUPPORTED: i64 = -32005;

/// The agent returned an invalid response.
pub const INVALID_AGENT_RESPONSE: i64 = -32006;

/// Human-readable label for a known JSON-RPC / A2A error code.
pub fn code_name(code: i64) -> Option<&'static str> {
    let name = match code {
        PARSE_ERROR => "parse error",
        INVALID_REQUEST => "invalid request",
        METHOD_NOT_FOUND => "method not found",
        INVALID_PARAMS => "invalid params",
        INTERNAL_ERROR => "internal error",
        TASK_NOT_FOUND => "task not found",
        TASK_NOT_CANCELABLE => "task not cancelable",
        PUSH_NOTIFICATION_NOT_SUPPORTED => "push notification not supported",
        UNSUPPORTED_OPERATION => "unsupported operation",
        CONTENT_TYPE_NOT_SUPPORTED => "content type not supported",
        INVALID_AGENT_RESPONSE => "invalid agent response",
        _ => return None,
    };
    Some(name)
}

// ---------------------------------------------------------------------------
// A2AError enum
// ---------------------------------------------------------------------------

/// Unified error type for the agent client and the result resolver.
///
/// Any of these is fatal to a CLI run; nothing is retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum A2AError {
    /// A JSON-RPC error response was received from the remote agent.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    /// Transport-level error (connection failed, request failed, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A request, a stream, or the overall wait exceeded its time budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error with status code and response body.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Invalid JSON received from remote (parse or deserialization failure).
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The agent answered, but not with anything we can print.
    #[error("Invalid agent response: {0}")]
    InvalidAgentResponse(String),

    /// Local configuration is unusable (bad URL, bad header value, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The wait was cancelled before the agent produced a final answer.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Writing the agent's reply to the output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Convenience result type for A2A operations.
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    /// Whether the remote call itself reported a structured error.
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, A2AError::JsonRpc { .. })
    }

    /// Whether this is a timeout, including an expired wait deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, A2AError::Timeout(_))
    }
}

impl From<JsonRpcError> for A2AError {
    fn from(err: JsonRpcError) -> Self {
        A2AError::JsonRpc {
            code: err.code,
            message: err.message,
            data: err.data,
        }
    }
}

impl From<std::io::Error> for A2AError {
    fn from(err: std::io::Error) -> Self {
        A2AError::Io(err.to_string())
    }
}
