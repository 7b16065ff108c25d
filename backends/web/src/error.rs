use core::fmt;

use waterui_head_core::HeadError;

/// Error type produced by the web backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// The document has no `<head>` element.
    HeadUnavailable,
    /// The document has no root or `<body>` element.
    HostUnavailable(&'static str),
    /// A descriptor passed from JavaScript could not be parsed.
    InvalidDescriptor(String),
    /// Reconciliation failed.
    Head(HeadError),
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::HeadUnavailable => write!(f, "document has no <head> element"),
            Self::HostUnavailable(tag) => write!(f, "document has no <{tag}> element"),
            Self::InvalidDescriptor(msg) => write!(f, "invalid head descriptor: {msg}"),
            Self::Head(error) => write!(f, "{error}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        Self::from(value.to_string())
    }
}

impl From<HeadError> for WebError {
    fn from(value: HeadError) -> Self {
        Self::Head(value)
    }
}

impl From<WebError> for HeadError {
    fn from(value: WebError) -> Self {
        match value {
            WebError::Head(error) => error,
            other => Self::Dom(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidDescriptor(value.to_string())
    }
}
