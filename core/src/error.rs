//! Errors reported by head reconciliation and serialization.

use thiserror::Error;

/// Error type shared by the reconciler, the document seam and the collector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeadError {
    /// The serializer was invoked while running in a browser.
    #[error("head serialization is only available in a server context")]
    BrowserContext,
    /// The document rejected an operation.
    #[error("document operation failed: {0}")]
    Dom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            HeadError::BrowserContext.to_string(),
            "head serialization is only available in a server context"
        );
        assert_eq!(
            HeadError::Dom("invalid name".into()).to_string(),
            "document operation failed: invalid name"
        );
    }
}
