//! Detection of the runtime the head is being produced in.

/// Where head state is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side rendering; head state is collected and serialized.
    Server,
    /// Running inside a browser document.
    Browser,
}

impl ExecutionContext {
    /// Detects the context from the compilation target.
    ///
    /// `wasm32-unknown-unknown` builds are treated as browsers. Hosts that run
    /// such builds on a server should override the context explicitly.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(all(target_arch = "wasm32", target_os = "unknown")) {
            Self::Browser
        } else {
            Self::Server
        }
    }

    /// Returns `true` for [`ExecutionContext::Browser`].
    #[must_use]
    pub const fn is_browser(self) -> bool {
        matches!(self, Self::Browser)
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_are_servers() {
        assert_eq!(ExecutionContext::detect(), ExecutionContext::Server);
        assert!(!ExecutionContext::default().is_browser());
    }
}
