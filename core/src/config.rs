//! Reconciler configuration.

use std::borrow::Cow;

/// Attribute placed on every element the reconciler creates.
pub const DEFAULT_MARKER: &str = "data-waterui-head";

/// How the reconciler picks an existing element for a tag entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ElementLookup {
    /// Reuse the first marked element of the tag name in the head, even one
    /// already claimed earlier in the same pass. Several entries of one tag
    /// kind therefore collapse onto a single element.
    #[default]
    FirstMarked,
    /// Reuse the first marked element not yet claimed in the current pass, so
    /// every entry gets its own element.
    PerEntry,
}

/// Configuration for a head reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeadConfig {
    marker: Cow<'static, str>,
    lookup: ElementLookup,
}

impl HeadConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: Cow::Borrowed(DEFAULT_MARKER),
            lookup: ElementLookup::FirstMarked,
        }
    }

    /// Overrides the marker attribute name.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Overrides the element lookup strategy.
    #[must_use]
    pub const fn with_lookup(mut self, lookup: ElementLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// The marker attribute name.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The element lookup strategy.
    #[must_use]
    pub const fn lookup(&self) -> ElementLookup {
        self.lookup
    }
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self::new()
    }
}
