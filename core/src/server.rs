//! Server-side head collection and serialization.
//!
//! A [`HeadCollector`] is created for one request and handed to every
//! component rendered for it. Components [`merge`](HeadCollector::merge) their
//! descriptors into it; once rendering is done the host calls
//! [`render`](HeadCollector::render) to obtain the head fragment.
//!
//! Clones of a collector share the same aggregate. Collectors are `!Send`,
//! so one request's aggregate never leaks into another thread.

use std::{cell::RefCell, rc::Rc};

use tracing::{debug, trace};

use crate::{
    attribute::AttributeSet,
    context::ExecutionContext,
    descriptor::{Descriptor, TagKind},
    error::HeadError,
};

/// Per-request aggregate of every descriptor merged into it.
#[derive(Debug, Clone, Default)]
pub struct HeadCollector {
    aggregate: Rc<RefCell<Descriptor>>,
    context: ExecutionContext,
}

impl HeadCollector {
    /// Creates an empty collector for the detected execution context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(ExecutionContext::detect())
    }

    /// Creates an empty collector for an explicit execution context.
    #[must_use]
    pub fn with_context(context: ExecutionContext) -> Self {
        Self {
            aggregate: Rc::default(),
            context,
        }
    }

    /// The execution context this collector renders for.
    #[must_use]
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Overlays `next` onto the aggregate.
    ///
    /// Every field present in `next` replaces the aggregate's field; sequences
    /// are replaced, never concatenated.
    pub fn merge(&self, next: Descriptor) {
        trace!(title = next.title.as_deref(), "merging head descriptor");
        self.aggregate.borrow_mut().merge(next);
    }

    /// Returns a copy of the aggregate.
    #[must_use]
    pub fn snapshot(&self) -> Descriptor {
        self.aggregate.borrow().clone()
    }

    /// Clears the aggregate.
    pub fn reset(&self) {
        *self.aggregate.borrow_mut() = Descriptor::new();
    }

    /// Returns the aggregate and leaves an empty one in its place.
    #[must_use]
    pub fn take(&self) -> Descriptor {
        RefCell::take(&self.aggregate)
    }

    /// Serializes the aggregate into a head fragment.
    ///
    /// The aggregate is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`HeadError::BrowserContext`] when the collector belongs to a
    /// browser context.
    pub fn render(&self) -> Result<String, HeadError> {
        self.ensure_server()?;
        let html = render_head(&self.aggregate.borrow());
        debug!(bytes = html.len(), "rendered head");
        Ok(html)
    }

    /// Serializes the aggregate's root `<html>` attributes as `name="value"` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`HeadError::BrowserContext`] when the collector belongs to a
    /// browser context.
    pub fn render_html_attributes(&self) -> Result<String, HeadError> {
        self.ensure_server()?;
        Ok(self
            .aggregate
            .borrow()
            .html_attributes
            .as_deref()
            .map(AttributeSet::to_html)
            .unwrap_or_default())
    }

    /// Serializes the aggregate's `<body>` attributes as `name="value"` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`HeadError::BrowserContext`] when the collector belongs to a
    /// browser context.
    pub fn render_body_attributes(&self) -> Result<String, HeadError> {
        self.ensure_server()?;
        Ok(self
            .aggregate
            .borrow()
            .body_attributes
            .as_deref()
            .map(AttributeSet::to_html)
            .unwrap_or_default())
    }

    const fn ensure_server(&self) -> Result<(), HeadError> {
        if self.context.is_browser() {
            return Err(HeadError::BrowserContext);
        }
        Ok(())
    }
}

/// Serializes a descriptor into a head fragment.
///
/// Emits `<title>` when the title is non-empty, then one self-closing element
/// per entry for each tag kind in [`TagKind::ALL`] order. Neither the title
/// nor attribute values are escaped.
#[must_use]
pub fn render_head(descriptor: &Descriptor) -> String {
    let mut out = String::new();

    if let Some(title) = descriptor.title.as_deref().filter(|title| !title.is_empty()) {
        out.push_str("<title>");
        out.push_str(title);
        out.push_str("</title>");
    }

    for kind in TagKind::ALL {
        let Some(tags) = descriptor.tags(kind) else {
            continue;
        };
        for entry in tags.entries() {
            out.push('<');
            out.push_str(kind.tag_name());
            let attributes = entry.to_html();
            if !attributes.is_empty() {
                out.push(' ');
                out.push_str(&attributes);
            }
            out.push_str(" />");
        }
    }

    out
}
