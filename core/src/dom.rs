//! The document seam driven by the reconciler.

use core::fmt::Debug;

use crate::error::HeadError;

/// Element outside the head whose attributes a descriptor can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostElement {
    /// The root `<html>` element.
    Root,
    /// The `<body>` element.
    Body,
}

/// Operations the reconciler needs from a document.
///
/// Implementations apply each call directly; they never batch or reorder.
/// [`MemoryDom`](crate::MemoryDom) is an in-memory implementation, and the
/// `waterui-head-web` crate provides one backed by `web-sys`.
pub trait HeadDom {
    /// Handle to an element owned by the document.
    type Element: Clone + PartialEq + Debug;

    /// Sets the document title. An empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects the update.
    fn set_title(&mut self, title: &str) -> Result<(), HeadError>;

    /// Sets an attribute on the root or body element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing or rejects the attribute.
    fn set_host_attribute(
        &mut self,
        host: HostElement,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError>;

    /// Removes an attribute from the root or body element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing.
    fn remove_host_attribute(&mut self, host: HostElement, name: &str) -> Result<(), HeadError>;

    /// Head elements with tag name `tag` that carry the `marker` attribute, in
    /// document order.
    fn marked_elements(&self, tag: &str, marker: &str) -> Vec<Self::Element>;

    /// Creates a detached element.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag name is rejected.
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, HeadError>;

    /// Names of the attributes currently set on `element`.
    fn attribute_names(&self, element: &Self::Element) -> Vec<String>;

    /// Current value of an attribute on `element`.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Sets an attribute on `element`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute name is rejected.
    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError>;

    /// Removes an attribute from `element`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects the removal.
    fn remove_attribute(&mut self, element: &Self::Element, name: &str) -> Result<(), HeadError>;

    /// Appends `element` as the last child of the head, moving it if it is
    /// already attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the head is missing.
    fn append_to_head(&mut self, element: &Self::Element) -> Result<(), HeadError>;

    /// Removes `element` from its parent. Detached elements are left alone.
    fn detach(&mut self, element: &Self::Element);
}
