use js_sys::Array;
use tracing::warn;
use wasm_bindgen::JsCast;
use waterui_head_core::{HeadDom, HeadError, HostElement};
use web_sys::{Document, Element, HtmlHeadElement, Window};

use crate::error::WebError;

/// [`HeadDom`] backed by the browser document.
#[derive(Debug, Clone)]
pub struct WebHeadDom {
    document: Document,
    head: HtmlHeadElement,
}

impl WebHeadDom {
    /// Binds to the document of the current window.
    ///
    /// # Errors
    ///
    /// Returns an error outside of a browser or when the document has no head.
    pub fn new() -> Result<Self, WebError> {
        let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document: Document = window.document().ok_or(WebError::DomUnavailable)?;
        Self::from_document(document)
    }

    /// Binds to an explicit document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document has no head.
    pub fn from_document(document: Document) -> Result<Self, WebError> {
        let head = document.head().ok_or(WebError::HeadUnavailable)?;
        Ok(Self { document, head })
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn host(&self, host: HostElement) -> Result<Element, WebError> {
        match host {
            HostElement::Root => self
                .document
                .document_element()
                .ok_or(WebError::HostUnavailable("html")),
            HostElement::Body => self
                .document
                .body()
                .map(Element::from)
                .ok_or(WebError::HostUnavailable("body")),
        }
    }
}

impl HeadDom for WebHeadDom {
    type Element = Element;

    fn set_title(&mut self, title: &str) -> Result<(), HeadError> {
        self.document.set_title(title);
        Ok(())
    }

    fn set_host_attribute(
        &mut self,
        host: HostElement,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError> {
        self.host(host)?
            .set_attribute(name, value)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn remove_host_attribute(&mut self, host: HostElement, name: &str) -> Result<(), HeadError> {
        self.host(host)?
            .remove_attribute(name)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn marked_elements(&self, tag: &str, marker: &str) -> Vec<Element> {
        let selector = format!("{tag}[{marker}]");
        match self.head.query_selector_all(&selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.item(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(error) => {
                warn!(?error, %selector, "marker selector rejected by the document");
                Vec::new()
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, HeadError> {
        Ok(self
            .document
            .create_element(tag)
            .map_err(WebError::from)?)
    }

    fn attribute_names(&self, element: &Element) -> Vec<String> {
        let names: Array = element.get_attribute_names();
        names.iter().filter_map(|name| name.as_string()).collect()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), HeadError> {
        element
            .set_attribute(name, value)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) -> Result<(), HeadError> {
        element.remove_attribute(name).map_err(WebError::from)?;
        Ok(())
    }

    fn append_to_head(&mut self, element: &Element) -> Result<(), HeadError> {
        self.head.append_child(element).map_err(WebError::from)?;
        Ok(())
    }

    fn detach(&mut self, element: &Element) {
        element.remove();
    }
}
