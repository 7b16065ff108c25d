//! An in-memory document for reconciling without a browser.

use crate::{
    dom::{HeadDom, HostElement},
    error::HeadError,
};

/// Handle to an element of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
}

/// A minimal document: a title, root and body attributes, and a flat head.
///
/// Every mutating call increments a counter so callers can assert that a
/// reconciliation pass did no work.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    head: Vec<ElementId>,
    title: String,
    root: Vec<(String, String)>,
    body: Vec<(String, String)>,
    mutations: usize,
}

impl MemoryDom {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: Vec::new(),
            title: String::new(),
            root: Vec::new(),
            body: Vec::new(),
            mutations: 0,
        }
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Elements attached to the head, in order.
    #[must_use]
    pub fn head(&self) -> &[ElementId] {
        &self.head
    }

    /// Returns `true` if `element` is attached to the head.
    #[must_use]
    pub fn is_attached(&self, element: ElementId) -> bool {
        self.head.contains(&element)
    }

    /// Tag name of `element`.
    ///
    /// # Panics
    ///
    /// Panics if `element` was not created by this document.
    #[must_use]
    pub fn tag(&self, element: ElementId) -> &str {
        &self.nodes[element.0].tag
    }

    /// Attributes of `element`, in the order they were first set.
    ///
    /// # Panics
    ///
    /// Panics if `element` was not created by this document.
    #[must_use]
    pub fn attributes(&self, element: ElementId) -> &[(String, String)] {
        &self.nodes[element.0].attributes
    }

    /// Current value of an attribute on the root or body element.
    #[must_use]
    pub fn host_attribute(&self, host: HostElement, name: &str) -> Option<&str> {
        lookup(self.host(host), name)
    }

    /// Number of mutating calls made so far.
    #[must_use]
    pub const fn mutations(&self) -> usize {
        self.mutations
    }

    /// Serializes the attached head elements for inspection.
    #[must_use]
    pub fn head_html(&self) -> String {
        let mut out = String::new();
        for id in &self.head {
            let node = &self.nodes[id.0];
            out.push('<');
            out.push_str(&node.tag);
            for (name, value) in &node.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
            out.push_str(" />");
        }
        out
    }

    const fn host(&self, host: HostElement) -> &Vec<(String, String)> {
        match host {
            HostElement::Root => &self.root,
            HostElement::Body => &self.body,
        }
    }

    const fn host_mut(&mut self, host: HostElement) -> &mut Vec<(String, String)> {
        match host {
            HostElement::Root => &mut self.root,
            HostElement::Body => &mut self.body,
        }
    }

    fn node(&self, element: ElementId) -> Result<&Node, HeadError> {
        self.nodes
            .get(element.0)
            .ok_or_else(|| HeadError::Dom(format!("unknown element {}", element.0)))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node, HeadError> {
        self.nodes
            .get_mut(element.0)
            .ok_or_else(|| HeadError::Dom(format!("unknown element {}", element.0)))
    }
}

fn lookup<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn upsert(attributes: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some((_, slot)) = attributes.iter_mut().find(|(key, _)| key == name) {
        value.clone_into(slot);
    } else {
        attributes.push((name.to_owned(), value.to_owned()));
    }
}

fn validate_name(name: &str) -> Result<(), HeadError> {
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '=')) {
        return Err(HeadError::Dom(format!("invalid name `{name}`")));
    }
    Ok(())
}

impl HeadDom for MemoryDom {
    type Element = ElementId;

    fn set_title(&mut self, title: &str) -> Result<(), HeadError> {
        self.mutations += 1;
        title.clone_into(&mut self.title);
        Ok(())
    }

    fn set_host_attribute(
        &mut self,
        host: HostElement,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError> {
        validate_name(name)?;
        self.mutations += 1;
        upsert(self.host_mut(host), name, value);
        Ok(())
    }

    fn remove_host_attribute(&mut self, host: HostElement, name: &str) -> Result<(), HeadError> {
        self.mutations += 1;
        self.host_mut(host).retain(|(key, _)| key != name);
        Ok(())
    }

    fn marked_elements(&self, tag: &str, marker: &str) -> Vec<ElementId> {
        self.head
            .iter()
            .copied()
            .filter(|id| {
                let node = &self.nodes[id.0];
                node.tag == tag && lookup(&node.attributes, marker).is_some()
            })
            .collect()
    }

    fn create_element(&mut self, tag: &str) -> Result<ElementId, HeadError> {
        validate_name(tag)?;
        self.mutations += 1;
        self.nodes.push(Node {
            tag: tag.to_owned(),
            attributes: Vec::new(),
        });
        Ok(ElementId(self.nodes.len() - 1))
    }

    fn attribute_names(&self, element: &ElementId) -> Vec<String> {
        self.node(*element)
            .map(|node| node.attributes.iter().map(|(key, _)| key.clone()).collect())
            .unwrap_or_default()
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.node(*element)
            .ok()
            .and_then(|node| lookup(&node.attributes, name))
            .map(ToOwned::to_owned)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) -> Result<(), HeadError> {
        validate_name(name)?;
        let node = self.node_mut(*element)?;
        upsert(&mut node.attributes, name, value);
        self.mutations += 1;
        Ok(())
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) -> Result<(), HeadError> {
        let node = self.node_mut(*element)?;
        node.attributes.retain(|(key, _)| key != name);
        self.mutations += 1;
        Ok(())
    }

    fn append_to_head(&mut self, element: &ElementId) -> Result<(), HeadError> {
        self.node(*element)?;
        self.head.retain(|id| id != element);
        self.head.push(*element);
        self.mutations += 1;
        Ok(())
    }

    fn detach(&mut self, element: &ElementId) {
        let before = self.head.len();
        self.head.retain(|id| id != element);
        if self.head.len() != before {
            self.mutations += 1;
        }
    }
}
