//! Diffing descriptors and applying the result to a [`HeadDom`].
//!
//! Reconciliation runs in two steps. [`plan`] compares two descriptors field by
//! field and returns the operations needed, without touching any document.
//! [`apply_ops`] performs those operations and returns a [`Teardown`] that
//! owns every element the pass placed in the head.
//!
//! Change detection is by identity. `title` is compared by value; every other
//! field is compared with [`Rc::ptr_eq`], so a freshly built value always
//! reapplies even when its contents match, and a reused `Rc` never does.
//!
//! Root and body attributes merge monotonically: a name that disappears from
//! the next descriptor keeps its last value on the element.

use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::{
    attribute::AttributeSet,
    config::{ElementLookup, HeadConfig},
    descriptor::{Descriptor, TagKind, Tags},
    dom::{HeadDom, HostElement},
    error::HeadError,
};

/// One document change produced by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadOp {
    /// Set the title, or clear it when `None`.
    SetTitle(Option<String>),
    /// Set or remove attributes on the root or body element.
    SetHostAttributes {
        /// Target element.
        host: HostElement,
        /// Attributes to apply.
        attributes: Rc<AttributeSet>,
    },
    /// Place one managed element per entry in the head.
    SyncTags {
        /// Tag kind being placed.
        kind: TagKind,
        /// Entries to place.
        tags: Rc<Tags>,
    },
}

fn changed<T>(previous: Option<&Rc<T>>, next: Option<&Rc<T>>) -> bool {
    match (previous, next) {
        (None, None) => false,
        (Some(previous), Some(next)) => !Rc::ptr_eq(previous, next),
        _ => true,
    }
}

/// Returns `true` if no field of `next` differs from `previous`.
#[must_use]
pub fn is_unchanged(previous: &Descriptor, next: &Descriptor) -> bool {
    previous.title == next.title
        && !changed(
            previous.html_attributes.as_ref(),
            next.html_attributes.as_ref(),
        )
        && !changed(
            previous.body_attributes.as_ref(),
            next.body_attributes.as_ref(),
        )
        && TagKind::ALL
            .into_iter()
            .all(|kind| !changed(previous.tags(kind), next.tags(kind)))
}

/// Computes the operations that bring a document showing `previous` to `next`.
///
/// Operations come out in application order: title, root attributes, body
/// attributes, then tag kinds in [`TagKind::ALL`] order. A changed field that
/// is absent from `next` yields no operation, except the title, which is
/// cleared.
#[must_use]
pub fn plan(previous: &Descriptor, next: &Descriptor) -> Vec<HeadOp> {
    let mut ops = Vec::new();

    if previous.title != next.title {
        ops.push(HeadOp::SetTitle(next.title.clone()));
    }

    let hosts = [
        (
            HostElement::Root,
            previous.html_attributes.as_ref(),
            next.html_attributes.as_ref(),
        ),
        (
            HostElement::Body,
            previous.body_attributes.as_ref(),
            next.body_attributes.as_ref(),
        ),
    ];
    for (host, before, after) in hosts {
        if let Some(attributes) = after.filter(|_| changed(before, after)) {
            ops.push(HeadOp::SetHostAttributes {
                host,
                attributes: Rc::clone(attributes),
            });
        }
    }

    for kind in TagKind::ALL {
        let after = next.tags(kind);
        if let Some(tags) = after.filter(|_| changed(previous.tags(kind), after)) {
            ops.push(HeadOp::SyncTags {
                kind,
                tags: Rc::clone(tags),
            });
        }
    }

    ops
}

/// Elements placed in the head by one reconciliation pass.
///
/// Running the teardown detaches them. It consumes the value, so it can run at
/// most once; it must run before the next pass appends its own elements.
#[derive(Debug)]
#[must_use = "managed elements stay in the document until the teardown runs"]
pub struct Teardown<E> {
    elements: Vec<E>,
}

impl<E: PartialEq> Teardown<E> {
    /// A teardown that owns nothing.
    pub const fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    fn record(&mut self, element: E) {
        if !self.elements.contains(&element) {
            self.elements.push(element);
        }
    }

    /// The owned elements, in the order they were first placed.
    #[must_use]
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Number of owned elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the pass placed no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Detaches every owned element from its parent.
    pub fn run<D: HeadDom<Element = E>>(self, dom: &mut D) {
        trace!(elements = self.elements.len(), "running head teardown");
        for element in &self.elements {
            dom.detach(element);
        }
    }
}

/// Applies `ops` to `dom`.
///
/// # Errors
///
/// Returns the first error reported by `dom`. Elements placed before the
/// failure are detached again; title and attribute changes are kept.
pub fn apply_ops<D: HeadDom>(
    dom: &mut D,
    config: &HeadConfig,
    ops: Vec<HeadOp>,
) -> Result<Teardown<D::Element>, HeadError> {
    let mut teardown = Teardown::empty();
    for op in ops {
        if let Err(error) = apply_op(dom, config, op, &mut teardown) {
            warn!(%error, placed = teardown.len(), "head reconciliation failed");
            teardown.run(dom);
            return Err(error);
        }
    }
    Ok(teardown)
}

/// Plans and applies the changes from `previous` to `next`.
///
/// # Errors
///
/// See [`apply_ops`].
pub fn apply<D: HeadDom>(
    dom: &mut D,
    config: &HeadConfig,
    previous: &Descriptor,
    next: &Descriptor,
) -> Result<Teardown<D::Element>, HeadError> {
    let ops = plan(previous, next);
    debug!(ops = ops.len(), "reconciling head");
    apply_ops(dom, config, ops)
}

fn apply_op<D: HeadDom>(
    dom: &mut D,
    config: &HeadConfig,
    op: HeadOp,
    teardown: &mut Teardown<D::Element>,
) -> Result<(), HeadError> {
    match op {
        HeadOp::SetTitle(title) => {
            trace!(title = title.as_deref(), "setting title");
            dom.set_title(title.as_deref().unwrap_or_default())
        }
        HeadOp::SetHostAttributes { host, attributes } => {
            trace!(?host, count = attributes.len(), "setting host attributes");
            for (name, value) in attributes.iter() {
                match value.as_attribute() {
                    Some(value) => dom.set_host_attribute(host, name, &value)?,
                    None => dom.remove_host_attribute(host, name)?,
                }
            }
            Ok(())
        }
        HeadOp::SyncTags { kind, tags } => {
            trace!(?kind, entries = tags.entries().len(), "placing head elements");
            for entry in tags.entries() {
                let element = locate(dom, config, kind, teardown.elements())?;
                sync_attributes(dom, &element, entry, config.marker())?;
                dom.append_to_head(&element)?;
                teardown.record(element);
            }
            Ok(())
        }
    }
}

fn locate<D: HeadDom>(
    dom: &mut D,
    config: &HeadConfig,
    kind: TagKind,
    claimed: &[D::Element],
) -> Result<D::Element, HeadError> {
    let tag = kind.tag_name();
    let mut marked = dom.marked_elements(tag, config.marker()).into_iter();
    let existing = match config.lookup() {
        ElementLookup::FirstMarked => marked.next(),
        ElementLookup::PerEntry => marked.find(|element| !claimed.contains(element)),
    };
    if let Some(element) = existing {
        trace!(tag, "reusing marked element");
        return Ok(element);
    }
    let element = dom.create_element(tag)?;
    dom.set_attribute(&element, config.marker(), "")?;
    Ok(element)
}

fn sync_attributes<D: HeadDom>(
    dom: &mut D,
    element: &D::Element,
    entry: &AttributeSet,
    marker: &str,
) -> Result<(), HeadError> {
    for name in dom.attribute_names(element) {
        if name != marker && !entry.contains(&name) {
            dom.remove_attribute(element, &name)?;
        }
    }
    for (name, value) in entry.iter() {
        let current = dom.attribute(element, name);
        match value.as_attribute() {
            Some(value) if current.as_deref() != Some(&*value) => {
                dom.set_attribute(element, name, &value)?;
            }
            None if current.is_some() => dom.remove_attribute(element, name)?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attribute::AttrValue,
        config::DEFAULT_MARKER,
        memory::{ElementId, MemoryDom},
    };

    fn meta(name: &str, content: &str) -> AttributeSet {
        AttributeSet::new().with("name", name).with("content", content)
    }

    fn link(href: &str) -> AttributeSet {
        AttributeSet::new().with("rel", "stylesheet").with("href", href)
    }

    fn run(dom: &mut MemoryDom, previous: &Descriptor, next: &Descriptor) -> Teardown<ElementId> {
        apply(dom, &HeadConfig::default(), previous, next).unwrap()
    }

    #[test]
    fn title_follows_next_descriptor() {
        let mut dom = MemoryDom::new();
        let first = Descriptor::new().with_title("One");
        let second = Descriptor::new().with_title("Two");
        let _ = run(&mut dom, &Descriptor::new(), &first);
        let _ = run(&mut dom, &first, &second);
        assert_eq!(dom.title(), "Two");

        let _ = run(&mut dom, &second, &Descriptor::new());
        assert_eq!(dom.title(), "");
    }

    #[test]
    fn same_descriptor_does_nothing() {
        let descriptor = Descriptor::new()
            .with_title("T")
            .with_meta(vec![meta("a", "b")])
            .with_html_attributes(AttributeSet::new().with("lang", "en"));
        assert!(plan(&descriptor, &descriptor).is_empty());
        assert!(is_unchanged(&descriptor, &descriptor.clone()));

        let mut dom = MemoryDom::new();
        let teardown = run(&mut dom, &descriptor, &descriptor);
        assert!(teardown.is_empty());
        assert_eq!(dom.mutations(), 0);
    }

    #[test]
    fn fresh_values_always_reapply() {
        let previous = Descriptor::new().with_meta(vec![meta("a", "b")]);
        let next = Descriptor::new().with_meta(vec![meta("a", "b")]);
        assert!(!is_unchanged(&previous, &next));
        assert_eq!(plan(&previous, &next).len(), 1);
    }

    #[test]
    fn ops_follow_fixed_order() {
        let next = Descriptor::new()
            .with_noscript(AttributeSet::new())
            .with_base(AttributeSet::new().with("href", "/"))
            .with_body_attributes(AttributeSet::new().with("class", "x"))
            .with_title("T")
            .with_html_attributes(AttributeSet::new().with("lang", "en"));
        let ops = plan(&Descriptor::new(), &next);
        assert!(matches!(ops[0], HeadOp::SetTitle(Some(_))));
        assert!(matches!(
            ops[1],
            HeadOp::SetHostAttributes {
                host: HostElement::Root,
                ..
            }
        ));
        assert!(matches!(
            ops[2],
            HeadOp::SetHostAttributes {
                host: HostElement::Body,
                ..
            }
        ));
        assert!(matches!(ops[3], HeadOp::SyncTags { kind: TagKind::Base, .. }));
        assert!(matches!(ops[4], HeadOp::SyncTags { kind: TagKind::Noscript, .. }));
    }

    #[test]
    fn host_attributes_merge_monotonically() {
        let mut dom = MemoryDom::new();
        let first = Descriptor::new()
            .with_html_attributes(AttributeSet::new().with("lang", "en").with("dir", "ltr"));
        let second = Descriptor::new().with_html_attributes(AttributeSet::new().with("lang", "fr"));
        let _ = run(&mut dom, &Descriptor::new(), &first);
        let _ = run(&mut dom, &first, &second);

        assert_eq!(dom.host_attribute(HostElement::Root, "lang"), Some("fr"));
        assert_eq!(dom.host_attribute(HostElement::Root, "dir"), Some("ltr"));
    }

    #[test]
    fn unset_host_attribute_is_removed() {
        let mut dom = MemoryDom::new();
        let first = Descriptor::new().with_body_attributes(AttributeSet::new().with("class", "dark"));
        let second =
            Descriptor::new().with_body_attributes(AttributeSet::new().with("class", AttrValue::Unset));
        let _ = run(&mut dom, &Descriptor::new(), &first);
        assert_eq!(dom.host_attribute(HostElement::Body, "class"), Some("dark"));
        let _ = run(&mut dom, &first, &second);
        assert_eq!(dom.host_attribute(HostElement::Body, "class"), None);
    }

    #[test]
    fn single_set_creates_one_marked_element() {
        let mut dom = MemoryDom::new();
        let next = Descriptor::new().with_base(AttributeSet::new().with("href", "/app/"));
        let teardown = run(&mut dom, &Descriptor::new(), &next);

        assert_eq!(teardown.len(), 1);
        let base = teardown.elements()[0];
        assert_eq!(dom.tag(base), "base");
        assert_eq!(
            dom.attributes(base),
            &[
                (DEFAULT_MARKER.to_owned(), String::new()),
                ("href".to_owned(), "/app/".to_owned()),
            ]
        );
    }

    #[test]
    fn entries_collapse_onto_first_marked_element() {
        let mut dom = MemoryDom::new();
        let next = Descriptor::new().with_meta(vec![meta("a", "1"), meta("b", "2")]);
        let teardown = run(&mut dom, &Descriptor::new(), &next);

        assert_eq!(teardown.len(), 1);
        assert_eq!(dom.head().len(), 1);
        let element = dom.head()[0];
        assert_eq!(
            dom.attribute(&element, "name").as_deref(),
            Some("b"),
            "the last entry wins"
        );
    }

    #[test]
    fn per_entry_lookup_gives_each_entry_an_element() {
        let mut dom = MemoryDom::new();
        let config = HeadConfig::new().with_lookup(ElementLookup::PerEntry);
        let next = Descriptor::new().with_meta(vec![meta("a", "1"), meta("b", "2")]);
        let teardown = apply(&mut dom, &config, &Descriptor::new(), &next).unwrap();

        assert_eq!(teardown.len(), 2);
        let names: Vec<_> = dom
            .head()
            .iter()
            .map(|id| dom.attribute(id, "name").unwrap_or_default())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn reused_element_loses_stale_attributes() {
        let mut dom = MemoryDom::new();
        let next = Descriptor::new().with_script(vec![
            AttributeSet::new().with("src", "/a.js").with("async", true),
            AttributeSet::new().with("src", "/b.js").with("defer", true),
        ]);
        let _teardown = run(&mut dom, &Descriptor::new(), &next);
        let script = dom.head()[0];
        assert_eq!(dom.attribute(&script, "src").as_deref(), Some("/b.js"));
        assert_eq!(dom.attribute(&script, "defer").as_deref(), Some("true"));
        assert_eq!(dom.attribute(&script, "async"), None);
        assert!(dom.attribute(&script, DEFAULT_MARKER).is_some());
    }

    #[test]
    fn unset_entry_attribute_is_not_written() {
        let mut dom = MemoryDom::new();
        let next = Descriptor::new()
            .with_link(AttributeSet::new().with("href", "/x.css").with("media", AttrValue::Unset));
        let _teardown = run(&mut dom, &Descriptor::new(), &next);
        assert_eq!(dom.attribute(&dom.head()[0], "media"), None);
    }

    #[test]
    fn teardown_removes_only_its_elements() {
        let mut dom = MemoryDom::new();
        let foreign = dom.create_element("meta").unwrap();
        dom.set_attribute(&foreign, "charset", "utf-8").unwrap();
        dom.append_to_head(&foreign).unwrap();

        let next = Descriptor::new()
            .with_meta(meta("a", "b"))
            .with_link(link("/a.css"));
        let teardown = run(&mut dom, &Descriptor::new(), &next);
        assert_eq!(dom.head().len(), 3);

        let placed = teardown.elements().to_vec();
        teardown.run(&mut dom);
        assert_eq!(dom.head(), &[foreign]);
        assert!(placed.iter().all(|id| !dom.is_attached(*id)));
    }

    #[test]
    fn shorter_link_list_after_teardown() {
        let config = HeadConfig::new().with_lookup(ElementLookup::PerEntry);
        let mut dom = MemoryDom::new();
        let first = Descriptor::new().with_link(vec![link("/a.css"), link("/b.css")]);
        let second = Descriptor::new().with_link(vec![link("/c.css")]);

        let teardown = apply(&mut dom, &config, &Descriptor::new(), &first).unwrap();
        assert_eq!(dom.head().len(), 2);
        teardown.run(&mut dom);
        let teardown = apply(&mut dom, &config, &first, &second).unwrap();

        assert_eq!(dom.head(), teardown.elements());
        assert_eq!(dom.attribute(&dom.head()[0], "href").as_deref(), Some("/c.css"));
    }

    #[test]
    fn failure_detaches_placed_elements() {
        let mut dom = MemoryDom::new();
        let next = Descriptor::new()
            .with_title("kept")
            .with_meta(meta("a", "b"))
            .with_link(AttributeSet::new().with("bad name", "x"));
        let result = apply(&mut dom, &HeadConfig::default(), &Descriptor::new(), &next);

        assert!(matches!(result, Err(HeadError::Dom(_))));
        assert!(dom.head().is_empty());
        assert_eq!(dom.title(), "kept");
    }

    #[test]
    fn custom_marker_is_used_for_lookup() {
        let config = HeadConfig::new().with_marker("data-custom");
        let mut dom = MemoryDom::new();
        let next = Descriptor::new().with_style(AttributeSet::new().with("media", "print"));
        let _teardown = apply(&mut dom, &config, &Descriptor::new(), &next).unwrap();

        assert_eq!(dom.marked_elements("style", "data-custom").len(), 1);
        assert!(dom.marked_elements("style", DEFAULT_MARKER).is_empty());
    }
}
