//! The declared head state for one update cycle.
//!
//! Object-valued fields are held behind [`Rc`]. The reconciler compares them by
//! identity, never by content: cloning a [`Descriptor`] (or reusing the same
//! `Rc`) marks a field as unchanged, while building an identical value from
//! scratch marks it as changed and reapplies it.

use std::rc::Rc;

use crate::attribute::AttributeSet;

/// The six head tag kinds, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<base>`
    Base,
    /// `<meta>`
    Meta,
    /// `<link>`
    Link,
    /// `<style>`
    Style,
    /// `<script>`
    Script,
    /// `<noscript>`
    Noscript,
}

impl TagKind {
    /// Every tag kind in the order it is applied and serialized.
    pub const ALL: [Self; 6] = [
        Self::Base,
        Self::Meta,
        Self::Link,
        Self::Style,
        Self::Script,
        Self::Noscript,
    ];

    /// The element tag name.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Style => "style",
            Self::Script => "script",
            Self::Noscript => "noscript",
        }
    }
}

/// Value of a tag-kind field: one attribute set or an ordered sequence of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Tags {
    /// One element per entry, in order.
    Many(Vec<AttributeSet>),
    /// Exactly one element.
    One(AttributeSet),
}

impl Tags {
    /// The attribute sets to emit, in order.
    #[must_use]
    pub fn entries(&self) -> &[AttributeSet] {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => core::slice::from_ref(entry),
        }
    }
}

impl From<AttributeSet> for Tags {
    fn from(value: AttributeSet) -> Self {
        Self::One(value)
    }
}

impl From<Vec<AttributeSet>> for Tags {
    fn from(value: Vec<AttributeSet>) -> Self {
        Self::Many(value)
    }
}

impl<const N: usize> From<[AttributeSet; N]> for Tags {
    fn from(value: [AttributeSet; N]) -> Self {
        Self::Many(value.into())
    }
}

/// Head state declared by one caller for one update.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Descriptor {
    /// Document title. Compared by value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// `<base>` element.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub base: Option<Rc<Tags>>,
    /// `<meta>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub meta: Option<Rc<Tags>>,
    /// `<link>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub link: Option<Rc<Tags>>,
    /// `<style>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub style: Option<Rc<Tags>>,
    /// `<script>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub script: Option<Rc<Tags>>,
    /// `<noscript>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub noscript: Option<Rc<Tags>>,
    /// Attributes for the root `<html>` element.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub html_attributes: Option<Rc<AttributeSet>>,
    /// Attributes for the `<body>` element.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub body_attributes: Option<Rc<AttributeSet>>,
}

impl Descriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            base: None,
            meta: None,
            link: None,
            style: None,
            script: None,
            noscript: None,
            html_attributes: None,
            body_attributes: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the field for `kind` to a freshly allocated value.
    #[must_use]
    pub fn with_tags(mut self, kind: TagKind, tags: impl Into<Tags>) -> Self {
        *self.tags_slot(kind) = Some(Rc::new(tags.into()));
        self
    }

    /// Sets the field for `kind` to an existing shared value.
    #[must_use]
    pub fn with_shared_tags(mut self, kind: TagKind, tags: Rc<Tags>) -> Self {
        *self.tags_slot(kind) = Some(tags);
        self
    }

    /// Sets the `<base>` element.
    #[must_use]
    pub fn with_base(self, base: AttributeSet) -> Self {
        self.with_tags(TagKind::Base, base)
    }

    /// Sets the `<meta>` elements.
    #[must_use]
    pub fn with_meta(self, meta: impl Into<Tags>) -> Self {
        self.with_tags(TagKind::Meta, meta)
    }

    /// Sets the `<link>` elements.
    #[must_use]
    pub fn with_link(self, link: impl Into<Tags>) -> Self {
        self.with_tags(TagKind::Link, link)
    }

    /// Sets the `<style>` elements.
    #[must_use]
    pub fn with_style(self, style: impl Into<Tags>) -> Self {
        self.with_tags(TagKind::Style, style)
    }

    /// Sets the `<script>` elements.
    #[must_use]
    pub fn with_script(self, script: impl Into<Tags>) -> Self {
        self.with_tags(TagKind::Script, script)
    }

    /// Sets the `<noscript>` elements.
    #[must_use]
    pub fn with_noscript(self, noscript: impl Into<Tags>) -> Self {
        self.with_tags(TagKind::Noscript, noscript)
    }

    /// Sets the attributes of the root `<html>` element.
    #[must_use]
    pub fn with_html_attributes(mut self, attributes: AttributeSet) -> Self {
        self.html_attributes = Some(Rc::new(attributes));
        self
    }

    /// Sets the attributes of the `<body>` element.
    #[must_use]
    pub fn with_body_attributes(mut self, attributes: AttributeSet) -> Self {
        self.body_attributes = Some(Rc::new(attributes));
        self
    }

    /// Returns the field for `kind`.
    #[must_use]
    pub const fn tags(&self, kind: TagKind) -> Option<&Rc<Tags>> {
        match kind {
            TagKind::Base => self.base.as_ref(),
            TagKind::Meta => self.meta.as_ref(),
            TagKind::Link => self.link.as_ref(),
            TagKind::Style => self.style.as_ref(),
            TagKind::Script => self.script.as_ref(),
            TagKind::Noscript => self.noscript.as_ref(),
        }
    }

    const fn tags_slot(&mut self, kind: TagKind) -> &mut Option<Rc<Tags>> {
        match kind {
            TagKind::Base => &mut self.base,
            TagKind::Meta => &mut self.meta,
            TagKind::Link => &mut self.link,
            TagKind::Style => &mut self.style,
            TagKind::Script => &mut self.script,
            TagKind::Noscript => &mut self.noscript,
        }
    }

    /// Copies every field present in `next` over this descriptor.
    ///
    /// Tag-kind fields are replaced as a whole, so a shorter sequence in
    /// `next` drops the entries it does not repeat.
    pub fn merge(&mut self, next: Self) {
        let Self {
            title,
            base,
            meta,
            link,
            style,
            script,
            noscript,
            html_attributes,
            body_attributes,
        } = next;

        if title.is_some() {
            self.title = title;
        }
        if html_attributes.is_some() {
            self.html_attributes = html_attributes;
        }
        if body_attributes.is_some() {
            self.body_attributes = body_attributes;
        }
        let kinds = [base, meta, link, style, script, noscript];
        for (kind, tags) in TagKind::ALL.into_iter().zip(kinds) {
            if tags.is_some() {
                *self.tags_slot(kind) = tags;
            }
        }
    }

    /// Returns a copy holding only the title and the root/body attributes.
    #[must_use]
    pub fn without_tags(&self) -> Self {
        Self {
            title: self.title.clone(),
            html_attributes: self.html_attributes.clone(),
            body_attributes: self.body_attributes.clone(),
            ..Self::new()
        }
    }
}
