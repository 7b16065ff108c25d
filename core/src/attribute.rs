//! Attribute values and insertion-ordered attribute sets.

use std::borrow::Cow;

/// Value of a single attribute in an [`AttributeSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Text written verbatim into the document.
    Text(String),
    /// Boolean flag such as `defer` or `async`, written with its string form.
    Flag(bool),
    /// Removes the attribute from the element it is applied to.
    Unset,
}

impl AttrValue {
    /// Returns the string written into the document, or `None` for [`AttrValue::Unset`].
    #[must_use]
    pub fn as_attribute(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Flag(true) => Some(Cow::Borrowed("true")),
            Self::Flag(false) => Some(Cow::Borrowed("false")),
            Self::Unset => None,
        }
    }

    /// Returns `true` if this value removes the attribute.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Into::into)
    }
}

/// Attribute names mapped to values, kept in insertion order.
///
/// Names are unique: inserting a name that already exists replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an attribute and returns the set, for chained construction.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts an attribute, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            return Some(core::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the set mentions `name`, including as [`AttrValue::Unset`].
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of attributes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the set as `name="value"` pairs separated by single spaces.
    ///
    /// Unset attributes are skipped. Values are not escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            let Some(value) = value.as_attribute() else {
                continue;
            };
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&value);
            out.push('"');
        }
        out
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for AttributeSet {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{self, MapAccess, Visitor},
        ser::SerializeMap,
    };

    use super::{AttrValue, AttributeSet};

    impl Serialize for AttrValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Text(text) => serializer.serialize_str(text),
                Self::Flag(flag) => serializer.serialize_bool(*flag),
                Self::Unset => serializer.serialize_none(),
            }
        }
    }

    struct AttrValueVisitor;

    impl<'de> Visitor<'de> for AttrValueVisitor {
        type Value = AttrValue;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, boolean, number or null")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(AttrValue::Flag(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(AttrValue::Text(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(AttrValue::Text(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(AttrValue::Text(v.to_string()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(AttrValue::Text(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(AttrValue::Text(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(AttrValue::Unset)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(AttrValue::Unset)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }
    }

    impl<'de> Deserialize<'de> for AttrValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(AttrValueVisitor)
        }
    }

    impl Serialize for AttributeSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self.iter() {
                map.serialize_entry(name, value)?;
            }
            map.end()
        }
    }

    struct AttributeSetVisitor;

    impl<'de> Visitor<'de> for AttributeSetVisitor {
        type Value = AttributeSet;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of attribute names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut set = AttributeSet::new();
            while let Some((name, value)) = access.next_entry::<String, AttrValue>()? {
                set.insert(name, value);
            }
            Ok(set)
        }
    }

    impl<'de> Deserialize<'de> for AttributeSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(AttributeSetVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut set = AttributeSet::new().with("name", "a").with("content", "b");
        assert_eq!(set.insert("name", "c"), Some(AttrValue::from("a")));
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["name", "content"]);
        assert_eq!(set.get("name"), Some(&AttrValue::from("c")));
    }

    #[test]
    fn flags_use_their_string_form() {
        assert_eq!(AttrValue::Flag(true).as_attribute().as_deref(), Some("true"));
        assert_eq!(AttrValue::Flag(false).as_attribute().as_deref(), Some("false"));
        assert_eq!(AttrValue::Unset.as_attribute(), None);
        assert!(AttrValue::from(None::<&str>).is_unset());
    }

    #[test]
    fn to_html_keeps_order_and_skips_unset() {
        let set = AttributeSet::from([
            ("src", AttrValue::from("/app.js")),
            ("nonce", AttrValue::Unset),
            ("defer", AttrValue::from(true)),
        ]);
        assert_eq!(set.to_html(), r#"src="/app.js" defer="true""#);
    }

    #[test]
    fn to_html_does_not_escape() {
        let set = AttributeSet::new().with("content", r#"a "quoted" <value>"#);
        assert_eq!(set.to_html(), r#"content="a "quoted" <value>""#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_preserves_key_order() {
        let set: AttributeSet =
            serde_json::from_str(r#"{"z":"1","a":true,"m":null,"n":3}"#).unwrap();
        let entries: Vec<_> = set.iter().collect();
        assert_eq!(
            entries,
            [
                ("z", &AttrValue::from("1")),
                ("a", &AttrValue::Flag(true)),
                ("m", &AttrValue::Unset),
                ("n", &AttrValue::from("3")),
            ]
        );
    }
}
