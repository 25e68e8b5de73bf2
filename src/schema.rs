//! Shape helpers for the XML-derived JSON the e-Stat API returns.
//!
//! The service converts XML to JSON mechanically, so any repeated element
//! collapses to a bare object when it occurs once and becomes an array when it
//! occurs more than once. Text nodes that carry attributes turn into
//! `{"@attr": .., "$": "text"}`. Everything downstream goes through the types
//! in this module instead of special-casing either form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A node that is either a lone record or a sequence of records.
///
/// Serializes back in the shape it was read in, so a raw capture stays
/// faithful to the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Uniform view as a slice; a lone record is a one-element slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(v) => v.as_slice(),
            OneOrMany::One(t) => std::slice::from_ref(t),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// First record matching `pred`.
    pub fn find<P>(&self, pred: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        find_first(self.as_slice(), pred)
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// Return the first record in `items` matching `pred`, if any.
pub fn find_first<T, P>(items: &[T], pred: P) -> Option<&T>
where
    P: FnMut(&&T) -> bool,
{
    items.iter().find(pred)
}

/// Element text with attributes, e.g. `{"@code": "00200", "$": "Census"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedText {
    #[serde(rename = "$", default)]
    pub text: String,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

/// A text element that may or may not have been given attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextNode {
    Plain(String),
    Tagged(TaggedText),
}

impl TextNode {
    pub fn text(&self) -> &str {
        match self {
            TextNode::Plain(s) => s,
            TextNode::Tagged(t) => &t.text,
        }
    }

    /// Attribute value without the `@` prefix, e.g. `attr("code")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            TextNode::Plain(_) => None,
            TextNode::Tagged(t) => t.attrs.get(&format!("@{name}")).and_then(Value::as_str),
        }
    }
}

/// Serde helper: parse `u64` from either a JSON number or a string.
///
/// The service emits counters as numbers, but XML-derived
/// payloads occasionally carry them as strings.
pub(crate) fn de_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(v).map_err(|_| E::custom("negative value for u64"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<u64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// Serde helper: signed status code from either a JSON number or a string.
pub(crate) fn de_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::custom("status code out of range"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// Serde helper: cell text that is normally a string but may arrive as a bare number.
pub(crate) fn de_string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Same as [`de_u64_from_string_or_number`] for optional fields.
pub(crate) fn de_opt_u64_from_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "de_u64_from_string_or_number")] u64);

    Option::<Wrap>::deserialize(deserializer).map(|w| w.map(|Wrap(v)| v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        #[serde(rename = "@id")]
        id: String,
    }

    #[test]
    fn lone_record_and_one_element_array_normalize_identically() {
        let one: OneOrMany<Rec> = serde_json::from_str(r#"{"@id":"area"}"#).unwrap();
        let many: OneOrMany<Rec> = serde_json::from_str(r#"[{"@id":"area"}]"#).unwrap();
        assert_eq!(one.as_slice(), many.as_slice());
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn shape_is_preserved_on_serialize() {
        let one: OneOrMany<Rec> = serde_json::from_str(r#"{"@id":"time"}"#).unwrap();
        assert_eq!(serde_json::to_string(&one).unwrap(), r#"{"@id":"time"}"#);
        let many: OneOrMany<Rec> = serde_json::from_str(r#"[{"@id":"time"}]"#).unwrap();
        assert_eq!(serde_json::to_string(&many).unwrap(), r#"[{"@id":"time"}]"#);
    }

    #[test]
    fn find_returns_first_match_or_none() {
        let axes: OneOrMany<Rec> =
            serde_json::from_str(r#"[{"@id":"cat01"},{"@id":"area"},{"@id":"area"}]"#).unwrap();
        assert!(axes.find(|r| r.id == "area").is_some());
        assert!(axes.find(|r| r.id == "cat02").is_none());
        let empty: OneOrMany<Rec> = OneOrMany::default();
        assert!(empty.find(|_| true).is_none());
    }

    #[test]
    fn text_node_accepts_plain_and_tagged() {
        let plain: TextNode = serde_json::from_str(r#""Social statistics""#).unwrap();
        assert_eq!(plain.text(), "Social statistics");
        assert_eq!(plain.attr("code"), None);

        let tagged: TextNode =
            serde_json::from_str(r#"{"@code":"99","$":"Other"}"#).unwrap();
        assert_eq!(tagged.text(), "Other");
        assert_eq!(tagged.attr("code"), Some("99"));
    }
}
