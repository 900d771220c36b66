//! Ad-hoc element attributes and their tag fragment serialization.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Flat key/value store of HTML tag attributes.
///
/// Keys are kept sorted, so [`AttributeMap::to_fragment`] is deterministic.
/// Values are emitted verbatim: a value containing `"` yields a malformed
/// fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, String>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when the attribute was never set.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Merge `other` into self; keys present in both take `other`'s value.
    pub fn extend(&mut self, other: &AttributeMap) {
        for (k, v) in other.iter() {
            self.0.insert(k.to_string(), v.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key="value"` pairs separated by single spaces.
    ///
    /// `["dir":"ltr", "draggable":"true"]` renders `dir="ltr" draggable="true"`.
    pub fn to_fragment(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .join(" ")
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_several_attributes_when_rendering_then_pairs_are_sorted_and_space_separated() {
        let attrs: AttributeMap = [("href", "/"), ("dir", "ltr"), ("data-toggle", "f1")]
            .into_iter()
            .collect();

        assert_eq!(
            attrs.to_fragment(),
            r#"data-toggle="f1" dir="ltr" href="/""#
        );
    }

    #[test]
    fn given_empty_map_when_rendering_then_fragment_is_empty() {
        assert_eq!(AttributeMap::new().to_fragment(), "");
    }

    #[test]
    fn given_missing_key_when_getting_then_returns_empty_string() {
        let attrs = AttributeMap::new();
        assert_eq!(attrs.get("nope"), "");
    }

    #[test]
    fn given_quote_in_value_when_rendering_then_value_is_not_escaped() {
        let mut attrs = AttributeMap::new();
        attrs.insert("title", r#"say "hi""#);
        assert_eq!(attrs.to_fragment(), r#"title="say "hi"""#);
    }

    #[test]
    fn given_overlapping_maps_when_extending_then_other_wins() {
        let mut base: AttributeMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let overlay: AttributeMap = [("b", "3"), ("c", "4")].into_iter().collect();

        base.extend(&overlay);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get("b"), "3");
        assert_eq!(base.get("c"), "4");
    }
}
