//! The flat key/value table that is the wire format in both directions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path;

/// Flat table of key paths to raw string values.
///
/// Keys are unique and iterate in sorted order, which keeps the rendered
/// line lists stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pairs(BTreeMap<String, String>);

impl Pairs {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `NAME=value` lines, as returned by `env` or
    /// `std::env::vars` rendered back to text.
    ///
    /// Only the first `=` separates the name from the value. Lines without
    /// an `=` are ignored. With a non-empty `prefix`, only names starting
    /// with it are kept.
    pub fn from_env_lines<I, S>(prefix: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| {
                let (name, value) = line.as_ref().split_once('=')?;
                name.starts_with(prefix)
                    .then(|| (name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Value stored at exactly `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether `key` is present, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Store `value` at `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Copy every pair of `other` into this table; `other` wins on conflicts.
    pub fn merge(&mut self, other: Pairs) {
        self.0.extend(other.0);
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Discover the child segments directly below `prefix`.
    ///
    /// Every key starting with `prefix` + `sep` contributes its next
    /// segment. The value attached to a segment is the one stored at exactly
    /// `prefix` + `sep` + segment; it is `None` when only deeper keys exist.
    ///
    /// ```
    /// use pairconf::Pairs;
    ///
    /// let pairs: Pairs = [("M_a", "1"), ("M_b_0", "2"), ("MX_c", "3")].into_iter().collect();
    /// let children = pairs.children("M", "_");
    /// assert_eq!(children.get("a"), Some(&Some("1")));
    /// assert_eq!(children.get("b"), Some(&None));
    /// assert_eq!(children.len(), 2);
    /// ```
    pub fn children<'p>(&'p self, prefix: &str, sep: &str) -> BTreeMap<&'p str, Option<&'p str>> {
        let mut children = BTreeMap::new();
        for key in self.0.keys() {
            if let Some(segment) = path::next_segment(key, prefix, sep) {
                let direct = self.get(&path::member(prefix, segment, sep));
                children.insert(segment, direct);
            }
        }
        children
    }

    /// Pairs whose key starts with `prefix`, unchanged.
    pub fn filter(&self, prefix: &str) -> Pairs {
        self.0
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Render as `KEY=value` lines.
    pub fn env_lines(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Render as shell-style `KEY="value"` lines.
    pub fn quoted_lines(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect()
    }

    /// Consume the table into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for Pairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.env_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Pairs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> Extend<(K, V)> for Pairs
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<BTreeMap<String, String>> for Pairs {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<std::collections::HashMap<String, String>> for Pairs {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for Pairs {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_lines_splits_on_first_equals() {
        let pairs = Pairs::from_env_lines(
            "APP",
            ["APP_URL=postgres://h/db?opt=1", "OTHER=x", "APP_EMPTY=", "broken"],
        );

        assert_eq!(pairs.get("APP_URL"), Some("postgres://h/db?opt=1"));
        assert_eq!(pairs.get("APP_EMPTY"), Some(""));
        assert!(!pairs.contains("OTHER"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_from_env_lines_without_prefix_keeps_everything() {
        let pairs = Pairs::from_env_lines("", ["A=1", "B=2"]);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_children_discovers_map_keys() {
        let pairs: Pairs = [
            ("PFX_M_KEY1", "v1"),
            ("PFX_M_KEY2", "v2"),
            ("PFX_M_server99_0", "128"),
            ("PFX_MORE", "ignored"),
        ]
        .into_iter()
        .collect();

        let children = pairs.children("PFX_M", "_");
        let keys: Vec<_> = children.keys().copied().collect();
        assert_eq!(keys, ["KEY1", "KEY2", "server99"]);
        assert_eq!(children["KEY1"], Some("v1"));
        assert_eq!(children["server99"], None);
    }

    #[test]
    fn test_merge_overrides() {
        let mut left: Pairs = [("A", "1"), ("B", "2")].into_iter().collect();
        let right: Pairs = [("B", "3"), ("C", "4")].into_iter().collect();
        left.merge(right);

        assert_eq!(left.get("B"), Some("3"));
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_renderings() {
        let pairs: Pairs = [("PFX_NAME", "golift"), ("PFX_EQ", "a=b")].into_iter().collect();

        assert_eq!(pairs.env_lines(), ["PFX_EQ=a=b", "PFX_NAME=golift"]);
        assert_eq!(pairs.quoted_lines(), ["PFX_EQ=\"a=b\"", "PFX_NAME=\"golift\""]);
        assert_eq!(pairs.to_string(), "PFX_EQ=a=b\nPFX_NAME=golift\n");
    }

    #[test]
    fn test_json_roundtrip_is_flat_object() {
        let pairs: Pairs = [("A_B", "1")].into_iter().collect();
        let json = serde_json::to_string(&pairs).unwrap();
        assert_eq!(json, r#"{"A_B":"1"}"#);

        let back: Pairs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pairs);
    }
}
