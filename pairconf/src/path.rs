//! Key path composition
//!
//! Every node of a walked structure owns one key path. A field's path is its
//! parent's path joined with the field's short name; vector elements append
//! their index and map entries append their key, always with the same
//! separator:
//!
//! ```text
//! APP                      root prefix
//! APP_SERVER               struct field `server`
//! APP_SERVER_PORTS_0       first element of `server.ports`
//! APP_LABELS_team          map entry `labels["team"]`
//! ```

/// Separator used between path segments unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Join `prefix` and `name` with `sep`, trimming separators from both ends.
///
/// An empty prefix or an empty name never leaves a dangling separator, which
/// is what lets flattened fields share their parent's path.
pub fn join(prefix: &str, name: &str, sep: &str) -> String {
    let joined = [prefix, name].join(sep);
    trim(&joined, sep).to_string()
}

/// Path of the vector element at `index` below `parent`.
pub fn index(parent: &str, index: usize, sep: &str) -> String {
    format!("{parent}{sep}{index}")
}

/// Path of the map entry `key` below `parent`. The key keeps its case.
pub fn member(parent: &str, key: &str, sep: &str) -> String {
    format!("{parent}{sep}{key}")
}

/// Short key name for a field, applying the case policy.
///
/// Names are upper-cased for environment-style keys unless `preserve_case`
/// is set. A leading `r#` from a raw identifier is dropped.
pub fn short_name(name: &str, preserve_case: bool) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    if preserve_case {
        name.to_string()
    } else {
        name.to_uppercase()
    }
}

/// First segment of `key` below `prefix`, if `key` lives under `prefix`.
pub fn next_segment<'k>(key: &'k str, prefix: &str, sep: &str) -> Option<&'k str> {
    if sep.is_empty() {
        return None;
    }
    let rest = key.strip_prefix(prefix)?.strip_prefix(sep)?;
    let segment = rest.split(sep).next().unwrap_or(rest);
    (!segment.is_empty()).then_some(segment)
}

fn trim<'s>(value: &'s str, sep: &str) -> &'s str {
    if sep.is_empty() {
        return value;
    }
    let mut value = value;
    while let Some(rest) = value.strip_prefix(sep) {
        value = rest;
    }
    while let Some(rest) = value.strip_suffix(sep) {
        value = rest;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_with_prefix() {
        assert_eq!(join("PFX", "NAME", "_"), "PFX_NAME");
    }

    #[test]
    fn test_join_empty_prefix_has_no_leading_separator() {
        assert_eq!(join("", "NAME", "_"), "NAME");
    }

    #[test]
    fn test_join_empty_name_keeps_parent() {
        assert_eq!(join("PFX_SUB", "", "_"), "PFX_SUB");
    }

    #[test]
    fn test_join_trims_every_edge_separator() {
        assert_eq!(join("_PFX_", "_NAME_", "_"), "PFX___NAME");
        assert_eq!(join("APP", "PORT", "__"), "APP__PORT");
    }

    #[test]
    fn test_index_and_member() {
        assert_eq!(index("PFX_LIST", 3, "_"), "PFX_LIST_3");
        assert_eq!(member("PFX_M", "mapKey", "_"), "PFX_M_mapKey");
    }

    #[test]
    fn test_short_name_case_policy() {
        assert_eq!(short_name("database_url", false), "DATABASE_URL");
        assert_eq!(short_name("database_url", true), "database_url");
        assert_eq!(short_name("r#type", false), "TYPE");
    }

    #[test]
    fn test_next_segment() {
        assert_eq!(next_segment("PFX_M_KEY1", "PFX_M", "_"), Some("KEY1"));
        assert_eq!(next_segment("PFX_M_server99_0", "PFX_M", "_"), Some("server99"));
        assert_eq!(next_segment("PFX_MAP_KEY1", "PFX_M", "_"), None);
        assert_eq!(next_segment("PFX_M", "PFX_M", "_"), None);
        assert_eq!(next_segment("PFX_M_", "PFX_M", "_"), None);
    }
}
