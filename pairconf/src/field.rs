//! Field descriptors generated by `#[derive(PairConf)]`

use crate::path;

/// One struct field as seen by the walker.
///
/// The derive macro emits a `&'static [Field]` table per struct; fields
/// marked `#[conf(skip)]` are left out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Identifier as declared in the struct.
    pub ident: &'static str,
    /// Short key name: the `name` attribute, or the identifier.
    pub name: &'static str,
    /// Embedded field: children share the parent's path.
    pub flatten: bool,
    /// Remove consumed keys from the backing store.
    pub delenv: bool,
    /// Skip this field when encoding if it is zero.
    pub omit_empty: bool,
}

impl Field {
    /// Descriptor for a plain field keyed by its identifier.
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            name: ident,
            flatten: false,
            delenv: false,
            omit_empty: false,
        }
    }

    /// Full key path of this field below `parent`.
    pub fn key(&self, parent: &str, sep: &str, preserve_case: bool) -> String {
        if self.flatten {
            return path::join(parent, "", sep);
        }
        path::join(parent, &path::short_name(self.name, preserve_case), sep)
    }
}
