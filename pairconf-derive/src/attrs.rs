//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! Unknown keys and invalid combinations are reported as compile errors
//! pointing at the offending attribute.

use syn::{Attribute, Field, LitStr};

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Short key name override. The field identifier is used otherwise.
    pub name: Option<String>,

    /// Never read or written.
    pub skip: bool,

    /// Children share the parent's key path.
    pub flatten: bool,

    /// Delete consumed variables from the backing store.
    pub delenv: bool,

    /// Leave zero values out when encoding.
    pub omit_empty: bool,

    /// Convert with `FromStr` and `Display` instead of `Value`.
    pub text: bool,
}

impl FieldAttrs {
    /// Extract and validate `#[conf(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in conf_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new_spanned(name, "name must not be empty"));
                    }
                    attrs.name = Some(name.value());
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("flatten") {
                    attrs.flatten = true;
                    return Ok(());
                }

                if meta.path.is_ident("delenv") {
                    attrs.delenv = true;
                    return Ok(());
                }

                if meta.path.is_ident("omitempty") {
                    attrs.omit_empty = true;
                    return Ok(());
                }

                if meta.path.is_ident("text") {
                    attrs.text = true;
                    return Ok(());
                }

                Err(meta.error("unsupported conf attribute"))
            })?;
        }

        attrs.validate(field)?;
        Ok(attrs)
    }

    fn validate(&self, field: &Field) -> syn::Result<()> {
        let conflict = |message: &str| Err(syn::Error::new_spanned(field, message));

        if self.skip && (self.name.is_some() || self.flatten || self.delenv || self.omit_empty || self.text) {
            return conflict("skip cannot be combined with other conf attributes");
        }
        if self.flatten && self.name.is_some() {
            return conflict("flatten fields have no key of their own, remove `name`");
        }
        if self.flatten && self.text {
            return conflict("flatten and text cannot be combined");
        }
        Ok(())
    }
}

/// Which capability codec handles a whole type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Custom,
    Text,
    Binary,
}

/// Parsed `#[conf(...)]` attributes from the deriving type.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Default root prefix for `PairConf` methods.
    pub prefix: Option<String>,

    pub custom: bool,
    pub text: bool,
    pub binary: bool,
}

impl ContainerAttrs {
    /// Extract `#[conf(...)]` attributes from the type definition.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in conf_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let prefix: LitStr = meta.value()?.parse()?;
                    parsed.prefix = Some(prefix.value());
                    return Ok(());
                }

                if meta.path.is_ident("custom") {
                    parsed.custom = true;
                    return Ok(());
                }

                if meta.path.is_ident("text") {
                    parsed.text = true;
                    return Ok(());
                }

                if meta.path.is_ident("binary") {
                    parsed.binary = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level conf attribute"))
            })?;
        }

        Ok(parsed)
    }

    /// The capability in effect: custom before text before binary.
    pub fn capability(&self) -> Option<Capability> {
        if self.custom {
            Some(Capability::Custom)
        } else if self.text {
            Some(Capability::Text)
        } else if self.binary {
            Some(Capability::Binary)
        } else {
            None
        }
    }
}

fn conf_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("conf"))
}
