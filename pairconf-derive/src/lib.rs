//! Derive macro implementation for pairconf

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Generics};

mod attrs;

use attrs::{Capability, ContainerAttrs, FieldAttrs};

/// `PairConf` derive macro
///
/// For a struct with named fields, implements `pairconf::Value` (walking
/// every field) and `pairconf::PairConf` (prefix and field descriptors).
/// For a type marked with a capability, implements `pairconf::Value` by
/// delegating to that capability.
///
/// # Supported Attributes
///
/// **Container-level**:
/// - `#[conf(prefix = "APP")]`: Default root prefix
/// - `#[conf(custom)]`: Use `UnmarshalEnv` / `MarshalEnv`
/// - `#[conf(text)]`: Use `FromStr` / `Display`
/// - `#[conf(binary)]`: Use `BinaryCodec`
///
/// **Field-level**:
/// - `#[conf(name = "key")]`: Custom short key name
/// - `#[conf(skip)]`: Ignore the field
/// - `#[conf(flatten)]`: Embed the field's children in the parent path
/// - `#[conf(delenv)]`: Delete consumed variables
/// - `#[conf(omitempty)]`: Skip zero values when encoding
/// - `#[conf(text)]`: Use `FromStr` / `Display` for this field
///
/// # Example
///
/// See the `pairconf` crate documentation for usage examples.
#[proc_macro_derive(PairConf, attributes(conf))]
pub fn derive_pairconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    if let Some(capability) = container.capability() {
        if container.prefix.is_some() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "prefix only applies to structs walked field by field, not to codec types",
            ));
        }
        return Ok(expand_capability(input, capability));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "PairConf only supports structs with named fields; \
                     mark other types with #[conf(custom)], #[conf(text)] or #[conf(binary)]",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "PairConf only supports structs; \
                 mark other types with #[conf(custom)], #[conf(text)] or #[conf(binary)]",
            ));
        }
    };

    let ident = &input.ident;
    let generics = with_value_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let prefix = container.prefix.unwrap_or_default();

    let mut zero_inits = Vec::new();
    let mut zero_checks = Vec::new();
    let mut decode_calls = Vec::new();
    let mut encode_calls = Vec::new();
    let mut descriptors = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        if attrs.skip {
            zero_inits.push(quote! { #field_ident: ::core::default::Default::default() });
            continue;
        }

        let index = descriptors.len();
        let declared = field_ident.unraw().to_string();
        let name = attrs.name.clone().unwrap_or_else(|| declared.clone());
        let flatten = attrs.flatten;
        let delenv = attrs.delenv;
        let omit_empty = attrs.omit_empty;

        descriptors.push(quote! {
            ::pairconf::Field {
                ident: #declared,
                name: #name,
                flatten: #flatten,
                delenv: #delenv,
                omit_empty: #omit_empty,
            }
        });

        let descriptor = quote! { &<Self as ::pairconf::PairConf>::FIELDS[#index] };
        if attrs.text {
            zero_inits.push(quote! { #field_ident: ::core::default::Default::default() });
            zero_checks.push(quote! { ::pairconf::codec::text_is_zero(&self.#field_ident) });
            decode_calls.push(quote! {
                __found |= __de.text_field(&mut self.#field_ident, __key, #descriptor)?;
            });
            encode_calls.push(quote! {
                __en.text_field(&self.#field_ident, __key, #descriptor, __out)?;
            });
        } else {
            zero_inits.push(quote! { #field_ident: ::pairconf::Value::zero() });
            zero_checks.push(quote! { ::pairconf::Value::is_zero(&self.#field_ident) });
            decode_calls.push(quote! {
                __found |= __de.field(&mut self.#field_ident, __key, #descriptor)?;
            });
            encode_calls.push(quote! {
                __en.field(&self.#field_ident, __key, #descriptor, __out)?;
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::pairconf::Value for #ident #ty_generics #where_clause {
            const KIND: ::pairconf::Kind = ::pairconf::Kind::Struct;

            fn zero() -> Self {
                Self {
                    #(#zero_inits),*
                }
            }

            fn is_zero(&self) -> bool {
                true #(&& #zero_checks)*
            }

            fn decode(
                &mut self,
                __de: &mut ::pairconf::Decoder<'_>,
                __key: &str,
                _raw: ::core::option::Option<&str>,
            ) -> ::core::result::Result<bool, ::pairconf::Error> {
                #[allow(unused_mut)]
                let mut __found = false;
                #(#decode_calls)*
                Ok(__found)
            }

            fn encode(
                &self,
                __en: &mut ::pairconf::Encoder<'_>,
                __key: &str,
                __out: &mut ::pairconf::Pairs,
            ) -> ::core::result::Result<(), ::pairconf::Error> {
                #(#encode_calls)*
                Ok(())
            }
        }

        impl #impl_generics ::pairconf::PairConf for #ident #ty_generics #where_clause {
            const PREFIX: &'static str = #prefix;
            const FIELDS: &'static [::pairconf::Field] = &[
                #(#descriptors),*
            ];
        }
    })
}

/// `Value` for a type handled entirely by one capability codec.
fn expand_capability(input: &DeriveInput, capability: Capability) -> TokenStream2 {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (kind, is_zero, decode, encode) = match capability {
        Capability::Custom => (
            quote! { Custom },
            quote! { ::pairconf::codec::MarshalEnv::is_unset(self) },
            quote! { ::pairconf::codec::decode_custom(self, de, key, raw) },
            quote! { ::pairconf::codec::encode_custom(self, en, key, out) },
        ),
        Capability::Text => (
            quote! { Text },
            quote! { ::pairconf::codec::text_is_zero(self) },
            quote! { ::pairconf::codec::decode_text(self, de, key, raw) },
            quote! {{
                let _ = en;
                ::pairconf::codec::encode_text(self, key, out);
                Ok(())
            }},
        ),
        Capability::Binary => (
            quote! { Binary },
            quote! { ::pairconf::codec::binary_is_zero(self) },
            quote! { ::pairconf::codec::decode_binary(self, de, key, raw) },
            quote! { ::pairconf::codec::encode_binary(self, en, key, out) },
        ),
    };

    quote! {
        impl #impl_generics ::pairconf::Value for #ident #ty_generics #where_clause {
            const KIND: ::pairconf::Kind = ::pairconf::Kind::#kind;

            fn zero() -> Self {
                ::core::default::Default::default()
            }

            fn is_zero(&self) -> bool {
                #is_zero
            }

            fn decode(
                &mut self,
                de: &mut ::pairconf::Decoder<'_>,
                key: &str,
                raw: ::core::option::Option<&str>,
            ) -> ::core::result::Result<bool, ::pairconf::Error> {
                #decode
            }

            fn encode(
                &self,
                en: &mut ::pairconf::Encoder<'_>,
                key: &str,
                out: &mut ::pairconf::Pairs,
            ) -> ::core::result::Result<(), ::pairconf::Error> {
                #encode
            }
        }
    }
}

/// Require `Value` on every type parameter.
fn with_value_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::pairconf::Value));
    }
    generics
}
