//! Derive macros for propman settings library
//!
//! This crate provides `#[derive(Settings)]`, which generates the accessor
//! table propman uses to bind a struct to a properties file.
//!
//! # Usage
//!
//! ```text
//! use propman::Settings;
//!
//! #[derive(Default, Settings)]
//! struct AppSettings {
//!     theme: String,
//!
//!     #[property(rename = "fontsize")]
//!     font_size: f64,
//!
//!     #[property(skip)]
//!     dirty: bool,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, Meta, Type, parse_macro_input};

/// Derive macro for generating `Settings` implementations.
///
/// Every named field gets a read accessor (`get_<field>`, or `is_<field>` for
/// `bool`) and a write accessor (`set_<field>`). The property key is the field
/// name, lower-cased.
///
/// Field types must implement `propman::Bindable`: `String`, `bool`, `char`,
/// the integer and float types, and `Option` of any of them (where `None`
/// cannot be saved).
///
/// # Attributes
///
/// ## Field attributes (`#[property(...)]`)
/// - `rename = "key"` - Use `key` instead of the field name
/// - `skip` - Leave this field out of the properties file
#[proc_macro_derive(Settings, attributes(property))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Settings can only be derived for structs with named fields.\n\nExample:\n  #[derive(Default, Settings)]\n  struct MySettings {\n      field: Type,\n  }",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Settings can only be derived for structs.\n\nTry: #[derive(Settings)] on a struct, not an enum or union.",
            ));
        }
    };

    let mut accessors = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = parse_field_attrs(&field.attrs)?;

        // Skip fields marked with #[property(skip)]
        if attrs.skip {
            continue;
        }

        let key = attrs
            .rename
            .unwrap_or_else(|| field_name.unraw().to_string());
        if !is_valid_key(&key) {
            return Err(syn::Error::new_spanned(
                field_name,
                format!(
                    "'{key}' cannot be used as a property key: keys must start with a letter or digit and contain only letters, digits and '_'.\n\nTry: #[property(rename = \"my_key\")]"
                ),
            ));
        }

        let read_prefix = if is_bool(field_type) { "is" } else { "get" };
        let getter = format!("{read_prefix}_{key}");
        let setter = format!("set_{key}");

        accessors.push(quote! {
            propman::Accessor::read(
                #getter,
                <#field_type as propman::Bindable>::value_type(),
                |settings: &Self| propman::Bindable::read_value(&settings.#field_name),
            ),
            propman::Accessor::write(
                #setter,
                <#field_type as propman::Bindable>::value_type(),
                |settings: &mut Self, value: propman::Value| {
                    settings.#field_name = <#field_type as propman::Bindable>::write_value(value)?;
                    ::core::result::Result::Ok(())
                },
            ),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics propman::Settings for #name #ty_generics #where_clause {
            fn accessors() -> ::std::vec::Vec<propman::Accessor<Self>> {
                ::std::vec![#(#accessors)*]
            }
        }
    })
}

/// Field-level attributes from #[property(...)]
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }

        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;

        for meta in nested {
            match meta {
                Meta::Path(path) if path.is_ident("skip") => {
                    result.skip = true;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let Expr::Lit(lit) = &nv.value {
                        if let Lit::Str(s) = &lit.lit {
                            result.rename = Some(s.value());
                            continue;
                        }
                    }
                    return Err(syn::Error::new_spanned(
                        &nv.value,
                        "#[property(rename)] must be a string literal.\n\nExample: #[property(rename = \"fontsize\")]",
                    ));
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "Unknown property attribute. Expected `skip` or `rename = \"...\"`",
                    ));
                }
            }
        }
    }

    Ok(result)
}

/// Keys must survive accessor-name classification unchanged (`get_<key>`)
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check if a field is a plain `bool` (read through `is_<field>`)
fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("bool"))
}
