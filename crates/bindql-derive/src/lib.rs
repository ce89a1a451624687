//! Derive macro for types named in annotated SQL statements.
//!
//! This crate provides `#[derive(Describable)]`, which exposes a struct's
//! name and column tags to `bindql-core` as compile-time constants.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Meta, parse_macro_input};

/// Derives the `Describable` trait for a struct.
///
/// # Attributes
///
/// - `#[describe(name = "TypeName")]` - The name statements use for the type
///   (optional, defaults to the struct name)
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - The column name statements use
///   (optional, defaults to the field name)
/// - `#[column(omit_empty)]` - The field may be left out when empty
/// - `#[column(skip)]` - The field is not a column
///
/// Unknown options, empty names and repeated column names are rejected at
/// compile time.
#[proc_macro_derive(Describable, attributes(describe, column))]
pub fn derive_describable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_describable_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_describable_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let type_name = get_type_name(&input.attrs)?
        .unwrap_or_else(|| struct_name.unraw().to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Describable derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Describable derive only supports structs",
            ));
        }
    };

    let mut columns: Vec<ColumnInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_column_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let field_name = field_name.unraw().to_string();
        let column_name = attrs.name.unwrap_or_else(|| field_name.clone());
        if columns.iter().any(|c| c.column_name == column_name) {
            return Err(syn::Error::new_spanned(
                field,
                format!("column {column_name:?} is declared more than once"),
            ));
        }

        columns.push(ColumnInfo {
            field_name,
            column_name,
            omit_empty: attrs.omit_empty,
        });
    }

    let tags = columns.iter().map(|info| {
        let column = &info.column_name;
        let field = &info.field_name;
        let omit_empty = info.omit_empty;
        quote! {
            ::bindql_core::schema::FieldTag {
                column: #column,
                field: #field,
                omit_empty: #omit_empty,
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bindql_core::schema::Describable
            for #struct_name #ty_generics #where_clause
        {
            const TYPE_NAME: &'static str = #type_name;
            const FIELDS: &'static [::bindql_core::schema::FieldTag] = &[
                #(#tags),*
            ];
        }
    })
}

struct ColumnInfo {
    field_name: String,
    column_name: String,
    omit_empty: bool,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    omit_empty: bool,
    skip: bool,
}

/// Parses `name = "..."`, rejecting an empty name.
fn parse_name(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let lit: LitStr = meta.value()?.parse()?;
    let name = lit.value();
    if name.is_empty() {
        return Err(syn::Error::new_spanned(lit, "name must not be empty"));
    }
    Ok(name)
}

fn get_type_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut type_name = None;
    for attr in attrs {
        if attr.path().is_ident("describe") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    type_name = Some(parse_name(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unknown describe option, expected `name`"))
                }
            })?;
        }
    }
    Ok(type_name)
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("column") {
            // A bare `#[column]` changes nothing.
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    result.name = Some(parse_name(&meta)?);
                } else if meta.path.is_ident("omit_empty") {
                    result.omit_empty = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    return Err(meta.error(
                        "unknown column option, expected `name`, `omit_empty` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}
