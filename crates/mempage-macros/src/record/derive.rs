//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates implementations of `Record` and `Nested`, plus
//! serialized-name constants for building requests without string typos.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericParam, Ident, LitStr, Result, Type,
    WherePredicate,
};

use super::attrs::{field_ident_name, parse_container_attrs, parse_field_attrs, FieldAttr};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => return Ok(unit_impl(&input)),
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let container = parse_container_attrs(&input.attrs)?;
    let type_params: HashSet<Ident> = input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();

    let mut resolve_steps: Vec<TokenStream> = Vec::new();
    let mut read_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut const_names: HashSet<String> = HashSet::new();
    let mut bounds: Vec<WherePredicate> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let attr = parse_field_attrs(field)?;

        if attr.skip {
            continue;
        }

        let ident_name = field_ident_name(field_name);
        let structural = LitStr::new(&ident_name, field_name.span());
        let serialized = serialized_name(&attr, &ident_name, container.rule());
        let ty = &field.ty;

        // Flattened sub-records are searched before the field's own names
        if attr.flatten {
            resolve_steps.push(quote! {
                if let ::core::option::Option::Some(inner) =
                    ::mempage::Nested::nested_record(&self.#field_name)
                        .and_then(|record| record.resolve_tag(tag))
                {
                    return ::core::option::Option::Some(
                        ::mempage::FieldId::nested(#structural, inner),
                    );
                }
            });
        }

        let mut names: Vec<&str> = vec![serialized.as_str()];
        for alias in &attr.aliases {
            if !names.contains(&alias.as_str()) {
                names.push(alias);
            }
        }
        resolve_steps.push(quote! {
            if ::core::matches!(tag, #(#names)|*) {
                return ::core::option::Option::Some(::mempage::FieldId::new(#structural));
            }
        });

        if attr.opaque {
            read_arms.push(quote! {
                #structural if rest.is_empty() => ::core::option::Option::Some(
                    ::mempage::Value::Unsupported(::core::stringify!(#ty)),
                ),
            });
        } else if attr.is_record() {
            read_arms.push(quote! {
                #structural if rest.is_empty() => ::core::option::Option::Some(
                    ::mempage::Nested::nested_record(&self.#field_name)
                        .map_or(::mempage::Value::Null, ::mempage::Value::Record),
                ),
                #structural => ::mempage::Nested::nested_record(&self.#field_name)?.read_field(rest),
            });
        } else {
            read_arms.push(quote! {
                #structural if rest.is_empty() => ::core::option::Option::Some(
                    ::mempage::FieldValue::field_value(&self.#field_name),
                ),
            });
        }

        if !type_params.is_empty() && !attr.opaque && mentions_param(ty, &type_params) {
            let predicate = if attr.is_record() {
                syn::parse_quote!(#ty: ::mempage::Nested)
            } else {
                syn::parse_quote!(#ty: ::mempage::FieldValue)
            };
            bounds.push(predicate);
        }

        // Generate constant name (SCREAMING_SNAKE_CASE), first field wins
        let const_name = to_screaming_snake_case(&serialized);
        if let Ok(const_ident) = syn::parse_str::<Ident>(&const_name) {
            if const_names.insert(const_name) {
                let doc = format!("Serialized name of `{}`.", ident_name);
                field_constants.push(quote! {
                    #[doc = #doc]
                    pub const #const_ident: &'static str = #serialized;
                });
            }
        }
    }

    let mut generics = input.generics.clone();
    generics.make_where_clause().predicates.extend(bounds);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let resolve_body = if resolve_steps.is_empty() {
        quote! {
            let _ = tag;
            ::core::option::Option::None
        }
    } else {
        quote! {
            #(#resolve_steps)*
            ::core::option::Option::None
        }
    };

    let read_body = if read_arms.is_empty() {
        quote! {
            let _ = field;
            ::core::option::Option::None
        }
    } else {
        quote! {
            let (head, rest) = field.split_first()?;
            match head {
                #(#read_arms)*
                _ => ::core::option::Option::None,
            }
        }
    };

    // Generate the impl blocks
    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::mempage::Record for #struct_name #ty_generics #where_clause {
            fn resolve_tag(&self, tag: &str) -> ::core::option::Option<::mempage::FieldId> {
                #resolve_body
            }

            fn read_field(
                &self,
                field: ::mempage::FieldPath<'_>,
            ) -> ::core::option::Option<::mempage::Value<'_>> {
                #read_body
            }

            fn record_name(&self) -> &'static str {
                ::core::stringify!(#struct_name)
            }
        }

        impl #impl_generics ::mempage::Nested for #struct_name #ty_generics #where_clause {
            fn nested_record(&self) -> ::core::option::Option<&dyn ::mempage::Record> {
                ::core::option::Option::Some(self)
            }
        }
    };

    Ok(expanded)
}

/// A unit struct is a record with no fields.
fn unit_impl(input: &DeriveInput) -> TokenStream {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::mempage::Record for #struct_name #ty_generics #where_clause {
            fn resolve_tag(&self, _tag: &str) -> ::core::option::Option<::mempage::FieldId> {
                ::core::option::Option::None
            }

            fn read_field(
                &self,
                _field: ::mempage::FieldPath<'_>,
            ) -> ::core::option::Option<::mempage::Value<'_>> {
                ::core::option::Option::None
            }

            fn record_name(&self) -> &'static str {
                ::core::stringify!(#struct_name)
            }
        }

        impl #impl_generics ::mempage::Nested for #struct_name #ty_generics #where_clause {
            fn nested_record(&self) -> ::core::option::Option<&dyn ::mempage::Record> {
                ::core::option::Option::Some(self)
            }
        }
    }
}

/// The primary serialized name of a field.
fn serialized_name(
    attr: &FieldAttr,
    ident_name: &str,
    rule: Option<super::attrs::RenameRule>,
) -> String {
    match (&attr.rename, rule) {
        (Some(rename), _) => rename.clone(),
        (None, Some(rule)) => rule.apply_to_field(ident_name),
        (None, None) => ident_name.to_owned(),
    }
}

/// Whether a type mentions one of the struct's type parameters.
fn mentions_param(ty: &Type, params: &HashSet<Ident>) -> bool {
    quote!(#ty).into_iter().any(|token| mentions_token(token, params))
}

fn mentions_token(token: proc_macro2::TokenTree, params: &HashSet<Ident>) -> bool {
    match token {
        proc_macro2::TokenTree::Ident(ident) => params.contains(&ident),
        proc_macro2::TokenTree::Group(group) => group
            .stream()
            .into_iter()
            .any(|inner| mentions_token(inner, params)),
        _ => false,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
