//! `#[derive(Ini)]`: emits an `iniconf::Describe` impl for a struct.
//!
//! Every named field becomes a member, in declaration order, reached through a
//! pair of generated lens functions. Attributes:
//!
//! - `#[ini(rename = "name")]` sets the name used in text form.
//! - `#[ini(skip)]` leaves the field out of the description.
//!
//! Every field that is not skipped must implement `iniconf::Describe`. Scalar
//! members at the root of a config are ignored when the schema is built, but
//! only once their type can be described: a root field such as a `PathBuf` or
//! a `HashMap` fails to compile with a missing `Describe` impl and needs
//! `#[ini(skip)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

#[proc_macro_derive(Ini, attributes(ini))]
pub fn derive_ini(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Parsed `#[ini(...)]` options for one field.
#[derive(Default)]
struct FieldOptions {
    rename: Option<LitStr>,
    skip: bool,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Ini cannot be derived for generic structs",
        ));
    }
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Ini can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Ini can only be derived for structs",
            ));
        }
    };

    let mut lenses = Vec::new();
    let mut members = Vec::new();
    for field in fields {
        let options = field_options(field)?;
        if options.skip {
            continue;
        }
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let name = field_ident.unraw().to_string();
        let get = format_ident!("__ini_get_{}", name);
        let get_mut = format_ident!("__ini_get_mut_{}", name);

        lenses.push(quote! {
            fn #get(this: &#ident) -> &#ty {
                &this.#field_ident
            }
            fn #get_mut(this: &mut #ident) -> &mut #ty {
                &mut this.#field_ident
            }
        });

        let tag = options.rename.map(|rename| quote! { .tag(#rename) });
        members.push(quote! {
            ::iniconf::Member::<#ident>::of::<#ty>(#name, #get, #get_mut) #tag
        });
    }

    Ok(quote! {
        impl ::iniconf::Describe for #ident {
            #[allow(non_snake_case)]
            fn describe() -> ::iniconf::Shape<Self> {
                #(#lenses)*
                ::iniconf::Shape::Struct(::std::vec![#(#members),*])
            }
        }
    })
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("ini") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if options.rename.is_some() {
                    return Err(meta.error("duplicate `rename`"));
                }
                options.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(options)
}
