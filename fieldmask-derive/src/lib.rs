//! Derive macro for `fieldmask`.
//!
//! This crate generates the traversal code behind `#[derive(Maskable)]`. It:
//! - reads `#[mask(...)]` field attributes
//! - emits a `Maskable` implementation that walks fields in declaration order
//!
//! It does **not** resolve directives or apply masking functions. Those live
//! in the main `fieldmask` crate and run when `apply`/`apply_deep` is called.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod derive_struct;
mod directive;
mod generics;
mod transform;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_any_bounds, add_maskable_bounds};

/// Derives `fieldmask::Maskable` for structs and enums.
///
/// # Field Attributes
///
/// - **No annotation**: The field is walked recursively with the current
///   traversal mode. Its type must implement `Maskable` (derived types, std
///   scalars, arrays, `Vec`, `Option`, `Box`, maps).
///
/// - `#[mask("directive")]`: At apply time, the directive is resolved through
///   the masker registry and the resulting operation mutates the field in
///   place. Applies in both shallow and deep mode. The directive string is
///   `name[,arg]*`; a single-character name is shorthand for simple masking
///   with that character.
///
/// - `#[mask(skip)]`: The field passes through unchanged. Use this for
///   external types like `chrono::DateTime` that implement nothing.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Maskable, attributes(mask))]
pub fn derive_maskable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the fieldmask crate root.
///
/// Handles crate renaming (e.g., `my_mask = { package = "fieldmask", ... }`)
/// and internal usage (when derive is used inside the fieldmask crate itself).
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("fieldmask") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::fieldmask },
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("fieldmask crate path should parse");
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    mask_body: TokenStream,
    walked_generics: Vec<Ident>,
    tagged_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let crate_root = crate_root();

    let DeriveOutput {
        mask_body,
        walked_generics,
        tagged_generics,
    } = match &data {
        Data::Struct(data) => derive_struct(data.clone(), generics.clone())?,
        Data::Enum(data) => derive_enum(data.clone(), generics.clone())?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Maskable` cannot be derived for unions",
            ));
        }
    };

    let bounded_generics = add_maskable_bounds(generics.clone(), &walked_generics);
    let bounded_generics = add_any_bounds(bounded_generics, &tagged_generics);
    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn mask_fields(
                &mut self,
                __fieldmask_mode: #crate_root::MaskMode,
            ) -> ::core::result::Result<(), #crate_root::MaskError> {
                #mask_body
            }
        }
    })
}
