//! Struct-specific `Maskable` derivation.
//!
//! This module generates traversal logic for struct fields and collects the
//! generic parameters that require trait bounds.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    directive::parse_field_directive,
    transform::{generate_field_transform, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_struct(data: DataStruct, generics: syn::Generics) -> Result<DeriveOutput> {
    let mut ctx = DeriveContext::new(generics);

    let mask_body = match data.fields {
        Fields::Named(fields) => {
            let mut bindings = Vec::new();
            let mut transforms = Vec::new();

            for field in fields.named {
                let span = field.span();
                let directive = parse_field_directive(&field.attrs)?;
                let ident = field.ident.expect("named field should have an identifier");
                let transform =
                    generate_field_transform(&mut ctx, &field.ty, &ident, span, &directive)?;
                bindings.push(ident);
                transforms.push(transform);
            }

            quote! {
                let Self { #(#bindings),* } = self;
                #(#transforms)*
                ::core::result::Result::Ok(())
            }
        }
        Fields::Unnamed(fields) => {
            let mut bindings = Vec::new();
            let mut transforms = Vec::new();

            for (index, field) in fields.unnamed.into_iter().enumerate() {
                let span = field.span();
                let directive = parse_field_directive(&field.attrs)?;
                let binding = format_ident!("field_{index}");
                let transform =
                    generate_field_transform(&mut ctx, &field.ty, &binding, span, &directive)?;
                bindings.push(binding);
                transforms.push(transform);
            }

            quote! {
                let Self ( #(#bindings),* ) = self;
                #(#transforms)*
                ::core::result::Result::Ok(())
            }
        }
        Fields::Unit => quote! { ::core::result::Result::Ok(()) },
    };

    Ok(DeriveOutput {
        mask_body,
        walked_generics: ctx.walked_generics,
        tagged_generics: ctx.tagged_generics,
    })
}
