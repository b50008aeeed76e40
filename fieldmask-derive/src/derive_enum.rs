//! Enum-specific `Maskable` derivation.
//!
//! This module generates one match arm per variant and collects the generic
//! parameters that require trait bounds. Matching on `&mut self` binds each
//! variant field as `&mut`, so the per-field statements are identical to the
//! struct case.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    directive::parse_field_directive,
    transform::{generate_field_transform, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_enum(data: DataEnum, generics: syn::Generics) -> Result<DeriveOutput> {
    let mut ctx = DeriveContext::new(generics);
    let mut arms: Vec<TokenStream> = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;

        match variant.fields {
            Fields::Unit => {
                arms.push(quote! { Self::#variant_ident => {} });
            }
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

                arms.push(quote! {
                    Self::#variant_ident { #(#bindings),* } => {
                        #(#transforms)*
                    }
                });
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

                arms.push(quote! {
                    Self::#variant_ident ( #(#bindings),* ) => {
                        #(#transforms)*
                    }
                });
            }
        }
    }

    let mask_body = quote! {
        match self {
            #(#arms)*
        }
        ::core::result::Result::Ok(())
    };

    Ok(DeriveOutput {
        mask_body,
        walked_generics: ctx.walked_generics,
        tagged_generics: ctx.tagged_generics,
    })
}
