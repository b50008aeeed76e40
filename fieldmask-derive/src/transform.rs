//! Shared field transformation logic for struct and enum derivation.
//!
//! Struct bodies and enum variants generate the same per-field statements;
//! this module holds that common code and the generic-parameter bookkeeping
//! that goes with it.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::Result;

use crate::{crate_path, directive::FieldDirective, generics::collect_generics_from_type};

/// Accumulated state during field processing.
///
/// Groups the mutable vectors that collect generic parameters needing trait
/// bounds while walking struct fields or enum variants.
pub(crate) struct DeriveContext {
    pub(crate) generics: syn::Generics,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) tagged_generics: Vec<Ident>,
}

impl DeriveContext {
    pub(crate) fn new(generics: syn::Generics) -> Self {
        Self {
            generics,
            walked_generics: Vec::new(),
            tagged_generics: Vec::new(),
        }
    }
}

/// Generates the statement for a single field binding.
///
/// ## Field Transformation Rules
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | `Maskable::mask_fields(field, mode)?` |
/// | `#[mask("...")]` | `apply_directive("...", field)?` |
/// | `#[mask(skip)]` | Field untouched |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    directive: &FieldDirective,
) -> Result<TokenStream> {
    match directive {
        // No annotation: recurse with the current mode. The field type must
        // implement Maskable; scalars terminate recursion with no effect.
        FieldDirective::Walk => {
            collect_generics_from_type(ty, &ctx.generics, &mut ctx.walked_generics);
            let maskable_path = crate_path("Maskable");
            // The reserved parameter name avoids shadowing by a field that
            // happens to be called `mode`.
            Ok(quote_spanned! { span =>
                #maskable_path::mask_fields(#binding, __fieldmask_mode)?;
            })
        }
        // #[mask(skip)]: pass through unchanged.
        // This allows external types (DateTime, Decimal, etc.) to work.
        FieldDirective::Skip => Ok(quote_spanned! { span =>
            let _ = #binding;
        }),
        // #[mask("...")]: resolve through the registry and mask in place.
        // Applies in both traversal modes, indirections included.
        FieldDirective::Apply(lit) => {
            collect_generics_from_type(ty, &ctx.generics, &mut ctx.tagged_generics);
            let apply_path = crate_path("apply_directive");
            Ok(quote_spanned! { span =>
                #apply_path(#lit, #binding)?;
            })
        }
    }
}
