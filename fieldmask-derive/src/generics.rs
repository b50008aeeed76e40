//! Generic type parameter handling and trait bound management.
//!
//! This module adds bounds only for generics that are used by walked or
//! directive-tagged fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are explicitly skipped when collecting generics.
//! This matters for external type support:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Maskable
//! }
//! ```
//!
//! Without this, `TypedId<DateTime<Utc>>` would fail because `DateTime<Utc>`
//! doesn't implement `Maskable`, even though the marker holds no data.

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            // Skip PhantomData: a zero-sized marker never carries field data,
            // so its parameter must not be forced to implement Maskable.
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            // Check if this type identifier matches a generic parameter
            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
    }
}

/// Adds `Maskable` bounds to generic parameters used in walked fields.
pub(crate) fn add_maskable_bounds(
    mut generics: syn::Generics,
    walked_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if walked_generics.iter().any(|g| g == &param.ident) {
            let maskable_path = crate_path("Maskable");
            param.bounds.push(parse_quote!(#maskable_path));
        }
    }
    generics
}

/// Adds `Any` bounds to generic parameters used in directive-tagged fields.
///
/// Directive operations receive the field as `&mut dyn Any`, which requires
/// the concrete type to be `'static`.
pub(crate) fn add_any_bounds(
    mut generics: syn::Generics,
    tagged_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if tagged_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::any::Any));
        }
    }
    generics
}
