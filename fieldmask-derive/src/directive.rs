//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms. The directive string itself is only
//! validated structurally here; name lookup happens at apply time against the
//! runtime registry.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Field handling based on `#[mask(...)]` attributes.
///
/// | Attribute | Directive | Behavior |
/// |-----------|-----------|----------|
/// | None | `Walk` | Recurse with the current traversal mode |
/// | `#[mask("...")]` | `Apply` | Resolve and apply the masking operation |
/// | `#[mask(skip)]` | `Skip` | Field passes through unchanged |
#[derive(Clone, Debug)]
pub(crate) enum FieldDirective {
    /// No annotation: recurse into the field.
    ///
    /// The field's type must implement `Maskable`.
    Walk,
    /// `#[mask(skip)]`: pass through unchanged.
    ///
    /// The escape hatch for external types that implement nothing.
    Skip,
    /// `#[mask("name[,arg]*")]`: resolve the directive through the registry
    /// at apply time and mask the field in place.
    Apply(LitStr),
}

fn set_directive(
    target: &mut Option<FieldDirective>,
    next: FieldDirective,
    span: Span,
) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_directive(attrs: &[Attribute]) -> Result<FieldDirective> {
    let mut directive: Option<FieldDirective> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "bare #[mask] has no meaning: expected #[mask(\"directive\")] or #[mask(skip)]",
                ));
            }
            Meta::List(list) => {
                if let Ok(lit) = syn::parse2::<LitStr>(list.tokens.clone()) {
                    validate_directive(&lit)?;
                    set_directive(&mut directive, FieldDirective::Apply(lit), attr.span())?;
                } else if syn::parse2::<syn::Path>(list.tokens.clone())
                    .is_ok_and(|path| path.is_ident("skip"))
                {
                    set_directive(&mut directive, FieldDirective::Skip, attr.span())?;
                } else {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a directive string (e.g., #[mask(\"X,showback=4\")]) or #[mask(skip)]",
                    ));
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    // Default: no annotation means recurse with the current mode
    Ok(directive.unwrap_or(FieldDirective::Walk))
}

/// The directive's name is everything up to the first comma; it must be
/// present. Arguments are left for the registered builder to interpret.
fn validate_directive(lit: &LitStr) -> Result<()> {
    let value = lit.value();
    let name = value.split(',').next().unwrap_or_default();
    if name.is_empty() {
        return Err(syn::Error::new(
            lit.span(),
            "mask directive must start with a masker name",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_walk() {
        let attrs = parse_attrs(quote! {});
        let directive = parse_field_directive(&attrs).unwrap();
        assert!(matches!(directive, FieldDirective::Walk));
    }

    #[test]
    fn skip_is_parsed() {
        let attrs = parse_attrs(quote! { #[mask(skip)] });
        let directive = parse_field_directive(&attrs).unwrap();
        assert!(matches!(directive, FieldDirective::Skip));
    }

    #[test]
    fn directive_string_is_parsed() {
        let attrs = parse_attrs(quote! { #[mask("X,showback=4")] });
        let directive = parse_field_directive(&attrs).unwrap();
        match directive {
            FieldDirective::Apply(lit) => assert_eq!(lit.value(), "X,showback=4"),
            _ => panic!("expected Apply"),
        }
    }

    #[test]
    fn bare_mask_errors() {
        let attrs = parse_attrs(quote! { #[mask] });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bare #[mask]"));
    }

    #[test]
    fn empty_directive_errors() {
        let attrs = parse_attrs(quote! { #[mask("")] });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with a masker name"));
    }

    #[test]
    fn leading_comma_directive_errors() {
        let attrs = parse_attrs(quote! { #[mask(",showback=4")] });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn multiple_mask_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[mask(skip)]
            #[mask("*")]
        });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("multiple #[mask] attributes"));
    }

    #[test]
    fn name_value_syntax_errors() {
        let attrs = parse_attrs(quote! { #[mask = "*"] });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name-value syntax is not supported"));
    }

    #[test]
    fn unrecognized_list_form_errors() {
        let attrs = parse_attrs(quote! { #[mask(123)] });
        let result = parse_field_directive(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("expected a directive string"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(skip)]
        });
        let directive = parse_field_directive(&attrs).unwrap();
        assert!(matches!(directive, FieldDirective::Walk));
    }
}
