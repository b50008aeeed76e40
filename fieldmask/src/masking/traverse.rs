//! Traversal layer: walking records and applying directives in place.
//!
//! This module defines the core traversal seam:
//!
//! - [`Maskable`]: Types whose fields can be walked and mutated in place
//! - [`MaskMode`]: How far untagged fields are recursed into
//! - [`apply`] / [`apply_deep`]: The two entry operations
//!
//! ## Field Handling
//!
//! The derive macro generates different code based on field annotations:
//!
//! | Annotation | Generated Code | Behavior |
//! |------------|----------------|----------|
//! | None | `Maskable::mask_fields` | Walk with the current mode |
//! | `#[mask("directive")]` | `apply_directive` | Resolve and mask in place |
//! | `#[mask(skip)]` | Pass through | Field untouched (external types work) |
//!
//! ## Container Implementations
//!
//! This module provides `Maskable` implementations for common std containers.
//! Fixed-size arrays are walked element-wise in both modes. Growable
//! collections (`Vec`, map values) and indirections (`Box`, `Option`) are
//! walked only in [`MaskMode::Deep`]: the storage they reach may be shared
//! with data outside the record under traversal, so shallow mode treats them
//! as opaque. A directive on such a field still applies in either mode,
//! because directives bind to the field itself.
//!
//! ## External Types
//!
//! External types (like `chrono::DateTime`) don't implement `Maskable`.
//! Annotate those fields with `#[mask(skip)]` to pass them through unchanged.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use crate::error::MaskError;

/// Controls how far [`apply`]/[`apply_deep`] recurse into untagged fields.
///
/// Directive-tagged fields are masked in both modes; the mode only changes
/// which untagged fields are walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskMode {
    /// Recurse into nested records and fixed-size arrays only. Growable
    /// collections and indirections are left untouched. This is the
    /// conservative default: storage reached through an indirection may be
    /// shared by data outside the record being masked.
    Shallow,
    /// Additionally recurse into growable collections and indirections,
    /// dereferencing them to mutate the pointed-to values. Opt in when the
    /// reached storage is owned exclusively by the masked record.
    Deep,
}

/// A type whose fields can be walked for in-place masking.
///
/// Implemented by `#[derive(Maskable)]` for structs and enums, and provided
/// here for std scalars and containers. Scalar implementations terminate
/// recursion with no effect.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not `Maskable`",
    label = "this field cannot be walked for masking",
    note = "use `#[derive(Maskable)]` on the type definition",
    note = "or annotate the field with `#[mask(skip)]` to pass it through unchanged"
)]
pub trait Maskable {
    /// Walks this value, applying directives and recursing per `mode`.
    ///
    /// Fails fast: the first error aborts the traversal, leaving earlier
    /// fields already masked.
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError>;
}

/// Masks `value` in shallow mode.
///
/// Recurses into nested records and fixed-size arrays; growable collections
/// and indirections are untouched unless the field itself carries a directive.
pub fn apply<T: Maskable>(value: &mut T) -> Result<(), MaskError> {
    value.mask_fields(MaskMode::Shallow)
}

/// Masks `value` in deep mode.
///
/// Recurses into everything reachable, including `Vec` elements, map values,
/// `Option` contents, and `Box` targets.
pub fn apply_deep<T: Maskable>(value: &mut T) -> Result<(), MaskError> {
    value.mask_fields(MaskMode::Deep)
}

// =============================================================================
// Maskable implementations for standard library types
// =============================================================================

macro_rules! impl_maskable_terminal {
    ($ty:ty) => {
        impl Maskable for $ty {
            fn mask_fields(&mut self, _mode: MaskMode) -> Result<(), MaskError> {
                Ok(())
            }
        }
    };
}

impl_maskable_terminal!(String);
impl_maskable_terminal!(bool);
impl_maskable_terminal!(char);
impl_maskable_terminal!(i8);
impl_maskable_terminal!(i16);
impl_maskable_terminal!(i32);
impl_maskable_terminal!(i64);
impl_maskable_terminal!(i128);
impl_maskable_terminal!(isize);
impl_maskable_terminal!(u8);
impl_maskable_terminal!(u16);
impl_maskable_terminal!(u32);
impl_maskable_terminal!(u64);
impl_maskable_terminal!(u128);
impl_maskable_terminal!(usize);
impl_maskable_terminal!(f32);
impl_maskable_terminal!(f64);
impl_maskable_terminal!(());

impl Maskable for Cow<'_, str> {
    fn mask_fields(&mut self, _mode: MaskMode) -> Result<(), MaskError> {
        Ok(())
    }
}

/// Exclusive reborrows are followed in both modes: a `&mut T` cannot alias
/// storage shared elsewhere, so the shallow-mode indirection rule does not
/// apply. This also lets the entry operations take a reference-to-reference.
impl<T: Maskable + ?Sized> Maskable for &mut T {
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        (**self).mask_fields(mode)
    }
}

/// Fixed-size arrays are walked element-wise in both modes.
impl<T: Maskable, const N: usize> Maskable for [T; N] {
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        for item in self.iter_mut() {
            item.mask_fields(mode)?;
        }
        Ok(())
    }
}

/// Growable collections are opaque in shallow mode.
impl<T: Maskable> Maskable for Vec<T> {
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        if mode == MaskMode::Deep {
            for item in self.iter_mut() {
                item.mask_fields(mode)?;
            }
        }
        Ok(())
    }
}

/// Optionals are dereferenced only in deep mode.
impl<T: Maskable> Maskable for Option<T> {
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        if mode == MaskMode::Deep {
            if let Some(value) = self.as_mut() {
                value.mask_fields(mode)?;
            }
        }
        Ok(())
    }
}

/// Boxed values are dereferenced only in deep mode.
impl<T: Maskable + ?Sized> Maskable for Box<T> {
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        if mode == MaskMode::Deep {
            (**self).mask_fields(mode)?;
        }
        Ok(())
    }
}

/// Map values are walked only in deep mode. Keys are never visited: maps do
/// not hand out mutable key access, and rewriting keys could collide.
impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Maskable,
{
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        if mode == MaskMode::Deep {
            for value in self.values_mut() {
                value.mask_fields(mode)?;
            }
        }
        Ok(())
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: Ord,
    V: Maskable,
{
    fn mask_fields(&mut self, mode: MaskMode) -> Result<(), MaskError> {
        if mode == MaskMode::Deep {
            for value in self.values_mut() {
                value.mask_fields(mode)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{apply, apply_deep};
    use crate::Maskable;

    #[derive(Clone, PartialEq, Debug, Maskable)]
    struct Credentials {
        username: String,
        #[mask("*")]
        password: String,
    }

    fn sample() -> Credentials {
        Credentials {
            username: "John Smith".to_string(),
            password: "abcd 1234".to_string(),
        }
    }

    #[test]
    fn tagged_field_is_masked_in_place() {
        let mut creds = sample();
        apply(&mut creds).unwrap();
        assert_eq!(creds.username, "John Smith");
        assert_eq!(creds.password, "*********");
    }

    #[test]
    fn untagged_record_is_unchanged() {
        #[derive(Clone, PartialEq, Debug, Maskable)]
        struct Plain {
            name: String,
            count: u32,
        }

        let mut plain = Plain {
            name: "public".to_string(),
            count: 3,
        };
        let before = plain.clone();
        apply(&mut plain).unwrap();
        assert_eq!(plain, before);
        apply_deep(&mut plain).unwrap();
        assert_eq!(plain, before);
    }

    #[test]
    fn array_elements_are_walked_in_both_modes() {
        #[derive(Maskable)]
        struct Batch {
            entries: [Credentials; 2],
        }

        let mut batch = Batch {
            entries: [sample(), sample()],
        };
        apply(&mut batch).unwrap();
        assert!(batch.entries.iter().all(|c| c.password == "*********"));
    }

    #[test]
    fn vec_elements_are_opaque_in_shallow_mode() {
        #[derive(Maskable)]
        struct Batch {
            entries: Vec<Credentials>,
        }

        let mut batch = Batch {
            entries: vec![sample()],
        };
        apply(&mut batch).unwrap();
        assert_eq!(batch.entries[0].password, "abcd 1234");

        apply_deep(&mut batch).unwrap();
        assert_eq!(batch.entries[0].password, "*********");
    }

    #[test]
    fn option_is_dereferenced_only_in_deep_mode() {
        #[derive(Maskable)]
        struct Holder {
            inner: Option<Credentials>,
        }

        let mut holder = Holder {
            inner: Some(sample()),
        };
        apply(&mut holder).unwrap();
        assert_eq!(holder.inner.as_ref().unwrap().password, "abcd 1234");

        apply_deep(&mut holder).unwrap();
        assert_eq!(holder.inner.as_ref().unwrap().password, "*********");
    }

    #[test]
    fn boxed_record_is_dereferenced_only_in_deep_mode() {
        #[derive(Maskable)]
        struct Holder {
            inner: Box<Credentials>,
        }

        let mut holder = Holder {
            inner: Box::new(sample()),
        };
        apply(&mut holder).unwrap();
        assert_eq!(holder.inner.password, "abcd 1234");

        apply_deep(&mut holder).unwrap();
        assert_eq!(holder.inner.password, "*********");
    }

    #[test]
    fn map_values_are_walked_only_in_deep_mode() {
        #[derive(Maskable)]
        struct Accounts {
            by_user: HashMap<String, Credentials>,
        }

        let mut accounts = Accounts {
            by_user: HashMap::from([("john".to_string(), sample())]),
        };
        apply(&mut accounts).unwrap();
        assert_eq!(accounts.by_user["john"].password, "abcd 1234");

        apply_deep(&mut accounts).unwrap();
        assert_eq!(accounts.by_user["john"].password, "*********");
    }

    #[test]
    fn reference_to_reference_is_accepted() {
        let mut creds = sample();
        let mut reference = &mut creds;
        apply(&mut reference).unwrap();
        assert_eq!(creds.password, "*********");
    }

    #[test]
    fn traversal_fails_fast_on_unknown_directive() {
        #[derive(Maskable)]
        struct Record {
            #[mask("*")]
            first: String,
            #[mask("idk")]
            second: String,
        }

        let mut record = Record {
            first: "masked".to_string(),
            second: "untouched".to_string(),
        };
        let err = apply(&mut record).unwrap_err();
        assert!(matches!(err, crate::MaskError::UnknownMasker(name) if name == "idk"));
        // No rollback: the field masked before the failure stays masked.
        assert_eq!(record.first, "******");
        assert_eq!(record.second, "untouched");
    }

    #[test]
    fn enum_variants_are_walked() {
        #[derive(Maskable)]
        enum Login {
            Password {
                #[mask("*")]
                secret: String,
            },
            Token(#[mask("X,showback=4")] String),
            Anonymous,
        }

        let mut login = Login::Password {
            secret: "hunter2".to_string(),
        };
        apply(&mut login).unwrap();
        match &login {
            Login::Password { secret } => assert_eq!(secret, "*******"),
            _ => panic!("variant changed"),
        }

        let mut login = Login::Token("tok_12345678".to_string());
        apply(&mut login).unwrap();
        match &login {
            Login::Token(token) => assert_eq!(token, "XXXXXXXX5678"),
            _ => panic!("variant changed"),
        }

        let mut login = Login::Anonymous;
        apply(&mut login).unwrap();
    }
}
