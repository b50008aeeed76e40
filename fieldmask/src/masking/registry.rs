//! Dispatch layer: the process-wide masker registry and the adapter surface.
//!
//! A mask directive is the string inside `#[mask("name[,arg]*")]`. Resolution
//! splits it on commas, looks the name up here, and invokes the registered
//! builder with the remaining tokens to produce the canonical [`MaskOp`].
//!
//! The registry is populated with the built-in `"simple"` masker and extended
//! through [`register`]. Registration is expected only at initialization,
//! before any traversal begins; the interior `RwLock` exists because a
//! process-wide `static` must be `Sync`, not to encourage mid-traversal
//! registration.
//!
//! ## Adapter surface
//!
//! Collaborators rarely want to write a builder over `&mut dyn Any` by hand.
//! [`Masker`] offers one named constructor per supported function shape and
//! normalizes each into the canonical form, so the traversal engine only ever
//! calls a [`MaskOp`].

use std::{
    any::{type_name, Any},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use once_cell::sync::Lazy;

use crate::error::{BoxError, MaskError};

use super::simple;

/// Canonical masking operation: mutates one addressable field in place.
///
/// `&mut dyn Any` is the addressable-reference seam: the traversal synthesizes
/// it from the field's exclusive borrow, and the operation downcasts to the
/// concrete type it supports.
pub type MaskOp = Box<dyn Fn(&mut dyn Any) -> Result<(), MaskError> + Send + Sync>;

/// Builds a [`MaskOp`] from the comma-separated arguments of a directive.
///
/// Builders run on every resolution, so the same registered name can be
/// parameterized differently per field (`"X,showback=4"` vs `"X,showfront=6"`).
pub type MaskOpBuilder = Box<dyn Fn(&[&str]) -> Result<MaskOp, MaskError> + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<String, MaskOpBuilder>>> = Lazy::new(|| {
    let mut builders: HashMap<String, MaskOpBuilder> = HashMap::new();
    builders.insert("simple".to_string(), simple::builder());
    RwLock::new(builders)
});

/// Registers a custom masker under `name` for use in `#[mask("...")]`
/// directives.
///
/// Fails with [`MaskError::NameConflict`] if the name is already taken
/// (built-ins included) and [`MaskError::InvalidName`] if the name is empty,
/// contains a comma (the argument separator), or is a single character
/// (reserved by the simple-masking shorthand).
pub fn register(name: &str, masker: Masker) -> Result<(), MaskError> {
    if name.is_empty() {
        return Err(MaskError::InvalidName {
            name: name.to_string(),
            reason: "names must not be empty",
        });
    }
    if name.contains(',') {
        return Err(MaskError::InvalidName {
            name: name.to_string(),
            reason: "commas not permitted in mask func names",
        });
    }
    if name.chars().count() == 1 {
        return Err(MaskError::InvalidName {
            name: name.to_string(),
            reason: "single-character names are reserved for simple masking",
        });
    }

    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.contains_key(name) {
        return Err(MaskError::NameConflict(name.to_string()));
    }
    registry.insert(name.to_string(), masker.builder);
    Ok(())
}

/// Resolves a full directive string into a ready-to-call [`MaskOp`].
///
/// A single-character name (`"*"`, `"X"`, `"_"`, ...) is shorthand for simple
/// masking with that character and needs no registration. Any other name is
/// looked up in the registry and its builder invoked with the remaining
/// comma-separated tokens.
pub fn resolve(directive: &str) -> Result<MaskOp, MaskError> {
    let mut tokens = directive.split(',');
    // split() yields at least one token, even for the empty string
    let name = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    let mut name_chars = name.chars();
    if let (Some(mask_char), None) = (name_chars.next(), name_chars.next()) {
        return simple::build_with_char(mask_char, &args);
    }

    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let builder = registry
        .get(name)
        .ok_or_else(|| MaskError::UnknownMasker(name.to_string()))?;
    builder(&args)
}

/// Resolves `directive` and applies the operation to `field` in place.
///
/// Called from code generated by `#[derive(Maskable)]`.
#[doc(hidden)]
pub fn apply_directive<T: Any>(directive: &str, field: &mut T) -> Result<(), MaskError> {
    let operation = resolve(directive)?;
    operation(field)
}

// =============================================================================
// Masker - adapter from external function shapes to the canonical MaskOp
// =============================================================================

/// A registrable masking function, normalized from one of several shapes.
///
/// Construct with whichever `from_*` constructor matches your function, then
/// pass to [`register`]:
///
/// ```rust
/// use fieldmask::Masker;
///
/// fieldmask::register("rot13-lite", Masker::from_transform(|s| s.to_uppercase())).unwrap();
/// ```
///
/// Shapes without an args parameter reject directive arguments at resolution
/// time. Use [`Masker::from_builder`] when the masker takes arguments.
pub struct Masker {
    builder: MaskOpBuilder,
}

impl Masker {
    /// Wraps a pure string transform, e.g. `fn(&str) -> String`.
    pub fn from_transform<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::string_masker(move |value| {
            *value = transform(value.as_str());
            Ok(())
        })
    }

    /// Wraps a string transform that can fail. The failure is propagated
    /// verbatim to the caller of the entry operation.
    pub fn from_failable_transform<F>(transform: F) -> Self
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self::string_masker(move |value| {
            *value = transform(value.as_str())?;
            Ok(())
        })
    }

    /// Wraps a string transform that receives the directive's arguments.
    ///
    /// The arguments are captured at resolution time, so the operation itself
    /// sees them already split and owned.
    pub fn from_transform_with_args<F>(transform: F) -> Self
    where
        F: Fn(&str, &[String]) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        Self {
            builder: Box::new(move |args: &[&str]| {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                let transform = Arc::clone(&transform);
                Ok(string_op(move |value| {
                    *value = transform(value.as_str(), &args)?;
                    Ok(())
                }))
            }),
        }
    }

    /// Wraps an in-place string mutator, e.g. `fn(&mut String)`.
    pub fn from_string_mutator<F>(mutator: F) -> Self
    where
        F: Fn(&mut String) + Send + Sync + 'static,
    {
        Self::string_masker(move |value| {
            mutator(value);
            Ok(())
        })
    }

    /// Wraps an in-place string mutator that can fail.
    pub fn from_failable_string_mutator<F>(mutator: F) -> Self
    where
        F: Fn(&mut String) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::string_masker(move |value| {
            mutator(value)?;
            Ok(())
        })
    }

    /// Wraps a whole-record mutator.
    ///
    /// The mutator receives the tagged field's value directly rather than a
    /// string, so masking decisions can depend on sibling fields of a nested
    /// record. The field's type must match `T` exactly.
    pub fn from_record_mutator<T, F>(mutator: F) -> Self
    where
        T: Any,
        F: Fn(&mut T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let mutator = Arc::new(mutator);
        Self {
            builder: Box::new(move |args: &[&str]| {
                reject_args(args)?;
                let mutator = Arc::clone(&mutator);
                Ok(Box::new(move |field: &mut dyn Any| {
                    let target = field
                        .downcast_mut::<T>()
                        .ok_or(MaskError::UnsupportedField(type_name::<T>()))?;
                    mutator(target).map_err(MaskError::Masker)
                }))
            }),
        }
    }

    /// Wraps a raw builder for maskers that interpret their own directive
    /// arguments.
    pub fn from_builder<F>(builder: F) -> Self
    where
        F: Fn(&[&str]) -> Result<MaskOp, MaskError> + Send + Sync + 'static,
    {
        Self {
            builder: Box::new(builder),
        }
    }

    /// Common wrapper for the arg-less string shapes.
    fn string_masker<F>(masker: F) -> Self
    where
        F: Fn(&mut String) -> Result<(), MaskError> + Send + Sync + 'static,
    {
        let masker = Arc::new(masker);
        Self {
            builder: Box::new(move |args: &[&str]| {
                reject_args(args)?;
                let masker = Arc::clone(&masker);
                Ok(string_op(move |value| masker(value)))
            }),
        }
    }
}

fn reject_args(args: &[&str]) -> Result<(), MaskError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(MaskError::InvalidArguments(
            "mask func takes no additional arguments".to_string(),
        ))
    }
}

/// Lifts a string mutation into the canonical `&mut dyn Any` form.
///
/// Directives bind to the field itself regardless of traversal mode, so
/// string operations see through one level of `Box<String>` or
/// `Option<String>` (a `None` field is a no-op). Any other field type fails
/// with [`MaskError::UnsupportedField`].
pub(super) fn string_op<F>(masker: F) -> MaskOp
where
    F: Fn(&mut String) -> Result<(), MaskError> + Send + Sync + 'static,
{
    Box::new(move |field: &mut dyn Any| {
        if let Some(value) = field.downcast_mut::<String>() {
            return masker(value);
        }
        if let Some(boxed) = field.downcast_mut::<Box<String>>() {
            return masker(boxed);
        }
        if let Some(optional) = field.downcast_mut::<Option<String>>() {
            return match optional.as_mut() {
                Some(value) => masker(value),
                None => Ok(()),
            };
        }
        Err(MaskError::UnsupportedField(type_name::<String>()))
    })
}
