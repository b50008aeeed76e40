//! Error taxonomy for registration and traversal failures.
//!
//! Registration-time failures ([`MaskError::NameConflict`],
//! [`MaskError::InvalidName`]) never occur during traversal. Traversal
//! failures are surfaced synchronously as the return value of
//! [`apply`](crate::apply)/[`apply_deep`](crate::apply_deep); the core does
//! no logging and never suppresses an error. Propagation is fail-fast:
//! fields masked before the failing field stay masked.

use thiserror::Error;

/// Failure reported by an externally registered masker, carried verbatim.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// All failures produced while registering maskers or applying mask directives.
///
/// `#[non_exhaustive]` so new variants can be added without a breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MaskError {
    /// A directive named a masker that has not been registered.
    #[error("unrecognized mask func: \"{0}\"")]
    UnknownMasker(String),

    /// A masker with the same name is already registered. Built-ins cannot
    /// be overridden.
    #[error("mask func name already taken: \"{0}\"")]
    NameConflict(String),

    /// The registration name is not usable in a directive.
    #[error("invalid mask func name \"{name}\": {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The arguments after the directive name failed to parse, or were given
    /// to a masker that takes none.
    #[error("invalid mask directive arguments: {0}")]
    InvalidArguments(String),

    /// A masking operation was applied to a field of a type it does not
    /// support. Carries the expected type name.
    #[error("mask func expected a field of type {0}")]
    UnsupportedField(&'static str),

    /// Failure returned by a custom masker, propagated unwrapped.
    #[error(transparent)]
    Masker(#[from] BoxError),
}
