//! Masking traversal, the function registry, and the built-in simple masker.
//!
//! This module ties the pieces together:
//!
//! - **`traverse`**: Traversal layer - the [`Maskable`] trait, modes, and entrypoints
//! - **`registry`**: Dispatch layer - directive resolution and masker registration
//! - **`simple`**: The built-in character-substitution masker
//!
//! Error types live in `crate::error`.

mod registry;
mod simple;
mod traverse;

pub use registry::{register, resolve, MaskOp, MaskOpBuilder, Masker};
pub use traverse::{apply, apply_deep, MaskMode, Maskable};

#[doc(hidden)]
pub use registry::apply_directive;
