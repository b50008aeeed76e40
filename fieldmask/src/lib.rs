//! Directive-driven in-place masking for structured data.
//!
//! This crate walks a record you own and replaces the values of annotated
//! fields with a masked representation, so the record is safe to log or
//! display. Non-sensitive fields pass through unchanged, and no new record
//! is ever allocated: masking mutates the fields of the value you pass in.
//!
//! Key rules:
//! - Annotate sensitive fields with `#[mask("directive")]`, where a directive
//!   is `name[,arg]*` - e.g. `#[mask("*")]`, `#[mask("X,showback=4")]`.
//! - A single-character directive name means simple masking with that
//!   character; no registration needed.
//! - Unannotated fields are walked recursively; `#[mask(skip)]` passes a
//!   field through untouched (use it for external types).
//!
//! Two entry operations:
//! - [`apply`] (shallow): recurses into nested records and fixed-size arrays
//!   only. Growable collections and indirections are left alone - they may
//!   reach storage shared outside the record.
//! - [`apply_deep`]: recurses into everything, dereferencing `Box`/`Option`
//!   and walking `Vec` elements and map values. Opt in when the record owns
//!   its reachable storage exclusively.
//!
//! Custom maskers register once at initialization via [`register`] and a
//! [`Masker`] constructor matching the function's shape; the built-in
//! `"simple"` masker covers the common substitution cases.
//!
//! What this crate does not do:
//! - serialize or deserialize anything
//! - validate field contents
//! - encrypt - masking is lossy and one-directional
//!
//! The `Maskable` derive macro lives in `fieldmask-derive` and is re-exported
//! here.

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

pub use fieldmask_derive::Maskable;

#[allow(unused_extern_crates)]
extern crate self as fieldmask;

// Module declarations
mod error;
mod masking;

// Re-exports
pub use error::{BoxError, MaskError};
pub use masking::{
    apply, apply_deep, register, resolve, MaskMode, MaskOp, MaskOpBuilder, Maskable, Masker,
};
#[doc(hidden)]
pub use masking::apply_directive;
