//! The built-in simple masker: per-character substitution with optional
//! visible prefix/suffix and alphanumeric-only filtering.
//!
//! Reachable two ways from a directive:
//!
//! - `"simple[,char][,arg]*"` - the generic spelling; the mask character is
//!   the optional first positional argument, defaulting to `'*'`.
//! - A single-character name (`"*"`, `"X"`, ...) - shorthand resolved by the
//!   registry, using that character as the mask character.
//!
//! All counting is in Unicode scalar values, never bytes.

use crate::error::MaskError;

use super::registry::{string_op, MaskOp, MaskOpBuilder};

const DEFAULT_MASK_CHAR: char = '*';

/// Per-invocation configuration, rebuilt from the directive's arguments on
/// every resolution and discarded after the single masking call.
#[derive(Clone, Copy, Debug)]
struct SimpleMask {
    mask_char: char,
    show_front: usize,
    show_back: usize,
    alphanumeric_only: bool,
}

impl SimpleMask {
    fn new(mask_char: char) -> Self {
        Self {
            mask_char,
            show_front: 0,
            show_back: 0,
            alphanumeric_only: false,
        }
    }

    /// Applies `key=value` and flag arguments from a directive.
    ///
    /// Unrecognized keys are ignored so directives written against newer
    /// versions keep resolving.
    fn update_from_args(&mut self, args: &[&str]) -> Result<(), MaskError> {
        for arg in args {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (*arg, None),
            };
            match key {
                "alphanumeric" => {
                    if value.is_some() {
                        return Err(MaskError::InvalidArguments(
                            "alphanumeric specifier does not take an argument".to_string(),
                        ));
                    }
                    self.alphanumeric_only = true;
                }
                "showfront" => self.show_front = parse_count("showfront", value)?,
                "showback" => self.show_back = parse_count("showback", value)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Masks the middle run of `value`, leaving the first `show_front` and
    /// last `show_back` scalar values visible.
    ///
    /// If the visible spans cover the whole value, it is returned unchanged:
    /// there is nothing to mask, and short values are not collapsed.
    fn mask_str(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.show_front + self.show_back >= total {
            return value.to_string();
        }

        for ch in &mut chars[self.show_front..total - self.show_back] {
            if !self.alphanumeric_only || ch.is_alphanumeric() {
                *ch = self.mask_char;
            }
        }
        chars.into_iter().collect()
    }
}

fn parse_count(key: &str, value: Option<&str>) -> Result<usize, MaskError> {
    value
        .unwrap_or_default()
        .parse()
        .map_err(|_| MaskError::InvalidArguments(format!("unable to parse {key} value")))
}

/// Builds a simple-masking operation with a fixed mask character, parsing the
/// remaining directive arguments. Also the target of the single-character
/// directive shorthand.
pub(super) fn build_with_char(mask_char: char, args: &[&str]) -> Result<MaskOp, MaskError> {
    let mut config = SimpleMask::new(mask_char);
    config.update_from_args(args)?;
    Ok(string_op(move |value| {
        *value = config.mask_str(value);
        Ok(())
    }))
}

/// The registry builder for the `"simple"` name: the mask character is the
/// optional first positional argument.
pub(super) fn builder() -> MaskOpBuilder {
    Box::new(|args: &[&str]| match args.split_first() {
        None => build_with_char(DEFAULT_MASK_CHAR, &[]),
        Some((first, rest)) => {
            let mut chars = first.chars();
            match (chars.next(), chars.next()) {
                (Some(mask_char), None) => build_with_char(mask_char, rest),
                _ => Err(MaskError::InvalidArguments(
                    "first argument to simple mask must be a single character".to_string(),
                )),
            }
        }
    })
}
