//! Engine error taxonomy.
//!
//! Usage errors (`StackUnderflow`, `UnbalancedBinding`, `InvalidResolution`) are
//! surfaced immediately instead of being clamped. `UnsupportedOperation` is the
//! only outcome a correct caller can still observe, and it never leaves a stack
//! or binding scope half-applied.

use std::fmt;

use crate::binding::{BindingKind, ResourceId};
use crate::transform::MatrixMode;

/// Identifies which LIFO structure rejected a pop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StackKind {
    Matrix(MatrixMode),
    Style,
    View,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Matrix(mode) => write!(f, "{mode:?} matrix stack"),
            StackKind::Style => f.write_str("style stack"),
            StackKind::View => f.write_str("view stack"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A pop would have removed the base entry of a stack.
    #[error("pop on {stack} without a matching push")]
    StackUnderflow { stack: StackKind },

    /// An unbind/end named a resource that is not the topmost binding of its kind.
    #[error("unbalanced {kind:?} binding: expected {expected:?}, got {found:?}")]
    UnbalancedBinding {
        kind: BindingKind,
        expected: Option<ResourceId>,
        found: ResourceId,
    },

    /// A tessellation resolution was zero or negative.
    #[error("invalid {setting} resolution {value}: must be greater than zero")]
    InvalidResolution { setting: &'static str, value: i32 },

    /// The active backend lacks the capability this call needs.
    #[error("{operation} is not supported by the {backend} backend")]
    UnsupportedOperation {
        operation: &'static str,
        backend: String,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Validates a resolution argument, returning it as `u32` when positive.
pub(crate) fn check_resolution(setting: &'static str, value: i32) -> Result<u32> {
    if value <= 0 {
        return Err(RenderError::InvalidResolution { setting, value });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_resolution_is_rejected() {
        assert_eq!(
            check_resolution("circle", 0),
            Err(RenderError::InvalidResolution { setting: "circle", value: 0 })
        );
    }

    #[test]
    fn negative_resolution_is_rejected() {
        assert!(check_resolution("sphere", -4).is_err());
    }

    #[test]
    fn positive_resolution_passes_through() {
        assert_eq!(check_resolution("box", 12), Ok(12));
    }

    #[test]
    fn underflow_message_names_the_stack() {
        let err = RenderError::StackUnderflow { stack: StackKind::Style };
        assert_eq!(err.to_string(), "pop on style stack without a matching push");
    }
}
