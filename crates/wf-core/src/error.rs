//! Workspace-wide error type.
//!
//! Every crate keeps its own error enum and converts into `WfError` when a
//! caller only needs the category.

use thiserror::Error;

pub type WfResult<T> = Result<T, WfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WfError {
    /// A value outside the domain of the operation it was passed to.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{what} index {index} out of range (len {len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Bookkeeping that disagrees with itself, usually a configuration the
    /// schedule cannot express consistently.
    #[error("Inconsistent state: {what}")]
    Invariant { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = WfError::IndexOob {
            what: "local DOF",
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "local DOF index 4 out of range (len 2)");
    }
}
