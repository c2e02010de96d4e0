//! Error types for well management.

use thiserror::Error;
use wf_core::{CartesianIndex, WfError};
use wf_mesh::MeshError;
use wf_wells::WellError;

/// Errors raised while configuring wells for an episode.
///
/// Everything except `WellNotFound` and `InvalidArg` is a fatal
/// configuration error: the schedule cannot be simulated as written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManagerError {
    #[error(
        "Cell ({i}, {j}, {k}) (index {cell}) is completed by both '{other_well}' and '{well}'; a cell may belong to one well only"
    )]
    DuplicateCompletion {
        well: String,
        other_well: String,
        i: usize,
        j: usize,
        k: usize,
        cell: CartesianIndex,
    },

    #[error(
        "Well '{well}' must be exactly one of injector or producer (injector: {injector}, producer: {producer})"
    )]
    AmbiguousRole {
        well: String,
        injector: bool,
        producer: bool,
    },

    #[error("Well '{well}': {what} is not supported")]
    Unsupported { well: String, what: &'static str },

    #[error("Well '{well}' has no control mode")]
    UndefinedControlMode { well: String },

    #[error("No well named '{name}'")]
    WellNotFound { name: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Well error: {0}")]
    Well(#[from] WellError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

impl From<ManagerError> for WfError {
    fn from(e: ManagerError) -> Self {
        match e {
            ManagerError::DuplicateCompletion { .. } => WfError::Invariant {
                what: "cell completed by more than one well",
            },
            ManagerError::AmbiguousRole { .. } => WfError::Invariant {
                what: "well must be exactly one of injector or producer",
            },
            ManagerError::Unsupported { what, .. } => WfError::InvalidArg { what },
            ManagerError::UndefinedControlMode { .. } => WfError::InvalidArg {
                what: "undefined control mode",
            },
            ManagerError::WellNotFound { .. } => WfError::InvalidArg {
                what: "unknown well name",
            },
            ManagerError::InvalidArg { what } => WfError::InvalidArg { what },
            ManagerError::Well(w) => w.into(),
            ManagerError::Mesh(m) => m.into(),
        }
    }
}
