//! Error types for well operations.

use thiserror::Error;
use wf_core::DofIndex;
use wf_core::error::WfError;
use wf_mesh::MeshError;

/// Errors that can occur while configuring or evaluating a well.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WellError {
    #[error("Well '{well}' does not own DOF {dof}")]
    DofNotOwned { well: String, dof: DofIndex },

    #[error("Non-physical value for well '{well}': {what}")]
    NonPhysical { well: String, what: &'static str },

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

pub type WellResult<T> = Result<T, WellError>;

impl From<WellError> for WfError {
    fn from(e: WellError) -> Self {
        match e {
            WellError::DofNotOwned { .. } => WfError::InvalidArg {
                what: "DOF not owned by well",
            },
            WellError::NonPhysical { what, .. } => WfError::InvalidArg { what },
            WellError::Mesh(m) => m.into(),
        }
    }
}
