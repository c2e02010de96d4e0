//! Mesh-specific error types.

use thiserror::Error;
use wf_core::{CartesianIndex, DofIndex, WfError};

/// Mesh construction and lookup errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Invalid grid dimensions {nx}x{ny}x{nz}")]
    InvalidDimensions { nx: usize, ny: usize, nz: usize },

    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Invalid partition: rank {rank} of {ranks}")]
    InvalidPartition { rank: usize, ranks: usize },

    #[error("Cell ({i}, {j}, {k}) is outside the grid")]
    CellOutOfGrid { i: usize, j: usize, k: usize },

    #[error("Local DOF {local} out of range for element with {len} DOFs")]
    LocalDofOob { local: usize, len: usize },

    #[error("DOF {dof} is not part of the mesh")]
    UnknownDof { dof: DofIndex },

    #[error("Cartesian index {cell} maps to more than one DOF")]
    InconsistentIndex { cell: CartesianIndex },

    #[error("DOF {dof} belongs to more than one element")]
    SharedDof { dof: DofIndex },

    #[error("No primary unknowns attached to element context")]
    MissingSnapshot,

    #[error("Snapshot holds {actual} cells, mesh has {expected} DOFs")]
    SnapshotSize { expected: usize, actual: usize },
}

pub type MeshResult<T> = Result<T, MeshError>;

impl From<MeshError> for WfError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::LocalDofOob { local, len } => WfError::IndexOob {
                what: "local DOF",
                index: local,
                len,
            },
            MeshError::MissingSnapshot => WfError::InvalidArg {
                what: "element context without snapshot",
            },
            _ => WfError::Invariant {
                what: "mesh consistency",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeshError::CellOutOfGrid { i: 1, j: 2, k: 9 };
        assert!(err.to_string().contains("(1, 2, 9)"));
    }

    #[test]
    fn error_conversion() {
        let wf: WfError = MeshError::LocalDofOob { local: 3, len: 1 }.into();
        assert!(matches!(wf, WfError::IndexOob { index: 3, len: 1, .. }));
    }
}
