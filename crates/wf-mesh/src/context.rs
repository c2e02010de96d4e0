//! Per-element view of geometry and primary unknowns.

use wf_core::units::Pressure;
use wf_core::{CartesianIndex, DofIndex, PhaseVector};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{CellGeometry, Element, Mesh};

/// Primary unknowns of one DOF for the current Newton iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    pub pressure: Pressure,
    /// Saturations in (oil, gas, water) order.
    pub saturation: PhaseVector,
}

impl CellState {
    pub fn new(pressure: Pressure, saturation: PhaseVector) -> Self {
        Self {
            pressure,
            saturation,
        }
    }
}

/// Snapshot of the primary unknowns of every local DOF, indexed by DOF.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSnapshot {
    cells: Vec<CellState>,
}

impl SolutionSnapshot {
    pub fn new(cells: Vec<CellState>) -> Self {
        Self { cells }
    }

    /// Same state in every DOF.
    pub fn uniform(num_dofs: usize, state: CellState) -> Self {
        Self {
            cells: vec![state; num_dofs],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, dof: DofIndex) -> Option<&CellState> {
        self.cells.get(dof)
    }

    pub fn get_mut(&mut self, dof: DofIndex) -> Option<&mut CellState> {
        self.cells.get_mut(dof)
    }

    /// Check that the snapshot covers every DOF of a mesh.
    pub fn check_matches(&self, mesh: &dyn Mesh) -> MeshResult<()> {
        if self.cells.len() == mesh.num_dofs() {
            Ok(())
        } else {
            Err(MeshError::SnapshotSize {
                expected: mesh.num_dofs(),
                actual: self.cells.len(),
            })
        }
    }
}

/// View of one element: its DOFs, their logical cells, geometry and, when
/// attached, their primary unknowns.
#[derive(Clone, Copy)]
pub struct ElementContext<'a> {
    mesh: &'a dyn Mesh,
    element: &'a Element,
    snapshot: Option<&'a SolutionSnapshot>,
}

impl<'a> ElementContext<'a> {
    /// Stencil-only context (no primary unknowns).
    pub fn new(mesh: &'a dyn Mesh, element: &'a Element) -> Self {
        Self {
            mesh,
            element,
            snapshot: None,
        }
    }

    /// Attach the primary unknowns of the current iterate.
    pub fn with_snapshot(mut self, snapshot: &'a SolutionSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn num_dofs(&self) -> usize {
        self.element.dofs.len()
    }

    /// Global index of a local DOF.
    pub fn global_dof(&self, local: usize) -> MeshResult<DofIndex> {
        self.element
            .dofs
            .get(local)
            .copied()
            .ok_or(MeshError::LocalDofOob {
                local,
                len: self.element.dofs.len(),
            })
    }

    /// Logically Cartesian cell index of a local DOF.
    pub fn cartesian_index(&self, local: usize) -> MeshResult<CartesianIndex> {
        let dof = self.global_dof(local)?;
        self.mesh
            .cartesian_index(dof)
            .ok_or(MeshError::UnknownDof { dof })
    }

    pub fn geometry(&self, local: usize) -> MeshResult<CellGeometry> {
        let dof = self.global_dof(local)?;
        self.mesh
            .cell_geometry(dof)
            .ok_or(MeshError::UnknownDof { dof })
    }

    /// Primary unknowns of a local DOF.
    pub fn primary(&self, local: usize) -> MeshResult<&'a CellState> {
        let dof = self.global_dof(local)?;
        let snapshot = self.snapshot.ok_or(MeshError::MissingSnapshot)?;
        snapshot.get(dof).ok_or(MeshError::UnknownDof { dof })
    }
}
