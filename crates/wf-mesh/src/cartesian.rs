//! Logically Cartesian mesh with one DOF per active cell.

use wf_core::units::{Area, Length};
use wf_core::{CartesianIndex, DofIndex};

use crate::mesh::{CellGeometry, Element, Mesh};

/// Structured grid with uniform cells, inactive cells removed.
///
/// DOFs are numbered contiguously over active cells in Cartesian order, so
/// the DOF index and the logical cell index differ as soon as one cell is
/// inactive. The lookup tables translate between the two.
#[derive(Debug, Clone)]
pub struct CartesianMesh {
    pub(crate) dims: [usize; 3],
    pub(crate) cell_size: [Length; 3],
    pub(crate) permeability: Area,
    pub(crate) top_depth: Length,
    pub(crate) elements: Vec<Element>,

    /// DOF → Cartesian cell index.
    pub(crate) cartesian_cell_id: Vec<CartesianIndex>,

    /// Cartesian cell index → DOF; None for inactive cells.
    pub(crate) dof_of_cell: Vec<Option<DofIndex>>,

    /// (rank, ranks) this mesh was partitioned for.
    pub(crate) partition: (usize, usize),
}

impl CartesianMesh {
    /// The DOF living in a logical cell, if that cell is active.
    pub fn dof_at(&self, i: usize, j: usize, k: usize) -> Option<DofIndex> {
        let [nx, ny, nz] = self.dims;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        self.dof_of_cell[i + j * nx + k * nx * ny]
    }

    /// DOF → Cartesian lookup table.
    pub fn cartesian_cell_ids(&self) -> &[CartesianIndex] {
        &self.cartesian_cell_id
    }

    pub fn rank(&self) -> usize {
        self.partition.0
    }

    pub fn ranks(&self) -> usize {
        self.partition.1
    }

    /// Number of interior (locally owned) elements.
    pub fn interior_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_interior()).count()
    }
}

impl Mesh for CartesianMesh {
    fn dims(&self) -> [usize; 3] {
        self.dims
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn num_dofs(&self) -> usize {
        self.cartesian_cell_id.len()
    }

    fn cartesian_index(&self, dof: DofIndex) -> Option<CartesianIndex> {
        self.cartesian_cell_id.get(dof).copied()
    }

    fn cell_geometry(&self, dof: DofIndex) -> Option<CellGeometry> {
        let cell = self.cartesian_index(dof)?;
        let [_, _, k] = self.logical_coords(cell);
        let [dx, dy, dz] = self.cell_size;
        Some(CellGeometry {
            dx,
            dy,
            dz,
            permeability: self.permeability,
            depth: self.top_depth + dz * (k as f64 + 0.5),
        })
    }
}
