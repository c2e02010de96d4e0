//! Mesh abstraction consumed by the well manager.

use wf_core::units::{Area, Length};
use wf_core::{CartesianIndex, DofIndex};

/// Ownership of an element in a partitioned run.
///
/// Only interior elements are processed locally; overlap elements are owned
/// by another process and must be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionType {
    Interior,
    Overlap,
}

/// Position of an element in the local element enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A mesh element with its (global) degrees of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub partition: PartitionType,
    pub dofs: Vec<DofIndex>,
}

impl Element {
    pub fn is_interior(&self) -> bool {
        self.partition == PartitionType::Interior
    }
}

/// Geometry and rock properties of the cell a DOF lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub dx: Length,
    pub dy: Length,
    pub dz: Length,
    pub permeability: Area,
    /// Depth of the cell centre.
    pub depth: Length,
}

/// Element/DOF enumeration of the local partition of a grid.
pub trait Mesh {
    /// Logical dimensions (nx, ny, nz) of the structured grid.
    fn dims(&self) -> [usize; 3];

    /// All local elements, interior and overlap, in traversal order.
    fn elements(&self) -> &[Element];

    /// Number of DOFs addressed by `elements()`.
    fn num_dofs(&self) -> usize;

    /// Global DOF → logically Cartesian cell index.
    fn cartesian_index(&self, dof: DofIndex) -> Option<CartesianIndex>;

    /// Geometry of the cell a DOF belongs to.
    fn cell_geometry(&self, dof: DofIndex) -> Option<CellGeometry>;

    /// Logical (i, j, k) of a Cartesian index.
    fn logical_coords(&self, cell: CartesianIndex) -> [usize; 3] {
        let [nx, ny, _] = self.dims();
        [cell % nx, (cell / nx) % ny, cell / (nx * ny)]
    }
}
