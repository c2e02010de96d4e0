//! Incremental mesh builder.

use std::collections::HashSet;
use wf_core::units::{Area, m};

use crate::cartesian::CartesianMesh;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{Element, ElementId, PartitionType};
use crate::validate;

/// Builder for a [`CartesianMesh`].
///
/// Configure dimensions, geometry, inactive cells and partitioning, then call
/// `build()` to validate and freeze the lookup tables.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    dims: [usize; 3],
    cell_size_m: [f64; 3],
    permeability_m2: f64,
    top_depth_m: f64,
    inactive: HashSet<[usize; 3]>,
    rank: usize,
    ranks: usize,
}

impl MeshBuilder {
    /// Create a builder for an `nx` × `ny` × `nz` grid of 100 m × 100 m × 10 m
    /// cells with 100 mD permeability, all active and locally owned.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            dims: [nx, ny, nz],
            cell_size_m: [100.0, 100.0, 10.0],
            permeability_m2: 9.869_233e-14,
            top_depth_m: 0.0,
            inactive: HashSet::new(),
            rank: 0,
            ranks: 1,
        }
    }

    pub fn cell_size(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.cell_size_m = [dx, dy, dz];
        self
    }

    pub fn permeability(mut self, k_m2: f64) -> Self {
        self.permeability_m2 = k_m2;
        self
    }

    pub fn top_depth(mut self, depth_m: f64) -> Self {
        self.top_depth_m = depth_m;
        self
    }

    /// Remove a cell from the mesh (it gets no DOF).
    pub fn deactivate(mut self, i: usize, j: usize, k: usize) -> Self {
        self.inactive.insert([i, j, k]);
        self
    }

    /// Own only the `rank`-th of `ranks` contiguous DOF blocks; the remaining
    /// elements are kept as overlap.
    pub fn partition(mut self, rank: usize, ranks: usize) -> Self {
        self.rank = rank;
        self.ranks = ranks;
        self
    }

    /// Build and validate the mesh.
    pub fn build(self) -> MeshResult<CartesianMesh> {
        let [nx, ny, nz] = self.dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(MeshError::InvalidDimensions { nx, ny, nz });
        }
        if self.ranks == 0 || self.rank >= self.ranks {
            return Err(MeshError::InvalidPartition {
                rank: self.rank,
                ranks: self.ranks,
            });
        }
        if self
            .cell_size_m
            .iter()
            .any(|d| !(d.is_finite() && *d > 0.0))
        {
            return Err(MeshError::InvalidGeometry {
                what: "cell sizes must be finite and positive",
            });
        }
        if !(self.permeability_m2.is_finite() && self.permeability_m2 > 0.0) {
            return Err(MeshError::InvalidGeometry {
                what: "permeability must be finite and positive",
            });
        }
        if !self.top_depth_m.is_finite() {
            return Err(MeshError::InvalidGeometry {
                what: "top depth must be finite",
            });
        }
        if let Some(&[i, j, k]) = self
            .inactive
            .iter()
            .find(|[i, j, k]| *i >= nx || *j >= ny || *k >= nz)
        {
            return Err(MeshError::CellOutOfGrid { i, j, k });
        }

        let cell_count = nx * ny * nz;
        let mut cartesian_cell_id = Vec::with_capacity(cell_count);
        let mut dof_of_cell = vec![None; cell_count];
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    if self.inactive.contains(&[i, j, k]) {
                        continue;
                    }
                    let cell = i + j * nx + k * nx * ny;
                    dof_of_cell[cell] = Some(cartesian_cell_id.len());
                    cartesian_cell_id.push(cell);
                }
            }
        }

        let num_dofs = cartesian_cell_id.len();
        let (own_begin, own_end) = Self::owned_range(num_dofs, self.rank, self.ranks);
        let elements = (0..num_dofs)
            .map(|dof| Element {
                id: ElementId(dof),
                partition: if (own_begin..own_end).contains(&dof) {
                    PartitionType::Interior
                } else {
                    PartitionType::Overlap
                },
                dofs: vec![dof],
            })
            .collect::<Vec<_>>();

        validate::validate_tables(&elements, &cartesian_cell_id, &dof_of_cell)?;

        let [dx, dy, dz] = self.cell_size_m;
        Ok(CartesianMesh {
            dims: self.dims,
            cell_size: [m(dx), m(dy), m(dz)],
            permeability: Area::new::<uom::si::area::square_meter>(self.permeability_m2),
            top_depth: m(self.top_depth_m),
            elements,
            cartesian_cell_id,
            dof_of_cell,
            partition: (self.rank, self.ranks),
        })
    }

    /// Contiguous block of DOFs owned by `rank`.
    fn owned_range(num_dofs: usize, rank: usize, ranks: usize) -> (usize, usize) {
        let begin = num_dofs * rank / ranks;
        let end = num_dofs * (rank + 1) / ranks;
        (begin, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn builder_basic() {
        let mesh = MeshBuilder::new(2, 2, 1).build().unwrap();
        assert_eq!(mesh.num_dofs(), 4);
        assert_eq!(mesh.elements().len(), 4);
        assert!(mesh.elements().iter().all(|e| e.is_interior()));
    }

    #[test]
    fn builder_partition_covers_all_dofs_once() {
        let ranks = 3;
        let mut owners = vec![0usize; 10];
        for rank in 0..ranks {
            let mesh = MeshBuilder::new(10, 1, 1)
                .partition(rank, ranks)
                .build()
                .unwrap();
            for e in mesh.elements().iter().filter(|e| e.is_interior()) {
                owners[e.dofs[0]] += 1;
            }
        }
        assert!(owners.iter().all(|&n| n == 1));
    }

    #[test]
    fn builder_rejects_bad_input() {
        assert!(matches!(
            MeshBuilder::new(0, 1, 1).build(),
            Err(MeshError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            MeshBuilder::new(1, 1, 1).partition(2, 2).build(),
            Err(MeshError::InvalidPartition { .. })
        ));
        assert!(matches!(
            MeshBuilder::new(1, 1, 1).deactivate(1, 0, 0).build(),
            Err(MeshError::CellOutOfGrid { .. })
        ));
        assert!(matches!(
            MeshBuilder::new(1, 1, 1).cell_size(1.0, 0.0, 1.0).build(),
            Err(MeshError::InvalidGeometry { .. })
        ));
    }
}
