//! Mesh lookup-table validation.

use std::collections::HashSet;
use wf_core::{CartesianIndex, DofIndex};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Element;

/// Validate that elements, the DOF → cell table and the cell → DOF table agree.
pub(crate) fn validate_tables(
    elements: &[Element],
    cartesian_cell_id: &[CartesianIndex],
    dof_of_cell: &[Option<DofIndex>],
) -> MeshResult<()> {
    let num_dofs = cartesian_cell_id.len();

    // Each DOF belongs to exactly one element
    let mut seen: HashSet<DofIndex> = HashSet::new();
    for element in elements {
        for &dof in &element.dofs {
            if dof >= num_dofs {
                return Err(MeshError::UnknownDof { dof });
            }
            if !seen.insert(dof) {
                return Err(MeshError::SharedDof { dof });
            }
        }
    }
    if let Some(dof) = (0..num_dofs).find(|d| !seen.contains(d)) {
        return Err(MeshError::UnknownDof { dof });
    }

    // The two lookup tables must be inverse to each other
    for (dof, &cell) in cartesian_cell_id.iter().enumerate() {
        match dof_of_cell.get(cell) {
            Some(Some(back)) if *back == dof => {}
            _ => return Err(MeshError::InconsistentIndex { cell }),
        }
    }
    let active = dof_of_cell.iter().filter(|d| d.is_some()).count();
    if active != num_dofs {
        let cell = dof_of_cell
            .iter()
            .enumerate()
            .find(|(cell, d)| d.is_some_and(|dof| cartesian_cell_id.get(dof) != Some(cell)))
            .map_or(0, |(cell, _)| cell);
        return Err(MeshError::InconsistentIndex { cell });
    }

    Ok(())
}
