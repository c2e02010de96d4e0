//! Integration tests for wf-mesh.

use proptest::prelude::*;
use wf_core::PhaseVector;
use wf_core::units::pa;
use wf_mesh::{CellState, ElementContext, Mesh, MeshBuilder, PartitionType, SolutionSnapshot};

#[test]
fn element_context_walk_matches_lookup_table() {
    let mesh = MeshBuilder::new(4, 3, 2)
        .deactivate(1, 1, 0)
        .deactivate(3, 2, 1)
        .build()
        .unwrap();

    let mut visited = Vec::new();
    for element in mesh.elements() {
        let ctx = ElementContext::new(&mesh, element);
        for local in 0..ctx.num_dofs() {
            let dof = ctx.global_dof(local).unwrap();
            let cell = ctx.cartesian_index(local).unwrap();
            assert_eq!(mesh.cartesian_cell_ids()[dof], cell);
            visited.push(cell);
        }
    }

    assert_eq!(visited.len(), 22);
    assert!(!visited.contains(&5));
    assert!(!visited.contains(&23));
    assert!(visited.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn partitioned_mesh_keeps_overlap_elements() {
    let mesh = MeshBuilder::new(5, 2, 1).partition(1, 2).build().unwrap();

    assert_eq!(mesh.elements().len(), 10);
    assert_eq!(mesh.interior_count(), 5);
    assert_eq!(mesh.rank(), 1);
    assert_eq!(mesh.ranks(), 2);
    assert_eq!(mesh.elements()[0].partition, PartitionType::Overlap);
    assert_eq!(mesh.elements()[9].partition, PartitionType::Interior);
}

#[test]
fn snapshot_is_read_through_context() {
    let mesh = MeshBuilder::new(3, 1, 1).build().unwrap();
    let mut snapshot = SolutionSnapshot::uniform(
        mesh.num_dofs(),
        CellState::new(pa(1.0e7), PhaseVector::new(1.0, 0.0, 0.0)),
    );
    snapshot.get_mut(2).unwrap().pressure = pa(2.0e7);

    let ctx = ElementContext::new(&mesh, &mesh.elements()[2]).with_snapshot(&snapshot);
    assert_eq!(ctx.primary(0).unwrap().pressure, pa(2.0e7));
}

proptest! {
    #[test]
    fn lookup_tables_are_inverse(
        nx in 1usize..6,
        ny in 1usize..6,
        nz in 1usize..4,
        holes in prop::collection::vec((0usize..6, 0usize..6, 0usize..4), 0..8),
    ) {
        let mut builder = MeshBuilder::new(nx, ny, nz);
        for (i, j, k) in holes.iter().copied().filter(|&(i, j, k)| i < nx && j < ny && k < nz) {
            builder = builder.deactivate(i, j, k);
        }
        let mesh = builder.build().unwrap();

        for dof in 0..mesh.num_dofs() {
            let cell = mesh.cartesian_index(dof).unwrap();
            let [i, j, k] = mesh.logical_coords(cell);
            prop_assert_eq!(i + j * nx + k * nx * ny, cell);
            prop_assert_eq!(mesh.dof_at(i, j, k), Some(dof));
        }
    }

    #[test]
    fn every_dof_is_interior_on_exactly_one_rank(n in 1usize..40, ranks in 1usize..6) {
        let mut owners = vec![0usize; n];
        for rank in 0..ranks {
            let mesh = MeshBuilder::new(n, 1, 1).partition(rank, ranks).build().unwrap();
            for element in mesh.elements().iter().filter(|e| e.is_interior()) {
                for &dof in &element.dofs {
                    owners[dof] += 1;
                }
            }
        }
        prop_assert!(owners.iter().all(|&c| c == 1));
    }
}
