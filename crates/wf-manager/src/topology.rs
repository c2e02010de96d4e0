//! DOF → well association and its reconstruction.

use std::collections::BTreeMap;

use tracing::debug;
use wf_core::{DofIndex, WellId};
use wf_mesh::{ElementContext, Mesh};
use wf_wells::Well;

use crate::completion::CompletionIndex;
use crate::error::ManagerResult;
use crate::registry::AuxiliaryRegistry;

/// Which well each local DOF belongs to, and which wells are registered as
/// auxiliary modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    dof_to_well: BTreeMap<DofIndex, WellId>,
    registered: Vec<WellId>,
}

impl Topology {
    pub fn well_of(&self, dof: DofIndex) -> Option<WellId> {
        self.dof_to_well.get(&dof).copied()
    }

    /// DOFs of one well in ascending order.
    pub fn dofs_of(&self, well: WellId) -> impl Iterator<Item = DofIndex> + '_ {
        self.dof_to_well
            .iter()
            .filter(move |&(_, &w)| w == well)
            .map(|(&dof, _)| dof)
    }

    /// All (DOF, well) pairs in ascending DOF order.
    pub fn associations(&self) -> impl Iterator<Item = (DofIndex, WellId)> + '_ {
        self.dof_to_well.iter().map(|(&dof, &well)| (dof, well))
    }

    /// Registered wells in well-index order.
    pub fn registered(&self) -> &[WellId] {
        &self.registered
    }

    pub fn is_registered(&self, well: WellId) -> bool {
        self.registered.contains(&well)
    }

    pub fn num_dofs(&self) -> usize {
        self.dof_to_well.len()
    }
}

/// Rebuilds the association of wells with local interior DOFs.
pub struct TopologyBuilder<'a, 's> {
    mesh: &'a dyn Mesh,
    index: &'a CompletionIndex<'s>,
}

impl<'a, 's> TopologyBuilder<'a, 's> {
    pub fn new(mesh: &'a dyn Mesh, index: &'a CompletionIndex<'s>) -> Self {
        Self { mesh, index }
    }

    /// Clear the registry and every well, connect each completed interior
    /// DOF to its well, then register the wells that received a DOF.
    pub fn rebuild<W: Well>(
        &self,
        wells: &mut [W],
        registry: &mut dyn AuxiliaryRegistry,
    ) -> ManagerResult<Topology> {
        registry.clear_auxiliary_modules();
        for well in wells.iter_mut() {
            well.clear();
        }

        let mut dof_to_well = BTreeMap::new();
        for element in self.mesh.elements().iter().filter(|e| e.is_interior()) {
            let ctx = ElementContext::new(self.mesh, element);
            for local in 0..ctx.num_dofs() {
                let cell = ctx.cartesian_index(local)?;
                let Some(entry) = self.index.get(cell) else {
                    continue;
                };
                wells[entry.well.index()].add_dof(&ctx, local)?;
                dof_to_well.insert(ctx.global_dof(local)?, entry.well);
            }
        }

        let mut registered = Vec::new();
        for (position, well) in wells.iter().enumerate() {
            if well.num_dofs() > 0 {
                let id = WellId::from_index(position);
                registry.add_auxiliary_module(id, well.name());
                registered.push(id);
                debug!(well = well.name(), dofs = well.num_dofs(), "registered well");
            }
        }

        Ok(Topology {
            dof_to_well,
            registered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AuxiliaryModules;
    use std::collections::HashMap;
    use wf_mesh::MeshBuilder;
    use wf_schedule::{
        CompletionDef, GridDef, IntervalDef, ScheduleDef, WellDef, WellStatusDef, WellStepDef,
    };
    use wf_wells::PeacemanWell;

    fn schedule() -> ScheduleDef {
        let step = |name: &str, cells: &[(usize, usize, usize)]| WellStepDef {
            name: name.into(),
            status: WellStatusDef::Open,
            ref_depth_m: None,
            injection: None,
            production: None,
            completions: cells.iter().map(|&(i, j, k)| CompletionDef::at(i, j, k)).collect(),
        };
        ScheduleDef {
            version: 1,
            name: "t".into(),
            grid: GridDef { nx: 4, ny: 1, nz: 1 },
            wells: ["A", "B", "C"].map(|n| WellDef { name: n.into() }).to_vec(),
            intervals: vec![IntervalDef {
                label: None,
                wells: vec![step("A", &[(0, 0, 0), (1, 0, 0)]), step("C", &[(3, 0, 0)])],
            }],
        }
    }

    fn wells() -> (Vec<PeacemanWell>, HashMap<String, WellId>) {
        let names = ["A", "B", "C"];
        let wells = names.iter().map(|n| PeacemanWell::new(*n)).collect();
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), WellId::from_index(i)))
            .collect();
        (wells, by_name)
    }

    #[test]
    fn connects_and_registers_completed_wells() {
        let s = schedule();
        let mesh = MeshBuilder::new(4, 1, 1).build().unwrap();
        let (mut wells, by_name) = wells();
        let index = CompletionIndex::build(&s, 0, &by_name).unwrap();
        let mut registry = AuxiliaryModules::new();

        let topo = TopologyBuilder::new(&mesh, &index)
            .rebuild(&mut wells, &mut registry)
            .unwrap();

        assert_eq!(topo.num_dofs(), 3);
        assert_eq!(topo.well_of(1), Some(WellId::from_index(0)));
        assert_eq!(topo.well_of(2), None);
        assert_eq!(topo.dofs_of(WellId::from_index(0)).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(
            topo.registered(),
            &[WellId::from_index(0), WellId::from_index(2)]
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(wells[0].num_dofs(), 2);
        assert_eq!(wells[1].num_dofs(), 0);
    }

    #[test]
    fn overlap_elements_are_ignored() {
        let s = schedule();
        // Rank 0 of 2 owns cells 0 and 1.
        let mesh = MeshBuilder::new(4, 1, 1).partition(0, 2).build().unwrap();
        let (mut wells, by_name) = wells();
        let index = CompletionIndex::build(&s, 0, &by_name).unwrap();
        let mut registry = AuxiliaryModules::new();

        let topo = TopologyBuilder::new(&mesh, &index)
            .rebuild(&mut wells, &mut registry)
            .unwrap();

        assert_eq!(topo.num_dofs(), 2);
        assert!(!topo.is_registered(WellId::from_index(2)));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn rebuild_clears_previous_state() {
        let s = schedule();
        let mesh = MeshBuilder::new(4, 1, 1).build().unwrap();
        let (mut wells, by_name) = wells();
        let index = CompletionIndex::build(&s, 0, &by_name).unwrap();
        let mut registry = AuxiliaryModules::new();

        let builder = TopologyBuilder::new(&mesh, &index);
        let first = builder.rebuild(&mut wells, &mut registry).unwrap();
        let second = builder.rebuild(&mut wells, &mut registry).unwrap();

        assert_eq!(first, second);
        assert_eq!(wells[0].num_dofs(), 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.clear_count(), 2);
    }
}
