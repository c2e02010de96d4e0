//! Well manager: owns the wells and drives them through episodes.

use std::collections::HashMap;

use tracing::{info, warn};
use wf_core::{RateVector, WellId};
use wf_mesh::{ElementContext, Mesh, SolutionSnapshot};
use wf_schedule::ScheduleDef;
use wf_wells::Well;

use crate::completion::CompletionIndex;
use crate::control::{WellRole, resolve_controls, resolve_status};
use crate::detect::topology_changed;
use crate::error::{ManagerError, ManagerResult};
use crate::parameters::ParameterApplier;
use crate::registry::AuxiliaryRegistry;
use crate::restart::Restarter;
use crate::topology::{Topology, TopologyBuilder};

/// Owns every well of a run, the name → id map and the current DOF
/// association.
///
/// Wells are created once by [`WellManager::init`] and never removed; a well
/// absent from an interval keeps its previous configuration.
#[derive(Debug)]
pub struct WellManager<W> {
    wells: Vec<W>,
    by_name: HashMap<String, WellId>,
    topology: Topology,
    current_episode: Option<usize>,
}

impl<W: Well> WellManager<W> {
    /// Create one placeholder well per declared well, in declaration order.
    pub fn init<F>(schedule: &ScheduleDef, mut make_well: F) -> Self
    where
        F: FnMut(&str) -> W,
    {
        let mut wells = Vec::with_capacity(schedule.wells.len());
        let mut by_name = HashMap::with_capacity(schedule.wells.len());
        for def in &schedule.wells {
            if by_name.contains_key(&def.name) {
                warn!(well = %def.name, "well declared twice; keeping the first declaration");
                continue;
            }
            by_name.insert(def.name.clone(), WellId::from_index(wells.len()));
            wells.push(make_well(&def.name));
        }
        Self {
            wells,
            by_name,
            topology: Topology::default(),
            current_episode: None,
        }
    }

    /// Configure every well for `interval`.
    ///
    /// The DOF association is rebuilt at interval 0, on restart, when the
    /// previous interval was not the last one configured, or when the
    /// completion layout differs from the previous interval. Returns whether
    /// it was rebuilt.
    pub fn begin_episode(
        &mut self,
        schedule: &ScheduleDef,
        mesh: &dyn Mesh,
        registry: &mut dyn AuxiliaryRegistry,
        interval: usize,
        was_restarted: bool,
    ) -> ManagerResult<bool> {
        let index = CompletionIndex::build(schedule, interval, &self.by_name)?;

        let rebuild = interval == 0
            || was_restarted
            || self.current_episode != Some(interval - 1)
            || topology_changed(schedule, interval);
        if rebuild {
            self.topology = TopologyBuilder::new(mesh, &index).rebuild(&mut self.wells, registry)?;
            info!(
                interval,
                was_restarted,
                dofs = self.topology.num_dofs(),
                wells = self.topology.registered().len(),
                "well topology updated"
            );
        }

        ParameterApplier::new(schedule, interval, &index).apply(
            &mut self.wells,
            &self.by_name,
            mesh,
        )?;

        for step in schedule.wells_at(interval) {
            let Some(&id) = self.by_name.get(&step.name) else {
                warn!(well = %step.name, interval, "scheduled well was never declared; skipping");
                continue;
            };
            let role = WellRole::from_step(step)?;
            let controls = resolve_controls(&step.name, role)?;

            let well = &mut self.wells[id.index()];
            well.set_status(resolve_status(step.status));
            well.apply_controls(&controls);
        }

        self.current_episode = Some(interval);
        Ok(rebuild)
    }

    /// Episode epilogue. Nothing is carried across episodes.
    pub fn end_episode(&mut self) {}

    pub fn begin_time_step(&mut self) {
        for well in &mut self.wells {
            well.begin_time_step();
        }
    }

    /// Run the three-step iteration protocol over every well.
    ///
    /// All pre-processing finishes before the element pass starts, and the
    /// element pass finishes before any post-processing.
    pub fn begin_iteration(
        &mut self,
        mesh: &dyn Mesh,
        snapshot: &SolutionSnapshot,
    ) -> ManagerResult<()> {
        snapshot.check_matches(mesh)?;

        for well in &mut self.wells {
            well.begin_iteration_pre_process();
        }

        for element in mesh.elements().iter().filter(|e| e.is_interior()) {
            let ctx = ElementContext::new(mesh, element).with_snapshot(snapshot);
            for well in &mut self.wells {
                well.begin_iteration_accumulate(&ctx)?;
            }
        }

        for well in &mut self.wells {
            well.begin_iteration_post_process()?;
        }
        Ok(())
    }

    pub fn end_iteration(&mut self) {
        for well in &mut self.wells {
            well.end_iteration();
        }
    }

    pub fn end_time_step(&mut self) {
        for well in &mut self.wells {
            well.end_time_step();
        }
    }

    /// Sum of every well's source term at a local DOF; zero when no well
    /// owns it.
    pub fn compute_total_rates_for_dof(
        &self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
    ) -> ManagerResult<RateVector> {
        let mut total = RateVector::zeros();
        for well in &self.wells {
            total += well.compute_total_rates_for_dof(ctx, local_dof)?;
        }
        Ok(total)
    }

    /// Restart data is reconstructed from the schedule, so nothing is written.
    pub fn serialize<R: Restarter + ?Sized>(&self, _restarter: &mut R) {}

    /// Reconfigure the wells for the restart episode, forcing a topology
    /// rebuild.
    pub fn deserialize<R: Restarter + ?Sized>(
        &mut self,
        restarter: &R,
        schedule: &ScheduleDef,
        mesh: &dyn Mesh,
        registry: &mut dyn AuxiliaryRegistry,
    ) -> ManagerResult<()> {
        self.begin_episode(schedule, mesh, registry, restarter.episode_index(), true)?;
        Ok(())
    }

    pub fn num_wells(&self) -> usize {
        self.wells.len()
    }

    pub fn has_well(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn well_index(&self, name: &str) -> ManagerResult<WellId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ManagerError::WellNotFound {
                name: name.to_string(),
            })
    }

    pub fn well(&self, name: &str) -> ManagerResult<&W> {
        let id = self.well_index(name)?;
        Ok(&self.wells[id.index()])
    }

    pub fn well_mut(&mut self, name: &str) -> ManagerResult<&mut W> {
        let id = self.well_index(name)?;
        Ok(&mut self.wells[id.index()])
    }

    pub fn well_at(&self, id: WellId) -> Option<&W> {
        self.wells.get(id.index())
    }

    pub fn well_at_mut(&mut self, id: WellId) -> Option<&mut W> {
        self.wells.get_mut(id.index())
    }

    /// Wells in index order.
    pub fn wells(&self) -> impl Iterator<Item = (WellId, &W)> {
        self.wells
            .iter()
            .enumerate()
            .map(|(i, w)| (WellId::from_index(i), w))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Interval of the last successful `begin_episode`.
    pub fn current_episode(&self) -> Option<usize> {
        self.current_episode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AuxiliaryModules;
    use wf_mesh::MeshBuilder;
    use wf_schedule::{GridDef, IntervalDef, WellDef};
    use wf_wells::PeacemanWell;

    fn empty_schedule(names: &[&str]) -> ScheduleDef {
        ScheduleDef {
            version: 1,
            name: "t".into(),
            grid: GridDef { nx: 2, ny: 2, nz: 1 },
            wells: names.iter().map(|n| WellDef { name: n.to_string() }).collect(),
            intervals: vec![IntervalDef::default()],
        }
    }

    #[test]
    fn init_assigns_ids_in_declaration_order() {
        let s = empty_schedule(&["B", "A", "B"]);
        let manager = WellManager::init(&s, |name| PeacemanWell::new(name));

        assert_eq!(manager.num_wells(), 2);
        assert_eq!(manager.well_index("B").unwrap(), WellId::from_index(0));
        assert_eq!(manager.well_index("A").unwrap(), WellId::from_index(1));
        assert!(manager.has_well("A"));
        assert!(!manager.has_well("C"));
        assert_eq!(
            manager.well_index("C"),
            Err(ManagerError::WellNotFound { name: "C".into() })
        );
        assert_eq!(manager.well_at(WellId::from_index(1)).unwrap().name(), "A");
        assert!(manager.current_episode().is_none());
    }

    #[test]
    fn empty_interval_registers_nothing() {
        let s = empty_schedule(&["A"]);
        let mesh = MeshBuilder::new(2, 2, 1).build().unwrap();
        let mut registry = AuxiliaryModules::new();
        let mut manager = WellManager::init(&s, |name| PeacemanWell::new(name));

        let rebuilt = manager
            .begin_episode(&s, &mesh, &mut registry, 0, false)
            .unwrap();
        assert!(rebuilt);
        assert!(registry.is_empty());
        assert_eq!(registry.clear_count(), 1);
        assert_eq!(manager.current_episode(), Some(0));
    }
}
