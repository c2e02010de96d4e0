//! Per-interval geometric parameters: reference depth, radius, connection factor.

use std::collections::HashMap;

use wf_core::units::m;
use wf_core::{WellId, usable_override};
use wf_mesh::{ElementContext, Mesh};
use wf_schedule::ScheduleDef;
use wf_wells::Well;

use crate::completion::CompletionIndex;
use crate::error::ManagerResult;

/// Pushes the schedule's geometric parameters of one interval into the wells.
///
/// Only DOFs the well already owns are touched. Undefined diameters and
/// non-finite or non-positive transmissibility factors leave the well's own
/// default in place. Errors the well raises for a defined value propagate.
pub struct ParameterApplier<'a, 's> {
    schedule: &'s ScheduleDef,
    interval: usize,
    index: &'a CompletionIndex<'s>,
}

impl<'a, 's> ParameterApplier<'a, 's> {
    pub fn new(schedule: &'s ScheduleDef, interval: usize, index: &'a CompletionIndex<'s>) -> Self {
        Self {
            schedule,
            interval,
            index,
        }
    }

    pub fn apply<W: Well>(
        &self,
        wells: &mut [W],
        wells_by_name: &HashMap<String, WellId>,
        mesh: &dyn Mesh,
    ) -> ManagerResult<()> {
        for step in self.schedule.wells_at(self.interval) {
            let (Some(&id), Some(depth)) = (wells_by_name.get(&step.name), step.ref_depth_m) else {
                continue;
            };
            wells[id.index()].set_reference_depth(m(depth));
        }

        for element in mesh.elements().iter().filter(|e| e.is_interior()) {
            let ctx = ElementContext::new(mesh, element);
            for local in 0..ctx.num_dofs() {
                let Some(entry) = self.index.get(ctx.cartesian_index(local)?) else {
                    continue;
                };
                let well = &mut wells[entry.well.index()];
                if !well.owns_dof(ctx.global_dof(local)?) {
                    continue;
                }
                let completion = entry.completion;

                if let Some(diameter) = completion.diameter_m {
                    well.set_radius(&ctx, local, m(diameter / 2.0))?;
                }
                if let Some(factor) = usable_override(completion.transmissibility_factor) {
                    well.set_connection_transmissibility_factor(&ctx, local, factor)?;
                }
            }
        }
        Ok(())
    }
}
