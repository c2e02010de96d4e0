//! Core traits for well models.

use crate::control::{ControlMode, WellControls, WellStatus, WellType};
use crate::error::WellResult;
use wf_core::units::{Length, Pressure, VolumeRate};
use wf_core::{DofIndex, Phase, PhaseWeights, RateVector, Real};
use wf_mesh::ElementContext;

/// Three-step protocol run at the start of every Newton iteration.
///
/// The caller runs `begin_iteration_pre_process` on every well, then one pass
/// over the local elements calling `begin_iteration_accumulate` for each well,
/// then `begin_iteration_post_process` on every well. The steps never
/// interleave, so accumulate always sees the unmodified primary unknowns of
/// the current iterate.
pub trait IterationProtocol {
    /// Reset per-iteration accumulators.
    fn begin_iteration_pre_process(&mut self);

    /// Gather contributions of the DOFs of one element.
    fn begin_iteration_accumulate(&mut self, ctx: &ElementContext<'_>) -> WellResult<()>;

    /// Derive the iteration's bottom-hole pressure from the accumulated data.
    fn begin_iteration_post_process(&mut self) -> WellResult<()>;
}

/// A well coupled to a set of solver DOFs.
///
/// Wells are created once with a name; everything else (status, type,
/// controls, connected DOFs) is reconfigured by the well manager at episode
/// boundaries.
pub trait Well: IterationProtocol {
    /// Well name (immutable).
    fn name(&self) -> &str;

    fn status(&self) -> WellStatus;
    fn set_status(&mut self, status: WellStatus);

    /// `None` until the well has been configured for an interval.
    fn well_type(&self) -> Option<WellType>;
    fn set_well_type(&mut self, well_type: WellType);

    fn control_mode(&self) -> Option<ControlMode>;
    fn set_control_mode(&mut self, mode: ControlMode);

    fn set_volumetric_phase_weights(&mut self, weights: PhaseWeights);
    fn set_injected_phase(&mut self, phase: Phase);
    fn set_maximum_surface_rate(&mut self, rate: VolumeRate);
    fn set_maximum_reservoir_rate(&mut self, rate: VolumeRate);
    fn set_target_bottom_hole_pressure(&mut self, pressure: Pressure);
    fn set_target_tubing_head_pressure(&mut self, pressure: Pressure);
    fn set_reference_depth(&mut self, depth: Length);

    /// Push a resolved control record through the individual setters.
    fn apply_controls(&mut self, controls: &WellControls) {
        self.set_well_type(controls.well_type);
        if let Some(phase) = controls.injected_phase {
            self.set_injected_phase(phase);
        }
        self.set_control_mode(controls.control_mode);
        self.set_volumetric_phase_weights(controls.phase_weights);
        if let Some(rate) = controls.targets.surface_rate {
            self.set_maximum_surface_rate(rate);
        }
        if let Some(rate) = controls.targets.reservoir_rate {
            self.set_maximum_reservoir_rate(rate);
        }
        self.set_target_bottom_hole_pressure(controls.targets.bottom_hole_pressure);
        self.set_target_tubing_head_pressure(controls.targets.tubing_head_pressure);
    }

    /// Forget all connected DOFs.
    fn clear(&mut self);

    /// Connect a local DOF of an element to this well.
    fn add_dof(&mut self, ctx: &ElementContext<'_>, local_dof: usize) -> WellResult<()>;

    fn owns_dof(&self, dof: DofIndex) -> bool;

    fn num_dofs(&self) -> usize;

    /// Override the wellbore radius at a connected DOF.
    fn set_radius(
        &mut self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
        radius: Length,
    ) -> WellResult<()>;

    /// Override the computed connection transmissibility factor at a connected DOF.
    fn set_connection_transmissibility_factor(
        &mut self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
        factor: Real,
    ) -> WellResult<()>;

    fn begin_time_step(&mut self) {}

    fn end_iteration(&mut self) {}

    fn end_time_step(&mut self) {}

    /// Source rate this well imposes on a local DOF (zero if not connected).
    fn compute_total_rates_for_dof(
        &self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
    ) -> WellResult<RateVector>;
}
