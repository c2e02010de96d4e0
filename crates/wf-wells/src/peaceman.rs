//! Peaceman well: connection factors from cell geometry, closed-form BHP.

use std::collections::BTreeMap;

use crate::common::{default_radius, default_viscosity, peaceman_transmissibility};
use crate::control::{ControlMode, WellStatus, WellType};
use crate::error::{WellError, WellResult};
use crate::traits::{IterationProtocol, Well};
use wf_core::units::{DynVisc, Length, Pressure, VolumeRate, m3ps, pa};
use wf_core::{DofIndex, Phase, PhaseWeights, RateVector, Real, is_positive_finite};
use wf_mesh::{CellGeometry, ElementContext};

/// Connection of the wellbore to one DOF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Connection {
    geometry: CellGeometry,
    radius: Length,
    /// Connection transmissibility factor (m³). `None` while the radius does
    /// not fit inside the cell and no explicit factor has been given.
    transmissibility: Option<Real>,
    /// Set once the schedule overrides the factor; radius changes then no
    /// longer recompute it.
    overridden: bool,
}

impl Connection {
    fn factor(&self, well: &str) -> WellResult<Real> {
        self.transmissibility.ok_or_else(|| WellError::NonPhysical {
            well: well.to_string(),
            what: "wellbore radius exceeds the cell's equivalent radius",
        })
    }
}

/// Reference well model.
///
/// Each connected DOF exchanges `q = T/μ (p_bh − p_cell)`. Rate-controlled
/// wells solve for the bottom-hole pressure meeting their target in closed
/// form, clamped to the BHP limit. Cross-flow is not modelled: injectors
/// never withdraw and producers never inject.
#[derive(Debug, Clone)]
pub struct PeacemanWell {
    name: String,
    status: WellStatus,
    well_type: Option<WellType>,
    control_mode: Option<ControlMode>,
    phase_weights: PhaseWeights,
    injected_phase: Option<Phase>,
    max_surface_rate: VolumeRate,
    max_reservoir_rate: VolumeRate,
    target_bhp: Pressure,
    target_thp: Pressure,
    reference_depth: Option<Length>,
    viscosity: DynVisc,

    connections: BTreeMap<DofIndex, Connection>,

    // Per-iteration accumulators: Σ λTw and Σ λTw·p
    acc_mobility: Real,
    acc_mobility_pressure: Real,
    bottom_hole_pressure: Pressure,

    iteration: usize,
    completed_time_steps: usize,
}

impl PeacemanWell {
    /// Placeholder well: named, shut, unconnected and without controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: WellStatus::Shut,
            well_type: None,
            control_mode: None,
            phase_weights: PhaseWeights::zero(),
            injected_phase: None,
            max_surface_rate: m3ps(0.0),
            max_reservoir_rate: m3ps(0.0),
            target_bhp: pa(0.0),
            target_thp: pa(0.0),
            reference_depth: None,
            viscosity: default_viscosity(),
            connections: BTreeMap::new(),
            acc_mobility: 0.0,
            acc_mobility_pressure: 0.0,
            bottom_hole_pressure: pa(0.0),
            iteration: 0,
            completed_time_steps: 0,
        }
    }

    pub fn with_viscosity(mut self, viscosity: DynVisc) -> Self {
        self.viscosity = viscosity;
        self
    }

    pub fn phase_weights(&self) -> PhaseWeights {
        self.phase_weights
    }

    pub fn injected_phase(&self) -> Option<Phase> {
        self.injected_phase
    }

    pub fn maximum_surface_rate(&self) -> VolumeRate {
        self.max_surface_rate
    }

    pub fn maximum_reservoir_rate(&self) -> VolumeRate {
        self.max_reservoir_rate
    }

    pub fn target_bottom_hole_pressure(&self) -> Pressure {
        self.target_bhp
    }

    pub fn target_tubing_head_pressure(&self) -> Pressure {
        self.target_thp
    }

    pub fn reference_depth(&self) -> Option<Length> {
        self.reference_depth
    }

    /// Bottom-hole pressure of the current iteration.
    pub fn bottom_hole_pressure(&self) -> Pressure {
        self.bottom_hole_pressure
    }

    /// Connected DOFs in ascending order.
    pub fn dofs(&self) -> impl Iterator<Item = DofIndex> + '_ {
        self.connections.keys().copied()
    }

    pub fn radius(&self, dof: DofIndex) -> Option<Length> {
        self.connections.get(&dof).map(|c| c.radius)
    }

    pub fn connection_transmissibility_factor(&self, dof: DofIndex) -> Option<Real> {
        self.connections.get(&dof).and_then(|c| c.transmissibility)
    }

    /// Iterations finished in the current time step.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn completed_time_steps(&self) -> usize {
        self.completed_time_steps
    }

    fn mobility(&self) -> Real {
        1.0 / self.viscosity.value
    }

    fn connection_mut(&mut self, dof: DofIndex) -> WellResult<&mut Connection> {
        let well = &self.name;
        self.connections
            .get_mut(&dof)
            .ok_or_else(|| WellError::DofNotOwned {
                well: well.clone(),
                dof,
            })
    }

    /// Fraction of a DOF's flow counted against the rate target.
    fn target_weight(&self, saturation: &RateVector) -> Real {
        match self.well_type {
            Some(WellType::Injector) => 1.0,
            Some(WellType::Producer) => self.phase_weights.as_vector().dot(saturation),
            None => 0.0,
        }
    }

    /// Signed volumetric target: positive injects, negative withdraws.
    fn signed_rate_target(&self, mode: ControlMode) -> Real {
        let magnitude = match mode {
            ControlMode::VolumetricReservoirRate => self.max_reservoir_rate.value,
            _ => self.max_surface_rate.value,
        };
        match self.well_type {
            Some(WellType::Producer) => -magnitude,
            _ => magnitude,
        }
    }

    /// Respect the BHP limit: injectors may not exceed it, producers may not
    /// drop below it.
    fn clamp_to_limit(&self, bhp: Real) -> Real {
        let limit = self.target_bhp.value;
        match self.well_type {
            Some(WellType::Injector) => bhp.min(limit),
            Some(WellType::Producer) => bhp.max(limit),
            None => bhp,
        }
    }
}

impl IterationProtocol for PeacemanWell {
    fn begin_iteration_pre_process(&mut self) {
        self.acc_mobility = 0.0;
        self.acc_mobility_pressure = 0.0;
    }

    fn begin_iteration_accumulate(&mut self, ctx: &ElementContext<'_>) -> WellResult<()> {
        if self.connections.is_empty() {
            return Ok(());
        }
        let mobility = self.mobility();
        for local in 0..ctx.num_dofs() {
            let dof = ctx.global_dof(local)?;
            let Some(conn) = self.connections.get(&dof) else {
                continue;
            };
            let state = ctx.primary(local)?;
            let weight = conn.factor(&self.name)? * mobility * self.target_weight(&state.saturation);
            self.acc_mobility += weight;
            self.acc_mobility_pressure += weight * state.pressure.value;
        }
        Ok(())
    }

    fn begin_iteration_post_process(&mut self) -> WellResult<()> {
        let Some(mode) = self.control_mode else {
            self.bottom_hole_pressure = self.target_bhp;
            return Ok(());
        };

        let bhp = match mode {
            ControlMode::BottomHolePressure => self.target_bhp.value,
            ControlMode::TubingHeadPressure => {
                tracing::trace!(well = %self.name, "THP control approximated by the BHP limit");
                self.target_bhp.value
            }
            ControlMode::VolumetricSurfaceRate | ControlMode::VolumetricReservoirRate => {
                if self.acc_mobility > 0.0 {
                    let q = self.signed_rate_target(mode);
                    self.clamp_to_limit((q + self.acc_mobility_pressure) / self.acc_mobility)
                } else {
                    self.target_bhp.value
                }
            }
        };

        if !bhp.is_finite() {
            return Err(WellError::NonPhysical {
                well: self.name.clone(),
                what: "bottom-hole pressure",
            });
        }
        self.bottom_hole_pressure = pa(bhp);
        Ok(())
    }
}

impl Well for PeacemanWell {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> WellStatus {
        self.status
    }

    fn set_status(&mut self, status: WellStatus) {
        self.status = status;
    }

    fn well_type(&self) -> Option<WellType> {
        self.well_type
    }

    fn set_well_type(&mut self, well_type: WellType) {
        self.well_type = Some(well_type);
        if well_type == WellType::Producer {
            self.injected_phase = None;
        }
    }

    fn control_mode(&self) -> Option<ControlMode> {
        self.control_mode
    }

    fn set_control_mode(&mut self, mode: ControlMode) {
        self.control_mode = Some(mode);
    }

    fn set_volumetric_phase_weights(&mut self, weights: PhaseWeights) {
        self.phase_weights = weights;
    }

    fn set_injected_phase(&mut self, phase: Phase) {
        self.injected_phase = Some(phase);
    }

    fn set_maximum_surface_rate(&mut self, rate: VolumeRate) {
        self.max_surface_rate = rate;
    }

    fn set_maximum_reservoir_rate(&mut self, rate: VolumeRate) {
        self.max_reservoir_rate = rate;
    }

    fn set_target_bottom_hole_pressure(&mut self, pressure: Pressure) {
        self.target_bhp = pressure;
    }

    fn set_target_tubing_head_pressure(&mut self, pressure: Pressure) {
        self.target_thp = pressure;
    }

    fn set_reference_depth(&mut self, depth: Length) {
        self.reference_depth = Some(depth);
    }

    fn clear(&mut self) {
        self.connections.clear();
        self.acc_mobility = 0.0;
        self.acc_mobility_pressure = 0.0;
    }

    fn add_dof(&mut self, ctx: &ElementContext<'_>, local_dof: usize) -> WellResult<()> {
        let dof = ctx.global_dof(local_dof)?;
        let geometry = ctx.geometry(local_dof)?;
        let radius = default_radius();
        // Cells too narrow for the default radius wait for an explicit factor.
        let transmissibility = peaceman_transmissibility(&self.name, &geometry, radius).ok();
        self.connections.insert(
            dof,
            Connection {
                geometry,
                radius,
                transmissibility,
                overridden: false,
            },
        );
        Ok(())
    }

    fn owns_dof(&self, dof: DofIndex) -> bool {
        self.connections.contains_key(&dof)
    }

    fn num_dofs(&self) -> usize {
        self.connections.len()
    }

    fn set_radius(
        &mut self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
        radius: Length,
    ) -> WellResult<()> {
        let dof = ctx.global_dof(local_dof)?;
        let name = self.name.clone();
        let conn = self.connection_mut(dof)?;
        if !conn.overridden {
            conn.transmissibility = Some(peaceman_transmissibility(&name, &conn.geometry, radius)?);
        } else if !is_positive_finite(radius.value) {
            return Err(WellError::NonPhysical {
                well: name,
                what: "wellbore radius must be finite and positive",
            });
        }
        conn.radius = radius;
        Ok(())
    }

    fn set_connection_transmissibility_factor(
        &mut self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
        factor: Real,
    ) -> WellResult<()> {
        let dof = ctx.global_dof(local_dof)?;
        if !is_positive_finite(factor) {
            return Err(WellError::NonPhysical {
                well: self.name.clone(),
                what: "connection transmissibility factor must be finite and positive",
            });
        }
        let conn = self.connection_mut(dof)?;
        conn.transmissibility = Some(factor);
        conn.overridden = true;
        Ok(())
    }

    fn begin_time_step(&mut self) {
        self.iteration = 0;
    }

    fn end_iteration(&mut self) {
        self.iteration += 1;
    }

    fn end_time_step(&mut self) {
        self.completed_time_steps += 1;
    }

    fn compute_total_rates_for_dof(
        &self,
        ctx: &ElementContext<'_>,
        local_dof: usize,
    ) -> WellResult<RateVector> {
        let dof = ctx.global_dof(local_dof)?;
        let Some(conn) = self.connections.get(&dof) else {
            return Ok(RateVector::zeros());
        };
        if !self.status.is_open() {
            return Ok(RateVector::zeros());
        }

        let state = ctx.primary(local_dof)?;
        let q = conn.factor(&self.name)?
            * self.mobility()
            * (self.bottom_hole_pressure.value - state.pressure.value);

        let mut rates = RateVector::zeros();
        match (self.well_type, self.injected_phase) {
            (Some(WellType::Injector), Some(phase)) if q > 0.0 => {
                rates[phase.index()] = q;
            }
            (Some(WellType::Producer), _) if q < 0.0 => {
                rates = state.saturation * q;
            }
            _ => {}
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{WellControls, WellTargets};
    use wf_core::PhaseVector;
    use wf_core::units::{m, m3pd};
    use wf_mesh::{CellState, Mesh, MeshBuilder, SolutionSnapshot};

    fn mesh() -> wf_mesh::CartesianMesh {
        MeshBuilder::new(3, 1, 1).build().unwrap()
    }

    fn connect(well: &mut PeacemanWell, mesh: &wf_mesh::CartesianMesh, dofs: &[usize]) {
        for &dof in dofs {
            let ctx = ElementContext::new(mesh, &mesh.elements()[dof]);
            well.add_dof(&ctx, 0).unwrap();
        }
    }

    fn iterate(well: &mut PeacemanWell, mesh: &wf_mesh::CartesianMesh, snap: &SolutionSnapshot) {
        well.begin_iteration_pre_process();
        for element in mesh.elements() {
            let ctx = ElementContext::new(mesh, element).with_snapshot(snap);
            well.begin_iteration_accumulate(&ctx).unwrap();
        }
        well.begin_iteration_post_process().unwrap();
    }

    fn total_rate(well: &PeacemanWell, mesh: &wf_mesh::CartesianMesh, snap: &SolutionSnapshot) -> RateVector {
        mesh.elements()
            .iter()
            .map(|e| {
                let ctx = ElementContext::new(mesh, e).with_snapshot(snap);
                well.compute_total_rates_for_dof(&ctx, 0).unwrap()
            })
            .sum()
    }

    fn injector(rate_m3_per_day: f64, bhp_limit: f64) -> WellControls {
        WellControls {
            well_type: WellType::Injector,
            control_mode: ControlMode::VolumetricSurfaceRate,
            phase_weights: PhaseWeights::only(Phase::Water),
            injected_phase: Some(Phase::Water),
            targets: WellTargets {
                surface_rate: Some(m3pd(rate_m3_per_day)),
                reservoir_rate: None,
                bottom_hole_pressure: pa(bhp_limit),
                tubing_head_pressure: pa(1.0e100),
            },
        }
    }

    #[test]
    fn placeholder_well_is_inert() {
        let mesh = mesh();
        let well = PeacemanWell::new("W");
        assert_eq!(well.name(), "W");
        assert_eq!(well.status(), WellStatus::Shut);
        assert!(well.well_type().is_none());
        assert!(well.control_mode().is_none());
        assert_eq!(well.num_dofs(), 0);

        let snap = SolutionSnapshot::uniform(3, CellState::new(pa(1.0e7), PhaseVector::new(1.0, 0.0, 0.0)));
        assert_eq!(total_rate(&well, &mesh, &snap), RateVector::zeros());
    }

    #[test]
    fn rate_controlled_injector_meets_target() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("INJ");
        connect(&mut well, &mesh, &[0, 1]);
        well.apply_controls(&injector(1000.0, 1.0e9));
        well.set_status(WellStatus::Open);

        let mut snap = SolutionSnapshot::uniform(3, CellState::new(pa(1.0e7), PhaseVector::new(0.7, 0.0, 0.3)));
        snap.get_mut(1).unwrap().pressure = pa(1.2e7);
        iterate(&mut well, &mesh, &snap);

        let q = total_rate(&well, &mesh, &snap);
        assert!((q[Phase::Water.index()] - m3pd(1000.0).value).abs() < 1e-12);
        assert_eq!(q[Phase::Oil.index()], 0.0);
        assert!(well.bottom_hole_pressure().value > 1.2e7);
    }

    #[test]
    fn injector_bhp_is_capped_by_limit() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("INJ");
        connect(&mut well, &mesh, &[0]);
        well.apply_controls(&injector(1.0e9, 1.1e7));
        well.set_status(WellStatus::Open);

        let snap = SolutionSnapshot::uniform(3, CellState::new(pa(1.0e7), PhaseVector::new(1.0, 0.0, 0.0)));
        iterate(&mut well, &mesh, &snap);

        assert_eq!(well.bottom_hole_pressure(), pa(1.1e7));
    }

    #[test]
    fn bhp_producer_withdraws_by_saturation() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("PROD");
        connect(&mut well, &mesh, &[2]);
        well.set_well_type(WellType::Producer);
        well.set_control_mode(ControlMode::BottomHolePressure);
        well.set_volumetric_phase_weights(PhaseWeights::all());
        well.set_target_bottom_hole_pressure(pa(5.0e6));
        well.set_status(WellStatus::Open);

        let snap = SolutionSnapshot::uniform(3, CellState::new(pa(1.0e7), PhaseVector::new(0.6, 0.1, 0.3)));
        iterate(&mut well, &mesh, &snap);

        let q = total_rate(&well, &mesh, &snap);
        assert!(q.iter().all(|&v| v < 0.0));
        assert!((q[0] / q[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn closed_well_contributes_nothing() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("INJ");
        connect(&mut well, &mesh, &[0]);
        well.apply_controls(&injector(100.0, 1.0e9));
        well.set_status(WellStatus::Closed);

        let snap = SolutionSnapshot::uniform(3, CellState::new(pa(1.0e7), PhaseVector::new(1.0, 0.0, 0.0)));
        iterate(&mut well, &mesh, &snap);
        assert_eq!(total_rate(&well, &mesh, &snap), RateVector::zeros());
    }

    #[test]
    fn overrides_respect_precedence() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("W");
        connect(&mut well, &mesh, &[1]);
        let ctx = ElementContext::new(&mesh, &mesh.elements()[1]);

        let default_t = well.connection_transmissibility_factor(1).unwrap();
        well.set_radius(&ctx, 0, m(0.2)).unwrap();
        let wider_t = well.connection_transmissibility_factor(1).unwrap();
        assert!(wider_t > default_t);

        well.set_connection_transmissibility_factor(&ctx, 0, 3.0e-12).unwrap();
        well.set_radius(&ctx, 0, m(0.05)).unwrap();
        assert_eq!(well.connection_transmissibility_factor(1), Some(3.0e-12));
        assert_eq!(well.radius(1), Some(m(0.05)));
    }

    #[test]
    fn narrow_cell_waits_for_explicit_factor() {
        let mesh = MeshBuilder::new(2, 1, 1)
            .cell_size(0.4, 0.4, 1.0)
            .build()
            .unwrap();
        let mut well = PeacemanWell::new("W");
        let ctx = ElementContext::new(&mesh, &mesh.elements()[0]);
        well.add_dof(&ctx, 0).unwrap();
        well.apply_controls(&injector(10.0, 1.0e9));
        well.set_status(WellStatus::Open);
        assert!(well.owns_dof(0));
        assert_eq!(well.connection_transmissibility_factor(0), None);

        let snap = SolutionSnapshot::uniform(2, CellState::new(pa(1.0e7), PhaseVector::new(1.0, 0.0, 0.0)));
        let ctx = ElementContext::new(&mesh, &mesh.elements()[0]).with_snapshot(&snap);
        well.begin_iteration_pre_process();
        assert!(matches!(
            well.begin_iteration_accumulate(&ctx),
            Err(WellError::NonPhysical { .. })
        ));

        well.set_connection_transmissibility_factor(&ctx, 0, 1.0e-12).unwrap();
        well.begin_iteration_pre_process();
        well.begin_iteration_accumulate(&ctx).unwrap();
        well.begin_iteration_post_process().unwrap();
        assert_eq!(well.connection_transmissibility_factor(0), Some(1.0e-12));
        assert!(well.compute_total_rates_for_dof(&ctx, 0).unwrap()[Phase::Water.index()] > 0.0);
    }

    #[test]
    fn overrides_on_foreign_dof_fail() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("W");
        connect(&mut well, &mesh, &[0]);
        let ctx = ElementContext::new(&mesh, &mesh.elements()[2]);

        assert!(matches!(
            well.set_radius(&ctx, 0, m(0.1)),
            Err(WellError::DofNotOwned { dof: 2, .. })
        ));
        assert!(matches!(
            well.set_connection_transmissibility_factor(&ctx, 0, f64::NAN),
            Err(WellError::NonPhysical { .. })
        ));
    }

    #[test]
    fn lifecycle_counters() {
        let mut well = PeacemanWell::new("W");
        well.begin_time_step();
        well.end_iteration();
        well.end_iteration();
        assert_eq!(well.iteration(), 2);
        well.end_time_step();
        well.begin_time_step();
        assert_eq!(well.iteration(), 0);
        assert_eq!(well.completed_time_steps(), 1);
    }

    #[test]
    fn clear_drops_connections() {
        let mesh = mesh();
        let mut well = PeacemanWell::new("W");
        connect(&mut well, &mesh, &[0, 2]);
        assert_eq!(well.dofs().collect::<Vec<_>>(), vec![0, 2]);
        well.clear();
        assert_eq!(well.num_dofs(), 0);
        assert!(!well.owns_dof(0));
    }
}
