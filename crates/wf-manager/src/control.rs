//! Mapping of scheduled status and controls onto well runtime state.

use tracing::debug;
use wf_core::units::{m3pd, pa};
use wf_core::{Phase, PhaseWeights};
use wf_schedule::{
    InjectionDef, InjectorControlDef, InjectorPhaseDef, ProducerControlDef, ProductionDef,
    WellStatusDef, WellStepDef,
};
use wf_wells::common::{INJECTOR_THP_SENTINEL_PA, PRODUCER_THP_SENTINEL_PA};
use wf_wells::{ControlMode, WellControls, WellStatus, WellTargets, WellType};

use crate::error::{ManagerError, ManagerResult};

/// Role of a scheduled well: exactly one of injector or producer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellRole<'a> {
    Injector(&'a InjectionDef),
    Producer(&'a ProductionDef),
}

impl<'a> WellRole<'a> {
    /// Role declared by a schedule entry. Declaring both or neither is fatal.
    pub fn from_step(step: &'a WellStepDef) -> ManagerResult<Self> {
        match (&step.injection, &step.production) {
            (Some(injection), None) => Ok(WellRole::Injector(injection)),
            (None, Some(production)) => Ok(WellRole::Producer(production)),
            (injection, production) => Err(ManagerError::AmbiguousRole {
                well: step.name.clone(),
                injector: injection.is_some(),
                producer: production.is_some(),
            }),
        }
    }

    pub fn well_type(&self) -> WellType {
        match self {
            WellRole::Injector(_) => WellType::Injector,
            WellRole::Producer(_) => WellType::Producer,
        }
    }
}

/// AUTO wells are treated as open.
pub fn resolve_status(status: WellStatusDef) -> WellStatus {
    match status {
        WellStatusDef::Open | WellStatusDef::Auto => WellStatus::Open,
        WellStatusDef::Stop => WellStatus::Closed,
        WellStatusDef::Shut => WellStatus::Shut,
    }
}

/// Translate a scheduled role into the well's control record.
pub fn resolve_controls(well: &str, role: WellRole<'_>) -> ManagerResult<WellControls> {
    match role {
        WellRole::Injector(injection) => resolve_injector(well, injection),
        WellRole::Producer(production) => resolve_producer(well, production),
    }
}

fn resolve_injector(well: &str, injection: &InjectionDef) -> ManagerResult<WellControls> {
    let phase = match injection.phase {
        InjectorPhaseDef::Water => Phase::Water,
        InjectorPhaseDef::Gas => Phase::Gas,
        InjectorPhaseDef::Oil => Phase::Oil,
        InjectorPhaseDef::Multi => {
            return Err(unsupported(well, "multi-phase injection"));
        }
    };

    let control_mode = match injection.control {
        InjectorControlDef::Rate => ControlMode::VolumetricSurfaceRate,
        InjectorControlDef::Resv => ControlMode::VolumetricReservoirRate,
        InjectorControlDef::Bhp => ControlMode::BottomHolePressure,
        InjectorControlDef::Thp => ControlMode::TubingHeadPressure,
        InjectorControlDef::Grup => return Err(unsupported(well, "group control")),
        InjectorControlDef::Undefined => {
            return Err(ManagerError::UndefinedControlMode {
                well: well.to_string(),
            });
        }
    };

    if injection.thp_limit_pa.is_some() {
        debug!(well, "THP limit replaced by the injector sentinel");
    }
    debug!(well, ?control_mode, ?phase, "resolved injector controls");

    Ok(WellControls {
        well_type: WellType::Injector,
        control_mode,
        phase_weights: PhaseWeights::only(phase),
        injected_phase: Some(phase),
        targets: WellTargets {
            surface_rate: Some(m3pd(injection.surface_rate_m3_per_day)),
            reservoir_rate: Some(m3pd(injection.reservoir_rate_m3_per_day)),
            bottom_hole_pressure: pa(injection.bhp_limit_pa),
            tubing_head_pressure: pa(INJECTOR_THP_SENTINEL_PA),
        },
    })
}

fn resolve_producer(well: &str, production: &ProductionDef) -> ManagerResult<WellControls> {
    let surface = |weights: PhaseWeights, rate: f64| {
        (
            ControlMode::VolumetricSurfaceRate,
            weights,
            Some(m3pd(rate)),
            None,
        )
    };

    let (control_mode, phase_weights, surface_rate, reservoir_rate) = match production.control {
        ProducerControlDef::Orat => surface(PhaseWeights::only(Phase::Oil), production.oil_rate_m3_per_day),
        ProducerControlDef::Grat => surface(PhaseWeights::only(Phase::Gas), production.gas_rate_m3_per_day),
        ProducerControlDef::Wrat => {
            surface(PhaseWeights::only(Phase::Water), production.water_rate_m3_per_day)
        }
        ProducerControlDef::Lrat => surface(
            PhaseWeights::new(1.0, 0.0, 1.0),
            production.liquid_rate_m3_per_day,
        ),
        ProducerControlDef::Resv => (
            ControlMode::VolumetricReservoirRate,
            PhaseWeights::all(),
            None,
            Some(m3pd(production.reservoir_rate_m3_per_day)),
        ),
        ProducerControlDef::Bhp => (ControlMode::BottomHolePressure, PhaseWeights::all(), None, None),
        ProducerControlDef::Thp => (ControlMode::TubingHeadPressure, PhaseWeights::all(), None, None),
        ProducerControlDef::Crat => {
            return Err(unsupported(well, "linearly combined rate control"));
        }
        ProducerControlDef::Grup => return Err(unsupported(well, "group control")),
        ProducerControlDef::Undefined => {
            return Err(ManagerError::UndefinedControlMode {
                well: well.to_string(),
            });
        }
    };

    if production.thp_limit_pa.is_some() {
        debug!(well, "THP limit replaced by the producer sentinel");
    }
    debug!(well, ?control_mode, "resolved producer controls");

    Ok(WellControls {
        well_type: WellType::Producer,
        control_mode,
        phase_weights,
        injected_phase: None,
        targets: WellTargets {
            surface_rate,
            reservoir_rate,
            bottom_hole_pressure: pa(production.bhp_limit_pa),
            tubing_head_pressure: pa(PRODUCER_THP_SENTINEL_PA),
        },
    })
}

fn unsupported(well: &str, what: &'static str) -> ManagerError {
    ManagerError::Unsupported {
        well: well.to_string(),
        what,
    }
}
