//! Well status, type, control mode and target records.

use wf_core::units::{Pressure, VolumeRate};
use wf_core::{Phase, PhaseWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellStatus {
    /// Flowing.
    Open,
    /// Stopped at the surface.
    Closed,
    /// Isolated from the formation.
    Shut,
}

impl WellStatus {
    pub fn is_open(self) -> bool {
        self == WellStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellType {
    Injector,
    Producer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMode {
    VolumetricSurfaceRate,
    VolumetricReservoirRate,
    BottomHolePressure,
    TubingHeadPressure,
}

impl ControlMode {
    pub fn is_rate(self) -> bool {
        matches!(
            self,
            ControlMode::VolumetricSurfaceRate | ControlMode::VolumetricReservoirRate
        )
    }
}

/// Operating limits of a well for one interval.
///
/// Rate targets are magnitudes; producers withdraw them. `None` leaves the
/// well's previous value untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellTargets {
    pub surface_rate: Option<VolumeRate>,
    pub reservoir_rate: Option<VolumeRate>,
    pub bottom_hole_pressure: Pressure,
    pub tubing_head_pressure: Pressure,
}

/// Canonical control state of a well for one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellControls {
    pub well_type: WellType,
    pub control_mode: ControlMode,
    pub phase_weights: PhaseWeights,
    /// Set for injectors only.
    pub injected_phase: Option<Phase>,
    pub targets: WellTargets,
}
