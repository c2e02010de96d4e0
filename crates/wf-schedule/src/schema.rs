//! Schedule schema definitions.

use serde::{Deserialize, Serialize};
use wf_core::CartesianIndex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub version: u32,
    pub name: String,
    pub grid: GridDef,
    /// Every well of the run, in declaration order. Time independent.
    #[serde(default)]
    pub wells: Vec<WellDef>,
    /// One entry per episode, in time order.
    #[serde(default)]
    pub intervals: Vec<IntervalDef>,
}

impl ScheduleDef {
    pub fn num_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Wells present in an interval; empty past the end of the schedule.
    pub fn wells_at(&self, interval: usize) -> &[WellStepDef] {
        self.intervals
            .get(interval)
            .map(|iv| iv.wells.as_slice())
            .unwrap_or(&[])
    }

    pub fn well_at(&self, interval: usize, name: &str) -> Option<&WellStepDef> {
        self.wells_at(interval).iter().find(|w| w.name == name)
    }
}

/// Logical dimensions of the structured grid the completions refer to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridDef {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDef {
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.nx && j < self.ny && k < self.nz
    }

    pub fn cartesian_index(&self, i: usize, j: usize, k: usize) -> CartesianIndex {
        i + j * self.nx + k * self.nx * self.ny
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellDef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IntervalDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub wells: Vec<WellStepDef>,
}

/// State of one well for one interval.
///
/// Exactly one of `injection` / `production` is expected. Both or neither is
/// not rejected here; the well manager treats it as a fatal inconsistency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellStepDef {
    pub name: String,
    #[serde(default)]
    pub status: WellStatusDef,
    /// `None` means the reference depth is defaulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_depth_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection: Option<InjectionDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionDef>,
    #[serde(default)]
    pub completions: Vec<CompletionDef>,
}

impl WellStepDef {
    pub fn is_injector(&self) -> bool {
        self.injection.is_some()
    }

    pub fn is_producer(&self) -> bool {
        self.production.is_some()
    }

    /// Whether a completion exists at the given logical coordinate.
    pub fn has_completion_at(&self, i: usize, j: usize, k: usize) -> bool {
        self.completions
            .iter()
            .any(|c| c.i == i && c.j == j && c.k == k)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WellStatusDef {
    #[default]
    Open,
    Stop,
    Shut,
    /// Automatic opening; treated as open.
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjectionDef {
    pub phase: InjectorPhaseDef,
    #[serde(default)]
    pub control: InjectorControlDef,
    #[serde(default)]
    pub surface_rate_m3_per_day: f64,
    #[serde(default)]
    pub reservoir_rate_m3_per_day: f64,
    #[serde(default = "default_injector_bhp_limit_pa")]
    pub bhp_limit_pa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thp_limit_pa: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjectorPhaseDef {
    Water,
    Gas,
    Oil,
    Multi,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjectorControlDef {
    Rate,
    Resv,
    Bhp,
    Thp,
    Grup,
    #[default]
    Undefined,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionDef {
    #[serde(default)]
    pub control: ProducerControlDef,
    #[serde(default)]
    pub oil_rate_m3_per_day: f64,
    #[serde(default)]
    pub gas_rate_m3_per_day: f64,
    #[serde(default)]
    pub water_rate_m3_per_day: f64,
    #[serde(default)]
    pub liquid_rate_m3_per_day: f64,
    #[serde(default)]
    pub reservoir_rate_m3_per_day: f64,
    #[serde(default = "default_producer_bhp_limit_pa")]
    pub bhp_limit_pa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thp_limit_pa: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProducerControlDef {
    Orat,
    Grat,
    Wrat,
    Lrat,
    /// Linearly combined rate.
    Crat,
    Resv,
    Bhp,
    Thp,
    Grup,
    #[default]
    Undefined,
}

/// Connection of a well to one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionDef {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    /// `None` leaves the well radius at the simulator default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_m: Option<f64>,
    /// Connection transmissibility factor (m³). Only finite, positive values
    /// override the computed default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmissibility_factor: Option<f64>,
}

impl CompletionDef {
    pub fn at(i: usize, j: usize, k: usize) -> Self {
        Self {
            i,
            j,
            k,
            diameter_m: None,
            transmissibility_factor: None,
        }
    }

    pub fn same_cell(&self, other: &CompletionDef) -> bool {
        self.i == other.i && self.j == other.j && self.k == other.k
    }
}

/// 100 000 psi, effectively unbounded.
fn default_injector_bhp_limit_pa() -> f64 {
    6.894_757e8
}

/// One atmosphere.
fn default_producer_bhp_limit_pa() -> f64 {
    101_325.0
}
