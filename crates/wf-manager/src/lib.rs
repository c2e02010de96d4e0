//! wf-manager: schedule-driven well management for wellflow.
//!
//! Provides:
//! - `WellManager`: owns the wells, reconfigures them at every episode and
//!   drives the per-iteration protocol
//! - Completion indexing and change detection between intervals
//! - DOF association rebuild and auxiliary-module registration
//! - Control-mode resolution from scheduled keywords
//! - An episode driver recording per-well rates
//!
//! # Example
//!
//! ```
//! use wf_manager::{AuxiliaryModules, WellManager};
//! use wf_mesh::MeshBuilder;
//! use wf_wells::{PeacemanWell, Well, WellStatus};
//!
//! let schedule = wf_schedule::from_yaml_str(
//!     r#"
//! version: 1
//! name: single
//! grid: { nx: 3, ny: 1, nz: 1 }
//! wells: [{ name: PROD }]
//! intervals:
//!   - wells:
//!       - name: PROD
//!         production: { control: BHP, bhp_limit_pa: 5.0e6 }
//!         completions: [{ i: 2, j: 0, k: 0 }]
//! "#,
//! )
//! .unwrap();
//!
//! let mesh = MeshBuilder::new(3, 1, 1).build().unwrap();
//! let mut registry = AuxiliaryModules::new();
//! let mut manager = WellManager::init(&schedule, |name| PeacemanWell::new(name));
//!
//! manager.begin_episode(&schedule, &mesh, &mut registry, 0, false).unwrap();
//!
//! let well = manager.well("PROD").unwrap();
//! assert_eq!(well.status(), WellStatus::Open);
//! assert!(well.owns_dof(2));
//! assert_eq!(registry.len(), 1);
//! ```

pub mod completion;
pub mod control;
pub mod detect;
pub mod driver;
pub mod error;
pub mod manager;
pub mod parameters;
pub mod registry;
pub mod restart;
pub mod topology;

// Re-exports
pub use completion::{CompletionIndex, IndexedCompletion};
pub use control::{WellRole, resolve_controls, resolve_status};
pub use detect::topology_changed;
pub use driver::{DriverOptions, EpisodeRecord, ScheduleRecord, WellRateRecord, run_schedule};
pub use error::{ManagerError, ManagerResult};
pub use manager::WellManager;
pub use parameters::ParameterApplier;
pub use registry::{AuxiliaryModules, AuxiliaryRegistry};
pub use restart::{RestartPoint, Restarter};
pub use topology::{Topology, TopologyBuilder};
