//! wf-wells: well capability for wellflow.
//!
//! Provides:
//! - The `Well` trait (configuration setters, DOF registration, lifecycle hooks)
//! - The `IterationProtocol` trait (pre-process / accumulate / post-process)
//! - Canonical control records (`WellControls`) produced from a schedule
//! - `PeacemanWell`, a reference implementation with Peaceman connection factors
//!
//! # Example
//!
//! ```
//! use wf_mesh::{ElementContext, Mesh, MeshBuilder};
//! use wf_wells::{PeacemanWell, Well};
//!
//! let mesh = MeshBuilder::new(2, 1, 1).build().unwrap();
//! let mut well = PeacemanWell::new("PROD1");
//!
//! let ctx = ElementContext::new(&mesh, &mesh.elements()[1]);
//! well.add_dof(&ctx, 0).unwrap();
//!
//! assert!(well.owns_dof(1));
//! assert!(well.connection_transmissibility_factor(1).unwrap() > 0.0);
//! ```

pub mod common;
pub mod control;
pub mod error;
pub mod peaceman;
pub mod traits;

// Re-exports
pub use control::{ControlMode, WellControls, WellStatus, WellTargets, WellType};
pub use error::{WellError, WellResult};
pub use peaceman::PeacemanWell;
pub use traits::{IterationProtocol, Well};
