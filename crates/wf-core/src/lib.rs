//! wf-core: shared vocabulary of the wellflow crates.
//!
//! - `units`: uom SI aliases and constructors (Pa, m, m³/s, m³/day)
//! - `numeric`: scalar type, comparison tolerances, override filtering
//! - `ids`: well identifiers plus DOF and Cartesian index aliases
//! - `phase`: oil/gas/water phases, phase weights, rate vectors
//! - `error`: workspace-wide error categories

pub mod error;
pub mod ids;
pub mod numeric;
pub mod phase;
pub mod units;

pub use error::{WfError, WfResult};
pub use ids::*;
pub use numeric::*;
pub use phase::*;
pub use units::*;
