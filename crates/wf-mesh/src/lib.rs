//! wf-mesh: grid layer for wellflow.
//!
//! Provides:
//! - The `Mesh` trait the well manager walks (elements, DOFs, logical cell lookup)
//! - A logically Cartesian mesh with inactive cells and rank partitioning
//! - Incremental mesh builder with validation
//! - Element contexts exposing geometry and primary unknowns per local DOF
//!
//! # Example
//!
//! ```
//! use wf_mesh::{Mesh, MeshBuilder};
//!
//! let mesh = MeshBuilder::new(3, 3, 1).deactivate(1, 1, 0).build().unwrap();
//!
//! assert_eq!(mesh.num_dofs(), 8);
//! assert_eq!(mesh.cartesian_index(4), Some(5));
//! ```

pub mod builder;
pub mod cartesian;
pub mod context;
pub mod error;
pub mod mesh;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::MeshBuilder;
pub use cartesian::CartesianMesh;
pub use context::{CellState, ElementContext, SolutionSnapshot};
pub use error::{MeshError, MeshResult};
pub use mesh::{CellGeometry, Element, ElementId, Mesh, PartitionType};
