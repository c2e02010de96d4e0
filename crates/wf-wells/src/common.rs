//! Common constants and connection-factor helpers.

use crate::error::{WellError, WellResult};
use wf_core::units::{Length, m, pas};
use wf_core::{DynVisc, Real};
use wf_mesh::CellGeometry;

/// Wellbore radius used until a completion diameter overrides it.
pub fn default_radius() -> Length {
    m(0.1)
}

/// Fluid viscosity used for connection mobility.
pub fn default_viscosity() -> DynVisc {
    pas(1.0e-3)
}

/// THP target pushed to injectors until THP limits are propagated.
pub const INJECTOR_THP_SENTINEL_PA: Real = 1.0e100;

/// THP target pushed to producers until THP limits are propagated.
pub const PRODUCER_THP_SENTINEL_PA: Real = -1.0e100;

/// Peaceman equivalent radius of an isotropic cell.
pub fn equivalent_radius(geometry: &CellGeometry) -> Length {
    let dx = geometry.dx.value;
    let dy = geometry.dy.value;
    m(0.14 * (dx * dx + dy * dy).sqrt())
}

/// Connection transmissibility factor `2π k h / ln(r0 / rw)` (m³).
pub fn peaceman_transmissibility(
    well: &str,
    geometry: &CellGeometry,
    radius: Length,
) -> WellResult<Real> {
    let r0 = equivalent_radius(geometry).value;
    let rw = radius.value;
    if !(rw.is_finite() && rw > 0.0) {
        return Err(WellError::NonPhysical {
            well: well.to_string(),
            what: "wellbore radius must be finite and positive",
        });
    }
    if r0 <= rw {
        return Err(WellError::NonPhysical {
            well: well.to_string(),
            what: "wellbore radius exceeds the cell's equivalent radius",
        });
    }
    let kh = geometry.permeability.value * geometry.dz.value;
    Ok(2.0 * std::f64::consts::PI * kh / (r0 / rw).ln())
}
