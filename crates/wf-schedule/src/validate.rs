//! Schedule validation logic.
//!
//! Only structural problems are rejected here. Conditions the well manager
//! must handle at run time (cells shared between wells, wells that are both
//! or neither injector and producer, unsupported control modes, wells that
//! were never declared) are deliberately left through.

use crate::schema::{CompletionDef, InjectionDef, ProductionDef, ScheduleDef, WellStepDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_schedule(schedule: &ScheduleDef) -> Result<(), ValidationError> {
    if schedule.version == 0 || schedule.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: schedule.version,
        });
    }

    let grid = &schedule.grid;
    for (field, n) in [("grid.nx", grid.nx), ("grid.ny", grid.ny), ("grid.nz", grid.nz)] {
        if n == 0 {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: n.to_string(),
                reason: "grid dimensions must be positive".to_string(),
            });
        }
    }

    let mut well_names = HashSet::new();
    for well in &schedule.wells {
        if well.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "wells.name".to_string(),
                value: format!("'{}'", well.name),
                reason: "well names must not be empty".to_string(),
            });
        }
        if !well_names.insert(&well.name) {
            return Err(ValidationError::DuplicateId {
                id: well.name.clone(),
                context: "wells".to_string(),
            });
        }
    }

    for (idx, interval) in schedule.intervals.iter().enumerate() {
        let mut present = HashSet::new();
        for step in &interval.wells {
            if !present.insert(&step.name) {
                return Err(ValidationError::DuplicateId {
                    id: step.name.clone(),
                    context: format!("interval {idx} wells"),
                });
            }
            validate_step(schedule, idx, step)?;
        }
    }

    Ok(())
}

fn validate_step(
    schedule: &ScheduleDef,
    interval: usize,
    step: &WellStepDef,
) -> Result<(), ValidationError> {
    let context = format!("interval {interval} well '{}'", step.name);

    if let Some(depth) = step.ref_depth_m {
        if !depth.is_finite() {
            return Err(invalid(&context, "ref_depth_m", depth, "must be finite"));
        }
    }

    if let Some(injection) = &step.injection {
        validate_injection(&context, injection)?;
    }
    if let Some(production) = &step.production {
        validate_production(&context, production)?;
    }

    let mut cells = HashSet::new();
    for completion in &step.completions {
        validate_completion(schedule, &context, completion)?;
        if !cells.insert((completion.i, completion.j, completion.k)) {
            return Err(ValidationError::DuplicateId {
                id: format!("({}, {}, {})", completion.i, completion.j, completion.k),
                context: format!("{context} completions"),
            });
        }
    }

    Ok(())
}

fn validate_injection(context: &str, injection: &InjectionDef) -> Result<(), ValidationError> {
    non_negative(context, "surface_rate_m3_per_day", injection.surface_rate_m3_per_day)?;
    non_negative(
        context,
        "reservoir_rate_m3_per_day",
        injection.reservoir_rate_m3_per_day,
    )?;
    non_negative(context, "bhp_limit_pa", injection.bhp_limit_pa)?;
    Ok(())
}

fn validate_production(context: &str, production: &ProductionDef) -> Result<(), ValidationError> {
    for (field, value) in [
        ("oil_rate_m3_per_day", production.oil_rate_m3_per_day),
        ("gas_rate_m3_per_day", production.gas_rate_m3_per_day),
        ("water_rate_m3_per_day", production.water_rate_m3_per_day),
        ("liquid_rate_m3_per_day", production.liquid_rate_m3_per_day),
        (
            "reservoir_rate_m3_per_day",
            production.reservoir_rate_m3_per_day,
        ),
        ("bhp_limit_pa", production.bhp_limit_pa),
    ] {
        non_negative(context, field, value)?;
    }
    Ok(())
}

fn validate_completion(
    schedule: &ScheduleDef,
    context: &str,
    completion: &CompletionDef,
) -> Result<(), ValidationError> {
    if !schedule.grid.contains(completion.i, completion.j, completion.k) {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} completion"),
            value: format!("({}, {}, {})", completion.i, completion.j, completion.k),
            reason: format!(
                "outside the {}x{}x{} grid",
                schedule.grid.nx, schedule.grid.ny, schedule.grid.nz
            ),
        });
    }
    if let Some(d) = completion.diameter_m {
        if !(d.is_finite() && d > 0.0) {
            return Err(invalid(context, "diameter_m", d, "must be finite and positive"));
        }
    }
    Ok(())
}

fn non_negative(context: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(context, field, value, "must be finite and non-negative"))
    }
}

fn invalid(context: &str, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("{context} {field}"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
