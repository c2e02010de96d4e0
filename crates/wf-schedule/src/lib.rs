//! wf-schedule: declarative well schedule format and validation.
//!
//! A schedule lists every well once, then describes for each interval
//! (episode) which wells are present, how they are controlled and which
//! grid cells they are completed in.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_schedule};

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ScheduleResult<ScheduleDef> {
    let schedule: ScheduleDef = serde_yaml::from_str(content)?;
    validate_schedule(&schedule)?;
    Ok(schedule)
}

pub fn load_yaml(path: &std::path::Path) -> ScheduleResult<ScheduleDef> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, schedule: &ScheduleDef) -> ScheduleResult<()> {
    validate_schedule(schedule)?;
    let content = serde_yaml::to_string(schedule)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ScheduleResult<ScheduleDef> {
    let content = std::fs::read_to_string(path)?;
    let schedule: ScheduleDef = serde_json::from_str(&content)?;
    validate_schedule(&schedule)?;
    Ok(schedule)
}

pub fn save_json(path: &std::path::Path, schedule: &ScheduleDef) -> ScheduleResult<()> {
    validate_schedule(schedule)?;
    let content = serde_json::to_string_pretty(schedule)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a schedule, choosing the format from the file extension (`.json` or YAML).
pub fn load(path: &std::path::Path) -> ScheduleResult<ScheduleDef> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
