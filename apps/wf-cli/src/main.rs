use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wf_core::SECONDS_PER_DAY;
use wf_core::units::pa;
use wf_core::{Phase, PhaseVector};
use wf_manager::{
    AuxiliaryModules, DriverOptions, ManagerError, ScheduleRecord, WellManager, WellRole,
    run_schedule,
};
use wf_mesh::{CellState, Mesh, MeshBuilder, MeshError, SolutionSnapshot};
use wf_schedule::{ScheduleDef, ScheduleError, WellStepDef};
use wf_wells::{PeacemanWell, WellStatus};

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "WellFlow CLI - schedule-driven well management for reservoir models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate schedule file syntax and structure
    Validate {
        /// Path to the schedule YAML or JSON file
        schedule_path: PathBuf,
    },
    /// List wells and their per-interval configuration
    Wells {
        /// Path to the schedule YAML or JSON file
        schedule_path: PathBuf,
    },
    /// Drive every episode of a schedule over a uniform Cartesian reservoir
    Run {
        /// Path to the schedule YAML or JSON file
        schedule_path: PathBuf,
        /// Time steps per episode
        #[arg(long, default_value_t = 1)]
        steps: usize,
        /// Newton iterations per time step
        #[arg(long, default_value_t = 1)]
        iterations: usize,
        /// Uniform reservoir pressure in Pa
        #[arg(long, default_value_t = 2.0e7)]
        pressure_pa: f64,
        /// Uniform water saturation (remainder is oil)
        #[arg(long, default_value_t = 0.2)]
        water_saturation: f64,
        /// Local rank of a partitioned run
        #[arg(long, default_value_t = 0)]
        rank: usize,
        /// Number of ranks the grid is split across
        #[arg(long, default_value_t = 1)]
        ranks: usize,
        /// Horizontal cell size in metres
        #[arg(long, default_value_t = 100.0)]
        cell_size_m: f64,
        /// Cell thickness in metres
        #[arg(long, default_value_t = 10.0)]
        thickness_m: f64,
        /// Isotropic permeability in m²
        #[arg(long, default_value_t = 9.869_233e-14)]
        permeability_m2: f64,
        /// Print the run record as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Well manager error: {0}")]
    Manager(#[from] ManagerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

type CliResult<T> = Result<T, CliError>;

/// Reservoir model parameters taken from the command line.
struct ReservoirArgs {
    pressure_pa: f64,
    water_saturation: f64,
    rank: usize,
    ranks: usize,
    cell_size_m: f64,
    thickness_m: f64,
    permeability_m2: f64,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { schedule_path } => cmd_validate(&schedule_path),
        Commands::Wells { schedule_path } => cmd_wells(&schedule_path),
        Commands::Run {
            schedule_path,
            steps,
            iterations,
            pressure_pa,
            water_saturation,
            rank,
            ranks,
            cell_size_m,
            thickness_m,
            permeability_m2,
            json,
        } => {
            let opts = DriverOptions {
                time_steps_per_episode: steps,
                iterations_per_step: iterations,
                ..Default::default()
            };
            let reservoir = ReservoirArgs {
                pressure_pa,
                water_saturation,
                rank,
                ranks,
                cell_size_m,
                thickness_m,
                permeability_m2,
            };
            cmd_run(&schedule_path, &opts, &reservoir, json)
        }
    }
}

fn cmd_validate(schedule_path: &Path) -> CliResult<()> {
    println!("Validating schedule: {}", schedule_path.display());
    let schedule = wf_schedule::load(schedule_path)?;
    println!(
        "✓ Schedule is valid ({} wells, {} intervals)",
        schedule.wells.len(),
        schedule.num_intervals()
    );
    Ok(())
}

fn cmd_wells(schedule_path: &Path) -> CliResult<()> {
    let schedule = wf_schedule::load(schedule_path)?;

    if schedule.wells.is_empty() {
        println!("No wells declared in schedule");
        return Ok(());
    }

    println!("Wells in schedule '{}':", schedule.name);
    for (id, well) in schedule.wells.iter().enumerate() {
        println!("  [{id}] {}", well.name);
        for interval in 0..schedule.num_intervals() {
            match schedule.well_at(interval, &well.name) {
                Some(step) => println!("      interval {interval}: {}", describe_step(step)),
                None => println!("      interval {interval}: not scheduled"),
            }
        }
    }
    Ok(())
}

fn describe_step(step: &WellStepDef) -> String {
    let role = match WellRole::from_step(step) {
        Ok(WellRole::Injector(inj)) => format!("injector {:?}/{:?}", inj.phase, inj.control),
        Ok(WellRole::Producer(prod)) => format!("producer {:?}", prod.control),
        Err(_) => "invalid role".to_string(),
    };
    format!(
        "{:?}, {role}, {} completion(s)",
        step.status,
        step.completions.len()
    )
}

fn build_snapshot(mesh: &dyn Mesh, reservoir: &ReservoirArgs) -> CliResult<SolutionSnapshot> {
    let sw = reservoir.water_saturation;
    if !(0.0..=1.0).contains(&sw) {
        return Err(CliError::InvalidArg {
            what: "water saturation must lie in [0, 1]",
        });
    }
    let state = CellState::new(pa(reservoir.pressure_pa), PhaseVector::new(1.0 - sw, 0.0, sw));
    Ok(SolutionSnapshot::uniform(mesh.num_dofs(), state))
}

fn cmd_run(
    schedule_path: &Path,
    opts: &DriverOptions,
    reservoir: &ReservoirArgs,
    json: bool,
) -> CliResult<()> {
    let schedule = wf_schedule::load(schedule_path)?;
    let grid = schedule.grid;
    let mesh = MeshBuilder::new(grid.nx, grid.ny, grid.nz)
        .cell_size(reservoir.cell_size_m, reservoir.cell_size_m, reservoir.thickness_m)
        .permeability(reservoir.permeability_m2)
        .partition(reservoir.rank, reservoir.ranks)
        .build()?;
    let snapshot = build_snapshot(&mesh, reservoir)?;

    let mut registry = AuxiliaryModules::new();
    let mut manager = WellManager::init(&schedule, |name| PeacemanWell::new(name));
    let record = run_schedule(
        &mut manager,
        &schedule,
        &mesh,
        &mut registry,
        &snapshot,
        opts,
    )?;
    tracing::info!(
        episodes = record.episodes.len(),
        rebuilds = record.rebuilds().len(),
        "schedule run finished"
    );

    let report = RunReport::new(&schedule, &record);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

#[derive(Serialize)]
struct RunReport {
    schedule: String,
    episodes: Vec<EpisodeReport>,
}

#[derive(Serialize)]
struct EpisodeReport {
    interval: usize,
    label: Option<String>,
    topology_rebuilt: bool,
    registered_wells: Vec<String>,
    wells: Vec<WellReport>,
}

#[derive(Serialize)]
struct WellReport {
    name: String,
    status: &'static str,
    connections: usize,
    rates: Vec<PhaseRate>,
}

/// Rate in m³/day; positive injects.
#[derive(Serialize)]
struct PhaseRate {
    phase: Phase,
    m3_per_day: f64,
}

impl RunReport {
    fn new(schedule: &ScheduleDef, record: &ScheduleRecord) -> Self {
        let episodes = record
            .episodes
            .iter()
            .map(|ep| EpisodeReport {
                interval: ep.interval,
                label: ep.label.clone(),
                topology_rebuilt: ep.topology_rebuilt,
                registered_wells: ep.registered_wells.clone(),
                wells: ep
                    .wells
                    .iter()
                    .map(|w| WellReport {
                        name: w.name.clone(),
                        status: status_name(w.status),
                        connections: w.num_dofs,
                        rates: Phase::ALL
                            .iter()
                            .map(|&phase| PhaseRate {
                                phase,
                                m3_per_day: w.rates[phase.index()] * SECONDS_PER_DAY,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            schedule: schedule.name.clone(),
            episodes,
        }
    }
}

fn status_name(status: WellStatus) -> &'static str {
    match status {
        WellStatus::Open => "open",
        WellStatus::Closed => "closed",
        WellStatus::Shut => "shut",
    }
}

fn print_report(report: &RunReport) {
    println!("Schedule: {}", report.schedule);
    for ep in &report.episodes {
        let label = ep.label.as_deref().unwrap_or("");
        let rebuilt = if ep.topology_rebuilt { " [topology rebuilt]" } else { "" };
        println!("Episode {} {}{}", ep.interval, label, rebuilt);
        println!("  registered: {}", ep.registered_wells.join(", "));
        for w in &ep.wells {
            let rates: Vec<String> = w
                .rates
                .iter()
                .map(|r| format!("{}={:>12.3}", r.phase.name(), r.m3_per_day))
                .collect();
            println!(
                "  {:<12} {:<7} conn={:<3} {} m3/d",
                w.name,
                w.status,
                w.connections,
                rates.join(" ")
            );
        }
    }
}
