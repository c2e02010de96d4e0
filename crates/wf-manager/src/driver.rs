//! Episode driver: walks a schedule through the manager lifecycle.

use tracing::debug;
use wf_core::RateVector;
use wf_mesh::{ElementContext, Mesh, SolutionSnapshot};
use wf_schedule::ScheduleDef;
use wf_wells::{Well, WellStatus};

use crate::error::{ManagerError, ManagerResult};
use crate::manager::WellManager;
use crate::registry::AuxiliaryRegistry;

/// Options for schedule runs.
#[derive(Clone, Debug)]
pub struct DriverOptions {
    /// Time steps per episode
    pub time_steps_per_episode: usize,
    /// Newton iterations per time step
    pub iterations_per_step: usize,
    /// First episode to run
    pub first_episode: usize,
    /// Last episode to run (inclusive); `None` runs to the end of the schedule
    pub last_episode: Option<usize>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            time_steps_per_episode: 1,
            iterations_per_step: 1,
            first_episode: 0,
            last_episode: None,
        }
    }
}

impl DriverOptions {
    /// Check the options against a schedule and return the episode range.
    pub fn episodes(&self, schedule: &ScheduleDef) -> ManagerResult<std::ops::RangeInclusive<usize>> {
        if self.time_steps_per_episode == 0 {
            return Err(ManagerError::InvalidArg {
                what: "time_steps_per_episode must be positive",
            });
        }
        if self.iterations_per_step == 0 {
            return Err(ManagerError::InvalidArg {
                what: "iterations_per_step must be positive",
            });
        }
        if schedule.num_intervals() == 0 {
            return Err(ManagerError::InvalidArg {
                what: "schedule has no intervals",
            });
        }
        let last = self
            .last_episode
            .unwrap_or(schedule.num_intervals() - 1);
        if last >= schedule.num_intervals() {
            return Err(ManagerError::InvalidArg {
                what: "last_episode is past the end of the schedule",
            });
        }
        if self.first_episode > last {
            return Err(ManagerError::InvalidArg {
                what: "first_episode must not exceed last_episode",
            });
        }
        Ok(self.first_episode..=last)
    }
}

/// Total source rate of one well over the local DOFs at the end of an episode.
#[derive(Clone, Debug, PartialEq)]
pub struct WellRateRecord {
    pub name: String,
    pub status: WellStatus,
    pub num_dofs: usize,
    /// (oil, gas, water), m³/s; positive injects.
    pub rates: RateVector,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeRecord {
    pub interval: usize,
    pub label: Option<String>,
    pub topology_rebuilt: bool,
    /// Wells registered as auxiliary modules, in well-index order.
    pub registered_wells: Vec<String>,
    pub wells: Vec<WellRateRecord>,
}

/// Record of a schedule run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleRecord {
    pub episodes: Vec<EpisodeRecord>,
}

impl ScheduleRecord {
    /// Intervals at which the topology was rebuilt.
    pub fn rebuilds(&self) -> Vec<usize> {
        self.episodes
            .iter()
            .filter(|e| e.topology_rebuilt)
            .map(|e| e.interval)
            .collect()
    }
}

/// Run the episodes selected by `opts`, holding the primary unknowns fixed
/// at `snapshot`.
pub fn run_schedule<W: Well>(
    manager: &mut WellManager<W>,
    schedule: &ScheduleDef,
    mesh: &dyn Mesh,
    registry: &mut dyn AuxiliaryRegistry,
    snapshot: &SolutionSnapshot,
    opts: &DriverOptions,
) -> ManagerResult<ScheduleRecord> {
    let episodes = opts.episodes(schedule)?;
    snapshot.check_matches(mesh)?;

    let mut record = ScheduleRecord::default();
    for interval in episodes {
        let topology_rebuilt = manager.begin_episode(schedule, mesh, registry, interval, false)?;

        for step in 0..opts.time_steps_per_episode {
            manager.begin_time_step();
            for _ in 0..opts.iterations_per_step {
                manager.begin_iteration(mesh, snapshot)?;
                manager.end_iteration();
            }
            manager.end_time_step();
            debug!(interval, step, "time step finished");
        }

        let wells = well_rates(manager, mesh, snapshot)?;
        manager.end_episode();

        let registered_wells = manager
            .topology()
            .registered()
            .iter()
            .filter_map(|&id| manager.well_at(id))
            .map(|w| w.name().to_string())
            .collect();

        record.episodes.push(EpisodeRecord {
            interval,
            label: schedule.intervals[interval].label.clone(),
            topology_rebuilt,
            registered_wells,
            wells,
        });
    }
    Ok(record)
}

fn well_rates<W: Well>(
    manager: &WellManager<W>,
    mesh: &dyn Mesh,
    snapshot: &SolutionSnapshot,
) -> ManagerResult<Vec<WellRateRecord>> {
    let mut rates = vec![RateVector::zeros(); manager.num_wells()];
    for element in mesh.elements().iter().filter(|e| e.is_interior()) {
        let ctx = ElementContext::new(mesh, element).with_snapshot(snapshot);
        for local in 0..ctx.num_dofs() {
            for (id, well) in manager.wells() {
                rates[id.index()] += well.compute_total_rates_for_dof(&ctx, local)?;
            }
        }
    }

    Ok(manager
        .wells()
        .map(|(id, well)| WellRateRecord {
            name: well.name().to_string(),
            status: well.status(),
            num_dofs: well.num_dofs(),
            rates: rates[id.index()],
        })
        .collect())
}
