//! Per-interval map from logical cell to completion.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;
use wf_core::{CartesianIndex, WellId};
use wf_schedule::{CompletionDef, ScheduleDef};

use crate::error::{ManagerError, ManagerResult};

/// A completion together with the well it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedCompletion<'s> {
    pub well: WellId,
    pub well_name: &'s str,
    pub completion: &'s CompletionDef,
}

/// Logical cell index → completion for one interval.
///
/// Rebuilt from the schedule at every episode and never patched. A cell maps
/// to at most one completion across all wells.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex<'s> {
    cells: BTreeMap<CartesianIndex, IndexedCompletion<'s>>,
}

impl<'s> CompletionIndex<'s> {
    /// Index the completions of every known well scheduled at `interval`.
    ///
    /// Wells missing from `wells_by_name` are logged and skipped. A cell
    /// completed twice is an error naming both wells.
    pub fn build(
        schedule: &'s ScheduleDef,
        interval: usize,
        wells_by_name: &HashMap<String, WellId>,
    ) -> ManagerResult<Self> {
        let grid = schedule.grid;
        let mut cells: BTreeMap<CartesianIndex, IndexedCompletion<'s>> = BTreeMap::new();

        for step in schedule.wells_at(interval) {
            let Some(&well) = wells_by_name.get(&step.name) else {
                warn!(well = %step.name, interval, "scheduled well was never declared; skipping its completions");
                continue;
            };

            for completion in &step.completions {
                let cell = grid.cartesian_index(completion.i, completion.j, completion.k);
                if let Some(existing) = cells.get(&cell) {
                    return Err(ManagerError::DuplicateCompletion {
                        well: step.name.clone(),
                        other_well: existing.well_name.to_string(),
                        i: completion.i,
                        j: completion.j,
                        k: completion.k,
                        cell,
                    });
                }
                cells.insert(
                    cell,
                    IndexedCompletion {
                        well,
                        well_name: &step.name,
                        completion,
                    },
                );
            }
        }

        Ok(Self { cells })
    }

    pub fn get(&self, cell: CartesianIndex) -> Option<&IndexedCompletion<'s>> {
        self.cells.get(&cell)
    }

    pub fn contains(&self, cell: CartesianIndex) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entries in ascending cell order.
    pub fn iter(&self) -> impl Iterator<Item = (CartesianIndex, &IndexedCompletion<'s>)> {
        self.cells.iter().map(|(&cell, entry)| (cell, entry))
    }
}
