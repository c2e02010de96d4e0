//! Detection of completion changes between consecutive intervals.

use wf_schedule::ScheduleDef;

/// Whether the well/completion layout of `interval` differs from the one
/// before it. Always true for the first interval.
///
/// Wells are matched by name and completions by (I, J, K), so reordering
/// either list is not a change. Control or status changes never count.
pub fn topology_changed(schedule: &ScheduleDef, interval: usize) -> bool {
    if interval == 0 {
        return true;
    }

    let current = schedule.wells_at(interval);
    let previous = schedule.wells_at(interval - 1);
    if current.len() != previous.len() {
        return true;
    }

    current.iter().any(|well| {
        let Some(prev) = previous.iter().find(|p| p.name == well.name) else {
            return true;
        };
        prev.completions.len() != well.completions.len()
            || well
                .completions
                .iter()
                .any(|c| !prev.has_completion_at(c.i, c.j, c.k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_schedule::{CompletionDef, GridDef, IntervalDef, WellStatusDef, WellStepDef};

    fn step(name: &str, cells: &[(usize, usize, usize)]) -> WellStepDef {
        WellStepDef {
            name: name.into(),
            status: WellStatusDef::Open,
            ref_depth_m: None,
            injection: None,
            production: None,
            completions: cells.iter().map(|&(i, j, k)| CompletionDef::at(i, j, k)).collect(),
        }
    }

    fn schedule(intervals: Vec<Vec<WellStepDef>>) -> ScheduleDef {
        ScheduleDef {
            version: 1,
            name: "t".into(),
            grid: GridDef { nx: 5, ny: 5, nz: 2 },
            wells: vec![],
            intervals: intervals
                .into_iter()
                .map(|wells| IntervalDef { label: None, wells })
                .collect(),
        }
    }

    #[test]
    fn first_interval_always_changes() {
        let s = schedule(vec![vec![]]);
        assert!(topology_changed(&s, 0));
    }

    #[test]
    fn identical_layout_is_unchanged() {
        let a = vec![step("A", &[(0, 0, 0), (0, 0, 1)]), step("B", &[(4, 4, 0)])];
        let b = vec![step("B", &[(4, 4, 0)]), step("A", &[(0, 0, 1), (0, 0, 0)])];
        let mut s = schedule(vec![a, b]);
        s.intervals[1].wells[0].status = WellStatusDef::Shut;
        assert!(!topology_changed(&s, 1));
    }

    #[test]
    fn added_removed_or_moved_completion_changes() {
        let base = || vec![step("A", &[(0, 0, 0)]), step("B", &[(4, 4, 0)])];

        let added = vec![step("A", &[(0, 0, 0), (1, 0, 0)]), step("B", &[(4, 4, 0)])];
        assert!(topology_changed(&schedule(vec![base(), added]), 1));

        let removed = vec![step("A", &[]), step("B", &[(4, 4, 0)])];
        assert!(topology_changed(&schedule(vec![base(), removed]), 1));

        let moved = vec![step("A", &[(4, 4, 0)]), step("B", &[(0, 0, 0)])];
        assert!(topology_changed(&schedule(vec![base(), moved]), 1));

        let shifted = vec![step("A", &[(0, 1, 0)]), step("B", &[(4, 4, 0)])];
        assert!(topology_changed(&schedule(vec![base(), shifted]), 1));
    }

    #[test]
    fn well_set_changes() {
        let base = vec![step("A", &[(0, 0, 0)])];
        let renamed = vec![step("C", &[(0, 0, 0)])];
        let grown = vec![step("A", &[(0, 0, 0)]), step("B", &[])];
        assert!(topology_changed(&schedule(vec![base.clone(), renamed]), 1));
        assert!(topology_changed(&schedule(vec![base, grown]), 1));
    }
}
