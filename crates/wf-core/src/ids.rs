//! Well identifiers and index aliases.

use core::fmt;
use core::num::NonZeroU32;

/// Position of a well in the manager's arena, fixed when the well is
/// created. Wells are never removed, so an id stays valid for the whole run.
///
/// Stored as position + 1 so `Option<WellId>` is no larger than `WellId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellId(NonZeroU32);

impl WellId {
    pub fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .expect("well arena index fits in u32");
        Self(raw)
    }

    /// Arena position.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WellId({})", self.index())
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "well#{}", self.index())
    }
}

/// Global index of a solver degree of freedom on the local partition.
pub type DofIndex = usize;

/// Logically Cartesian cell index: `i + j*nx + k*nx*ny`.
pub type CartesianIndex = usize;
