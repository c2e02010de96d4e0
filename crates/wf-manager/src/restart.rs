//! Restart seam.

/// Source of the episode a restarted run resumes at.
pub trait Restarter {
    fn episode_index(&self) -> usize;
}

/// Restart point given directly by its episode index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPoint {
    pub episode: usize,
}

impl RestartPoint {
    pub fn new(episode: usize) -> Self {
        Self { episode }
    }
}

impl Restarter for RestartPoint {
    fn episode_index(&self) -> usize {
        self.episode
    }
}
