//! Fluid phases, volumetric phase weights and per-phase rate vectors.

use nalgebra::Vector3;

use crate::numeric::Real;

/// Per-phase vector in canonical order (oil, gas, water).
pub type PhaseVector = Vector3<Real>;

/// Per-phase source rate of a degree of freedom (m³/s, positive = into the cell).
pub type RateVector = PhaseVector;

/// The three fluid phases of a black-oil model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Oil,
    Gas,
    Water,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Oil, Phase::Gas, Phase::Water];

    /// Position of this phase in a [`PhaseVector`].
    pub fn index(self) -> usize {
        match self {
            Phase::Oil => 0,
            Phase::Gas => 1,
            Phase::Water => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Oil => "oil",
            Phase::Gas => "gas",
            Phase::Water => "water",
        }
    }
}

/// Non-negative volumetric weights selecting which phases a rate target counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseWeights {
    pub oil: Real,
    pub gas: Real,
    pub water: Real,
}

impl PhaseWeights {
    pub fn new(oil: Real, gas: Real, water: Real) -> Self {
        Self { oil, gas, water }
    }

    /// Unit weight on a single phase.
    pub fn only(phase: Phase) -> Self {
        let mut v = PhaseVector::zeros();
        v[phase.index()] = 1.0;
        Self::from_vector(&v)
    }

    /// Unit weight on every phase.
    pub fn all() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn get(&self, phase: Phase) -> Real {
        match phase {
            Phase::Oil => self.oil,
            Phase::Gas => self.gas,
            Phase::Water => self.water,
        }
    }

    pub fn as_vector(&self) -> PhaseVector {
        PhaseVector::new(self.oil, self.gas, self.water)
    }

    pub fn from_vector(v: &PhaseVector) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_indices_are_canonical() {
        let idx: Vec<usize> = Phase::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn only_sets_a_single_unit_weight() {
        let w = PhaseWeights::only(Phase::Gas);
        assert_eq!(w, PhaseWeights::new(0.0, 1.0, 0.0));
        assert_eq!(w.get(Phase::Gas), 1.0);
        assert_eq!(w.as_vector().sum(), 1.0);
    }

    #[test]
    fn vector_round_trip() {
        let w = PhaseWeights::new(1.0, 0.0, 1.0);
        assert_eq!(PhaseWeights::from_vector(&w.as_vector()), w);
    }
}
