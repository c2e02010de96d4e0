//! Auxiliary-equation registration seam of the global model.

use wf_core::WellId;

/// The part of the global model that tracks auxiliary equations.
///
/// Each well connected to at least one local DOF contributes one auxiliary
/// module. The registry is only touched during a topology rebuild.
pub trait AuxiliaryRegistry {
    /// Drop every registered auxiliary module.
    fn clear_auxiliary_modules(&mut self);

    /// Register a well as an auxiliary module.
    fn add_auxiliary_module(&mut self, well: WellId, name: &str);
}

/// In-memory registry recording registrations in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxiliaryModules {
    modules: Vec<(WellId, String)>,
    clears: usize,
}

impl AuxiliaryModules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered wells in registration order.
    pub fn modules(&self) -> &[(WellId, String)] {
        &self.modules
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|(_, name)| name.as_str())
    }

    pub fn contains(&self, well: WellId) -> bool {
        self.modules.iter().any(|(id, _)| *id == well)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of times the registry was cleared (one per topology rebuild).
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl AuxiliaryRegistry for AuxiliaryModules {
    fn clear_auxiliary_modules(&mut self) {
        self.modules.clear();
        self.clears += 1;
    }

    fn add_auxiliary_module(&mut self, well: WellId, name: &str) {
        self.modules.push((well, name.to_string()));
    }
}
