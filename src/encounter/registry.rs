//! Live-actor registry
//!
//! The registry is the authority on how many hostiles remain in the level.
//! Actors are removed the moment they die, not when their corpse despawns,
//! so clear-condition checks never count the dead.

use ahash::AHashSet;

use crate::core::types::ActorId;

#[derive(Debug, Clone, Default)]
pub struct EncounterRegistry {
    live: AHashSet<ActorId>,
}

impl EncounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ActorId) {
        self.live.insert(id);
    }

    /// Remove a dead actor; returns false if it was not registered
    pub fn unregister(&mut self, id: ActorId) -> bool {
        self.live.remove(&id)
    }

    pub fn is_live(&self, id: ActorId) -> bool {
        self.live.contains(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.live.is_empty()
    }
}
