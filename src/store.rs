//! Persistent progression flags
//!
//! Key pickups and other cross-level progression are recorded as named
//! boolean flags behind a trait, so the engine can run against an in-memory
//! store in tests and a save file in the host.

use ahash::AHashMap;

/// Boolean flag storage keyed by name
pub trait FlagStore {
    fn get_flag(&self, name: &str) -> bool;
    fn set_flag(&mut self, name: &str, value: bool);
}

/// Transient in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: AHashMap<String, bool>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get_flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_string(), value);
    }
}
