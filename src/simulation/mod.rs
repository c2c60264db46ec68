//! Tick-driven encounter simulation

pub mod tick;

pub use tick::{run_encounter_tick, EncounterEvent, EncounterWorld};
