//! Level-scope orchestration

pub mod director;
pub mod registry;

pub use director::{sample_placement, EncounterDirector, Placement};
pub use registry::EncounterRegistry;
