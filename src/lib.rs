//! Gloomkeep - Hostile Encounter Engine

pub mod actor;
pub mod combat;
pub mod core;
pub mod encounter;
pub mod loot;
pub mod perception;
pub mod player;
pub mod simulation;
pub mod store;
