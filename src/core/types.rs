//! Core type definitions used throughout the codebase

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for hostile actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Level instance identifier; also parameterizes key drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub u32);

impl LevelId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Flag-store key recorded when the player collects this level's key
    pub fn key_flag(&self) -> String {
        format!("has_key_level_{}", self.0)
    }
}

/// Class of hostile actor, selecting a stat table and capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Basic,
    Elite,
    Boss,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Basic => "basic",
            Archetype::Elite => "elite",
            Archetype::Boss => "boss",
        }
    }
}

/// Ephemeral record of something dropped on death
///
/// Handed to the physics/presentation collaborator as-is; the engine keeps
/// no further ownership of a drop once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LootDrop {
    Coin {
        amount: u32,
        spawn_position: Vec3,
        impulse: Vec3,
    },
    Key {
        key_id: LevelId,
        spawn_position: Vec3,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_uniqueness() {
        let a = ActorId::new();
        let b = ActorId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_actor_id_hash() {
        use std::collections::HashMap;
        let id = ActorId::new();
        let mut map: HashMap<ActorId, &str> = HashMap::new();
        map.insert(id, "raider");
        assert_eq!(map.get(&id), Some(&"raider"));
    }

    #[test]
    fn test_level_key_flag_format() {
        assert_eq!(LevelId(3).key_flag(), "has_key_level_3");
    }
}
