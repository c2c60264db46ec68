//! Encounter orchestration: clear detection, key drops, placement sampling
//!
//! The director owns the per-level registry and the single-key guarantee.
//! Placement sampling is shared by initial spawns and boss summons.

use glam::Vec3;
use rand::Rng;

use crate::core::config::PlacementConfig;
use crate::core::types::{ActorId, LevelId, LootDrop};
use crate::encounter::registry::EncounterRegistry;
use crate::loot::key_drop;

/// A sampled spawn position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// True when every candidate was rejected and the last one was used
    pub fallback: bool,
}

#[derive(Debug, Clone)]
pub struct EncounterDirector {
    level: LevelId,
    registry: EncounterRegistry,
    key_dropped: bool,
}

impl EncounterDirector {
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            registry: EncounterRegistry::new(),
            key_dropped: false,
        }
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn registry(&self) -> &EncounterRegistry {
        &self.registry
    }

    pub fn note_spawn(&mut self, id: ActorId) {
        self.registry.register(id);
    }

    /// Process a death and decide whether it releases the level key
    ///
    /// An actor releases the key when it was explicitly flagged as the last
    /// enemy, or when its removal empties the registry. Either way the key
    /// drops at most once per level, so a flagged actor dying mid-encounter
    /// cannot be followed by a second key from the true last death.
    pub fn note_death(
        &mut self,
        id: ActorId,
        explicitly_last: bool,
        position: Vec3,
    ) -> Option<LootDrop> {
        self.registry.unregister(id);

        let eligible = explicitly_last || self.registry.is_cleared();
        if !eligible || self.key_dropped {
            return None;
        }

        self.key_dropped = true;
        tracing::info!(
            level = self.level.0,
            remaining = self.registry.live_count(),
            "level key released"
        );
        Some(key_drop(self.level, position))
    }

    pub fn key_dropped(&self) -> bool {
        self.key_dropped
    }
}

/// Sample a placement around `anchor` within `radius`
///
/// Up to `config.max_attempts` planar candidates are drawn; one clear of the
/// player and of every occupied position wins. When all attempts fail the
/// last candidate is used anyway, logged as a fallback, because refusing to
/// place at all would silently shrink the encounter.
pub fn sample_placement(
    anchor: Vec3,
    radius: f32,
    player: Option<Vec3>,
    occupied: &[Vec3],
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Placement {
    let mut candidate = anchor;
    for _ in 0..config.max_attempts {
        let offset = Vec3::new(
            rng.gen_range(-radius..=radius),
            0.0,
            rng.gen_range(-radius..=radius),
        );
        candidate = anchor + offset;

        let clear_of_player = player
            .map(|p| candidate.distance(p) >= config.min_distance_from_player)
            .unwrap_or(true);
        let clear_of_actors = occupied
            .iter()
            .all(|o| candidate.distance(*o) >= config.min_distance_from_other_actors);

        if clear_of_player && clear_of_actors {
            return Placement {
                position: candidate,
                fallback: false,
            };
        }
    }

    tracing::warn!(
        ?anchor,
        attempts = config.max_attempts,
        "no clear placement found; using last candidate"
    );
    Placement {
        position: candidate,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_last_death_releases_key_once() {
        let mut director = EncounterDirector::new(LevelId(1));
        let a = ActorId::new();
        let b = ActorId::new();
        director.note_spawn(a);
        director.note_spawn(b);

        assert!(director.note_death(a, false, Vec3::ZERO).is_none());
        assert!(!director.key_dropped());
        let key = director.note_death(b, false, Vec3::ONE);
        assert!(director.key_dropped());
        assert!(matches!(
            key,
            Some(LootDrop::Key {
                key_id: LevelId(1),
                ..
            })
        ));

        // A straggler registered and killed later cannot release another key
        let c = ActorId::new();
        director.note_spawn(c);
        assert!(director.note_death(c, false, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_explicit_flag_overrides_remaining_count() {
        let mut director = EncounterDirector::new(LevelId(2));
        let flagged = ActorId::new();
        let other = ActorId::new();
        director.note_spawn(flagged);
        director.note_spawn(other);

        // Flagged actor dies first while another hostile is still live
        assert!(director.note_death(flagged, true, Vec3::ZERO).is_some());
        // The true last death finds the key already released
        assert!(director.note_death(other, false, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_placement_respects_minimum_distances() {
        let config = PlacementConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let player = Vec3::ZERO;
        let occupied = [Vec3::new(6.0, 0.0, 0.0)];

        for _ in 0..100 {
            let placement =
                sample_placement(Vec3::ZERO, 8.0, Some(player), &occupied, &config, &mut rng);
            if placement.fallback {
                continue;
            }
            assert!(placement.position.distance(player) >= config.min_distance_from_player);
            assert!(
                placement.position.distance(occupied[0])
                    >= config.min_distance_from_other_actors
            );
        }
    }

    #[test]
    fn test_impossible_placement_falls_back() {
        // Player exclusion covers the whole sampling disc
        let config = PlacementConfig {
            min_distance_from_player: 100.0,
            ..PlacementConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let placement = sample_placement(Vec3::ZERO, 2.0, Some(Vec3::ZERO), &[], &config, &mut rng);
        assert!(placement.fallback);
    }
}
