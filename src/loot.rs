//! Death-time drop rolls
//!
//! Every roll goes through the encounter's seeded RNG so a full run is
//! reproducible from its seed. Drops are emitted as [`LootDrop`] records;
//! spawning the physical pickups is the host's job.

use glam::Vec3;
use rand::Rng;

use crate::core::config::{ArchetypeStats, EncounterConfig};
use crate::core::types::{LevelId, LootDrop};
use crate::store::FlagStore;

/// Roll coin drops for a death at `position`
///
/// The chance gate is skipped for archetypes marked `always_drop_coins`. Each
/// coin spawns with an independent planar offset inside the spread radius and
/// an upward-biased launch impulse, so a burst scatters rather than stacking
/// on the corpse.
pub fn roll_coin_drops(
    stats: &ArchetypeStats,
    position: Vec3,
    config: &EncounterConfig,
    rng: &mut impl Rng,
) -> Vec<LootDrop> {
    if stats.max_coins == 0 {
        return Vec::new();
    }
    if !stats.always_drop_coins && rng.gen::<f32>() >= stats.coin_drop_chance {
        return Vec::new();
    }

    let count = rng.gen_range(stats.min_coins..=stats.max_coins);
    (0..count)
        .map(|_| {
            let offset = Vec3::new(
                rng.gen_range(-config.coin_spread_radius..=config.coin_spread_radius),
                0.0,
                rng.gen_range(-config.coin_spread_radius..=config.coin_spread_radius),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(0.5..=1.0),
                rng.gen_range(-1.0..=1.0),
            )
            .normalize_or_zero();
            LootDrop::Coin {
                amount: 1,
                spawn_position: position + offset,
                impulse: direction * config.coin_drop_force,
            }
        })
        .collect()
}

/// Build the key drop for clearing a level
pub fn key_drop(level: LevelId, position: Vec3) -> LootDrop {
    LootDrop::Key {
        key_id: level,
        spawn_position: position,
    }
}

/// Record a key pickup in the progression store
pub fn collect_key(store: &mut impl FlagStore, level: LevelId) {
    let flag = level.key_flag();
    tracing::info!(flag = %flag, "key collected");
    store.set_flag(&flag, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Archetype;
    use crate::store::MemoryFlagStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_elite_coin_count_in_configured_range() {
        let config = EncounterConfig::default();
        let stats = config.stats(Archetype::Elite);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let drops = roll_coin_drops(stats, Vec3::ZERO, &config, &mut rng);
            assert!(!drops.is_empty(), "elite always drops coins");
            assert!(drops.len() >= 3 && drops.len() <= 8);
        }
    }

    #[test]
    fn test_chance_gate_sometimes_skips() {
        let mut config = EncounterConfig::default();
        config.basic.coin_drop_chance = 0.5;
        config.basic.always_drop_coins = false;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut empty = 0;
        let mut full = 0;
        for _ in 0..200 {
            let drops = roll_coin_drops(&config.basic, Vec3::ZERO, &config, &mut rng);
            if drops.is_empty() {
                empty += 1;
            } else {
                full += 1;
            }
        }
        assert!(empty > 0 && full > 0);
    }

    #[test]
    fn test_coins_scatter_within_spread_radius() {
        let config = EncounterConfig::default();
        let stats = config.stats(Archetype::Boss);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let origin = Vec3::new(10.0, 0.0, 10.0);
        for drop in roll_coin_drops(stats, origin, &config, &mut rng) {
            let LootDrop::Coin {
                spawn_position,
                impulse,
                amount,
            } = drop
            else {
                panic!("coin roll produced a non-coin drop");
            };
            assert_eq!(amount, 1);
            assert!((spawn_position.x - origin.x).abs() <= config.coin_spread_radius);
            assert!((spawn_position.z - origin.z).abs() <= config.coin_spread_radius);
            // Launch impulse is upward-biased and scaled by the drop force
            assert!(impulse.y > 0.0);
            assert!(impulse.length() <= config.coin_drop_force + 1e-4);
        }
    }

    #[test]
    fn test_collect_key_sets_level_flag() {
        let mut store = MemoryFlagStore::new();
        collect_key(&mut store, LevelId(2));
        assert!(store.get_flag("has_key_level_2"));
        assert!(!store.get_flag("has_key_level_1"));
    }
}
