//! Loot economy and placement integration tests

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gloomkeep::core::config::{EncounterConfig, PlacementConfig};
use gloomkeep::core::types::{Archetype, LevelId, LootDrop};
use gloomkeep::encounter::sample_placement;
use gloomkeep::loot::{collect_key, roll_coin_drops};
use gloomkeep::player::Player;
use gloomkeep::simulation::tick::{EncounterEvent, EncounterWorld};
use gloomkeep::store::{FlagStore, MemoryFlagStore};

#[test]
fn test_basic_coin_counts_stay_in_range_over_many_rolls() {
    let config = EncounterConfig::default();
    let stats = config.stats(Archetype::Basic);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let mut dropped_any = false;
    for _ in 0..1000 {
        let drops = roll_coin_drops(stats, Vec3::ZERO, &config, &mut rng);
        if drops.is_empty() {
            // The 0.8 chance gate legitimately skips some deaths
            continue;
        }
        dropped_any = true;
        assert!(drops.len() >= 1 && drops.len() <= 3);
    }
    assert!(dropped_any);
}

#[test]
fn test_spawn_placement_keeps_distance_from_player() {
    let config = PlacementConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let player = Vec3::ZERO;

    let mut accepted = 0;
    for _ in 0..500 {
        let placement = sample_placement(
            Vec3::new(6.0, 0.0, 6.0),
            8.0,
            Some(player),
            &[],
            &config,
            &mut rng,
        );
        if !placement.fallback {
            accepted += 1;
            assert!(placement.position.distance(player) >= 5.0);
        }
    }
    assert!(accepted > 0);
}

#[test]
fn test_death_drops_flow_through_the_world() {
    let mut world = EncounterWorld::new(EncounterConfig::default(), LevelId(3), 3)
        .expect("default config is valid");
    world.set_player(Player::new(Vec3::ZERO, 0.5));
    let id = world.spawn_actor(Archetype::Boss, Vec3::new(30.0, 0.0, 30.0));

    let events = world.damage_actor(id, 100.0).expect("boss exists");

    let mut coins = 0;
    let mut keys = 0;
    for event in &events {
        match event {
            EncounterEvent::LootDropped {
                drop: LootDrop::Coin { amount, .. },
            } => coins += amount,
            EncounterEvent::LootDropped {
                drop: LootDrop::Key { key_id, .. },
            } => {
                keys += 1;
                assert_eq!(*key_id, LevelId(3));
            }
            _ => {}
        }
    }
    // Boss always drops coins; its death also clears the level
    assert!(coins >= 8 && coins <= 15);
    assert_eq!(keys, 1);
}

#[test]
fn test_collected_key_persists_per_level() {
    let mut store = MemoryFlagStore::new();
    collect_key(&mut store, LevelId(3));

    assert!(store.get_flag("has_key_level_3"));
    assert!(!store.get_flag("has_key_level_4"));
}
