//! Encounter configuration with documented constants
//!
//! Archetypes are data, not code forks: one state machine reads these tables
//! and a capability flag set (`can_rage`, `can_summon`, `can_special`)
//! resolved per instance at spawn time. All tuning constants live here.

use serde::{Deserialize, Serialize};

use crate::core::types::Archetype;

/// Static stat table for one archetype
///
/// Optional fields gate capabilities: an archetype without `rage_threshold`
/// never rages, one without `max_minions` never summons. A misconfigured
/// capability (e.g. `max_minions = 0` with summoning enabled) disables that
/// capability for the instance instead of failing the encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub max_health: f32,
    pub damage: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Seconds between attacks; enforced as an absolute scheduled time
    pub attack_cooldown: f64,
    pub move_speed: f32,

    /// Health fraction at or below which rage triggers (Boss)
    pub rage_threshold: Option<f32>,
    /// Live-minion population cap (Boss)
    pub max_minions: Option<usize>,
    /// Seconds between summon attempts (Boss)
    pub summon_cooldown: Option<f64>,
    /// Seconds between area special attacks (Elite)
    pub special_cooldown: Option<f64>,

    pub min_coins: u32,
    pub max_coins: u32,
    /// Probability of any coins dropping at all; bypassed by `always_drop_coins`
    pub coin_drop_chance: f32,
    pub always_drop_coins: bool,

    /// Seconds the corpse lingers for the death presentation before despawn
    pub despawn_delay: f64,
}

impl ArchetypeStats {
    /// Tuned defaults for one archetype
    pub fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Basic => Self {
                max_health: 30.0,
                damage: 7.0,
                detection_range: 10.0,
                attack_range: 1.5,
                attack_cooldown: 0.5,
                move_speed: 3.5,
                rage_threshold: None,
                max_minions: None,
                summon_cooldown: None,
                special_cooldown: None,
                min_coins: 1,
                max_coins: 3,
                coin_drop_chance: 0.8,
                always_drop_coins: false,
                despawn_delay: 3.0,
            },
            Archetype::Elite => Self {
                max_health: 60.0,
                damage: 10.0,
                detection_range: 55.0,
                attack_range: 1.8,
                attack_cooldown: 2.5,
                move_speed: 3.0,
                rage_threshold: None,
                max_minions: None,
                summon_cooldown: None,
                special_cooldown: Some(8.0),
                min_coins: 3,
                max_coins: 8,
                coin_drop_chance: 1.0,
                always_drop_coins: true,
                despawn_delay: 4.0,
            },
            Archetype::Boss => Self {
                max_health: 100.0,
                damage: 15.0,
                detection_range: 60.0,
                attack_range: 2.0,
                attack_cooldown: 3.0,
                move_speed: 2.5,
                rage_threshold: Some(0.5),
                max_minions: Some(3),
                summon_cooldown: Some(10.0),
                special_cooldown: None,
                min_coins: 8,
                max_coins: 15,
                coin_drop_chance: 1.0,
                always_drop_coins: true,
                despawn_delay: 5.0,
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0.0 {
            return Err(format!("max_health ({}) must be positive", self.max_health));
        }
        if self.damage < 0.0 {
            return Err(format!("damage ({}) must be non-negative", self.damage));
        }
        if self.attack_range > self.detection_range {
            return Err(format!(
                "attack_range ({}) should be <= detection_range ({})",
                self.attack_range, self.detection_range
            ));
        }
        if self.min_coins > self.max_coins {
            return Err(format!(
                "min_coins ({}) should be <= max_coins ({})",
                self.min_coins, self.max_coins
            ));
        }
        if !(0.0..=1.0).contains(&self.coin_drop_chance) {
            return Err(format!(
                "coin_drop_chance ({}) must be in [0, 1]",
                self.coin_drop_chance
            ));
        }
        if let Some(threshold) = self.rage_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("rage_threshold ({}) must be in [0, 1]", threshold));
            }
        }
        Ok(())
    }
}

/// Spawn/summon placement sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Candidate positions sampled before falling back to the last one
    pub max_attempts: u32,
    /// Candidates closer than this to the player are rejected
    pub min_distance_from_player: f32,
    /// Candidates closer than this to any registered actor are rejected
    pub min_distance_from_other_actors: f32,
    /// Radius around the anchor point in which candidates are sampled
    pub spawn_radius: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            min_distance_from_player: 5.0,
            min_distance_from_other_actors: 2.0,
            spawn_radius: 8.0,
        }
    }
}

/// Top-level encounter engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Attacking reverts to Chasing beyond attack_range * hysteresis_factor
    ///
    /// Without the factor an actor straddling the range boundary flips state
    /// every tick.
    pub hysteresis_factor: f32,

    /// Seconds of damage immunity after a hit lands
    ///
    /// Suppresses frame-rate-dependent double damage from overlapping
    /// collision events.
    pub invulnerability_duration: f64,

    /// Seconds between target re-resolutions
    ///
    /// The cached player reference is refreshed on this interval rather than
    /// every tick, bounding the cost of tolerating target lifecycle changes.
    pub target_refresh_interval: f64,

    /// Seconds an Elite stays Stunned after a special area attack hits it
    pub stun_duration: f64,

    /// Movement speed multiplier while raging
    pub rage_speed_multiplier: f32,
    /// Outgoing damage multiplier while raging
    pub rage_damage_multiplier: f32,

    /// Area special attack radius = attack_range * this factor
    pub special_radius_factor: f32,
    /// Area special attack damage = damage * this multiplier
    pub special_damage_multiplier: f32,

    /// Planar scatter radius for dropped coins
    pub coin_spread_radius: f32,
    /// Impulse magnitude applied to each dropped coin
    pub coin_drop_force: f32,

    /// Radius around a boss in which summoned minions are placed
    pub summon_radius: f32,

    pub placement: PlacementConfig,

    pub basic: ArchetypeStats,
    pub elite: ArchetypeStats,
    pub boss: ArchetypeStats,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            hysteresis_factor: 1.2,
            invulnerability_duration: 0.5,
            target_refresh_interval: 1.0,
            stun_duration: 2.0,
            rage_speed_multiplier: 1.5,
            rage_damage_multiplier: 1.5,
            special_radius_factor: 1.5,
            special_damage_multiplier: 1.5,
            coin_spread_radius: 1.0,
            coin_drop_force: 3.0,
            summon_radius: 2.0,
            placement: PlacementConfig::default(),
            basic: ArchetypeStats::for_archetype(Archetype::Basic),
            elite: ArchetypeStats::for_archetype(Archetype::Elite),
            boss: ArchetypeStats::for_archetype(Archetype::Boss),
        }
    }
}

impl EncounterConfig {
    /// Stat table for one archetype
    pub fn stats(&self, archetype: Archetype) -> &ArchetypeStats {
        match archetype {
            Archetype::Basic => &self.basic,
            Archetype::Elite => &self.elite,
            Archetype::Boss => &self.boss,
        }
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> crate::core::error::Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.hysteresis_factor < 1.0 {
            return Err(format!(
                "hysteresis_factor ({}) must be >= 1.0",
                self.hysteresis_factor
            ));
        }
        if self.invulnerability_duration < 0.0 {
            return Err("invulnerability_duration must be non-negative".into());
        }
        if self.placement.max_attempts == 0 {
            return Err("placement.max_attempts must be at least 1".into());
        }
        for (name, stats) in [
            ("basic", &self.basic),
            ("elite", &self.elite),
            ("boss", &self.boss),
        ] {
            stats
                .validate()
                .map_err(|e| format!("{} stats: {}", name, e))?;
        }
        Ok(())
    }
}
