//! Hostile combatant aggregate and its components

pub mod health;
pub mod movement;
pub mod state;

pub use health::{ActorHealth, DamageResult};
pub use movement::MovementAgent;
pub use state::{advance_state, ActorState};

use glam::Vec3;

use crate::core::config::{ArchetypeStats, EncounterConfig};
use crate::core::types::{ActorId, Archetype};
use crate::perception::Perception;

/// One hostile combatant instance
///
/// Everything time-gated on the actor is a scheduled absolute time compared
/// against the clock at tick time. Capabilities are resolved once at spawn
/// from the stat table; a misconfigured capability is disabled for this
/// instance rather than failing the encounter.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub archetype: Archetype,
    pub health: ActorHealth,
    pub movement: MovementAgent,
    pub perception: Perception,
    pub state: ActorState,
    pub stats: ArchetypeStats,

    pub next_attack_time: f64,
    pub next_special_time: f64,
    pub next_summon_time: f64,
    pub stunned_until: f64,
    /// Corpse removal time, set when the actor dies
    pub despawn_at: Option<f64>,

    /// One-way escalation flag; never cleared once set
    pub is_raging: bool,
    /// Minion ids summoned by this actor (Boss only), bounded by the cap
    pub followers: Vec<ActorId>,
    /// Explicit key-drop eligibility, independent of auto-detection
    pub last_enemy: bool,

    pub can_rage: bool,
    pub can_summon: bool,
    pub can_special: bool,
}

impl Actor {
    /// Create an actor at a position, resolving capabilities from its stats
    pub fn spawn(
        archetype: Archetype,
        position: Vec3,
        config: &EncounterConfig,
        now: f64,
    ) -> Self {
        let stats = config.stats(archetype).clone();

        let can_rage = stats.rage_threshold.is_some();
        let can_special = stats.special_cooldown.is_some();
        let mut can_summon = stats.max_minions.is_some() && stats.summon_cooldown.is_some();
        if can_summon && stats.max_minions == Some(0) {
            tracing::warn!(
                archetype = archetype.name(),
                "summoning enabled with max_minions = 0; disabling for this actor"
            );
            can_summon = false;
        }

        Self {
            id: ActorId::new(),
            archetype,
            health: ActorHealth::new(stats.max_health, config.invulnerability_duration),
            movement: MovementAgent::new(position, stats.move_speed),
            perception: Perception::new(),
            state: ActorState::Idle,
            next_attack_time: now,
            // First summon is allowed immediately
            next_summon_time: now,
            next_special_time: now + stats.special_cooldown.unwrap_or(0.0),
            stunned_until: 0.0,
            despawn_at: None,
            is_raging: false,
            followers: Vec::new(),
            last_enemy: false,
            can_rage,
            can_summon,
            can_special,
            stats,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.movement.position()
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    /// Outgoing damage with the rage multiplier applied when raging
    pub fn effective_damage(&self, config: &EncounterConfig) -> f32 {
        if self.is_raging {
            self.stats.damage * config.rage_damage_multiplier
        } else {
            self.stats.damage
        }
    }

    /// Mark this actor dead: disable movement, schedule corpse removal
    ///
    /// State changes after this are refused by the terminal Dead state.
    pub fn enter_dead(&mut self, now: f64) {
        self.state = ActorState::Dead;
        self.movement.disable();
        self.despawn_at = Some(now + self.stats.despawn_delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(archetype: Archetype) -> Actor {
        Actor::spawn(archetype, Vec3::ZERO, &EncounterConfig::default(), 0.0)
    }

    #[test]
    fn test_capability_resolution_per_archetype() {
        let basic = spawn(Archetype::Basic);
        assert!(!basic.can_rage && !basic.can_summon && !basic.can_special);

        let elite = spawn(Archetype::Elite);
        assert!(elite.can_special);
        assert!(!elite.can_summon);

        let boss = spawn(Archetype::Boss);
        assert!(boss.can_rage && boss.can_summon);
    }

    #[test]
    fn test_zero_minion_cap_disables_summoning() {
        let mut config = EncounterConfig::default();
        config.boss.max_minions = Some(0);
        let boss = Actor::spawn(Archetype::Boss, Vec3::ZERO, &config, 0.0);
        assert!(!boss.can_summon);
        // Other capabilities are unaffected
        assert!(boss.can_rage);
    }

    #[test]
    fn test_rage_multiplies_damage() {
        let config = EncounterConfig::default();
        let mut boss = spawn(Archetype::Boss);
        let base = boss.effective_damage(&config);
        boss.is_raging = true;
        assert_eq!(boss.effective_damage(&config), base * 1.5);
    }

    #[test]
    fn test_enter_dead_schedules_despawn() {
        let mut actor = spawn(Archetype::Basic);
        actor.enter_dead(10.0);
        assert!(actor.is_dead());
        assert_eq!(actor.despawn_at, Some(13.0));
        // Movement commands after death are ignored
        actor.movement.set_destination(Vec3::new(5.0, 0.0, 0.0));
        actor.movement.integrate(1.0);
        assert_eq!(actor.position(), Vec3::ZERO);
    }
}
