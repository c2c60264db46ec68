//! Escalation mechanics for elite and boss archetypes
//!
//! Rage is a one-way health-fraction trigger; summoning and the area special
//! are scheduled-time gates like regular attacks. All three read the stat
//! table, so the mechanics run for any archetype whose stats enable them.

use glam::Vec3;

use crate::actor::{Actor, ActorState};
use crate::core::config::EncounterConfig;

/// An area-of-effect strike centered on the attacker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaAttack {
    pub center: Vec3,
    pub radius: f32,
    pub damage: f32,
}

/// Enter rage if health has fallen to the threshold fraction
///
/// Returns true on the transition tick only. Once raging the actor keeps the
/// speed and damage multipliers until death; healing above the threshold
/// does not clear it.
pub fn check_rage(actor: &mut Actor, config: &EncounterConfig) -> bool {
    if !actor.can_rage || actor.is_raging {
        return false;
    }
    let Some(threshold) = actor.stats.rage_threshold else {
        return false;
    };
    if actor.health.fraction() > threshold {
        return false;
    }

    actor.is_raging = true;
    let boosted = actor.stats.move_speed * config.rage_speed_multiplier;
    actor.movement.set_speed(boosted);
    tracing::info!(
        actor = %actor.id,
        archetype = actor.archetype.name(),
        health_fraction = actor.health.fraction(),
        "rage triggered"
    );
    true
}

/// True iff the actor may summon a minion this tick
///
/// Gated on capability, the summon cooldown, and the live-follower cap. The
/// caller prunes dead followers before asking, so a slot freed by a minion
/// death is usable on the next due summon.
pub fn summon_ready(actor: &Actor, now: f64) -> bool {
    if !actor.can_summon || actor.is_dead() {
        return false;
    }
    let Some(cap) = actor.stats.max_minions else {
        return false;
    };
    now >= actor.next_summon_time && actor.followers.len() < cap
}

/// Push the next summon opportunity one cooldown out
pub fn schedule_next_summon(actor: &mut Actor, now: f64) {
    actor.next_summon_time = now + actor.stats.summon_cooldown.unwrap_or(0.0);
}

/// Fire the area special attack if it is due
///
/// Only fires while Attacking: the special is a melee-pressure tool, not a
/// ranged opener. The strike radius extends the actor's attack range by the
/// configured factor and its damage is the boosted base damage.
pub fn try_special_attack(
    actor: &mut Actor,
    now: f64,
    config: &EncounterConfig,
) -> Option<AreaAttack> {
    if !actor.can_special || actor.state != ActorState::Attacking {
        return None;
    }
    let cooldown = actor.stats.special_cooldown?;
    if now < actor.next_special_time {
        return None;
    }

    actor.next_special_time = now + cooldown;
    Some(AreaAttack {
        center: actor.position(),
        radius: actor.stats.attack_range * config.special_radius_factor,
        damage: actor.effective_damage(config) * config.special_damage_multiplier,
    })
}
