//! Cooldown-gated attack firing
//!
//! The scheduler is a pure time gate: firing is decided by comparing the
//! clock against the actor's scheduled `next_attack_time`, never by a
//! boolean "can attack" flag that could desynchronize from elapsed time.

use rand::Rng;

use crate::actor::Actor;
use crate::core::config::EncounterConfig;

/// Cosmetic attack variety; the choice never affects damage
pub const ATTACK_ANIMATIONS: [&str; 3] = ["attack", "kick_left", "kick_right"];

/// A landed attack, ready to be applied to the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    pub damage: f32,
    pub animation: &'static str,
}

/// Fire an attack if the cooldown has elapsed and the target is in range
///
/// On success the next attack is scheduled at `now + cooldown` and the
/// outcome carries the effective damage (rage multiplier included) plus a
/// uniformly chosen animation identifier. Returns `None` without touching
/// the schedule otherwise.
pub fn try_attack(
    actor: &mut Actor,
    distance: f32,
    now: f64,
    config: &EncounterConfig,
    rng: &mut impl Rng,
) -> Option<AttackOutcome> {
    if now < actor.next_attack_time || distance > actor.stats.attack_range {
        return None;
    }

    actor.next_attack_time = now + actor.stats.attack_cooldown;

    let animation = ATTACK_ANIMATIONS[rng.gen_range(0..ATTACK_ANIMATIONS.len())];
    Some(AttackOutcome {
        damage: actor.effective_damage(config),
        animation,
    })
}
