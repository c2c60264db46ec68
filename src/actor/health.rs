//! Actor hit points and the single damage-application entry point
//!
//! All damage funnels through [`ActorHealth::apply_damage`]. The component
//! guarantees the Dead transition fires exactly once and that health stays
//! within `[0, max_health]` no matter what callers do.

use serde::{Deserialize, Serialize};

/// Outcome of one damage application
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    pub new_health: f32,
    /// True only on the application that reduced health to zero
    pub died: bool,
}

/// Hit point tracking for one combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorHealth {
    health: f32,
    max_health: f32,
    dead: bool,
    /// Damage applications before this time are ignored
    invulnerable_until: f64,
    invulnerability_duration: f64,
}

impl ActorHealth {
    pub fn new(max_health: f32, invulnerability_duration: f64) -> Self {
        Self {
            health: max_health,
            max_health,
            dead: false,
            invulnerable_until: 0.0,
            invulnerability_duration,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Remaining health as a fraction of maximum, in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    /// Apply damage, returning the new health and whether this hit killed
    ///
    /// No-op (returns unchanged state) when the actor is already dead, when
    /// inside the invulnerability window, or for non-positive amounts. A hit
    /// that lands opens a fresh invulnerability window, which suppresses
    /// overlapping collision events from double-counting.
    pub fn apply_damage(&mut self, amount: f32, now: f64) -> DamageResult {
        if self.dead || amount <= 0.0 || self.is_invulnerable(now) {
            return DamageResult {
                new_health: self.health,
                died: false,
            };
        }

        self.health = (self.health - amount).max(0.0);
        self.invulnerable_until = now + self.invulnerability_duration;

        let died = self.health <= 0.0;
        if died {
            self.dead = true;
        }

        DamageResult {
            new_health: self.health,
            died,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(max: f32) -> ActorHealth {
        // Zero window so sequential hits in one test all land
        ActorHealth::new(max, 0.0)
    }

    #[test]
    fn test_damage_reduces_health() {
        let mut h = health(30.0);
        let result = h.apply_damage(10.0, 0.0);
        assert_eq!(result.new_health, 20.0);
        assert!(!result.died);
    }

    #[test]
    fn test_three_hits_kill_with_single_death() {
        let mut h = health(30.0);
        assert!(!h.apply_damage(10.0, 0.0).died);
        assert!(!h.apply_damage(10.0, 1.0).died);
        let third = h.apply_damage(10.0, 2.0);
        assert_eq!(third.new_health, 0.0);
        assert!(third.died);
        // Redundant damage after death is a no-op and never re-reports death
        let after = h.apply_damage(10.0, 3.0);
        assert!(!after.died);
        assert_eq!(after.new_health, 0.0);
    }

    #[test]
    fn test_health_never_negative() {
        let mut h = health(30.0);
        let result = h.apply_damage(1000.0, 0.0);
        assert_eq!(result.new_health, 0.0);
        assert!(result.died);
    }

    #[test]
    fn test_invulnerability_window_suppresses_second_hit() {
        let mut h = ActorHealth::new(30.0, 0.5);
        h.apply_damage(10.0, 0.0);
        // Second overlapping hit inside the window is dropped
        let blocked = h.apply_damage(10.0, 0.1);
        assert_eq!(blocked.new_health, 20.0);
        // After the window expires the next hit lands
        let landed = h.apply_damage(10.0, 0.6);
        assert_eq!(landed.new_health, 10.0);
    }

    #[test]
    fn test_non_positive_damage_is_noop() {
        let mut h = health(30.0);
        let result = h.apply_damage(0.0, 0.0);
        assert_eq!(result.new_health, 30.0);
        assert!(!h.is_invulnerable(0.1));
    }
}
