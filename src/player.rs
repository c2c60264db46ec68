//! Player-side combat surface
//!
//! The engine only needs the player's position and a damage sink; input,
//! camera and abilities live in the host. A dead player stops being offered
//! as a perception target.

use glam::Vec3;

use crate::actor::{ActorHealth, DamageResult};
use crate::perception::TargetSource;

pub const PLAYER_MAX_HEALTH: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub health: ActorHealth,
}

impl Player {
    pub fn new(position: Vec3, invulnerability_duration: f64) -> Self {
        Self {
            position,
            health: ActorHealth::new(PLAYER_MAX_HEALTH, invulnerability_duration),
        }
    }

    pub fn take_damage(&mut self, amount: f32, now: f64) -> DamageResult {
        self.health.apply_damage(amount, now)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}

impl TargetSource for Player {
    fn player_position(&self) -> Option<Vec3> {
        if self.is_dead() {
            None
        } else {
            Some(self.position)
        }
    }
}

impl TargetSource for Option<&Player> {
    fn player_position(&self) -> Option<Vec3> {
        self.and_then(|p| p.player_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_player_is_a_target() {
        let player = Player::new(Vec3::new(1.0, 0.0, 2.0), 0.5);
        assert_eq!(player.player_position(), Some(Vec3::new(1.0, 0.0, 2.0)));
    }

    #[test]
    fn test_dead_player_is_not_a_target() {
        let mut player = Player::new(Vec3::ZERO, 0.5);
        player.take_damage(PLAYER_MAX_HEALTH, 0.0);
        assert!(player.is_dead());
        assert_eq!(player.player_position(), None);
    }

    #[test]
    fn test_invulnerability_window_applies() {
        let mut player = Player::new(Vec3::ZERO, 0.5);
        player.take_damage(10.0, 0.0);
        let blocked = player.take_damage(10.0, 0.2);
        assert_eq!(blocked.new_health, 90.0);
        let landed = player.take_damage(10.0, 0.6);
        assert_eq!(landed.new_health, 80.0);
    }
}
