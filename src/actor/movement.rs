//! Move-to-point collaborator
//!
//! The AI never touches transforms directly: it issues `set_destination`,
//! `hold` and `warp` commands and reads back position and velocity. The
//! agent integrates straight toward its destination each tick; pathfinding
//! is outside this subsystem.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kinematic agent owning an actor's pose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementAgent {
    position: Vec3,
    facing: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    velocity: Vec3,
    enabled: bool,
}

impl MovementAgent {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            facing: Vec3::Z,
            destination: None,
            speed,
            velocity: Vec3::ZERO,
            enabled: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Command the agent to move toward a point
    pub fn set_destination(&mut self, point: Vec3) {
        if self.enabled {
            self.destination = Some(point);
        }
    }

    /// Stop in place and drop the current destination
    pub fn hold(&mut self) {
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    /// Instant teleport; used only for initial and summon placement
    pub fn warp(&mut self, point: Vec3) {
        self.position = point;
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    /// Permanently stop responding to movement commands (death)
    pub fn disable(&mut self) {
        self.enabled = false;
        self.hold();
    }

    /// Advance toward the destination by one tick
    pub fn integrate(&mut self, dt: f32) {
        if !self.enabled || dt <= 0.0 {
            return;
        }
        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let offset = destination - self.position;
        let distance = offset.length();
        let step = self.speed * dt;

        if distance <= step || distance < 1e-6 {
            self.position = destination;
            self.destination = None;
            self.velocity = Vec3::ZERO;
        } else {
            let direction = offset / distance;
            self.position += direction * step;
            self.velocity = direction * self.speed;
            self.facing = direction;
        }
    }
}
