//! Distance-based target acquisition
//!
//! Each actor carries a perception component that caches the registered
//! target. While a target is held its position refreshes every tick; once it
//! is lost (player destroyed, level transition) re-acquisition is attempted
//! on a periodic interval rather than per tick, so a missing player bounds
//! both the search cost and the warning volume.

use glam::Vec3;

/// Source of the current player position
///
/// Registered once by the level bootstrap; a temporarily unavailable player
/// is reported as `None` and treated as a normal, handled state.
pub trait TargetSource {
    fn player_position(&self) -> Option<Vec3>;
}

impl TargetSource for Option<Vec3> {
    fn player_position(&self) -> Option<Vec3> {
        *self
    }
}

/// Per-actor target tracking
#[derive(Debug, Clone, Default)]
pub struct Perception {
    target: Option<Vec3>,
    next_acquire_attempt: f64,
}

impl Perception {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the cached target from the source
    ///
    /// A held target is re-read every call; a lost target is only probed for
    /// once per `acquire_interval` seconds.
    pub fn update(&mut self, source: &impl TargetSource, now: f64, acquire_interval: f64) {
        if self.target.is_none() && now < self.next_acquire_attempt {
            return;
        }
        self.target = source.player_position();
        if self.target.is_none() {
            tracing::warn!("no target registered; actor holds position");
            self.next_acquire_attempt = now + acquire_interval;
        }
    }

    /// Current target position, if one is held
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Distance from `own` to the target, if one is held
    pub fn distance_to_target(&self, own: Vec3) -> Option<f32> {
        self.target.map(|t| own.distance(t))
    }

    /// True iff a target is held within detection range
    pub fn can_detect(&self, own: Vec3, detection_range: f32) -> bool {
        self.distance_to_target(own)
            .map(|d| d <= detection_range)
            .unwrap_or(false)
    }
}
