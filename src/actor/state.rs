//! Actor state machine
//!
//! One transition function shared by every archetype; per-archetype behavior
//! comes from the stat tables, never from separate state machines. Stunned
//! and Dead are handled by the tick loop (stun expiry is a scheduled time,
//! death comes from the health component) so the core transition stays a
//! pure function of perception.

use serde::{Deserialize, Serialize};

/// Behavioral state of a hostile actor
///
/// `Dead` is terminal; `Stunned` is reachable only by Elite actors caught in
/// an area special attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorState {
    #[default]
    Idle,
    Chasing,
    Attacking,
    Stunned,
    Dead,
}

impl ActorState {
    pub fn name(&self) -> &'static str {
        match self {
            ActorState::Idle => "idle",
            ActorState::Chasing => "chasing",
            ActorState::Attacking => "attacking",
            ActorState::Stunned => "stunned",
            ActorState::Dead => "dead",
        }
    }
}

/// Compute the next state from perception
///
/// `detected` is the perception module's verdict; `distance` is only
/// meaningful when `detected` is true. Attacking persists out to
/// `attack_range * hysteresis_factor` so an actor straddling the range
/// boundary does not oscillate between states every tick.
pub fn advance_state(
    current: ActorState,
    detected: bool,
    distance: f32,
    attack_range: f32,
    hysteresis_factor: f32,
) -> ActorState {
    match current {
        ActorState::Idle => {
            if detected {
                ActorState::Chasing
            } else {
                ActorState::Idle
            }
        }
        ActorState::Chasing => {
            if !detected {
                ActorState::Idle
            } else if distance <= attack_range {
                ActorState::Attacking
            } else {
                ActorState::Chasing
            }
        }
        ActorState::Attacking => {
            if !detected {
                ActorState::Idle
            } else if distance > attack_range * hysteresis_factor {
                ActorState::Chasing
            } else {
                ActorState::Attacking
            }
        }
        // Stun expiry and death are driven by the tick loop, not perception
        ActorState::Stunned => ActorState::Stunned,
        ActorState::Dead => ActorState::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: f32 = 2.0;
    const HYSTERESIS: f32 = 1.2;

    fn step(current: ActorState, detected: bool, distance: f32) -> ActorState {
        advance_state(current, detected, distance, RANGE, HYSTERESIS)
    }

    #[test]
    fn test_idle_to_chasing_on_detection() {
        assert_eq!(step(ActorState::Idle, true, 8.0), ActorState::Chasing);
        assert_eq!(step(ActorState::Idle, false, 8.0), ActorState::Idle);
    }

    #[test]
    fn test_chasing_to_attacking_at_range() {
        assert_eq!(step(ActorState::Chasing, true, 1.5), ActorState::Attacking);
        assert_eq!(step(ActorState::Chasing, true, 3.0), ActorState::Chasing);
    }

    #[test]
    fn test_attacking_hysteresis() {
        // Just past attack range but inside the hysteresis band: keep attacking
        assert_eq!(step(ActorState::Attacking, true, 2.2), ActorState::Attacking);
        // Beyond the band: back to chasing
        assert_eq!(step(ActorState::Attacking, true, 2.5), ActorState::Chasing);
    }

    #[test]
    fn test_lost_target_returns_to_idle() {
        assert_eq!(step(ActorState::Chasing, false, 0.0), ActorState::Idle);
        assert_eq!(step(ActorState::Attacking, false, 0.0), ActorState::Idle);
    }

    #[test]
    fn test_terminal_states_hold() {
        assert_eq!(step(ActorState::Dead, true, 0.5), ActorState::Dead);
        assert_eq!(step(ActorState::Stunned, true, 0.5), ActorState::Stunned);
    }

    #[test]
    fn test_no_oscillation_at_boundary() {
        // An actor sitting exactly between range and range*hysteresis must
        // stay in whichever of the two states it already occupies.
        let boundary = 2.1;
        assert_eq!(step(ActorState::Attacking, true, boundary), ActorState::Attacking);
        assert_eq!(step(ActorState::Chasing, true, boundary), ActorState::Chasing);
    }
}
