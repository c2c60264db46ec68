//! Attack scheduling and escalation mechanics

pub mod attack;
pub mod boss;

pub use attack::{try_attack, AttackOutcome, ATTACK_ANIMATIONS};
pub use boss::{check_rage, schedule_next_summon, summon_ready, try_special_attack, AreaAttack};
