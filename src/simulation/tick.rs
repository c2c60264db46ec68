//! Tick system - orchestrates encounter updates
//!
//! This is the core loop that ties together:
//! perception -> state transition -> movement -> attacks -> boss mechanics -> cleanup
//!
//! Everything runs single-threaded inside one tick. Deaths are processed
//! synchronously in the tick (or damage call) that caused them, so registry
//! counts and key-drop decisions never observe a half-dead actor.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::actor::{advance_state, Actor, ActorState};
use crate::combat::{
    check_rage, schedule_next_summon, summon_ready, try_attack, try_special_attack, AreaAttack,
};
use crate::core::clock::GameClock;
use crate::core::config::EncounterConfig;
use crate::core::error::{EncounterError, Result};
use crate::core::types::{ActorId, Archetype, LevelId, LootDrop};
use crate::encounter::{sample_placement, EncounterDirector};
use crate::loot::roll_coin_drops;
use crate::player::Player;

/// Events generated during an encounter tick
///
/// Returned by [`run_encounter_tick`] (and the damage entry points) for the
/// host to drive presentation: animations, pickups, UI. Serializable so the
/// driver can emit a structured event log.
#[derive(Debug, Clone, Serialize)]
pub enum EncounterEvent {
    /// An actor moved between behavioral states
    StateChanged {
        actor: ActorId,
        from: ActorState,
        to: ActorState,
    },
    /// A melee attack landed on the player
    AttackLanded {
        actor: ActorId,
        damage: f32,
        animation: &'static str,
        player_health: f32,
    },
    /// An area special attack fired
    SpecialAttackFired {
        actor: ActorId,
        center: Vec3,
        radius: f32,
        damage: f32,
    },
    /// An actor was stunned by an area special attack
    Stunned { actor: ActorId, until: f64 },
    /// An actor entered rage
    RageTriggered { actor: ActorId },
    /// A boss summoned a minion
    MinionSummoned {
        boss: ActorId,
        minion: ActorId,
        position: Vec3,
        /// Placement sampling exhausted its attempts
        fallback: bool,
    },
    /// An actor died this tick
    Died {
        actor: ActorId,
        archetype: Archetype,
    },
    /// A drop was released (coins on any death, the key on the last)
    LootDropped { drop: LootDrop },
    /// The player's health reached zero
    PlayerDied,
    /// A corpse finished its death presentation and was removed
    Despawned { actor: ActorId },
}

/// Full encounter state for one level
pub struct EncounterWorld {
    pub clock: GameClock,
    pub config: EncounterConfig,
    pub director: EncounterDirector,
    pub player: Option<Player>,
    rng: ChaCha8Rng,
    actors: Vec<Actor>,
}

impl EncounterWorld {
    /// Create a world for one level, validating the configuration up front
    pub fn new(config: EncounterConfig, level: LevelId, seed: u64) -> Result<Self> {
        config.validate().map_err(EncounterError::InvalidConfig)?;
        Ok(Self {
            clock: GameClock::new(),
            config,
            director: EncounterDirector::new(level),
            player: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            actors: Vec::new(),
        })
    }

    /// Register the player as the perception target for every actor
    pub fn set_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.actors
            .iter()
            .find(|a| a.id == id)
            .ok_or(EncounterError::ActorNotFound(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(EncounterError::ActorNotFound(id))
    }

    /// Live hostile count, excluding corpses awaiting despawn
    pub fn live_count(&self) -> usize {
        self.director.registry().live_count()
    }

    /// Spawn an actor near `anchor`, sampling a clear position
    pub fn spawn_actor(&mut self, archetype: Archetype, anchor: Vec3) -> ActorId {
        let occupied: Vec<Vec3> = self
            .actors
            .iter()
            .filter(|a| !a.is_dead())
            .map(|a| a.position())
            .collect();
        let player_pos = self.player.as_ref().and_then(|p| {
            if p.is_dead() {
                None
            } else {
                Some(p.position)
            }
        });
        let placement = sample_placement(
            anchor,
            self.config.placement.spawn_radius,
            player_pos,
            &occupied,
            &self.config.placement,
            &mut self.rng,
        );

        let actor = Actor::spawn(archetype, placement.position, &self.config, self.clock.now());
        let id = actor.id;
        self.director.note_spawn(id);
        tracing::debug!(
            actor = %id,
            archetype = archetype.name(),
            position = ?placement.position,
            "actor spawned"
        );
        self.actors.push(actor);
        id
    }

    /// Flag an actor as the designated last enemy of the level
    ///
    /// Its death releases the key even if other hostiles remain. The
    /// single-key guarantee still holds.
    pub fn mark_last_enemy(&mut self, id: ActorId) -> Result<()> {
        self.actor_mut(id)?.last_enemy = true;
        Ok(())
    }

    /// Apply damage to an actor, processing death synchronously if it kills
    pub fn damage_actor(&mut self, id: ActorId, amount: f32) -> Result<Vec<EncounterEvent>> {
        let now = self.clock.now();
        let index = self
            .actors
            .iter()
            .position(|a| a.id == id)
            .ok_or(EncounterError::ActorNotFound(id))?;

        let result = self.actors[index].health.apply_damage(amount, now);
        let mut events = Vec::new();
        if result.died {
            self.process_death(index, &mut events);
        }
        Ok(events)
    }

    /// Finalize a death: terminal state, registry removal, drop rolls
    fn process_death(&mut self, index: usize, events: &mut Vec<EncounterEvent>) {
        let now = self.clock.now();
        self.actors[index].enter_dead(now);

        let id = self.actors[index].id;
        let archetype = self.actors[index].archetype;
        let position = self.actors[index].position();
        let explicitly_last = self.actors[index].last_enemy;

        tracing::info!(actor = %id, archetype = archetype.name(), "actor died");
        events.push(EncounterEvent::Died { actor: id, archetype });

        let stats = self.actors[index].stats.clone();
        for drop in roll_coin_drops(&stats, position, &self.config, &mut self.rng) {
            events.push(EncounterEvent::LootDropped { drop });
        }

        if let Some(key) = self.director.note_death(id, explicitly_last, position) {
            events.push(EncounterEvent::LootDropped { drop: key });
        }
    }
}

/// Run a single encounter tick
///
/// Phases, in order:
/// 1. Advance the clock
/// 2. Expire stuns
/// 3. Perception refresh and state transitions
/// 4. Rage checks
/// 5. Melee attacks against the player
/// 6. Area special attacks (player damage plus bystander stuns)
/// 7. Boss summons
/// 8. Movement integration
/// 9. Corpse despawn
///
/// Returns the events of this tick in the order they occurred.
pub fn run_encounter_tick(world: &mut EncounterWorld, dt: f64) -> Vec<EncounterEvent> {
    let mut events = Vec::new();
    world.clock.advance(dt);
    let now = world.clock.now();

    expire_stuns(world, now, &mut events);
    update_perception_and_states(world, now, &mut events);
    run_rage_checks(world, &mut events);
    run_attacks(world, now, &mut events);
    let area_attacks = run_special_attacks(world, now, &mut events);
    apply_area_attacks(world, now, &area_attacks, &mut events);
    run_summons(world, now, &mut events);
    integrate_movement(world, dt as f32);
    despawn_corpses(world, now, &mut events);

    events
}

fn expire_stuns(world: &mut EncounterWorld, now: f64, events: &mut Vec<EncounterEvent>) {
    for actor in &mut world.actors {
        if actor.state == ActorState::Stunned && now >= actor.stunned_until {
            actor.state = ActorState::Idle;
            events.push(EncounterEvent::StateChanged {
                actor: actor.id,
                from: ActorState::Stunned,
                to: ActorState::Idle,
            });
        }
    }
}

fn update_perception_and_states(
    world: &mut EncounterWorld,
    now: f64,
    events: &mut Vec<EncounterEvent>,
) {
    let source = world.player.as_ref();
    let interval = world.config.target_refresh_interval;
    let hysteresis = world.config.hysteresis_factor;

    for actor in &mut world.actors {
        if actor.is_dead() || actor.state == ActorState::Stunned {
            continue;
        }

        actor.perception.update(&source, now, interval);
        let position = actor.movement.position();
        let detected = actor
            .perception
            .can_detect(position, actor.stats.detection_range);
        let distance = actor
            .perception
            .distance_to_target(position)
            .unwrap_or(f32::INFINITY);

        let next = advance_state(
            actor.state,
            detected,
            distance,
            actor.stats.attack_range,
            hysteresis,
        );
        if next != actor.state {
            events.push(EncounterEvent::StateChanged {
                actor: actor.id,
                from: actor.state,
                to: next,
            });
            actor.state = next;
        }

        match actor.state {
            ActorState::Chasing => {
                if let Some(target) = actor.perception.target() {
                    actor.movement.set_destination(target);
                }
            }
            ActorState::Attacking | ActorState::Idle => actor.movement.hold(),
            _ => {}
        }
    }
}

fn run_rage_checks(world: &mut EncounterWorld, events: &mut Vec<EncounterEvent>) {
    for actor in &mut world.actors {
        if !actor.is_dead() && check_rage(actor, &world.config) {
            events.push(EncounterEvent::RageTriggered { actor: actor.id });
        }
    }
}

fn run_attacks(world: &mut EncounterWorld, now: f64, events: &mut Vec<EncounterEvent>) {
    let Some(player) = world.player.as_mut() else {
        return;
    };

    for actor in &mut world.actors {
        if actor.state != ActorState::Attacking || player.is_dead() {
            continue;
        }
        let distance = actor.movement.position().distance(player.position);
        let Some(outcome) = try_attack(actor, distance, now, &world.config, &mut world.rng) else {
            continue;
        };

        let result = player.take_damage(outcome.damage, now);
        events.push(EncounterEvent::AttackLanded {
            actor: actor.id,
            damage: outcome.damage,
            animation: outcome.animation,
            player_health: result.new_health,
        });
        if result.died {
            events.push(EncounterEvent::PlayerDied);
        }
    }
}

fn run_special_attacks(
    world: &mut EncounterWorld,
    now: f64,
    events: &mut Vec<EncounterEvent>,
) -> Vec<(ActorId, AreaAttack)> {
    let mut strikes = Vec::new();
    for actor in &mut world.actors {
        if actor.is_dead() {
            continue;
        }
        if let Some(strike) = try_special_attack(actor, now, &world.config) {
            events.push(EncounterEvent::SpecialAttackFired {
                actor: actor.id,
                center: strike.center,
                radius: strike.radius,
                damage: strike.damage,
            });
            strikes.push((actor.id, strike));
        }
    }
    strikes
}

/// Apply each area strike to the player and to bystander actors
///
/// The player takes the strike damage when inside the radius. Elite
/// bystanders caught in the blast are stunned, not damaged; hostiles do not
/// shred each other's health with their own specials.
fn apply_area_attacks(
    world: &mut EncounterWorld,
    now: f64,
    strikes: &[(ActorId, AreaAttack)],
    events: &mut Vec<EncounterEvent>,
) {
    let stun_until = now + world.config.stun_duration;

    for (source, strike) in strikes {
        if let Some(player) = world.player.as_mut() {
            if !player.is_dead() && player.position.distance(strike.center) <= strike.radius {
                let result = player.take_damage(strike.damage, now);
                if result.died {
                    events.push(EncounterEvent::PlayerDied);
                }
            }
        }

        for actor in &mut world.actors {
            if actor.id == *source
                || actor.archetype != Archetype::Elite
                || actor.is_dead()
                || actor.state == ActorState::Stunned
            {
                continue;
            }
            if actor.movement.position().distance(strike.center) <= strike.radius {
                let from = actor.state;
                actor.state = ActorState::Stunned;
                actor.stunned_until = stun_until;
                actor.movement.hold();
                events.push(EncounterEvent::StateChanged {
                    actor: actor.id,
                    from,
                    to: ActorState::Stunned,
                });
                events.push(EncounterEvent::Stunned {
                    actor: actor.id,
                    until: stun_until,
                });
            }
        }
    }
}

fn run_summons(world: &mut EncounterWorld, now: f64, events: &mut Vec<EncounterEvent>) {
    let mut pending: Vec<(usize, Vec3, bool)> = Vec::new();

    let mut occupied: Vec<Vec3> = world
        .actors
        .iter()
        .filter(|a| !a.is_dead())
        .map(|a| a.position())
        .collect();
    let player_pos = world.player.as_ref().and_then(|p| {
        if p.is_dead() {
            None
        } else {
            Some(p.position)
        }
    });

    for (i, actor) in world.actors.iter_mut().enumerate() {
        // Dead minions free their follower slots
        let registry = world.director.registry();
        actor.followers.retain(|f| registry.is_live(*f));

        if !summon_ready(actor, now) {
            continue;
        }
        let placement = sample_placement(
            actor.position(),
            world.config.summon_radius,
            player_pos,
            &occupied,
            &world.config.placement,
            &mut world.rng,
        );
        schedule_next_summon(actor, now);
        // Earlier same-tick placements constrain the later ones
        occupied.push(placement.position);
        pending.push((i, placement.position, placement.fallback));
    }

    for (boss_index, position, fallback) in pending {
        let minion = Actor::spawn(Archetype::Basic, position, &world.config, now);
        let minion_id = minion.id;
        let boss_id = world.actors[boss_index].id;

        world.actors[boss_index].followers.push(minion_id);
        world.director.note_spawn(minion_id);
        world.actors.push(minion);

        tracing::info!(boss = %boss_id, minion = %minion_id, "minion summoned");
        events.push(EncounterEvent::MinionSummoned {
            boss: boss_id,
            minion: minion_id,
            position,
            fallback,
        });
    }
}

fn integrate_movement(world: &mut EncounterWorld, dt: f32) {
    for actor in &mut world.actors {
        actor.movement.integrate(dt);
    }
}

fn despawn_corpses(world: &mut EncounterWorld, now: f64, events: &mut Vec<EncounterEvent>) {
    world.actors.retain(|actor| {
        match actor.despawn_at {
            Some(at) if now >= at => {
                events.push(EncounterEvent::Despawned { actor: actor.id });
                false
            }
            _ => true,
        }
    });
}
