//! Gloomkeep - Entry Point
//!
//! Interactive driver for the encounter engine: spawns a level population,
//! advances ticks on demand, and prints the events each tick produces.

use clap::Parser;
use glam::Vec3;

use gloomkeep::core::config::EncounterConfig;
use gloomkeep::core::error::Result;
use gloomkeep::core::types::{Archetype, LevelId};
use gloomkeep::player::Player;
use gloomkeep::simulation::tick::{run_encounter_tick, EncounterEvent, EncounterWorld};

use std::io::{self, Write};

/// Fixed step used by the interactive loop
const TICK_SECONDS: f64 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "gloomkeep", about = "Hostile encounter engine driver")]
struct Args {
    /// RNG seed; identical seeds reproduce identical encounters
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Level number, used for the key drop flag
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Basic actors to spawn
    #[arg(long, default_value_t = 4)]
    basic: u32,

    /// Elite actors to spawn
    #[arg(long, default_value_t = 1)]
    elite: u32,

    /// Boss actors to spawn
    #[arg(long, default_value_t = 0)]
    boss: u32,

    /// Optional TOML config file overriding the built-in tuning
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Print tick events as JSON lines instead of prose
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gloomkeep=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            EncounterConfig::from_toml_str(&text)?
        }
        None => EncounterConfig::default(),
    };

    let mut world = EncounterWorld::new(config, LevelId(args.level), args.seed)?;
    world.set_player(Player::new(Vec3::ZERO, world.config.invulnerability_duration));

    let anchor = Vec3::new(12.0, 0.0, 12.0);
    for _ in 0..args.basic {
        world.spawn_actor(Archetype::Basic, anchor);
    }
    for _ in 0..args.elite {
        world.spawn_actor(Archetype::Elite, anchor);
    }
    for _ in 0..args.boss {
        world.spawn_actor(Archetype::Boss, anchor);
    }

    println!("\n=== GLOOMKEEP ===");
    println!("Level {} encounter with {} hostiles", args.level, world.live_count());
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance the encounter by one tick");
    println!("  run <n>         - Run n ticks");
    println!("  hit <i> <dmg>   - Damage the i-th listed actor");
    println!("  status / s      - Show actor status");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let events = run_encounter_tick(&mut world, TICK_SECONDS);
            print_events(&events, args.json);
            println!("t = {:.1}s", world.clock.now());
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&world);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            match rest.parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        let events = run_encounter_tick(&mut world, TICK_SECONDS);
                        print_events(&events, args.json);
                    }
                    println!("t = {:.1}s", world.clock.now());
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("hit ") {
            let mut parts = rest.split_whitespace();
            let index = parts.next().and_then(|s| s.parse::<usize>().ok());
            let damage = parts.next().and_then(|s| s.parse::<f32>().ok());
            match (index, damage) {
                (Some(i), Some(dmg)) if i < world.actors().len() => {
                    let id = world.actors()[i].id;
                    let events = world.damage_actor(id, dmg)?;
                    print_events(&events, args.json);
                }
                _ => println!("Usage: hit <index> <damage>"),
            }
            continue;
        }

        println!("Unknown command: {}", input);
    }

    Ok(())
}

fn display_status(world: &EncounterWorld) {
    if let Some(player) = &world.player {
        println!(
            "player: {:.0}/{:.0} hp at {:?}",
            player.health.health(),
            player.health.max_health(),
            player.position
        );
    }
    for (i, actor) in world.actors().iter().enumerate() {
        println!(
            "[{}] {} {} {:.0}/{:.0} hp{}{}",
            i,
            actor.archetype.name(),
            actor.state.name(),
            actor.health.health(),
            actor.health.max_health(),
            if actor.is_raging { " [raging]" } else { "" },
            if actor.followers.is_empty() {
                String::new()
            } else {
                format!(" [{} minions]", actor.followers.len())
            },
        );
    }
    println!("live hostiles: {}", world.live_count());
}

fn print_events(events: &[EncounterEvent], json: bool) {
    if json {
        for event in events {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!(error = %e, "failed to serialize event"),
            }
        }
        return;
    }
    for event in events {
        match event {
            EncounterEvent::StateChanged { actor, from, to } => {
                println!("  {} {} -> {}", actor, from.name(), to.name());
            }
            EncounterEvent::AttackLanded {
                damage,
                animation,
                player_health,
                ..
            } => {
                println!(
                    "  attack ({}) for {:.0}; player at {:.0} hp",
                    animation, damage, player_health
                );
            }
            EncounterEvent::SpecialAttackFired { radius, damage, .. } => {
                println!("  special attack: radius {:.1}, damage {:.0}", radius, damage);
            }
            EncounterEvent::Stunned { actor, until } => {
                println!("  {} stunned until t = {:.1}s", actor, until);
            }
            EncounterEvent::RageTriggered { actor } => {
                println!("  {} enters rage", actor);
            }
            EncounterEvent::MinionSummoned { minion, fallback, .. } => {
                println!(
                    "  minion {} summoned{}",
                    minion,
                    if *fallback { " (fallback placement)" } else { "" }
                );
            }
            EncounterEvent::Died { actor, archetype } => {
                println!("  {} ({}) died", actor, archetype.name());
            }
            EncounterEvent::LootDropped { drop } => {
                println!("  loot: {:?}", drop);
            }
            EncounterEvent::PlayerDied => {
                println!("  THE PLAYER HAS DIED");
            }
            EncounterEvent::Despawned { actor } => {
                println!("  {} despawned", actor);
            }
        }
    }
}
