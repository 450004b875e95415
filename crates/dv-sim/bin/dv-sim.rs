//! Headless monster simulation
//!
//! Populates an arena level and runs the monster AI against a single
//! stationary hero, printing what happened on each tick.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;

use clap::Parser;
use strum::IntoEnumIterator;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dv_core::combat::player_hits_monster;
use dv_core::world::WeaponClass;
use dv_core::{
    ArenaBuilder, Difficulty, Direction, HP_SHIFT, HP_UNIT, Level, Player, PlayerId, Point, SimConfig,
    SimEvent, Simulation,
};

/// Run the monster AI headless on an arena level
#[derive(Parser, Debug)]
#[command(name = "dv-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; fields left out take their defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Number of game ticks to run
    #[arg(short = 't', long = "ticks", default_value_t = 200)]
    ticks: u64,

    /// Override the game seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u32>,

    /// Override the dungeon level (1-24)
    #[arg(short = 'd', long = "depth")]
    depth: Option<u8>,

    /// Override the difficulty (Normal, Nightmare, Hell)
    #[arg(long = "difficulty")]
    difficulty: Option<String>,

    /// Solid columns scattered over the arena floor
    #[arg(long = "pillars", default_value_t = 0)]
    pillars: u32,

    /// Split the arena in two rooms joined by a door
    #[arg(long = "divided")]
    divided: bool,

    /// The hero only stands there and takes it
    #[arg(long = "passive")]
    passive: bool,

    /// Print every event as a JSON line instead of the per-tick summary
    #[arg(long = "json")]
    json: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long = "log", default_value = "warn")]
    log: String,
}

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber once; `RUST_LOG` wins over `default_filter`
fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();
        let _ = subscriber.try_init();
    });
}

fn parse_difficulty(name: &str) -> Option<Difficulty> {
    Difficulty::iter().find(|d| d.to_string().eq_ignore_ascii_case(name))
}

fn load_config(args: &Args) -> Result<SimConfig, String> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(depth) = args.depth {
        config.dungeon_level = depth;
    }
    if let Some(name) = &args.difficulty {
        config.difficulty =
            parse_difficulty(name).ok_or_else(|| format!("unknown difficulty '{name}'"))?;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// A sturdy fighter in the middle of the arena
fn hero(at: Point) -> Player {
    let mut p = Player::new("hero", at);
    p.level = 10;
    p.hit_points = 300 * HP_UNIT;
    p.max_hit_points = 300 * HP_UNIT;
    p.armor_class = 40;
    p.to_hit = 90;
    p.min_damage = 6;
    p.max_damage = 14;
    p.weapon = WeaponClass::Sword;
    p.block_chance = 30;
    p
}

/// Closest open floor tile to `centre`, searching outwards ring by ring
fn open_tile_near(level: &Level, centre: Point) -> Option<Point> {
    (0..16).find_map(|r| {
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| Point::new(centre.x + dx, centre.y + dy)))
            .filter(|p| p.walking_distance(centre) == r)
            .find(|&p| level.is_tile_available(p))
    })
}

/// The hero swings at one neighbouring monster
fn hero_turn(sim: &mut Simulation, pid: PlayerId) {
    let p = &sim.players[pid.index()];
    if p.is_dead() {
        return;
    }
    let here = p.tile;
    let target = Direction::iter()
        .map(|d| here + d)
        .filter(|t| t.in_bounds())
        .filter_map(|t| sim.level.monster_cell(t).id())
        .find(|&id| sim.monsters[id].is_possible_to_hit());
    if let Some(id) = target {
        player_hits_monster(sim, pid, id);
    }
}

#[derive(Debug, Default)]
struct Tally {
    counts: BTreeMap<&'static str, u32>,
    damage: i64,
}

impl Tally {
    fn add(&mut self, event: &SimEvent) {
        let kind = match event {
            SimEvent::MonsterSpawned { .. } => "spawned",
            SimEvent::MonsterDamaged { amount, .. } => {
                self.damage += i64::from(*amount);
                "damaged"
            }
            SimEvent::MonsterKilled { .. } => "killed",
            SimEvent::Experience { .. } => "experience",
            SimEvent::Loot { .. } => "loot",
            SimEvent::CorpseAdded { .. } => "corpses",
            SimEvent::AcidPuddle { .. } => "acid",
            SimEvent::MissileLaunched { .. } => "missiles",
            SimEvent::Sound { .. } | SimEvent::GlobalSound(_) => "sounds",
            SimEvent::Dialogue { .. } => "dialogue",
            SimEvent::QuestChanged { .. } => "quests",
            SimEvent::MapChanged { .. } => "map changes",
            SimEvent::DoorOpened { .. } => "doors",
            SimEvent::Teleported { .. } => "teleports",
            SimEvent::PlayerHit { .. } => "hero hit",
            SimEvent::PlayerBlocked { .. } => "hero blocked",
            SimEvent::PlayerKnockedBack { .. } => "hero knocked back",
            SimEvent::PlayerDied { .. } => "hero died",
            SimEvent::DiabloDefeated => "diablo defeated",
        };
        *self.counts.entry(kind).or_default() += 1;
    }

    fn line(&self) -> String {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(kind, n)| format!("{n} {kind}"))
            .collect();
        parts.join(", ")
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(args)?;
    let arena = ArenaBuilder::new(config.dungeon_level)
        .pillars(args.pillars)
        .divided(args.divided)
        .layout_seed(u64::from(config.seed))
        .lit(false);
    let level = arena.build();
    info!(
        depth = config.dungeon_level,
        difficulty = %config.difficulty,
        seed = config.seed,
        "building arena"
    );

    let mut sim = Simulation::new(config, level);
    let pid = PlayerId(0);
    let centre = Point::new(
        arena.origin.x + arena.width / 4,
        arena.origin.y + arena.height / 2,
    );
    let start = open_tile_near(&sim.level, centre).ok_or("no open floor for the hero")?;
    sim.add_player(pid, hero(start));
    sim.init_monsters().map_err(|e| e.to_string())?;
    arena.light(&mut sim.level);
    println!(
        "level {} populated with {} monsters of {} types",
        sim.level.depth,
        sim.monsters.active_count(),
        sim.monsters.types().len()
    );

    let mut totals = Tally::default();
    for _ in 0..args.ticks {
        let tick = sim.tick;
        if !args.passive {
            hero_turn(&mut sim, pid);
        }
        sim.process_monsters();

        let events = sim.drain_events();
        let mut tally = Tally::default();
        for event in &events {
            if args.json {
                let line = serde_json::to_string(event).map_err(|e| e.to_string())?;
                println!("{{\"tick\":{tick},\"event\":{line}}}");
            }
            tally.add(event);
            totals.add(event);
        }
        if !args.json && !events.is_empty() {
            println!("tick {tick:>5}: {}", tally.line());
        }
        if sim.players[pid.index()].is_dead() {
            println!("the hero fell on tick {tick}");
            break;
        }
    }

    let hero = &sim.players[pid.index()];
    println!(
        "after {} ticks: {} monsters remain, hero at {} hp with {} experience",
        sim.tick,
        sim.monsters.active_count(),
        hero.hit_points >> HP_SHIFT,
        hero.experience
    );
    println!("totals: {}", totals.line());
    println!("damage dealt to monsters: {}", totals.damage >> HP_SHIFT);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("dv-sim: {e}");
            ExitCode::FAILURE
        }
    }
}
