//! Mode state machine: entering actions and stepping them each tick
//!
//! `start_*` functions put a monster into a mode and pick its animation.
//! [`step_mode`] runs once per tick for the current mode; it returns true
//! when the action finished this tick, which lets the AI pick the next one
//! straight away.

use dv_rng::SeededRng;
use tracing::debug;

use super::ai::step_talk;
use super::{
    AiKind, Mode, ModeKind, Monster, MonsterFlags, MonsterGraphic, MonsterId, Species,
    update_enemy, update_leader,
};
use crate::combat::{MissileKind, monster_attack_enemy};
use crate::dungeon::{Corpse, Direction, MonsterCell};
use crate::sim::Simulation;
use crate::world::{MonsterSound, SimEvent};

/// Ticks Diablo's death animation runs before the game is won
const DIABLO_DEATH_TICKS: i32 = 140;

/// Switch to `graphic` from its first frame and face `direction`
pub fn new_monster_anim(m: &mut Monster, graphic: MonsterGraphic, direction: Direction) {
    let data = m.data().anim(graphic);
    m.anim.graphic = graphic;
    m.anim.frames = data.frames.max(1);
    m.anim.rate = data.rate.max(1);
    m.anim.frame = 0;
    m.anim.tick = 0;
    m.flags
        .remove(MonsterFlags::LOCK_ANIMATION | MonsterFlags::ALLOW_SPECIAL);
    m.direction = direction;
}

/// Swap sprite sheets but keep the frame position
fn change_anim(m: &mut Monster, graphic: MonsterGraphic) {
    let data = m.data().anim(graphic);
    m.anim.graphic = graphic;
    m.anim.frames = data.frames.max(1);
    m.anim.rate = data.rate.max(1);
    m.anim.frame = m.anim.frame.min(m.anim.frames - 1);
}

fn settle(m: &mut Monster) {
    m.future = m.tile;
    m.old = m.tile;
}

/// Advance the animation clock by one tick
pub fn process_animation(m: &mut Monster) {
    if m.flags.contains(MonsterFlags::ALLOW_SPECIAL) {
        return;
    }
    m.anim.tick += 1;
    if m.anim.tick < m.anim.rate {
        return;
    }
    m.anim.tick = 0;
    if m.flags.contains(MonsterFlags::LOCK_ANIMATION) {
        m.anim.frame -= 1;
        if m.anim.frame < 0 {
            m.anim.frame = m.anim.frames - 1;
        }
    } else {
        m.anim.frame += 1;
        if m.anim.frame >= m.anim.frames {
            m.anim.frame = 0;
        }
    }
}

/// The current frame was just entered this tick
fn on_frame(m: &Monster, frame: i32) -> bool {
    m.anim.frame == frame && m.anim.tick == 0
}

pub fn start_stand(sim: &mut Simulation, id: MonsterId, direction: Direction) {
    let m = &mut sim.monsters[id];
    let graphic = if m.is_golem() {
        MonsterGraphic::Walk
    } else {
        MonsterGraphic::Stand
    };
    new_monster_anim(m, graphic, direction);
    m.mode = Mode::Stand {
        previous: m.mode.kind(),
        idle: 0,
    };
    settle(m);
    update_enemy(sim, id);
}

/// Idle for `len` ticks before deciding again
pub fn ai_delay(m: &mut Monster, len: i32) {
    if len <= 0 || m.ai == AiKind::Lazarus {
        return;
    }
    m.mode = Mode::Delay { remaining: len };
}

pub fn start_attack(m: &mut Monster) {
    let dir = m.enemy_direction();
    new_monster_anim(m, MonsterGraphic::Attack, dir);
    m.mode = Mode::MeleeAttack;
    settle(m);
}

pub fn start_ranged_attack(m: &mut Monster, missile: Option<MissileKind>, damage: i32) {
    let dir = m.enemy_direction();
    new_monster_anim(m, MonsterGraphic::Attack, dir);
    m.mode = Mode::RangedAttack { missile, damage };
    settle(m);
}

pub fn start_ranged_special_attack(m: &mut Monster, missile: MissileKind, damage: i32) {
    let dir = m.enemy_direction();
    new_monster_anim(m, MonsterGraphic::Special, dir);
    m.mode = Mode::SpecialRangedAttack {
        missile,
        ticks: 0,
        damage,
    };
    settle(m);
}

pub fn start_special_attack(m: &mut Monster) {
    let dir = m.enemy_direction();
    new_monster_anim(m, MonsterGraphic::Special, dir);
    m.mode = Mode::SpecialMeleeAttack;
    settle(m);
}

/// Scavengers feeding on a corpse; keeps the current facing
pub fn start_eating(m: &mut Monster) {
    let dir = m.direction;
    new_monster_anim(m, MonsterGraphic::Special, dir);
    m.mode = Mode::SpecialMeleeAttack;
    settle(m);
}

pub fn start_special_stand(m: &mut Monster, direction: Direction) {
    new_monster_anim(m, MonsterGraphic::Special, direction);
    m.mode = Mode::SpecialStand;
    settle(m);
}

pub fn start_fade_in(m: &mut Monster, direction: Direction, backwards: bool) {
    new_monster_anim(m, MonsterGraphic::Special, direction);
    m.mode = Mode::FadeIn;
    settle(m);
    m.flags.remove(MonsterFlags::HIDDEN);
    if backwards {
        m.flags.insert(MonsterFlags::LOCK_ANIMATION);
        m.anim.frame = m.anim.last_frame();
    }
}

pub fn start_fade_out(m: &mut Monster, direction: Direction, backwards: bool) {
    new_monster_anim(m, MonsterGraphic::Special, direction);
    m.mode = Mode::FadeOut;
    settle(m);
    if backwards {
        m.flags.insert(MonsterFlags::LOCK_ANIMATION);
        m.anim.frame = m.anim.last_frame();
    }
}

/// Play the special animation backwards, regaining a slice of life when it
/// reaches the first frame
pub fn start_heal(m: &mut Monster, rng: &mut SeededRng) {
    change_anim(m, MonsterGraphic::Special);
    m.anim.frame = m.anim.last_frame();
    m.flags.insert(MonsterFlags::LOCK_ANIMATION);
    let amount = m.max_hit_points / (16 * (rng.generate(5) + 4));
    m.mode = Mode::Heal { amount };
}

/// Interrupt the current action with a flinch. Golems never play it but
/// still snap back to where the interrupted action started.
pub fn start_got_hit(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    if !m.is_golem() {
        let dir = m.direction;
        new_monster_anim(m, MonsterGraphic::GotHit, dir);
        m.mode = Mode::HitRecovery;
    }
    m.tile = m.old;
    m.future = m.old;
    let (tile, old) = (m.tile, m.old);
    sim.level.clear_monster_squares(id, old);
    sim.level.set_monster(tile, MonsterCell::Standing(id));
}

/// Re-face a standing or talking monster without restarting its animation
pub fn check_stand_animation(m: &mut Monster, direction: Direction) {
    if matches!(m.mode.kind(), ModeKind::Stand | ModeKind::Talk) {
        m.direction = direction;
        change_anim(m, MonsterGraphic::Stand);
    }
}

/// Turn to stone; only death ends it
pub fn petrify(m: &mut Monster) {
    m.mode = Mode::Petrified;
}

/// Announce a missile leaving the monster towards its enemy
pub(crate) fn launch_missile(sim: &mut Simulation, id: MonsterId, kind: MissileKind, damage: i32) {
    let m = &sim.monsters[id];
    let event = SimEvent::MissileLaunched {
        source: id,
        kind,
        from: m.tile,
        to: m.enemy_position,
        damage,
    };
    sim.emit(event);
}

/// Run one tick of the current mode. True when the action just completed.
pub fn step_mode(sim: &mut Simulation, id: MonsterId) -> bool {
    match sim.monsters[id].mode {
        Mode::Stand { previous, idle } => {
            step_idle(sim, id, previous, idle);
            false
        }
        Mode::WalkNorth { .. } | Mode::WalkSouth { .. } | Mode::WalkSideways { .. } => {
            step_walk(sim, id)
        }
        Mode::MeleeAttack => step_melee(sim, id),
        Mode::RangedAttack { missile, damage } => step_ranged(sim, id, missile, damage),
        Mode::SpecialMeleeAttack => step_special_melee(sim, id),
        Mode::SpecialRangedAttack {
            missile,
            ticks,
            damage,
        } => step_special_ranged(sim, id, missile, ticks, damage),
        Mode::HitRecovery => finish_on_last_frame(sim, id),
        Mode::Death { ticks } => {
            step_death(sim, id, ticks);
            false
        }
        Mode::FadeIn | Mode::FadeOut => step_fade(sim, id),
        Mode::SpecialStand => {
            let m = &sim.monsters[id];
            if on_frame(m, m.data().special_frame - 1) {
                sim.play_effect(id, MonsterSound::Special);
            }
            finish_on_last_frame(sim, id)
        }
        Mode::Delay { remaining } => step_delay(sim, id, remaining),
        Mode::Charge => false,
        Mode::Petrified => {
            step_petrified(sim, id);
            false
        }
        Mode::Heal { amount } => {
            step_heal(&mut sim.monsters[id], amount);
            false
        }
        Mode::Talk => {
            step_talk(sim, id);
            false
        }
    }
}

fn step_idle(sim: &mut Simulation, id: MonsterId, previous: ModeKind, idle: i32) {
    let m = &mut sim.monsters[id];
    let graphic = if m.is_golem() {
        MonsterGraphic::Walk
    } else {
        MonsterGraphic::Stand
    };
    change_anim(m, graphic);
    m.mode = Mode::Stand {
        previous,
        idle: idle + 1,
    };
    if m.anim.is_last_frame() {
        update_enemy(sim, id);
    }
}

fn finish_on_last_frame(sim: &mut Simulation, id: MonsterId) -> bool {
    if sim.monsters[id].anim.is_last_frame() {
        let dir = sim.monsters[id].direction;
        start_stand(sim, id, dir);
        return true;
    }
    false
}

fn step_walk(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &mut sim.monsters[id];
    if !m.anim.is_last_frame() {
        return false;
    }
    match m.mode {
        Mode::WalkNorth { step } => {
            sim.level.clear_monster(m.tile);
            m.tile = m.tile + step;
            sim.level.set_monster(m.tile, MonsterCell::Standing(id));
        }
        Mode::WalkSouth { from } => sim.level.clear_monster(from),
        Mode::WalkSideways { to } => {
            sim.level.clear_monster(m.tile);
            m.tile = to;
            sim.level.set_monster(m.tile, MonsterCell::Standing(id));
        }
        _ => {}
    }
    let dir = m.direction;
    start_stand(sim, id, dir);
    true
}

fn step_melee(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    let (to_hit, min, max) = (m.to_hit, m.min_damage, m.max_damage);
    let species = m.species;
    let snake = m.ai == AiKind::Snake;

    if on_frame(m, m.data().attack_frame - 1) {
        monster_attack_enemy(sim, id, to_hit, min, max);
        if !snake {
            sim.play_effect(id, MonsterSound::Attack);
        }
    }
    let m = &sim.monsters[id];
    if species.is_magma() && on_frame(m, 8) {
        monster_attack_enemy(sim, id, to_hit + 10, min - 2, max - 2);
        sim.play_effect(id, MonsterSound::Attack);
    }
    let m = &sim.monsters[id];
    if species.is_storm() && on_frame(m, 12) {
        monster_attack_enemy(sim, id, to_hit - 20, min + 4, max + 4);
        sim.play_effect(id, MonsterSound::Attack);
    }
    if snake && on_frame(&sim.monsters[id], 0) {
        sim.play_effect(id, MonsterSound::Attack);
    }
    finish_on_last_frame(sim, id)
}

fn step_ranged(
    sim: &mut Simulation,
    id: MonsterId,
    missile: Option<MissileKind>,
    damage: i32,
) -> bool {
    let m = &sim.monsters[id];
    if on_frame(m, m.data().attack_frame - 1) {
        if let Some(kind) = missile {
            let volley = if kind == MissileKind::ChargedBolt { 3 } else { 1 };
            for _ in 0..volley {
                launch_missile(sim, id, kind, damage);
            }
        }
        sim.play_effect(id, MonsterSound::Attack);
    }
    finish_on_last_frame(sim, id)
}

fn step_special_ranged(
    sim: &mut Simulation,
    id: MonsterId,
    missile: MissileKind,
    ticks: i32,
    damage: i32,
) -> bool {
    let m = &sim.monsters[id];
    let release = m.data().special_frame - 1;
    if on_frame(m, release) && ticks == 0 {
        launch_missile(sim, id, missile, damage);
        if missile == MissileKind::HorkSpawn {
            release_hork_spawn(sim, id);
        }
        sim.play_effect(id, MonsterSound::Special);
    }

    let m = &mut sim.monsters[id];
    if m.ai == AiKind::Mega && m.anim.frame == release {
        // the flame wave keeps the release frame up for a while
        if ticks == 0 {
            m.flags.insert(MonsterFlags::ALLOW_SPECIAL);
        } else if ticks + 1 == 15 {
            m.flags.remove(MonsterFlags::ALLOW_SPECIAL);
        }
        m.mode = Mode::SpecialRangedAttack {
            missile,
            ticks: ticks + 1,
            damage,
        };
    }
    finish_on_last_frame(sim, id)
}

/// A hork demon drops one of its brood in front of it
fn release_hork_spawn(sim: &mut Simulation, id: MonsterId) {
    let Some(type_index) = sim.monsters.type_index(Species::HorkSpawn) else {
        return;
    };
    let m = &sim.monsters[id];
    let dir = m.direction;
    let tile = m.tile + dir;
    if !tile.in_bounds() || !sim.level.is_tile_available(tile) {
        return;
    }
    if let Some(spawn) = super::add_monster(sim, tile, dir, type_index, true) {
        start_special_stand(&mut sim.monsters[spawn], dir);
    }
}

fn step_special_melee(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    if on_frame(m, m.data().special_frame - 1) {
        let (to_hit, min, max) = (m.to_hit_special, m.min_damage_special, m.max_damage_special);
        monster_attack_enemy(sim, id, to_hit, min, max);
    }
    finish_on_last_frame(sim, id)
}

fn step_fade(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &mut sim.monsters[id];
    let backwards = m.flags.contains(MonsterFlags::LOCK_ANIMATION);
    let done = if backwards {
        m.anim.frame == 0
    } else {
        m.anim.is_last_frame()
    };
    if !done {
        return false;
    }
    let fading_out = m.mode == Mode::FadeOut;
    m.flags.remove(MonsterFlags::LOCK_ANIMATION);
    if fading_out {
        m.flags.insert(MonsterFlags::HIDDEN);
    }
    let dir = m.direction;
    start_stand(sim, id, dir);
    true
}

fn step_heal(m: &mut Monster, amount: i32) {
    if m.flags.contains(MonsterFlags::NO_HEAL) {
        m.flags.remove(MonsterFlags::ALLOW_SPECIAL);
        m.mode = Mode::SpecialMeleeAttack;
        return;
    }
    if m.anim.frame != 0 {
        return;
    }
    m.flags.remove(MonsterFlags::LOCK_ANIMATION);
    m.flags.insert(MonsterFlags::ALLOW_SPECIAL);
    if m.hit_points + amount < m.max_hit_points {
        m.hit_points += amount;
    } else {
        m.hit_points = m.max_hit_points;
        m.flags.remove(MonsterFlags::ALLOW_SPECIAL);
        m.mode = Mode::SpecialMeleeAttack;
    }
}

fn step_death(sim: &mut Simulation, id: MonsterId, ticks: i32) {
    let m = &mut sim.monsters[id];
    let ticks = ticks + 1;
    m.mode = Mode::Death { ticks };

    if m.species == Species::Diablo {
        if ticks == DIABLO_DEATH_TICKS {
            sim.emit(SimEvent::DiabloDefeated);
        }
        return;
    }
    if !m.anim.is_last_frame() || m.delete_pending {
        return;
    }

    let tile = m.tile;
    let corpse = Corpse {
        kind: m.species as u8,
        direction: m.direction,
    };
    m.delete_pending = true;
    sim.level.add_corpse(tile, corpse);
    sim.level.clear_monster(tile);
    sim.emit(SimEvent::CorpseAdded { tile });
    debug!(%id, %tile, "death animation finished");
    update_leader(sim, id);
}

fn step_delay(sim: &mut Simulation, id: MonsterId, remaining: i32) -> bool {
    let m = &mut sim.monsters[id];
    m.direction = m.enemy_direction();
    change_anim(m, MonsterGraphic::Stand);

    let mut remaining = remaining;
    if m.ai == AiKind::Lazarus && !(0..=8).contains(&remaining) {
        remaining = 8;
    }
    if remaining == 0 {
        let frame = m.anim.frame;
        let dir = m.direction;
        start_stand(sim, id, dir);
        let anim = &mut sim.monsters[id].anim;
        anim.frame = frame.min(anim.frames - 1);
        return true;
    }
    m.mode = Mode::Delay {
        remaining: remaining - 1,
    };
    false
}

fn step_petrified(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    if m.hit_points <= 0 && !m.delete_pending {
        sim.level.clear_monster(m.tile);
        m.delete_pending = true;
    }
}
