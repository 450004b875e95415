//! Monster creation and level population
//!
//! Creating an instance always goes through [`init_monster`], which rolls
//! the species stats and applies the difficulty table once. Everything else
//! here decides *where* monsters go: scatter groups, unique packs, quest
//! bosses, golems and raised skeletons.
//!
//! Level population is silent; the host reads the registry once
//! [`Simulation::init_monsters`] returns. Spawns during play (raised
//! skeletons, golems, hork brood, doppelgangers) emit
//! [`SimEvent::MonsterSpawned`].

use tracing::{debug, warn};

use super::mode::{new_monster_anim, start_special_stand, start_stand};
use super::{
    AiKind, Goal, LeaderRelation, Mode, MonsterFlags, MonsterGraphic, MonsterId, Placement,
    Species, UniqueMonster, UniqueMonsterPack, update_enemy,
};
use crate::config::Difficulty;
use crate::dungeon::{Direction, Level, MonsterCell, Point};
use crate::error::SpawnError;
use crate::sim::Simulation;
use crate::world::{PlayerId, QuestId, QuestStatus, SimEvent};
use crate::{GOLEM_HOLDING_CELL, HP_SHIFT, HP_UNIT, MAX_LVL_MTYPES, MAX_MONSTERS, MAX_PLRS};

// ============================================================================
// Placement tuning
// ============================================================================

/// Random anchors are drawn from `[RANDOM_ORIGIN, RANDOM_ORIGIN + RANDOM_SPAN)`
const RANDOM_ORIGIN: i32 = 16;
const RANDOM_SPAN: i32 = 80;
/// Fresh anchors a scatter group tries before giving up
const GROUP_ATTEMPTS: usize = 10;
/// Steps of the random walk that spreads a group out from its anchor
const GROUP_STEPS: usize = 100;
/// Leashed minions start strictly closer than this to the anchor
const LEASH_SPREAD: i32 = 4;
/// Draws for a random anchor before the group gives up on this attempt
const ANCHOR_TRIES: usize = 1000;
/// Random positions a unique tries for an open 6x6 area
const UNIQUE_AREA_TRIES: usize = 1000;
/// Free tiles a unique wants around itself
const UNIQUE_AREA_MIN: i32 = 9;
/// Pack size of uniques that roam with their own kind
const UNIQUE_PACK_SIZE: i32 = 8;
/// Minion count of the multiplayer Skeleton King
const SKELETON_KING_PACK_SIZE: i32 = 30;
/// Floor tiles per scattered monster
const TILES_PER_MONSTER: i32 = 30;
/// Slots left free for spawns during play
const RESERVED_SLOTS: usize = 10;

// ============================================================================
// Instances
// ============================================================================

/// Reset slot `id` to a fresh instance of the level type `type_index`
/// standing on `tile`.
///
/// Draws, in order: stand tick, stand frame, hit points, loot seed, AI seed.
pub fn init_monster(
    sim: &mut Simulation,
    id: MonsterId,
    direction: Direction,
    type_index: usize,
    tile: Point,
) {
    let species = sim.monsters.level_type(type_index).species;
    let data = species.data();
    let scaling = *sim.config.scaling();
    let hellfire = sim.config.hellfire;
    let multiplayer = sim.config.multiplayer;
    let rng = &mut sim.rng;

    let m = &mut sim.monsters[id];
    *m = super::Monster {
        id,
        type_index,
        species,
        tile,
        future: tile,
        old: tile,
        direction,
        ..super::Monster::default()
    };

    new_monster_anim(m, MonsterGraphic::Stand, direction);
    m.anim.tick = rng.generate(m.anim.rate - 1);
    m.anim.frame = rng.generate(m.anim.frames - 1);

    m.level = data.level;
    let mut max_hp = rng.range_inclusive(data.min_hp, data.max_hp);
    if species == Species::Diablo && !hellfire {
        max_hp /= 2;
        m.level -= 15;
    }
    m.max_hit_points = max_hp << HP_SHIFT;
    if !multiplayer {
        m.max_hit_points = (m.max_hit_points / 2).max(HP_UNIT);
    }
    m.hit_points = m.max_hit_points;

    m.ai = data.ai;
    m.intelligence = data.intelligence;
    m.loot_seed = rng.advance() as u32;
    m.ai_seed = rng.advance() as u32;
    m.exp = data.exp;
    m.to_hit = data.to_hit;
    m.min_damage = data.min_damage;
    m.max_damage = data.max_damage;
    m.to_hit_special = data.to_hit_special;
    m.min_damage_special = data.min_damage_special;
    m.max_damage_special = data.max_damage_special;
    m.armor_class = data.armor_class;
    m.resistances = data.resistances;
    m.flags = data.flags;

    if m.ai == AiKind::Gargoyle {
        // perched: folded up on the special sheet until something disturbs it
        m.anim.graphic = MonsterGraphic::Special;
        let special = data.anim(MonsterGraphic::Special);
        m.anim.frames = special.frames.max(1);
        m.anim.rate = special.rate.max(1);
        m.anim.frame = 0;
        m.flags.insert(MonsterFlags::ALLOW_SPECIAL);
        m.mode = Mode::SpecialMeleeAttack;
    }

    if sim.config.difficulty != Difficulty::Normal {
        m.max_hit_points = scaling.max_hit_points(m.max_hit_points, hellfire, multiplayer);
        m.hit_points = m.max_hit_points;
        m.level += scaling.level_bonus;
        m.exp = scaling.experience(m.exp);
        m.to_hit += scaling.to_hit_bonus;
        m.min_damage = scaling.damage(m.min_damage);
        m.max_damage = scaling.damage(m.max_damage);
        m.to_hit_special += scaling.to_hit_bonus;
        m.min_damage_special = scaling.damage(m.min_damage_special);
        m.max_damage_special = scaling.damage(m.max_damage_special);
        m.armor_class += scaling.armor_bonus;
        if scaling.hell_resistances {
            m.resistances = data.resistances_hell;
        }
    }
}

/// Claim a slot and create a monster on `tile`. `None` when the monster
/// array is full.
///
/// With `in_map` unset the monster exists but does not occupy its tile,
/// which is how skeletons are prepared before a spawner releases them.
pub fn add_monster(
    sim: &mut Simulation,
    tile: Point,
    direction: Direction,
    type_index: usize,
    in_map: bool,
) -> Option<MonsterId> {
    let id = sim.monsters.claim_slot()?;
    if in_map {
        sim.level.set_monster(tile, MonsterCell::Standing(id));
    }
    init_monster(sim, id, direction, type_index, tile);
    let species = sim.monsters[id].species;
    debug!(%id, ?species, %tile, in_map, "monster added");
    if in_map {
        sim.emit(SimEvent::MonsterSpawned { id, species, tile });
    }
    Some(id)
}

/// A random scatter or pack position may hold a new monster
pub fn can_place_monster(level: &Level, p: Point) -> bool {
    p.in_bounds()
        && level.monster_cell(p).is_empty()
        && level.player_at(p).is_none()
        && !level.is_visible(p)
        && !level.is_set_piece(p)
        && !level.is_tile_occupied(p)
}

/// Claim a slot for level population, facing a random way
fn place_monster(sim: &mut Simulation, type_index: usize, tile: Point) -> Option<MonsterId> {
    let id = sim.monsters.claim_slot()?;
    sim.level.set_monster(tile, MonsterCell::Standing(id));
    let direction = Direction::from_index(sim.rng.generate(8));
    init_monster(sim, id, direction, type_index, tile);
    Some(id)
}

/// Undo the most recent placement
fn unplace_last(sim: &mut Simulation) {
    let last = sim.monsters.active_count() - 1;
    let id = sim.monsters.active_ids()[last];
    let tile = sim.monsters[id].tile;
    sim.level.clear_monster(tile);
    sim.monsters.release_slot(last);
}

fn random_point(sim: &mut Simulation) -> Point {
    let x = sim.rng.generate(RANDOM_SPAN) + RANDOM_ORIGIN;
    let y = sim.rng.generate(RANDOM_SPAN) + RANDOM_ORIGIN;
    Point::new(x, y)
}

/// Stand a freshly placed pack member up, unless it is a perched gargoyle
fn reset_to_stand(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    if m.ai == AiKind::Gargoyle {
        return;
    }
    let stand = m.data().anim(MonsterGraphic::Stand);
    m.anim.graphic = MonsterGraphic::Stand;
    m.anim.frames = stand.frames.max(1);
    m.anim.rate = stand.rate.max(1);
    m.anim.frame = sim.rng.generate(m.anim.frames - 1);
    m.flags.remove(MonsterFlags::ALLOW_SPECIAL);
    m.mode = Mode::default();
}

// ============================================================================
// Groups
// ============================================================================

/// Place up to `count` monsters of `type_index` in one room.
///
/// Without a pack the group gathers around a random anchor. With a pack
/// the anchor is next to `leader`; pack minions get double hit points and
/// the leader's intelligence, and leashed ones also take its AI and stay
/// within a few tiles of the anchor. Returns how many were placed.
pub fn place_group(
    sim: &mut Simulation,
    type_index: usize,
    count: usize,
    pack: UniqueMonsterPack,
    leader: Option<MonsterId>,
) -> usize {
    let count = count.min(MAX_MONSTERS - sim.monsters.active_count());
    let leader = leader.filter(|_| pack != UniqueMonsterPack::None);
    let mut placed = 0;

    for _ in 0..GROUP_ATTEMPTS {
        while placed != 0 {
            unplace_last(sim);
            placed -= 1;
        }

        let anchor = match leader {
            Some(leader) => {
                let dir = Direction::from_index(sim.rng.generate(8));
                sim.monsters[leader].tile + dir
            }
            None => {
                let mut found = None;
                for _ in 0..ANCHOR_TRIES {
                    let p = random_point(sim);
                    if can_place_monster(&sim.level, p) {
                        found = Some(p);
                        break;
                    }
                }
                match found {
                    Some(p) => p,
                    None => continue,
                }
            }
        };

        let mut p = anchor;
        let mut misses = 0;
        while placed < count && misses < GROUP_STEPS {
            let fits = can_place_monster(&sim.level, p)
                && sim.level.room(p) == sim.level.room(anchor)
                && !(pack == UniqueMonsterPack::Leashed
                    && ((p.x - anchor.x).abs() >= LEASH_SPREAD
                        || (p.y - anchor.y).abs() >= LEASH_SPREAD));
            if fits {
                if let Some(id) = place_monster(sim, type_index, p) {
                    placed += 1;
                    if let Some(leader) = leader {
                        join_pack(sim, id, leader, pack);
                    }
                } else {
                    misses = GROUP_STEPS;
                }
            } else {
                misses += 1;
            }
            p.x += Direction::from_index(sim.rng.generate(8)).displacement().dx;
            p.y += Direction::from_index(sim.rng.generate(8)).displacement().dy;
        }

        if placed >= count {
            break;
        }
    }

    if let (Some(leader), UniqueMonsterPack::Leashed) = (leader, pack) {
        sim.monsters[leader].pack_size = placed as i32;
    }
    debug!(
        species = ?sim.monsters.level_type(type_index).species,
        placed,
        wanted = count,
        "group placed"
    );
    placed
}

fn join_pack(sim: &mut Simulation, id: MonsterId, leader: MonsterId, pack: UniqueMonsterPack) {
    let (intelligence, ai) = {
        let l = &sim.monsters[leader];
        (l.intelligence, l.ai)
    };
    let m = &mut sim.monsters[id];
    m.max_hit_points *= 2;
    m.hit_points = m.max_hit_points;
    m.intelligence = intelligence;
    if pack == UniqueMonsterPack::Leashed {
        m.leader = LeaderRelation::Leashed(leader);
        m.ai = ai;
    }
    reset_to_stand(sim, id);
}

// ============================================================================
// Uniques
// ============================================================================

/// Quest that must exist in this game for a unique to appear
fn gating_quest(unique: UniqueMonster) -> Option<QuestId> {
    match unique {
        UniqueMonster::Gharbad => Some(QuestId::Garbud),
        UniqueMonster::Zhar => Some(QuestId::Zhar),
        UniqueMonster::Snotspil => Some(QuestId::Banner),
        UniqueMonster::Lachdanan => Some(QuestId::Veil),
        UniqueMonster::Warlord => Some(QuestId::Warlord),
        _ => None,
    }
}

/// Turn the freshly placed `id` into `unique` and place its pack.
///
/// Stats the unique names replace the rolled species stats; the difficulty
/// table is then applied again on top.
pub fn prepare_unique(
    sim: &mut Simulation,
    id: MonsterId,
    unique: UniqueMonster,
    minion_type: usize,
    pack_size: i32,
) {
    let u = unique.data();
    let scaling = *sim.config.scaling();
    let difficulty = sim.config.difficulty;
    let multiplayer = sim.config.multiplayer;
    let hellfire = sim.config.hellfire;
    let betrayer_var1 = sim.quests[QuestId::Betrayer].var1;

    let m = &mut sim.monsters[id];
    m.unique = Some(unique);
    m.level = if u.level != 0 {
        2 * u.level
    } else {
        m.data().level + 5
    };
    m.exp *= 2;
    m.max_hit_points = u.max_hp << HP_SHIFT;
    if !multiplayer {
        m.max_hit_points = (m.max_hit_points / 2).max(HP_UNIT);
    }
    m.hit_points = m.max_hit_points;
    m.ai = u.ai;
    m.intelligence = u.intelligence;
    m.min_damage = u.min_damage;
    m.max_damage = u.max_damage;
    m.min_damage_special = u.min_damage;
    m.max_damage_special = u.max_damage;
    m.resistances = u.resistances;
    m.talk = u.talk;

    if multiplayer && m.ai == AiKind::LazarusMinion {
        m.talk = None;
    }
    if multiplayer && m.ai == AiKind::Lazarus && betrayer_var1 > 3 {
        m.goal = Goal::Normal;
    } else if m.talk.is_some() {
        m.goal = Goal::Inquiring;
    }

    if difficulty != Difficulty::Normal {
        m.max_hit_points = scaling.max_hit_points(m.max_hit_points, hellfire, multiplayer);
        m.hit_points = m.max_hit_points;
        m.level += scaling.level_bonus;
        m.exp = scaling.experience(m.exp);
        m.min_damage = scaling.damage(m.min_damage);
        m.max_damage = scaling.damage(m.max_damage);
        m.min_damage_special = scaling.damage(m.min_damage_special);
        m.max_damage_special = scaling.damage(m.max_damage_special);
    }
    if u.custom_to_hit != 0 {
        m.to_hit = u.custom_to_hit + scaling.to_hit_bonus;
        m.to_hit_special = u.custom_to_hit + scaling.to_hit_bonus;
    }
    if u.custom_armor_class != 0 {
        m.armor_class = u.custom_armor_class + scaling.armor_bonus;
    }

    debug!(%id, ?unique, level = m.level, hp = m.max_hit_points >> HP_SHIFT, "unique prepared");

    if u.pack != UniqueMonsterPack::None {
        place_group(sim, minion_type, pack_size.max(0) as usize, u.pack, Some(id));
    }
    reset_to_stand(sim, id);
}

/// Find a spot for `unique` and create it there.
///
/// `position` pins the unique to a scripted tile (altars, set pieces);
/// otherwise a random tile with an open area around it is used. The unique's
/// species must already be loaded.
pub fn place_unique(
    sim: &mut Simulation,
    unique: UniqueMonster,
    minion_type: usize,
    pack_size: i32,
    position: Option<Point>,
) -> Result<MonsterId, SpawnError> {
    let species = unique.data().species;
    let type_index = sim
        .monsters
        .type_index(species)
        .ok_or(SpawnError::SpeciesNotLoaded(species))?;

    let tile = match position {
        Some(p) => p,
        None => find_unique_spot(sim).ok_or(SpawnError::UniqueNotPlaceable(unique))?,
    };
    if !tile.in_bounds() {
        return Err(SpawnError::UniqueNotPlaceable(unique));
    }

    let id = place_monster(sim, type_index, tile).ok_or(SpawnError::MonstersFull)?;
    prepare_unique(sim, id, unique, minion_type, pack_size);
    Ok(id)
}

/// Random placeable tile, preferring ones with room for a pack around them
fn find_unique_spot(sim: &mut Simulation) -> Option<Point> {
    let mut crowded = 0;
    for _ in 0..UNIQUE_AREA_TRIES * 2 {
        let p = random_point(sim);
        if crowded < UNIQUE_AREA_TRIES {
            let mut free = 0;
            for x in p.x - 3..p.x + 3 {
                for y in p.y - 3..p.y + 3 {
                    if can_place_monster(&sim.level, Point::new(x, y)) {
                        free += 1;
                    }
                }
            }
            if free < UNIQUE_AREA_MIN {
                crowded += 1;
                if crowded < UNIQUE_AREA_TRIES {
                    continue;
                }
            }
        }
        if can_place_monster(&sim.level, p) {
            return Some(p);
        }
    }
    None
}

/// Place every unique that haunts this depth and whose species is loaded
pub fn place_unique_monsters(sim: &mut Simulation) -> Result<(), SpawnError> {
    use strum::IntoEnumIterator;

    let depth = i32::from(sim.level.depth);
    for unique in UniqueMonster::iter() {
        let u = unique.data();
        if u.level != depth {
            continue;
        }
        let Some(type_index) = sim.monsters.type_index(u.species) else {
            continue;
        };
        if gating_quest(unique)
            .is_some_and(|q| sim.quests[q].status == QuestStatus::NotAvailable)
        {
            continue;
        }
        place_unique(sim, unique, type_index, UNIQUE_PACK_SIZE, None)?;
    }
    Ok(())
}

/// Quest bosses that do not haunt a fixed depth: the Butcher, the
/// multiplayer Skeleton King and the Betrayer trio
pub fn place_quest_monsters(sim: &mut Simulation) -> Result<(), SpawnError> {
    let depth = sim.level.depth;

    if sim.quests.is_available_on(QuestId::Butcher, depth) {
        place_unique(sim, UniqueMonster::Butcher, 0, 0, None)?;
    }

    if sim.config.multiplayer && depth == QuestId::SkeletonKing.level() {
        let skeletons = sim
            .monsters
            .types()
            .iter()
            .position(|t| t.species.is_skeleton());
        if let Some(minion_type) = skeletons {
            place_unique(
                sim,
                UniqueMonster::SkeletonKing,
                minion_type,
                SKELETON_KING_PACK_SIZE,
                None,
            )?;
        }
    }

    if sim.quests.is_available_on(QuestId::Warlord, depth) {
        sim.monsters
            .add_type(UniqueMonster::Warlord.data().species, Placement::SCATTER)?;
    }
    if sim.quests.is_available_on(QuestId::Veil, depth) {
        sim.monsters
            .add_type(UniqueMonster::Lachdanan.data().species, Placement::SCATTER)?;
    }

    if sim.config.multiplayer && depth == QuestId::Betrayer.level() {
        sim.monsters
            .add_type(UniqueMonster::Lazarus.data().species, Placement::UNIQUE)?;
        sim.monsters
            .add_type(UniqueMonster::RedVex.data().species, Placement::UNIQUE)?;
        for unique in [
            UniqueMonster::Lazarus,
            UniqueMonster::RedVex,
            UniqueMonster::BlackJade,
        ] {
            place_unique(sim, unique, 0, 0, None)?;
        }
    }
    Ok(())
}

// ============================================================================
// Level population
// ============================================================================

/// Fill the level's type table: golems, the fixed types of special depths,
/// quest monsters, then random species suited to the depth
pub fn choose_level_types(sim: &mut Simulation) -> Result<(), SpawnError> {
    let depth = sim.level.depth;
    sim.monsters.add_type(Species::Golem, Placement::SPECIAL)?;

    if depth == QuestId::Diablo.level() {
        sim.monsters.add_type(Species::Advocate, Placement::SCATTER)?;
        sim.monsters.add_type(Species::BloodKnight, Placement::SCATTER)?;
        sim.monsters.add_type(Species::Diablo, Placement::SPECIAL)?;
        return Ok(());
    }
    match depth {
        18 => {
            sim.monsters.add_type(Species::HorkSpawn, Placement::SCATTER)?;
        }
        19 => {
            sim.monsters.add_type(Species::HorkSpawn, Placement::SCATTER)?;
            sim.monsters.add_type(Species::HorkDemon, Placement::UNIQUE)?;
        }
        24 => {
            sim.monsters.add_type(Species::ArchLich, Placement::SCATTER)?;
        }
        _ => {}
    }

    if sim.level.is_set_level {
        return Ok(());
    }

    if sim.quests.is_available_on(QuestId::Butcher, depth) {
        sim.monsters.add_type(Species::Butcher, Placement::SPECIAL)?;
    }
    for unique in [
        UniqueMonster::Gharbad,
        UniqueMonster::Zhar,
        UniqueMonster::Snotspil,
        UniqueMonster::Lachdanan,
        UniqueMonster::Warlord,
    ] {
        let available = gating_quest(unique).is_some_and(|q| sim.quests.is_available_on(q, depth));
        if available {
            sim.monsters.add_type(unique.data().species, Placement::UNIQUE)?;
        }
    }

    let hellfire = sim.config.hellfire;
    if sim.config.multiplayer && depth == QuestId::SkeletonKing.level() {
        sim.monsters.add_type(Species::SkeletonKing, Placement::UNIQUE)?;
        let skeletons: Vec<Species> = Species::for_level(depth, hellfire)
            .filter(|s| s.is_skeleton())
            .collect();
        if !skeletons.is_empty() {
            let pick = sim.rng.generate(skeletons.len() as i32) as usize;
            sim.monsters.add_type(skeletons[pick], Placement::SCATTER)?;
        }
    }

    let mut candidates: Vec<Species> = Species::for_level(depth, hellfire).collect();
    while !candidates.is_empty() && sim.monsters.types().len() < MAX_LVL_MTYPES {
        let pick = sim.rng.generate(candidates.len() as i32) as usize;
        let species = candidates.swap_remove(pick);
        sim.monsters.add_type(species, Placement::SCATTER)?;
    }
    debug!(depth, types = sim.monsters.types().len(), "level types chosen");
    Ok(())
}

/// Scatter random groups of the level's scatter types until the level holds
/// one monster per thirty floor tiles (half again in multiplayer)
pub fn populate_level(sim: &mut Simulation) {
    if sim.level.is_set_level {
        return;
    }
    let mut floor = 0;
    for x in RANDOM_ORIGIN..RANDOM_ORIGIN + RANDOM_SPAN {
        for y in RANDOM_ORIGIN..RANDOM_ORIGIN + RANDOM_SPAN {
            if !sim.level.is_solid(Point::new(x, y)) {
                floor += 1;
            }
        }
    }
    let mut wanted = (floor / TILES_PER_MONSTER) as usize;
    if sim.config.multiplayer {
        wanted += wanted / 2;
    }
    let active = sim.monsters.active_count();
    let wanted = wanted.min((MAX_MONSTERS - RESERVED_SLOTS).saturating_sub(active));
    let total = active + wanted;

    let scatter: Vec<usize> = sim
        .monsters
        .types()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.placement.contains(Placement::SCATTER))
        .map(|(i, _)| i)
        .collect();
    if scatter.is_empty() {
        return;
    }

    let depth = sim.level.depth;
    while sim.monsters.active_count() < total {
        let type_index = scatter[sim.rng.generate(scatter.len() as i32) as usize];
        let size = if depth == 1 || sim.rng.generate(2) == 0 {
            1
        } else if depth == 2 {
            sim.rng.generate(2) + 2
        } else {
            sim.rng.generate(3) + 3
        };
        let size = (size as usize).min(total - sim.monsters.active_count());
        if place_group(sim, type_index, size, UniqueMonsterPack::None, None) == 0 {
            warn!(
                placed = sim.monsters.active_count() - active,
                wanted, "no room left for scatter groups"
            );
            break;
        }
    }
}

// ============================================================================
// Golems
// ============================================================================

/// Load the golem type and reset every golem slot to a parked golem
pub fn init_golems(sim: &mut Simulation) -> Result<(), SpawnError> {
    let type_index = sim.monsters.add_type(Species::Golem, Placement::SPECIAL)?;
    let holding = Point::from(GOLEM_HOLDING_CELL);
    for player in PlayerId::all() {
        init_monster(
            sim,
            MonsterId::golem_of(player),
            Direction::South,
            type_index,
            holding,
        );
    }
    Ok(())
}

/// Summon `player`'s golem onto `tile`, scaled by the spell level and the
/// caster's mana and character level
pub fn spawn_golem(
    sim: &mut Simulation,
    player: PlayerId,
    tile: Point,
    spell_level: i32,
) -> Result<MonsterId, SpawnError> {
    if player.index() >= MAX_PLRS {
        return Err(SpawnError::NoGolemSlot(player));
    }
    let (max_mana, char_level) = {
        let p = &sim.players[player.index()];
        (p.max_mana, p.level)
    };
    let id = MonsterId::golem_of(player);
    sim.level.set_monster(tile, MonsterCell::Standing(id));

    let g = &mut sim.monsters[id];
    g.tile = tile;
    g.future = tile;
    g.old = tile;
    g.path_count = 0;
    g.delete_pending = false;
    g.goal = Goal::Normal;
    g.max_hit_points = 2 * (320 * spell_level + max_mana / 3);
    g.hit_points = g.max_hit_points;
    g.armor_class = 25;
    g.to_hit = 5 * (spell_level + 8) + 2 * char_level;
    g.min_damage = 2 * (spell_level + 4);
    g.max_damage = 2 * (spell_level + 8);
    g.flags.insert(MonsterFlags::GOLEM);
    start_special_stand(g, Direction::South);
    update_enemy(sim, id);

    debug!(%id, %player, %tile, spell_level, "golem summoned");
    sim.emit(SimEvent::MonsterSpawned {
        id,
        species: Species::Golem,
        tile,
    });
    Ok(id)
}

// ============================================================================
// Raised monsters
// ============================================================================

/// Create a monster of a random skeleton type loaded on this level
pub fn add_skeleton(
    sim: &mut Simulation,
    tile: Point,
    direction: Direction,
    in_map: bool,
) -> Option<MonsterId> {
    let skeletons: Vec<usize> = sim
        .monsters
        .types()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.species.is_skeleton())
        .map(|(i, _)| i)
        .collect();
    if skeletons.is_empty() {
        return None;
    }
    let pick = skeletons[sim.rng.generate(skeletons.len() as i32) as usize];
    add_monster(sim, tile, direction, pick, in_map)
}

/// A skeleton rises on `tile`, facing `direction`
pub fn spawn_skeleton(sim: &mut Simulation, tile: Point, direction: Direction) -> Option<MonsterId> {
    let id = add_skeleton(sim, tile, direction, true)?;
    start_special_stand(&mut sim.monsters[id], direction);
    Some(id)
}

/// Create a skeleton off the map, ready for [`spawn_skeleton_near`]
pub fn pre_spawn_skeleton(sim: &mut Simulation) -> Option<MonsterId> {
    let id = add_skeleton(sim, Point::default(), Direction::South, false)?;
    start_stand(sim, id, Direction::South);
    Some(id)
}

/// Put an existing off-map monster onto `tile` and play its rising animation
pub fn activate_spawn(sim: &mut Simulation, id: MonsterId, tile: Point, direction: Direction) {
    sim.level.set_monster(tile, MonsterCell::Standing(id));
    let m = &mut sim.monsters[id];
    m.tile = tile;
    m.future = tile;
    m.old = tile;
    start_special_stand(m, direction);
    let species = m.species;
    sim.emit(SimEvent::MonsterSpawned { id, species, tile });
}

/// Release a pre-spawned skeleton on `tile`, or on a random free tile of
/// the 3x3 block around it. False when nothing there is free.
pub fn spawn_skeleton_near(sim: &mut Simulation, id: Option<MonsterId>, tile: Point) -> bool {
    let Some(id) = id else {
        return false;
    };
    if sim.level.is_tile_available(tile) {
        activate_spawn(sim, id, tile, Direction::South);
        return true;
    }

    let mut free = Vec::with_capacity(9);
    for y in tile.y - 1..=tile.y + 1 {
        for x in tile.x - 1..=tile.x + 1 {
            let p = Point::new(x, y);
            if sim.level.is_tile_available(p) {
                free.push(p);
            }
        }
    }
    if free.is_empty() {
        return false;
    }
    let pick = sim.rng.generate(15) as usize % free.len();
    let spawn = free[pick];
    activate_spawn(sim, id, spawn, spawn.direction_to(tile));
    true
}

/// Copy `id` onto the last free tile around it
pub fn add_doppelganger(sim: &mut Simulation, id: MonsterId) -> Option<MonsterId> {
    let m = &sim.monsters[id];
    let (tile, direction, species) = (m.tile, m.direction, m.species);
    let target = Direction::ALL
        .iter()
        .map(|&d| tile + d)
        .filter(|&p| sim.level.is_tile_available(p))
        .last()?;
    let type_index = sim.monsters.type_index(species)?;
    add_monster(sim, target, direction, type_index, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::monster::ModeKind;
    use crate::world::{Player, Quests};

    fn sim_with(config: SimConfig) -> Simulation {
        let mut level = Level::new(config.dungeon_level);
        level.carve_room(Point::new(16, 16), 40, 40, 1);
        Simulation::new(config, level)
    }

    fn sim() -> Simulation {
        sim_with(SimConfig::default())
    }

    fn load(sim: &mut Simulation, species: Species) -> usize {
        sim.monsters.add_type(species, Placement::SCATTER).unwrap()
    }

    #[test]
    fn test_init_monster_rolls_species_stats() {
        let mut sim = sim();
        let t = load(&mut sim, Species::Zombie);
        let id = add_monster(&mut sim, Point::new(20, 20), Direction::East, t, true).unwrap();
        let m = &sim.monsters[id];
        // 4..=7 hp halved for single player
        assert!((2 * HP_UNIT..=3 * HP_UNIT + HP_UNIT / 2).contains(&m.max_hit_points));
        assert_eq!(m.hit_points, m.max_hit_points);
        assert_eq!(m.level, 1);
        assert_eq!(m.ai, AiKind::Zombie);
        assert_eq!(m.goal, Goal::Normal);
        assert_eq!(m.squelch, 0);
        assert_eq!(m.direction, Direction::East);
        assert_eq!(m.mode.kind(), ModeKind::Stand);
        assert_eq!(
            sim.level.monster_cell(Point::new(20, 20)),
            MonsterCell::Standing(id)
        );
        assert!(matches!(
            sim.events().last(),
            Some(SimEvent::MonsterSpawned { .. })
        ));
    }

    #[test]
    fn test_nightmare_scaling_applies_once() {
        let mut sim = sim_with(SimConfig {
            difficulty: Difficulty::Nightmare,
            ..SimConfig::default()
        });
        let t = load(&mut sim, Species::Zombie);
        let id = add_monster(&mut sim, Point::new(20, 20), Direction::South, t, true).unwrap();
        let m = &sim.monsters[id];
        assert_eq!(m.level, 16);
        assert_eq!(m.exp, 2 * (54 + 1000));
        assert_eq!(m.min_damage, 2 * (2 + 2));
        assert_eq!(m.max_damage, 2 * (5 + 2));
        assert_eq!(m.armor_class, 5 + 50);
        assert_eq!(m.to_hit, 10 + 85);
    }

    #[test]
    fn test_gargoyles_spawn_perched() {
        let mut sim = sim();
        let t = load(&mut sim, Species::Gargoyle);
        let id = add_monster(&mut sim, Point::new(20, 20), Direction::South, t, true).unwrap();
        let m = &sim.monsters[id];
        assert_eq!(m.mode, Mode::SpecialMeleeAttack);
        assert!(m.flags.contains(MonsterFlags::ALLOW_SPECIAL));
        assert_eq!(m.anim.graphic, MonsterGraphic::Special);
    }

    #[test]
    fn test_placement_rules() {
        let mut sim = sim();
        let p = Point::new(20, 20);
        assert!(can_place_monster(&sim.level, p));
        sim.level.set_visible(p, true);
        assert!(!can_place_monster(&sim.level, p));
        sim.level.set_visible(p, false);
        sim.add_player(PlayerId(0), Player::new("hero", p));
        assert!(!can_place_monster(&sim.level, p));
        assert!(!can_place_monster(&sim.level, Point::new(5, 5)));
        assert!(!can_place_monster(&sim.level, Point::new(-1, 20)));
    }

    #[test]
    fn test_group_stays_in_one_room() {
        let mut level = Level::new(3);
        level.carve_room(Point::new(16, 16), 12, 12, 1);
        level.carve_room(Point::new(29, 16), 12, 12, 2);
        let mut sim = Simulation::new(SimConfig::default(), level);
        let t = load(&mut sim, Species::FallenSpear);
        let placed = place_group(&mut sim, t, 5, UniqueMonsterPack::None, None);
        assert_eq!(placed, 5);
        let rooms: Vec<u8> = sim
            .monsters
            .iter_active()
            .filter(|m| !m.is_golem())
            .map(|m| sim.level.room(m.tile))
            .collect();
        assert_eq!(rooms.len(), 5);
        assert!(rooms.iter().all(|&r| r == rooms[0]));
    }

    #[test]
    fn test_unique_with_leashed_pack() {
        let mut sim = sim_with(SimConfig {
            dungeon_level: 2,
            ..SimConfig::default()
        });
        let t = load(&mut sim, Species::CorpseAxe);
        let boss = place_unique(&mut sim, UniqueMonster::Bonehead, t, 8, None).unwrap();
        let b = &sim.monsters[boss];
        assert_eq!(b.unique, Some(UniqueMonster::Bonehead));
        assert_eq!(b.level, 4);
        assert_eq!(b.max_hit_points, (91 << HP_SHIFT) / 2);
        assert_eq!(b.to_hit, 100);
        assert_eq!(b.armor_class, 50);
        assert_eq!(b.mode.kind(), ModeKind::Stand);

        let minions: Vec<_> = sim
            .monsters
            .iter_active()
            .filter(|m| m.leader == LeaderRelation::Leashed(boss))
            .collect();
        assert_eq!(minions.len() as i32, b.pack_size);
        assert!(!minions.is_empty());
        for m in minions {
            assert_eq!(m.ai, b.ai);
            assert_eq!(m.intelligence, b.intelligence);
            assert!(m.tile.walking_distance(b.tile) <= LEASH_SPREAD + 1);
        }
    }

    #[test]
    fn test_talker_starts_inquiring() {
        let mut sim = sim_with(SimConfig {
            dungeon_level: 4,
            ..SimConfig::default()
        });
        sim.quests = Quests::all_initialised();
        let t = load(&mut sim, Species::FleshClan);
        let id = place_unique(&mut sim, UniqueMonster::Gharbad, t, 0, None).unwrap();
        assert_eq!(sim.monsters[id].goal, Goal::Inquiring);
        assert!(sim.monsters[id].talk.is_some());
    }

    #[test]
    fn test_unique_needs_loaded_species() {
        let mut sim = sim();
        assert_eq!(
            place_unique(&mut sim, UniqueMonster::Butcher, 0, 0, None),
            Err(SpawnError::SpeciesNotLoaded(Species::Butcher))
        );
    }

    #[test]
    fn test_butcher_level_population() {
        let mut sim = sim_with(SimConfig {
            dungeon_level: 2,
            ..SimConfig::default()
        });
        sim.quests = Quests::all_initialised();
        sim.init_monsters().unwrap();
        let butchers = sim
            .monsters
            .iter_active()
            .filter(|m| m.unique == Some(UniqueMonster::Butcher))
            .count();
        assert_eq!(butchers, 1);
        assert!(sim.monsters.active_count() > MAX_PLRS + 1);
        for m in sim.monsters.iter_active().skip(MAX_PLRS) {
            assert_eq!(sim.level.monster_cell(m.tile), MonsterCell::Standing(m.id));
        }
    }

    #[test]
    fn test_golem_summon() {
        let mut sim = sim();
        init_golems(&mut sim).unwrap();
        let mut caster = Player::new("mage", Point::new(30, 30));
        caster.max_mana = 90 * HP_UNIT;
        caster.level = 10;
        sim.add_player(PlayerId(1), caster);
        let id = spawn_golem(&mut sim, PlayerId(1), Point::new(31, 30), 2).unwrap();
        assert_eq!(id, MonsterId(1));
        let g = &sim.monsters[id];
        assert_eq!(g.max_hit_points, 2 * (640 + 30 * HP_UNIT));
        assert_eq!(g.to_hit, 5 * 10 + 20);
        assert_eq!((g.min_damage, g.max_damage), (12, 20));
        assert_eq!(g.mode, Mode::SpecialStand);
        assert!(!g.is_parked());
        assert_eq!(
            spawn_golem(&mut sim, PlayerId(7), Point::new(31, 31), 1),
            Err(SpawnError::NoGolemSlot(PlayerId(7)))
        );
    }

    #[test]
    fn test_skeletons_need_a_skeleton_type() {
        let mut sim = sim();
        load(&mut sim, Species::Zombie);
        assert_eq!(add_skeleton(&mut sim, Point::new(20, 20), Direction::South, true), None);
        load(&mut sim, Species::Skeleton);
        let id = spawn_skeleton(&mut sim, Point::new(20, 20), Direction::West).unwrap();
        assert_eq!(sim.monsters[id].species, Species::Skeleton);
        assert_eq!(sim.monsters[id].mode, Mode::SpecialStand);
    }

    #[test]
    fn test_pre_spawned_skeleton_finds_free_neighbour() {
        let mut sim = sim();
        load(&mut sim, Species::Skeleton);
        let skel = pre_spawn_skeleton(&mut sim);
        assert!(skel.is_some());
        let target = Point::new(20, 20);
        sim.add_player(PlayerId(0), Player::new("hero", target));
        assert!(spawn_skeleton_near(&mut sim, skel, target));
        let m = &sim.monsters[skel.unwrap()];
        assert_eq!(m.tile.walking_distance(target), 1);
        assert_eq!(sim.level.monster_cell(m.tile), MonsterCell::Standing(m.id));
        assert!(!spawn_skeleton_near(&mut sim, None, target));
    }

    #[test]
    fn test_doppelganger_takes_a_neighbour() {
        let mut sim = sim();
        let t = load(&mut sim, Species::Zombie);
        let id = add_monster(&mut sim, Point::new(20, 20), Direction::South, t, true).unwrap();
        let copy = add_doppelganger(&mut sim, id).unwrap();
        assert_eq!(sim.monsters[copy].species, Species::Zombie);
        assert_eq!(sim.monsters[copy].tile.walking_distance(Point::new(20, 20)), 1);
    }
}
