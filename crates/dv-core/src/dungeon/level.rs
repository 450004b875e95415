//! Per-level tile state and the occupancy index.
//!
//! Every grid here is dense over the full dungeon so lookups are O(1). The
//! monster grid distinguishes a settled occupant from one that is mid-walk;
//! see [`MonsterCell`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::{Direction, Grid, Point};
use crate::monster::MonsterId;
use crate::world::PlayerId;

bitflags! {
    /// Static tile properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TileFlags: u8 {
        /// Wall or rock, never walkable
        const SOLID = 0x01;
        /// Stops missiles and line of fire
        const BLOCK_MISSILE = 0x02;
        /// A door sits on this tile
        const DOOR = 0x04;
        /// The door on this tile is open
        const DOOR_OPEN = 0x08;
        /// A solid object (barrel, sarcophagus) blocks the tile
        const OBJECT = 0x10;
        /// Part of a quest set piece; random placement avoids it
        const SET_PIECE = 0x20;
    }
}

bitflags! {
    /// Lingering missiles that monsters refuse to step into
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HazardFlags: u8 {
        const FIRE_WALL = 0x01;
        const LIGHTNING_WALL = 0x02;
        const ACID_PUDDLE = 0x04;
    }
}

/// Monster occupancy of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonsterCell {
    #[default]
    Empty,
    /// The monster stands here, or has claimed this tile as a walk destination
    Standing(MonsterId),
    /// The monster is walking away from (or sideways through) this tile
    Walking(MonsterId),
}

impl MonsterCell {
    pub fn id(self) -> Option<MonsterId> {
        match self {
            MonsterCell::Empty => None,
            MonsterCell::Standing(id) | MonsterCell::Walking(id) => Some(id),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, MonsterCell::Empty)
    }

    pub fn is_standing(self) -> bool {
        matches!(self, MonsterCell::Standing(_))
    }
}

/// Anything that can stand on a tile and be targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Player(PlayerId),
    Monster { id: MonsterId, walking: bool },
}

/// A corpse left on the floor, eaten by scavengers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corpse {
    /// Species table index of the dead monster
    pub kind: u8,
    pub direction: Direction,
}

/// The live state of one dungeon level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Dungeon depth (1..=16 in the base game, deeper in the expansion)
    pub depth: u8,
    /// Set when the level is a quest set level rather than a generated one
    pub is_set_level: bool,
    tiles: Grid<TileFlags>,
    /// Region id; monsters only group up inside the same region
    rooms: Grid<u8>,
    monsters: Grid<MonsterCell>,
    players: Grid<Option<PlayerId>>,
    visible: Grid<bool>,
    light: Grid<u8>,
    corpses: Grid<Option<Corpse>>,
    hazards: Grid<HazardFlags>,
}

impl Level {
    /// Create a level that is solid rock everywhere
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            is_set_level: false,
            tiles: Grid::filled(TileFlags::SOLID | TileFlags::BLOCK_MISSILE),
            rooms: Grid::default(),
            monsters: Grid::default(),
            players: Grid::default(),
            visible: Grid::default(),
            light: Grid::filled(crate::LIGHTS_MAX),
            corpses: Grid::default(),
            hazards: Grid::default(),
        }
    }

    /// Carve an open floor rectangle and tag it with a region id
    pub fn carve_room(&mut self, top_left: Point, width: i32, height: i32, room: u8) {
        for x in top_left.x..top_left.x + width {
            for y in top_left.y..top_left.y + height {
                let p = Point::new(x, y);
                if p.in_bounds() {
                    self.tiles[p] = TileFlags::empty();
                    self.rooms[p] = room;
                }
            }
        }
    }

    /// Turn a tile into wall
    pub fn set_wall(&mut self, p: Point) {
        self.tiles[p] = TileFlags::SOLID | TileFlags::BLOCK_MISSILE;
    }

    /// Place a closed door
    pub fn add_door(&mut self, p: Point) {
        self.tiles[p] = TileFlags::DOOR | TileFlags::BLOCK_MISSILE;
    }

    /// Open a door; returns false when there is no closed door here
    pub fn open_door(&mut self, p: Point) -> bool {
        let flags = self.tiles[p];
        if !flags.contains(TileFlags::DOOR) || flags.contains(TileFlags::DOOR_OPEN) {
            return false;
        }
        self.tiles[p] = TileFlags::DOOR | TileFlags::DOOR_OPEN;
        true
    }

    pub fn is_closed_door(&self, p: Point) -> bool {
        self.tiles
            .get(p)
            .is_some_and(|f| f.contains(TileFlags::DOOR) && !f.contains(TileFlags::DOOR_OPEN))
    }

    pub fn set_tile_flags(&mut self, p: Point, flags: TileFlags) {
        self.tiles[p] = flags;
    }

    pub fn tile_flags(&self, p: Point) -> TileFlags {
        self.tiles.get(p).copied().unwrap_or(TileFlags::SOLID)
    }

    /// Walls count as solid; off-grid tiles are solid too
    pub fn is_solid(&self, p: Point) -> bool {
        self.tile_flags(p).contains(TileFlags::SOLID)
    }

    pub fn blocks_missile(&self, p: Point) -> bool {
        self.tile_flags(p).contains(TileFlags::BLOCK_MISSILE)
    }

    /// Solid terrain or a blocking object
    pub fn is_tile_occupied(&self, p: Point) -> bool {
        let flags = self.tile_flags(p);
        flags.intersects(TileFlags::SOLID | TileFlags::OBJECT)
    }

    /// Whether a walker may stand on the tile, ignoring creatures
    ///
    /// Closed doors block unless `ignore_doors` is set, which is how door
    /// openers plan paths through them.
    pub fn is_tile_walkable(&self, p: Point, ignore_doors: bool) -> bool {
        if !p.in_bounds() {
            return false;
        }
        let flags = self.tiles[p];
        if flags.intersects(TileFlags::SOLID | TileFlags::OBJECT) {
            return false;
        }
        if flags.contains(TileFlags::DOOR) && !flags.contains(TileFlags::DOOR_OPEN) {
            return ignore_doors;
        }
        true
    }

    pub fn is_set_piece(&self, p: Point) -> bool {
        self.tile_flags(p).contains(TileFlags::SET_PIECE)
    }

    pub fn room(&self, p: Point) -> u8 {
        self.rooms.get(p).copied().unwrap_or(0)
    }

    pub fn monster_cell(&self, p: Point) -> MonsterCell {
        self.monsters.get(p).copied().unwrap_or_default()
    }

    pub fn set_monster(&mut self, p: Point, cell: MonsterCell) {
        self.monsters[p] = cell;
    }

    pub fn clear_monster(&mut self, p: Point) {
        self.monsters[p] = MonsterCell::Empty;
    }

    /// Remove any reference to `id` in the 3x3 block around `around`
    pub fn clear_monster_squares(&mut self, id: MonsterId, around: Point) {
        for d in super::Direction::ALL {
            let p = around + d;
            if p.in_bounds() && self.monsters[p].id() == Some(id) {
                self.monsters[p] = MonsterCell::Empty;
            }
        }
        if around.in_bounds() && self.monsters[around].id() == Some(id) {
            self.monsters[around] = MonsterCell::Empty;
        }
    }

    pub fn player_at(&self, p: Point) -> Option<PlayerId> {
        self.players.get(p).copied().flatten()
    }

    pub fn set_player(&mut self, p: Point, player: Option<PlayerId>) {
        self.players[p] = player;
    }

    /// What stands on a tile, players first
    pub fn occupant_at(&self, p: Point) -> Option<Occupant> {
        if let Some(player) = self.player_at(p) {
            return Some(Occupant::Player(player));
        }
        match self.monster_cell(p) {
            MonsterCell::Empty => None,
            MonsterCell::Standing(id) => Some(Occupant::Monster { id, walking: false }),
            MonsterCell::Walking(id) => Some(Occupant::Monster { id, walking: true }),
        }
    }

    /// No creature and walkable terrain
    pub fn is_tile_available(&self, p: Point) -> bool {
        p.in_bounds()
            && self.player_at(p).is_none()
            && self.monster_cell(p).is_empty()
            && self.is_tile_walkable(p, false)
    }

    pub fn is_visible(&self, p: Point) -> bool {
        self.visible.get(p).copied().unwrap_or(false)
    }

    /// Written by the host's vision pass each frame
    pub fn set_visible(&mut self, p: Point, visible: bool) {
        self.visible[p] = visible;
    }

    pub fn clear_visibility(&mut self) {
        self.visible.fill(false);
    }

    pub fn light(&self, p: Point) -> u8 {
        self.light.get(p).copied().unwrap_or(crate::LIGHTS_MAX)
    }

    pub fn set_light(&mut self, p: Point, level: u8) {
        self.light[p] = level.min(crate::LIGHTS_MAX);
    }

    pub fn corpse(&self, p: Point) -> Option<Corpse> {
        self.corpses.get(p).copied().flatten()
    }

    pub fn add_corpse(&mut self, p: Point, corpse: Corpse) {
        self.corpses[p] = Some(corpse);
    }

    pub fn remove_corpse(&mut self, p: Point) -> Option<Corpse> {
        self.corpses[p].take()
    }

    pub fn hazards(&self, p: Point) -> HazardFlags {
        self.hazards.get(p).copied().unwrap_or_default()
    }

    pub fn add_hazard(&mut self, p: Point, hazard: HazardFlags) {
        self.hazards[p] |= hazard;
    }

    pub fn clear_hazard(&mut self, p: Point, hazard: HazardFlags) {
        self.hazards[p] -= hazard;
    }

    /// All tiles referencing a monster, for consistency checks
    pub fn monster_cells(&self) -> impl Iterator<Item = (Point, MonsterCell)> + '_ {
        self.monsters
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(p, c)| (p, *c))
    }
}
