//! Simulation state and the per-tick driver
//!
//! [`Simulation`] owns one level's worth of monster state plus the
//! collaborator views (players, quests, audio) the AI reads. The host
//! writes player positions and visibility before calling
//! [`Simulation::process_monsters`] and drains [`SimEvent`]s afterwards.

use dv_rng::SeededRng;
use tracing::{debug, info_span, trace};

use crate::combat::{ChargeFlight, advance_charges};
use crate::config::SimConfig;
use crate::dungeon::{Level, Point};
use crate::error::SpawnError;
use crate::monster::{
    self, KillCounts, MonsterFlags, MonsterId, MonsterRegistry, ai,
};
use crate::world::{
    AudioCues, EventSink, MonsterSound, Player, PlayerId, QuestId, Quests, Silence, SimEvent,
    Speech,
};
use crate::{HP_SHIFT, MAX_PLRS};

pub struct Simulation {
    pub config: SimConfig,
    pub level: Level,
    pub monsters: MonsterRegistry,
    /// One entry per player slot; inactive slots are ignored
    pub players: Vec<Player>,
    pub quests: Quests,
    /// Shared game stream; reseeded from each monster's AI seed before it acts
    pub rng: SeededRng,
    pub kills: KillCounts,
    pub tick: u64,
    /// The player whose client runs scripted conversations
    pub local_player: PlayerId,
    /// Monsters currently travelling as a charge
    pub charges: Vec<ChargeFlight>,
    events: Vec<SimEvent>,
    audio: Box<dyn AudioCues>,
}

impl core::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Simulation")
            .field("depth", &self.level.depth)
            .field("tick", &self.tick)
            .field("active_monsters", &self.monsters.active_count())
            .field("pending_events", &self.events.len())
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    pub fn new(config: SimConfig, level: Level) -> Self {
        let rng = SeededRng::new(config.seed);
        Self {
            config,
            level,
            monsters: MonsterRegistry::new(),
            players: vec![Player::default(); MAX_PLRS],
            quests: Quests::default(),
            rng,
            kills: KillCounts::default(),
            tick: 0,
            local_player: PlayerId(0),
            charges: Vec::new(),
            events: Vec::new(),
            audio: Box::new(Silence),
        }
    }

    pub fn set_audio(&mut self, audio: Box<dyn AudioCues>) {
        self.audio = audio;
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every pending event to `sink`
    pub fn forward_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    /// Put a player in `id`'s slot and onto the occupancy grid
    pub fn add_player(&mut self, id: PlayerId, player: Player) {
        let old = self.players[id.index()].tile;
        if self.players[id.index()].active && self.level.player_at(old) == Some(id) {
            self.level.set_player(old, None);
        }
        self.level.set_player(player.tile, Some(id));
        self.players[id.index()] = player;
    }

    /// Move a player to `to`, keeping the occupancy grid in step
    pub fn move_player(&mut self, id: PlayerId, to: Point) {
        let from = self.players[id.index()].tile;
        if self.level.player_at(from) == Some(id) {
            self.level.set_player(from, None);
        }
        self.level.set_player(to, Some(id));
        let player = &mut self.players[id.index()];
        player.tile = to;
        player.future = to;
    }

    pub fn local_player(&self) -> &Player {
        &self.players[self.local_player.index()]
    }

    /// Play one of the two recordings of a monster sound bank
    pub fn play_effect(&mut self, id: MonsterId, sound: MonsterSound) {
        let variant = self.rng.generate(2) as u8;
        self.emit(SimEvent::Sound { id, sound, variant });
    }

    pub fn is_playing(&self, speech: Speech) -> bool {
        self.audio.is_playing(speech)
    }

    /// Report the current state of `quest` to the host
    pub fn announce_quest(&mut self, quest: QuestId) {
        let q = self.quests[quest];
        debug!(%quest, status = %q.status, var1 = q.var1, "quest changed");
        self.emit(SimEvent::QuestChanged {
            quest,
            status: q.status,
            var1: q.var1,
        });
    }

    /// Populate the level: golem slots, types, quest monsters, uniques,
    /// then random groups
    pub fn init_monsters(&mut self) -> Result<(), SpawnError> {
        monster::init_golems(self)?;
        monster::choose_level_types(self)?;
        if !self.level.is_set_level {
            monster::place_quest_monsters(self)?;
            monster::place_unique_monsters(self)?;
        }
        monster::populate_level(self);
        debug!(
            active = self.monsters.active_count(),
            types = self.monsters.types().len(),
            "level populated"
        );
        Ok(())
    }

    /// Advance every monster by one game tick
    pub fn process_monsters(&mut self) {
        let span = info_span!("process_monsters", tick = self.tick);
        let _enter = span.enter();

        self.monsters.delete_pending();

        let mut i = 0;
        while i < self.monsters.active_count() {
            let id = self.monsters.active_ids()[i];
            process_monster(self, id);
            i += 1;
        }

        advance_charges(self);
        self.monsters.delete_pending();
        self.tick += 1;
    }
}

fn regenerate(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    if m.flags.contains(MonsterFlags::NO_HEAL)
        || m.hit_points >= m.max_hit_points
        || m.hit_points >> HP_SHIFT <= 0
    {
        return;
    }
    let amount = if m.level > 1 { m.level / 2 } else { m.level };
    m.hit_points = (m.hit_points + amount).min(m.max_hit_points);
}

fn process_monster(sim: &mut Simulation, id: MonsterId) {
    monster::follow_the_leader(sim, id);

    sim.rng.set_seed(sim.monsters[id].ai_seed);
    sim.monsters[id].ai_seed = sim.rng.advance() as u32;

    regenerate(sim, id);
    monster::refresh_enemy(sim, id);

    loop {
        let m = &sim.monsters[id];
        if !m.flags.contains(MonsterFlags::SEARCH) || !monster::plan_path(sim, id) {
            ai::run_ai(sim, id);
        }
        let finished = monster::step_mode(sim, id);
        if !finished {
            break;
        }
        trace!(%id, mode = ?sim.monsters[id].mode.kind(), "action finished");
        monster::group_unity(sim, id);
    }

    if sim.monsters[id].mode != monster::Mode::Petrified {
        monster::process_animation(&mut sim.monsters[id]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PlayingLines;

    fn open_sim() -> Simulation {
        let mut level = Level::new(1);
        level.carve_room(Point::new(10, 10), 30, 30, 1);
        Simulation::new(SimConfig::default(), level)
    }

    #[test]
    fn test_add_and_move_player() {
        let mut sim = open_sim();
        sim.add_player(PlayerId(0), Player::new("hero", Point::new(12, 12)));
        assert_eq!(sim.level.player_at(Point::new(12, 12)), Some(PlayerId(0)));
        sim.move_player(PlayerId(0), Point::new(13, 12));
        assert_eq!(sim.level.player_at(Point::new(12, 12)), None);
        assert_eq!(sim.level.player_at(Point::new(13, 12)), Some(PlayerId(0)));
        assert_eq!(sim.players[0].future, Point::new(13, 12));
    }

    #[test]
    fn test_forward_events_empties_queue() {
        let mut sim = open_sim();
        sim.play_effect(MonsterId(5), MonsterSound::Attack);
        let mut sink: Vec<SimEvent> = Vec::new();
        sim.forward_events(&mut sink);
        assert_eq!(sink.len(), 1);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_audio_is_pluggable() {
        let mut sim = open_sim();
        assert!(!sim.is_playing(Speech::Zhar1));
        sim.set_audio(Box::new(PlayingLines(vec![Speech::Zhar1])));
        assert!(sim.is_playing(Speech::Zhar1));
    }

    #[test]
    fn test_empty_tick_advances_clock() {
        let mut sim = open_sim();
        sim.process_monsters();
        sim.process_monsters();
        assert_eq!(sim.tick, 2);
    }
}
