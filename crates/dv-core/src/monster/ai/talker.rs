//! Scripted quest uniques that talk before they fight
//!
//! A talker waits in [`Goal::Inquiring`] until a player clicks it, which
//! puts it into [`Mode::Talk`]. The talk step shows the current line and
//! fires the quest side effects. While the voice line plays the monster
//! stays in [`Goal::Talking`]; once it has finished, or the player walked
//! off, the script moves on to the next line or drops into combat.

use tracing::debug;

use super::{is_standing, melee, ranged};
use crate::SQUELCH_MAX;
use crate::combat::start_kill;
use crate::dungeon::{Direction, Point};
use crate::monster::{AiKind, Goal, Mode, MonsterFlags, MonsterId, check_stand_animation, start_stand};
use crate::sim::Simulation;
use crate::world::{ItemDrop, PlayerId, QuestId, QuestItem, QuestStatus, SimEvent, Speech};

/// Where a single player has to stand for Lazarus to start his speech
const LAZARUS_TRIGGER: Point = Point::new(35, 46);

/// Everything the player needs to hear has been said
fn finish_talking(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    m.squelch = SQUELCH_MAX;
    m.talk = None;
    m.goal = Goal::Normal;
    debug!(%id, "talker turns hostile");
}

/// The line has finished playing and the player is still listening
fn line_done(sim: &Simulation, id: MonsterId, speech: Speech) -> bool {
    let m = &sim.monsters[id];
    m.talk == Some(speech) && m.goal == Goal::Talking && !sim.is_playing(speech)
}

fn drop_item(sim: &mut Simulation, id: MonsterId, at: Point, drop: ItemDrop) {
    let m = &mut sim.monsters[id];
    if m.flags.contains(MonsterFlags::QUEST_COMPLETE) {
        return;
    }
    m.flags.insert(MonsterFlags::QUEST_COMPLETE);
    sim.emit(SimEvent::Loot { tile: at, drop });
}

fn activate_quest(sim: &mut Simulation, quest: QuestId) {
    sim.quests[quest].activate();
    sim.announce_quest(quest);
}

/// One tick of [`Mode::Talk`]: stand up, show the line and run its script
pub fn step_talk(sim: &mut Simulation, id: MonsterId) {
    let dir = sim.monsters[id].direction;
    start_stand(sim, id, dir);
    sim.monsters[id].goal = Goal::Talking;

    let Some(speech) = sim.monsters[id].talk else {
        return;
    };
    if sim.is_playing(speech) {
        return;
    }
    sim.emit(SimEvent::Dialogue { id, speech });

    let m = &sim.monsters[id];
    let below = m.tile + Direction::South;
    let done = m.flags.contains(MonsterFlags::QUEST_COMPLETE);
    match m.ai {
        AiKind::Gharbad => {
            if speech == Speech::Garbud1 {
                activate_quest(sim, QuestId::Garbud);
            }
            if speech == Speech::Garbud2 {
                drop_item(sim, id, below, ItemDrop::Mace);
            }
        }
        AiKind::Zhar => {
            if speech == Speech::Zhar1 && !done {
                activate_quest(sim, QuestId::Zhar);
                drop_item(sim, id, below, ItemDrop::SpellBook);
            }
        }
        AiKind::Snotspil => {
            if speech == Speech::Banner10 && !done {
                sim.monsters[id].flags.insert(MonsterFlags::QUEST_COMPLETE);
                sim.emit(SimEvent::MapChanged {
                    quest: QuestId::Banner,
                });
                let banner = &mut sim.quests[QuestId::Banner];
                banner.var1 = 2;
                if banner.status == QuestStatus::Init {
                    banner.status = QuestStatus::Active;
                }
                sim.announce_quest(QuestId::Banner);
            }
        }
        AiKind::Lachdanan => {
            if speech == Speech::Veil9 {
                activate_quest(sim, QuestId::Veil);
            }
            if speech == Speech::Veil11 {
                drop_item(sim, id, below, ItemDrop::SteelVeil);
            }
        }
        AiKind::Warlord => {
            sim.quests[QuestId::Warlord].var1 = 2;
            sim.announce_quest(QuestId::Warlord);
        }
        AiKind::Lazarus if sim.config.multiplayer => {
            sim.quests[QuestId::Betrayer].var1 = 6;
            sim.announce_quest(QuestId::Betrayer);
            finish_talking(sim, id);
        }
        _ => {}
    }
}

/// A player clicked a talker. Snotspil and Lachdanan also check the
/// player's pack for the item they asked for.
pub fn talk_to_monster(sim: &mut Simulation, id: MonsterId, player: PlayerId) {
    sim.monsters[id].mode = Mode::Talk;
    let ai = sim.monsters[id].ai;
    if !matches!(ai, AiKind::Snotspil | AiKind::Lachdanan) {
        return;
    }

    let banner = sim.quests[QuestId::Banner];
    if banner.is_available()
        && banner.var1 == 2
        && sim.players[player.index()].take_item(QuestItem::Banner)
    {
        sim.quests[QuestId::Banner].status = QuestStatus::Done;
        sim.announce_quest(QuestId::Banner);
        let m = &mut sim.monsters[id];
        m.talk = Some(Speech::Banner12);
        m.goal = Goal::Inquiring;
    }

    let asked_for_elixir = matches!(
        sim.monsters[id].talk,
        Some(Speech::Veil9 | Speech::Veil10 | Speech::Veil11)
    );
    if sim.quests[QuestId::Veil].is_available()
        && asked_for_elixir
        && sim.players[player.index()].take_item(QuestItem::GoldenElixir)
    {
        let m = &mut sim.monsters[id];
        m.talk = Some(Speech::Veil11);
        m.goal = Goal::Inquiring;
    }
}

/// A talker whose line was interrupted by the player leaving queues the
/// follow-up line and waits for them again
fn queue_next_line(sim: &mut Simulation, id: MonsterId, from: Speech, to: Speech) {
    let m = &mut sim.monsters[id];
    if m.talk == Some(from) && m.goal == Goal::Talking && !sim.level.is_visible(m.tile) {
        m.talk = Some(to);
        m.goal = Goal::Inquiring;
    }
}

/// Gharbad the Weak: begs, bribes, then fights like a goat
pub(super) fn gharbad(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    if let Some(speech) = m.talk
        && speech.is_garbud_opening()
        && m.goal == Goal::Talking
        && !sim.level.is_visible(m.tile)
    {
        let m = &mut sim.monsters[id];
        m.goal = Goal::Inquiring;
        m.talk = speech.next_garbud();
    }

    if sim.level.is_visible(sim.monsters[id].tile) && line_done(sim, id, Speech::Garbud4) {
        finish_talking(sim, id);
    }

    if matches!(sim.monsters[id].goal, Goal::Normal | Goal::Move { .. }) {
        melee::avoidance(sim, id);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Zhar the Mad: complains about being disturbed, then casts like a
/// counselor
pub(super) fn zhar(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    queue_next_line(sim, id, Speech::Zhar1, Speech::Zhar2);

    if sim.level.is_visible(sim.monsters[id].tile) && line_done(sim, id, Speech::Zhar2) {
        finish_talking(sim, id);
    }

    if matches!(
        sim.monsters[id].goal,
        Goal::Normal | Goal::Retreat { .. } | Goal::Move { .. }
    ) {
        ranged::counselor(sim, id);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Snotspil guards the tavern sign and attacks once the player returns it
pub(super) fn snotspil(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    queue_next_line(sim, id, Speech::Banner10, Speech::Banner11);

    let m = &mut sim.monsters[id];
    if m.talk == Some(Speech::Banner11) && sim.quests[QuestId::Banner].var1 == 3 {
        m.talk = None;
        m.goal = Goal::Normal;
    }

    if sim.level.is_visible(sim.monsters[id].tile) {
        if line_done(sim, id, Speech::Banner12) {
            sim.emit(SimEvent::MapChanged {
                quest: QuestId::Banner,
            });
            sim.quests[QuestId::Banner].var1 = 3;
            sim.announce_quest(QuestId::Banner);
            finish_talking(sim, id);
        }
        if sim.quests[QuestId::Banner].var1 == 3
            && matches!(sim.monsters[id].goal, Goal::Normal | Goal::Attack2 { .. })
        {
            melee::fallen(sim, id);
        }
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Archbishop Lazarus: a speech when the player reaches the altar, then
/// counselor magic
pub(super) fn lazarus(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    if sim.level.is_visible(m.tile) {
        let waiting = m.talk == Some(Speech::Vile13) && m.goal == Goal::Inquiring;
        if !sim.config.multiplayer {
            if waiting && sim.local_player().tile == LAZARUS_TRIGGER {
                sim.monsters[id].mode = Mode::Talk;
                sim.quests[QuestId::Betrayer].var1 = 5;
                sim.announce_quest(QuestId::Betrayer);
            }
            if line_done(sim, id, Speech::Vile13) {
                sim.emit(SimEvent::MapChanged {
                    quest: QuestId::Betrayer,
                });
                sim.quests[QuestId::Betrayer].var1 = 6;
                sim.announce_quest(QuestId::Betrayer);
                finish_talking(sim, id);
            }
        } else if waiting && sim.quests[QuestId::Betrayer].var1 <= 3 {
            sim.monsters[id].mode = Mode::Talk;
        }
    }

    if matches!(
        sim.monsters[id].goal,
        Goal::Normal | Goal::Retreat { .. } | Goal::Move { .. }
    ) {
        sim.monsters[id].talk = None;
        ranged::counselor(sim, id);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Lazarus' succubi wait for his speech to end before shooting
pub(super) fn lazarus_minion(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    if sim.level.is_visible(m.tile) {
        let speech_over = sim.config.multiplayer || sim.quests[QuestId::Betrayer].var1 > 5;
        let m = &mut sim.monsters[id];
        if speech_over {
            m.goal = Goal::Normal;
            if !sim.config.multiplayer {
                m.talk = None;
            }
        } else {
            m.goal = Goal::Inquiring;
        }
    }

    if sim.monsters[id].goal == Goal::Normal {
        ranged::ranged(sim, id);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Lachdanan never fights; given the elixir he hands over his helm and
/// passes away
pub(super) fn lachdanan(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    queue_next_line(sim, id, Speech::Veil9, Speech::Veil10);

    if sim.level.is_visible(sim.monsters[id].tile) && line_done(sim, id, Speech::Veil11) {
        sim.monsters[id].talk = None;
        sim.quests[QuestId::Veil].status = QuestStatus::Done;
        sim.announce_quest(QuestId::Veil);
        start_kill(sim, id, None);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Warlord of Blood: a single taunt, then a skeleton's fighting style
pub(super) fn warlord(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }
    let md = m.enemy_direction();

    if sim.level.is_visible(m.tile) {
        if m.talk == Some(Speech::Warlord9) && m.goal == Goal::Inquiring {
            sim.monsters[id].mode = Mode::Talk;
        }
        if line_done(sim, id, Speech::Warlord9) {
            finish_talking(sim, id);
        }
    }

    if sim.monsters[id].goal == Goal::Normal {
        melee::skeleton(sim, id);
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::monster::{ModeKind, Species};
    use crate::testing::{arena, arena_with, hunt_player, spawn};
    use crate::world::{Player, PlayingLines, Quests};

    fn talker(sim: &mut Simulation, species: Species, ai: AiKind, speech: Speech) -> MonsterId {
        let id = spawn(sim, species, Point::new(20, 20));
        hunt_player(sim, id, Point::new(22, 20));
        let m = &mut sim.monsters[id];
        m.ai = ai;
        m.talk = Some(speech);
        m.goal = Goal::Inquiring;
        m.squelch = 0;
        id
    }

    fn dialogue(sim: &Simulation) -> Vec<Speech> {
        sim.events()
            .iter()
            .filter_map(|e| match e {
                SimEvent::Dialogue { speech, .. } => Some(*speech),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_talk_shows_line_and_activates_quest() {
        let mut sim = arena();
        sim.quests = Quests::all_initialised();
        let id = talker(&mut sim, Species::FleshClan, AiKind::Gharbad, Speech::Garbud1);
        talk_to_monster(&mut sim, id, PlayerId(0));
        assert_eq!(sim.monsters[id].mode, Mode::Talk);
        assert!(sim.monsters[id].can_talk());

        step_talk(&mut sim, id);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
        assert_eq!(sim.monsters[id].goal, Goal::Talking);
        assert_eq!(dialogue(&sim), [Speech::Garbud1]);
        assert_eq!(sim.quests[QuestId::Garbud].status, QuestStatus::Active);
        assert!(sim.quests[QuestId::Garbud].logged);
    }

    #[test]
    fn test_talk_waits_for_playing_line() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::FleshClan, AiKind::Gharbad, Speech::Garbud1);
        sim.set_audio(Box::new(PlayingLines(vec![Speech::Garbud1])));
        sim.monsters[id].mode = Mode::Talk;
        step_talk(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Talking);
        assert!(dialogue(&sim).is_empty());
    }

    #[test]
    fn test_gharbad_drops_his_gift_once() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::FleshClan, AiKind::Gharbad, Speech::Garbud2);
        for _ in 0..2 {
            sim.monsters[id].mode = Mode::Talk;
            step_talk(&mut sim, id);
        }
        let gifts = sim
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::Loot { drop: ItemDrop::Mace, .. }))
            .count();
        assert_eq!(gifts, 1);
        assert!(sim.monsters[id].flags.contains(MonsterFlags::QUEST_COMPLETE));
    }

    #[test]
    fn test_gharbad_moves_on_when_player_leaves() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::FleshClan, AiKind::Gharbad, Speech::Garbud1);
        sim.monsters[id].goal = Goal::Talking;
        sim.level.set_visible(Point::new(20, 20), false);
        gharbad(&mut sim, id);
        let m = &sim.monsters[id];
        assert_eq!(m.talk, Some(Speech::Garbud2));
        assert_eq!(m.goal, Goal::Inquiring);
    }

    #[test]
    fn test_gharbad_turns_hostile_after_last_line() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::FleshClan, AiKind::Gharbad, Speech::Garbud4);
        sim.monsters[id].goal = Goal::Talking;
        gharbad(&mut sim, id);
        let m = &sim.monsters[id];
        assert_eq!(m.talk, None);
        assert_eq!(m.squelch, SQUELCH_MAX);
        assert!(m.is_possible_to_hit());
    }

    #[test]
    fn test_zhar_holds_while_speaking() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::Counselor, AiKind::Zhar, Speech::Zhar2);
        sim.monsters[id].goal = Goal::Talking;
        sim.set_audio(Box::new(PlayingLines(vec![Speech::Zhar2])));
        zhar(&mut sim, id);
        assert_eq!(sim.monsters[id].talk, Some(Speech::Zhar2));
        assert_eq!(sim.monsters[id].goal, Goal::Talking);

        sim.set_audio(Box::new(PlayingLines(Vec::new())));
        zhar(&mut sim, id);
        assert_eq!(sim.monsters[id].talk, None);
    }

    #[test]
    fn test_snotspil_takes_the_banner() {
        let mut sim = arena();
        sim.quests = Quests::all_initialised();
        sim.quests[QuestId::Banner].var1 = 2;
        let id = talker(&mut sim, Species::FleshClan, AiKind::Snotspil, Speech::Banner11);
        let mut hero = Player::new("hero", Point::new(22, 20));
        hero.quest_items.push(QuestItem::Banner);
        sim.add_player(PlayerId(0), hero);

        talk_to_monster(&mut sim, id, PlayerId(0));
        assert_eq!(sim.quests[QuestId::Banner].status, QuestStatus::Done);
        assert_eq!(sim.monsters[id].talk, Some(Speech::Banner12));
        assert!(!sim.players[0].has_item(QuestItem::Banner));

        step_talk(&mut sim, id);
        snotspil(&mut sim, id);
        assert_eq!(sim.quests[QuestId::Banner].var1, 3);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
        assert!(
            sim.events()
                .iter()
                .any(|e| *e == SimEvent::MapChanged { quest: QuestId::Banner })
        );
    }

    #[test]
    fn test_lachdanan_dies_after_the_elixir() {
        let mut sim = arena();
        sim.quests = Quests::all_initialised();
        let id = talker(&mut sim, Species::BlackKnight, AiKind::Lachdanan, Speech::Veil10);
        let mut hero = Player::new("hero", Point::new(22, 20));
        hero.quest_items.push(QuestItem::GoldenElixir);
        sim.add_player(PlayerId(0), hero);

        talk_to_monster(&mut sim, id, PlayerId(0));
        assert_eq!(sim.monsters[id].talk, Some(Speech::Veil11));
        step_talk(&mut sim, id);
        lachdanan(&mut sim, id);

        assert_eq!(sim.quests[QuestId::Veil].status, QuestStatus::Done);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Death);
        assert!(
            sim.events()
                .iter()
                .any(|e| matches!(e, SimEvent::Loot { drop: ItemDrop::SteelVeil, .. }))
        );
    }

    #[test]
    fn test_warlord_taunts_then_fights() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::SteelLord, AiKind::Warlord, Speech::Warlord9);
        warlord(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::Talk);
        step_talk(&mut sim, id);
        assert_eq!(sim.quests[QuestId::Warlord].var1, 2);
        warlord(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
        assert_eq!(sim.monsters[id].talk, None);
    }

    #[test]
    fn test_lazarus_waits_for_the_altar() {
        let mut sim = arena_with(SimConfig::default());
        let id = talker(&mut sim, Species::Advocate, AiKind::Lazarus, Speech::Vile13);
        lazarus(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Inquiring);
        assert_ne!(sim.monsters[id].mode, Mode::Talk);

        sim.move_player(PlayerId(0), LAZARUS_TRIGGER);
        lazarus(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::Talk);
        assert_eq!(sim.quests[QuestId::Betrayer].var1, 5);
    }

    #[test]
    fn test_lazarus_released_at_once_in_multiplayer() {
        let mut sim = arena_with(SimConfig {
            multiplayer: true,
            ..SimConfig::default()
        });
        let id = talker(&mut sim, Species::Advocate, AiKind::Lazarus, Speech::Vile13);
        lazarus(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::Talk);
        step_talk(&mut sim, id);
        assert_eq!(sim.quests[QuestId::Betrayer].var1, 6);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
        assert_eq!(sim.monsters[id].talk, None);
    }

    #[test]
    fn test_minions_wait_for_the_speech() {
        let mut sim = arena();
        let id = talker(&mut sim, Species::Succubus, AiKind::LazarusMinion, Speech::Vile13);
        sim.quests[QuestId::Betrayer].var1 = 3;
        lazarus_minion(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Inquiring);
        sim.quests[QuestId::Betrayer].var1 = 6;
        lazarus_minion(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
        assert_eq!(sim.monsters[id].talk, None);
    }
}
