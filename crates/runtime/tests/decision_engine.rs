mod common;

use battle_core::{
    ActionKind, Controller, Difficulty, MatchState, PlayerAction, SideId, SkillDefinition,
    SkillId, UnitId,
};
use battle_runtime::DecisionEngineProvider;

use common::setup;

fn bot_match(difficulty: Difficulty) -> battle_core::MatchSetup {
    let mut setup = setup(1, Controller::Human);
    setup.side_a.controller = Controller::Bot { difficulty };
    setup.side_a.item_pool.clear();
    setup
}

#[test]
fn hard_bot_picks_the_better_skill() {
    let mut setup = bot_match(Difficulty::Hard);
    setup.side_a.roster[0].skills = vec![
        SkillDefinition::strike(SkillId(101), "Jab", 10),
        SkillDefinition::strike(SkillId(102), "Smash", 30),
    ];
    let state = MatchState::from_setup(setup).unwrap();
    let engine = DecisionEngineProvider::new(2024);

    let trials = 1000;
    let best = (0..trials)
        .filter(|_| {
            engine.decide(SideId::A, &state).kind == ActionKind::UseSkill { skill: SkillId(102) }
        })
        .count();

    assert!(best >= 950, "picked the better skill {best}/{trials} times");
}

#[test]
fn easy_bot_explores_more_than_hard() {
    let mut setup = bot_match(Difficulty::Easy);
    setup.side_a.roster[0].skills = vec![
        SkillDefinition::strike(SkillId(101), "Jab", 10),
        SkillDefinition::strike(SkillId(102), "Smash", 30),
    ];
    let state = MatchState::from_setup(setup).unwrap();
    let engine = DecisionEngineProvider::new(5);

    let worse = (0..1000)
        .filter(|_| {
            engine.decide(SideId::A, &state).kind == ActionKind::UseSkill { skill: SkillId(101) }
        })
        .count();

    // Expected around 200 of 1000.
    assert!((100..350).contains(&worse), "picked the worse skill {worse} times");
}

#[test]
fn lead_window_swaps_in_a_much_stronger_unit() {
    let mut setup = bot_match(Difficulty::Hard);
    setup.side_a.roster[2].attack = 40;
    let state = MatchState::from_setup(setup).unwrap();

    let action = DecisionEngineProvider::new(1).decide(SideId::A, &state);
    assert_eq!(action, PlayerAction::switch_to(SideId::A, UnitId(3)));
}

#[test]
fn comparable_bench_keeps_the_lead() {
    let state = MatchState::from_setup(bot_match(Difficulty::Hard)).unwrap();
    let action = DecisionEngineProvider::new(1).decide(SideId::A, &state);
    assert!(matches!(action.kind, ActionKind::UseSkill { .. }));
}

#[test]
fn no_candidate_ends_the_turn() {
    let mut setup = bot_match(Difficulty::Normal);
    setup.side_a.roster[0].skills[0].resource_cost = 99;
    let state = MatchState::from_setup(setup).unwrap();

    let action = DecisionEngineProvider::new(3).decide(SideId::A, &state);
    assert_eq!(action, PlayerAction::end_turn(SideId::A));
}

#[test]
fn same_seed_same_decisions() {
    let mut setup = bot_match(Difficulty::Easy);
    setup.side_a.roster[0].skills = vec![
        SkillDefinition::strike(SkillId(101), "Jab", 10),
        SkillDefinition::strike(SkillId(102), "Smash", 30),
        SkillDefinition::strike(SkillId(103), "Slam", 20),
    ];
    let state = MatchState::from_setup(setup).unwrap();

    let first = DecisionEngineProvider::new(77);
    let second = DecisionEngineProvider::new(77);
    for _ in 0..50 {
        assert_eq!(first.decide(SideId::A, &state), second.decide(SideId::A, &state));
    }
}
