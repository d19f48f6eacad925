use std::io::Write;
use std::path::PathBuf;

use battle_core::{
    Controller, Difficulty, MatchId, MatchState, PassiveKind, SideId, SkillTags, UnitId, UnitTags,
};
use battle_runtime::{ErrorKind, Runtime, RuntimeError, Scenario};

fn duel_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/duel.ron")
}

#[test]
fn bundled_duel_loads_and_materializes() {
    let scenario = Scenario::load_from_file(&duel_path()).unwrap();
    assert_eq!(scenario.name, "Ember Coast duel");
    assert!(scenario.events.lunar);
    assert_eq!(
        scenario.side_a.controller,
        Controller::Bot {
            difficulty: Difficulty::Hard
        }
    );
    assert_eq!(
        scenario.side_a.roster[1].passive,
        Some(PassiveKind::Keen { crit_bonus: 0.1 })
    );
    assert_eq!(scenario.side_b.roster[2].tags, UnitTags::NIGHT);
    assert_eq!(scenario.side_b.roster[3].skills[0].tags, SkillTags::MAGICAL);
    assert!(scenario.side_b.roster[0].tags.is_empty());

    let state = MatchState::from_setup(scenario.into_setup(MatchId(42))).unwrap();
    assert_eq!(state.id, MatchId(42));
    assert_eq!(state.side(SideId::A).active_unit().id(), UnitId(1));
    assert_eq!(state.side(SideId::B).active_unit().id(), UnitId(11));
    assert_eq!(state.side(SideId::A).hand.len(), 3);
    assert_eq!(state.side(SideId::A).deck.len(), 1);
    assert_eq!(state.rules.combos.len(), 1);
}

#[test]
fn malformed_ron_is_an_invalid_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "(name: \"broken\", seed: )").unwrap();

    let err = Scenario::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn missing_file_is_an_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = Scenario::load_from_file(&dir.path().join("absent.ron")).unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidConfig(_)));
}

#[tokio::test]
async fn scenario_with_short_roster_is_rejected_at_creation() {
    let mut scenario = Scenario::load_from_file(&duel_path()).unwrap();
    scenario.side_b.roster.truncate(3);

    let mut runtime = Runtime::builder().build();
    let err = runtime.create_match(scenario.into_setup(MatchId(1))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RosterMaterialization);
}
