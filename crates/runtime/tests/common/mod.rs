#![allow(dead_code)]

use std::time::Duration;

use battle_core::{
    Controller, Element, ItemId, ItemInstance, ItemKind, ItemUses, MatchId, MatchSetup, Region,
    SideSetup, SkillDefinition, SkillId, UnitDefinition, UnitId, UnitTags,
};
use battle_runtime::{Runtime, RuntimeConfig};

const BENCH_REGIONS: [Region; 4] = [Region::Coast, Region::Forest, Region::Desert, Region::Tundra];

pub fn unit(id: u32, element: Element, region: Region) -> UnitDefinition {
    UnitDefinition {
        id: UnitId(id),
        name: format!("unit{id}"),
        attack: 10,
        defense: 5,
        max_hp: 100,
        element,
        region,
        tags: UnitTags::empty(),
        skills: vec![SkillDefinition::strike(SkillId(id * 10 + 1), "Strike", 20)],
        passive: None,
        seasonal_bonus: None,
    }
}

pub fn roster(base: u32, element: Element, lead_region: Region) -> Vec<UnitDefinition> {
    std::iter::once(unit(base, element, lead_region))
        .chain(
            BENCH_REGIONS
                .iter()
                .enumerate()
                .map(|(i, region)| unit(base + 1 + i as u32, element, *region)),
        )
        .collect()
}

pub fn potion() -> ItemInstance {
    ItemInstance {
        id: ItemId(1),
        name: "Potion".into(),
        kind: ItemKind::Heal,
        value: 30,
        uses: ItemUses::Single,
    }
}

pub fn setup(id: u64, side_b: Controller) -> MatchSetup {
    MatchSetup {
        id: MatchId(id),
        seed: 42,
        config: Default::default(),
        combos: Vec::new(),
        events: Default::default(),
        side_a: SideSetup {
            participant: "alice".into(),
            controller: Controller::Human,
            roster: roster(1, Element::Fire, Region::Highlands),
            item_pool: vec![potion()],
        },
        side_b: SideSetup {
            participant: "bob".into(),
            controller: side_b,
            roster: roster(11, Element::Nature, Region::Capital),
            item_pool: vec![potion()],
        },
    }
}

pub fn human_setup(id: u64) -> MatchSetup {
    setup(id, Controller::Human)
}

pub fn runtime() -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig::default().with_bot_delay(Duration::from_millis(200)))
        .build()
}
