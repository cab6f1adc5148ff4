//! Stock abilities and characters.

use std::sync::Arc;

use sim_core::{Ability, AvertingPassive, Buff, BuffKind, BuffScope, Effect};

use crate::catalog::{Catalog, Character};

fn abilities() -> Vec<Ability> {
    use Effect::*;

    let speed = |duration| Buff::new(BuffKind::IncreaseSpeed30, duration);
    let block = |duration| Buff::new(BuffKind::BlockDamage, duration);

    vec![
        // Boss
        Ability::new("demon_lord_stun", 1),
        Ability::new("demon_lord_aoe_1", 3),
        Ability::new("demon_lord_aoe_2", 3),
        // Shared basic attack
        Ability::new("a1", 1),
        Ability::new("heiress_a2", 3)
            .with_effects([DecreaseDebuffDuration])
            .with_buffs([speed(2)]),
        Ability::new("seeker_a2", 3).with_effects([TurnMeterBoost30, ExtraTurnSelf]),
        Ability::new("deacon_a2", 3),
        Ability::new("deacon_a3", 3).with_effects([TurnMeterBoost15, ExtraTurnSelf]),
        Ability::new("demytha_a2", 3).with_effects([IncreaseBuffDuration, DecreaseDebuffDuration]),
        Ability::new("demytha_a3", 3).with_buffs([block(1)]),
        Ability::new("high_khatun_a2", 3)
            .with_effects([TurnMeterBoost15])
            .with_buffs([speed(2)]),
        Ability::new("high_khatun_a3", 4),
        Ability::new("doomscreech_a2", 3).with_effects([TurnMeterBoost30]),
        Ability::new("doomscreech_a3", 5),
        Ability::new("donnie_a2", 4)
            .with_effects([ReduceCooldown2Turns])
            .with_buffs([speed(2)]),
        Ability::new("donnie_a3", 3).with_effects([RemoveAllDebuffs, TurnMeterBoost20]),
        Ability::new("donnie_a3_mine", 4).with_effects([RemoveAllDebuffs, TurnMeterBoost20]),
        Ability::new("maneater_a3", 5).with_buffs([block(2)]),
        Ability::new("othorion_a1", 1).with_effects([TurnMeterBoost5Self]),
        Ability::new("othorion_a2", 3).with_effects([TurnMeterBoost5Self]),
        Ability::new("othorion_a3", 4)
            .with_effects([ExtraTurnSelf])
            .with_buffs([speed(3).with_scope(BuffScope::SelfOnly)]),
    ]
}

/// (id, display name, ability names, has averting passive)
const CHARACTERS: &[(&str, &str, &[&str], bool)] = &[
    (
        "demon_lord",
        "demon_lord",
        &["demon_lord_stun", "demon_lord_aoe_1", "demon_lord_aoe_2"],
        false,
    ),
    ("heiress", "heiress", &["a1", "heiress_a2"], false),
    ("seeker", "seeker", &["a1", "seeker_a2"], false),
    ("deacon", "deacon", &["a1", "deacon_a2", "deacon_a3"], false),
    ("demytha", "demytha", &["a1", "demytha_a2", "demytha_a3"], false),
    ("high_khatun", "high_khatun", &["a1", "high_khatun_a2", "high_khatun_a3"], false),
    ("doomscreech", "doomscreech", &["a1", "doomscreech_a2", "doomscreech_a3"], false),
    ("donnie", "donnie", &["a1", "donnie_a2", "donnie_a3"], true),
    ("donnie_mine", "donnie", &["a1", "donnie_a2", "donnie_a3_mine"], true),
    ("maneater", "maneater", &["a1", "maneater_a3"], false),
    ("othorion", "othorion", &["othorion_a1", "othorion_a2", "othorion_a3"], false),
    ("dps_1", "dps_1", &["a1"], false),
    ("dps_2", "dps_2", &["a1"], false),
    ("dps_3", "dps_3", &["a1"], false),
];

pub(crate) fn install(catalog: &mut Catalog) {
    for ability in abilities() {
        catalog.insert_ability(ability.shared());
    }

    for (id, name, ability_names, passive) in CHARACTERS {
        let loadout: Vec<Arc<Ability>> = ability_names
            .iter()
            .filter_map(|ability| catalog.ability(ability).cloned())
            .collect();
        debug_assert_eq!(loadout.len(), ability_names.len(), "stock character {id}");

        let mut character = Character::new(*name, loadout);
        if *passive {
            character = character.with_passive(AvertingPassive::default());
        }
        catalog.insert_character(*id, character);
    }
}
