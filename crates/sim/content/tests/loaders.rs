use std::fs;

use sim_content::{BossSpec, Catalog, CatalogLoader, ScenarioLoader};
use sim_core::{BuffKind, Effect, run_simulation};
use tempfile::TempDir;

const EXTRA_CATALOG: &str = r#"(
    abilities: [
        (
            name: "warden_a2",
            cooldown: 4,
            effects: [turn_meter_boost_20],
            buffs: [(kind: block_damage, duration: 2)],
        ),
    ],
    characters: [
        (id: "warden", abilities: ["a1", "warden_a2"]),
        (id: "warden_guard", name: Some("warden"), abilities: ["a1", "warden_a2"], passive: Some((cooldown: 3))),
    ],
)"#;

const SCENARIO: &str = r#"
budget = 40

[boss]
preset = "demon_lord_nm"

[[allies]]
character = "demytha"
speed = 257
priorities = [1, 3, 2]
delays = [0, 1, 0]

[[allies]]
character = "donnie_mine"
speed = 188
priorities = [1, 3, 2]

[search]
speeds = [250, 252]
variable = ["dps_1", "dps_2"]
threads = 2
"#;

#[test]
fn catalog_extension_adds_abilities_and_characters() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extra.ron");
    fs::write(&path, EXTRA_CATALOG).unwrap();

    let mut catalog = Catalog::builtin();
    CatalogLoader::extend(&mut catalog, &path).unwrap();

    let ability = catalog.ability("warden_a2").unwrap();
    assert_eq!(ability.cooldown, 4);
    assert_eq!(ability.effects, vec![Effect::TurnMeterBoost20]);
    assert_eq!(ability.buffs[0].kind, BuffKind::BlockDamage);

    let warden = catalog.character("warden").unwrap();
    assert_eq!(warden.name, "warden");
    assert!(warden.passive.is_none());

    let guard = catalog.character("warden_guard").unwrap();
    assert_eq!(guard.name, "warden");
    assert_eq!(guard.passive.map(|p| p.cooldown), Some(3));

    // Stock content is untouched
    assert!(catalog.character("demytha").is_ok());
}

#[test]
fn catalog_with_unknown_ability_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, r#"(characters: [(id: "x", abilities: ["missing"])])"#).unwrap();

    let mut catalog = Catalog::builtin();
    let err = CatalogLoader::extend(&mut catalog, &path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.ron"));
    assert!(message.contains("missing"));
}

#[test]
fn malformed_catalog_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.ron");
    fs::write(&path, "(abilities: [").unwrap();

    let err = CatalogLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("garbage.ron"));
}

#[test]
fn scenario_resolves_against_the_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.toml");
    fs::write(&path, SCENARIO).unwrap();

    let catalog = Catalog::builtin();
    let scenario = ScenarioLoader::load_resolved(&path, &catalog).unwrap();

    assert_eq!(scenario.budget, 40);
    assert_eq!(scenario.boss.speed, 170.0);
    assert_eq!(scenario.allies.len(), 2);

    let demytha = &scenario.allies[0];
    let delays: Vec<u32> = demytha.slots.iter().map(|slot| slot.delay).collect();
    assert_eq!(delays, vec![0, 1, 0]);

    let donnie = &scenario.allies[1];
    assert_eq!(donnie.name, "donnie");
    assert!(donnie.passive.is_some());

    let search = scenario.search.unwrap();
    assert_eq!(search.speeds, 250..252);
    assert_eq!(search.threads, Some(2));
    let names: Vec<&str> = search.variable.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["dps_1", "dps_2"]);
}

#[test]
fn scenario_defaults_to_the_unm_boss_and_standard_budget() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("minimal.toml");
    fs::write(
        &path,
        "[[allies]]\ncharacter = \"dps_1\"\nspeed = 180\n",
    )
    .unwrap();

    let file = ScenarioLoader::load(&path).unwrap();
    assert_eq!(file.budget, 50);
    assert!(matches!(file.boss, BossSpec::Preset { ref preset } if preset == "demon_lord_unm"));
    assert!(file.search.is_none());

    let scenario = file.resolve(&Catalog::builtin()).unwrap();
    assert_eq!(scenario.boss.speed, 190.0);
    assert_eq!(scenario.allies[0].slots[0].priority, 1);
}

#[test]
fn custom_boss_is_built_from_a_character() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom_boss.toml");
    fs::write(
        &path,
        "[boss]\ncharacter = \"demon_lord\"\nspeed = 200\npriorities = [1, 3, 2]\n",
    )
    .unwrap();

    let scenario = ScenarioLoader::load_resolved(&path, &Catalog::builtin()).unwrap();
    assert_eq!(scenario.boss.speed, 200.0);
    let priorities: Vec<u32> = scenario.boss.slots.iter().map(|s| s.priority).collect();
    assert_eq!(priorities, vec![1, 3, 2]);
}

#[test]
fn scenario_with_unknown_character_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unknown.toml");
    fs::write(&path, "[[allies]]\ncharacter = \"nobody\"\nspeed = 180\n").unwrap();

    let err = ScenarioLoader::load_resolved(&path, &Catalog::builtin()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknown.toml"));
    assert!(message.contains("nobody"));
}

#[test]
fn missing_scenario_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = ScenarioLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn stock_preset_roster_runs() {
    let catalog = Catalog::builtin();
    let allies = [
        catalog
            .character("demytha")
            .unwrap()
            .to_config(257.0, &[1, 3, 2], Some(&[0, 1, 0][..]))
            .unwrap(),
        catalog
            .character("donnie_mine")
            .unwrap()
            .to_config(188.0, &[1, 3, 2], Some(&[0, 0, 0][..]))
            .unwrap(),
        catalog.character("dps_1").unwrap().default_config(269.0).unwrap(),
        catalog.character("dps_2").unwrap().default_config(270.0).unwrap(),
        catalog.character("dps_3").unwrap().default_config(180.0).unwrap(),
    ];
    let boss = catalog.boss_preset("demon_lord_unm").unwrap();

    let turns = run_simulation(&allies, &boss, 50).unwrap();
    assert!((1..=50).contains(&turns));
}

#[test]
fn ally_speed_range_becomes_a_sweep_with_a_fixed_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sweep.toml");
    fs::write(
        &path,
        r#"
[[allies]]
character = "demytha"
speeds = [254, 260]
speed_step = 2
priorities = [1, 3, 2]
delays = [0, 1, 0]

[[allies]]
character = "dps_1"
speed = 269
"#,
    )
    .unwrap();

    let scenario = ScenarioLoader::load_resolved(&path, &Catalog::builtin()).unwrap();
    assert!(scenario.has_sweeps());
    assert!(scenario.search.is_none());

    // A plain run takes the start of the range
    assert_eq!(scenario.allies[0].speed, 254.0);

    let speeds: Vec<f64> = scenario.sweeps[0].iter().map(|c| c.speed).collect();
    assert_eq!(speeds, vec![254.0, 256.0, 258.0]);
    for config in &scenario.sweeps[0] {
        let priorities: Vec<u32> = config.slots.iter().map(|s| s.priority).collect();
        assert_eq!(priorities, vec![1, 3, 2]);
    }
    assert_eq!(scenario.sweeps[1].len(), 1);
    assert_eq!(scenario.sweeps[1][0].speed, 269.0);
}

#[test]
fn ally_without_any_speed_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_speed.toml");
    fs::write(&path, "[[allies]]\ncharacter = \"dps_1\"\n").unwrap();

    let err = ScenarioLoader::load_resolved(&path, &Catalog::builtin()).unwrap_err();
    assert!(err.to_string().contains("needs a speed"));
}

#[test]
fn shipped_scenarios_resolve() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data/scenarios");
    let catalog = Catalog::builtin();

    let mut count = 0;
    for entry in fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            ScenarioLoader::load_resolved(&path, &catalog).unwrap();
            count += 1;
        }
    }
    assert!(count >= 5);
}
