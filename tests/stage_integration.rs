//! Stage tables, unlocks and the boss encounter

use autobattler::battle::{Battle, BattleEvent, EventLog};
use autobattler::core::{BattleConfig, Faction, Position};
use autobattler::stages::{
    load_stages, parse_stages_toml, BossSpawn, EnemySpawn, Rewards, StageCatalog, StageConfig,
};
use autobattler::stats::{StatBlock, StatOverrides};
use autobattler::units::Unit;

fn champion(config: &BattleConfig) -> Unit {
    Unit::new("Champion", Faction::Player, StatBlock::new(2000.0, 60.0, 20.0, 3.0), config)
        .at(Position::new(200.0, 300.0))
}

fn boss_stage(chance: f64) -> StageConfig {
    StageConfig::new("boss", "Chief's Tent", 5)
        .with_enemy(EnemySpawn::new("goblin", 1).at(400.0, 300.0).without_skills())
        .with_rewards(120, 80, &["potion_medium"])
        .with_boss(BossSpawn {
            chance,
            enemy: EnemySpawn {
                name: Some("Goblin Chief".to_string()),
                stats: StatOverrides {
                    max_health: Some(200.0),
                    ..Default::default()
                },
                ..EnemySpawn::new("goblin", 5).at(500.0, 300.0).without_skills()
            },
            rewards: Rewards {
                exp: 200,
                gold: 150,
                items: vec!["weapon_goblin_chief".to_string()],
            },
        })
}

#[test]
fn test_certain_boss_replaces_rewards() {
    let config = BattleConfig::default();
    let mut battle = Battle::new(config.clone(), boss_stage(1.0), 8).with_observer(EventLog::new());
    battle.deploy_player(champion(&config));
    battle.start();
    assert!(battle.stage().boss_armed());

    let result = battle.run_until_finished(16.0, 40_000).cloned().unwrap();
    assert!(result.victory);
    assert_eq!(result.gold, 150);
    assert!(result.exp > 200);
    assert!(result.items.iter().any(|i| i == "potion_medium"));
    assert!(result.items.iter().any(|i| i == "weapon_goblin_chief"));

    let boss = battle.stage().boss().unwrap();
    assert_eq!(battle.roster().get(boss).unwrap().name, "Goblin Chief");
    assert_eq!(battle.roster().get(boss).unwrap().base.max_health, 200.0);

    let stage_result = battle.stage().get_result();
    assert_eq!(stage_result.enemies_defeated, 2);
    assert_eq!(stage_result.total_enemies, 2);
    assert!(stage_result.time_taken_ms > 0.0);
    assert_eq!(
        battle
            .observer()
            .count(|e| matches!(e, BattleEvent::Death { .. })),
        2
    );
}

#[test]
fn test_impossible_boss_never_spawns() {
    let config = BattleConfig::default();
    let mut battle = Battle::new(config.clone(), boss_stage(0.0), 8);
    battle.deploy_player(champion(&config));
    battle.start();

    let result = battle.run_until_finished(16.0, 40_000).cloned().unwrap();
    assert!(result.victory);
    assert_eq!(result.gold, 80);
    assert!(battle.stage().boss().is_none());
    assert_eq!(battle.stage().get_result().total_enemies, 1);
}

#[test]
fn test_builtin_catalog_unlocks() {
    let catalog = StageCatalog::builtin();
    let ids: Vec<String> = catalog.available().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["1-1", "1-2", "1-3"]);

    assert!(catalog.is_unlocked("1-1", 1));
    // 1-2 recommends level 3: ceil(2.1) = 3
    assert!(!catalog.is_unlocked("1-2", 2));
    assert!(catalog.is_unlocked("1-2", 3));
    // 1-3 recommends level 5: ceil(3.5) = 4
    assert!(catalog.is_unlocked("1-3", 4));
    assert!(!catalog.is_unlocked("9-9", 99));

    assert_eq!(catalog.get_or_default("9-9").unwrap().id, "1-1");
}

#[test]
fn test_bundled_stage_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/stages.toml");
    let catalog = load_stages(&path).unwrap();
    let builtin = StageCatalog::builtin();

    for id in ["1-1", "1-2", "1-3"] {
        assert_eq!(catalog.get(id), builtin.get(id), "stage {id}");
    }
    let camp = catalog.get("2-1").unwrap();
    assert_eq!(camp.enemies.len(), 2);
    assert_eq!(camp.enemies[1].position_or_default(1), Position::new(600.0, 300.0));
}

#[test]
fn test_stage_file_rejects_duplicates() {
    let toml = r#"
[[stages]]
id = "x"
name = "X"
recommended_level = 1
rewards = { exp = 1, gold = 1 }

[[stages.enemies]]
species = "slime"
level = 1

[[stages]]
id = "x"
name = "X again"
recommended_level = 1
rewards = { exp = 1, gold = 1 }

[[stages.enemies]]
species = "slime"
level = 1
"#;
    assert!(parse_stages_toml(toml).is_err());
}
