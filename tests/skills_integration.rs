//! Skill resolution against a live roster

use autobattler::core::{Arena, BattleConfig, BattlerError, Faction, Position, UnitId};
use autobattler::skills::{
    MeleeParams, RangedParams, Skill, SkillContext, SkillDef, SkillEffect, SkillRegistry,
    SkillTarget,
};
use autobattler::stats::StatBlock;
use autobattler::units::{Bestiary, EnemyBlueprint, Roster, Unit};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spawn(roster: &mut Roster, faction: Faction, stats: StatBlock, x: f32, y: f32) -> UnitId {
    let config = BattleConfig::default();
    roster.spawn(Unit::new("Dummy", faction, stats, &config).at(Position::new(x, y)))
}

fn cast(skill: &mut Skill, roster: &mut Roster, caster: UnitId, target: UnitId, rng: &mut ChaCha8Rng) -> bool {
    let arena = Arena::default();
    let caster = roster.get(caster).unwrap().caster();
    let mut ctx = SkillContext {
        caster,
        roster,
        arena: &arena,
        rng,
    };
    skill.use_on(target, &mut ctx)
}

#[test]
fn test_ranged_accuracy_matches_rate() {
    let mut roster = Roster::new();
    let archer = spawn(&mut roster, Faction::Player, StatBlock::new(100.0, 10.0, 0.0, 2.0), 100.0, 300.0);
    let dummy = spawn(&mut roster, Faction::Enemy, StatBlock::new(1.0e6, 0.0, 0.0, 1.0), 300.0, 300.0);

    let mut skill = Skill::ranged(
        SkillDef::new("shot", "Shot", 1000.0, 300.0, 10.0),
        RangedParams {
            accuracy: 0.75,
            projectile_speed: 400.0,
        },
    );
    skill.set_owner(archer);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut hits = 0;
    for _ in 0..2000 {
        let before = roster.get(dummy).unwrap().health;
        assert!(cast(&mut skill, &mut roster, archer, dummy, &mut rng));
        if roster.get(dummy).unwrap().health < before {
            hits += 1;
        }
        assert!(!skill.is_ready());
        skill.update(1000.0);
    }
    assert!((1400..=1600).contains(&hits), "hits = {hits}");
}

#[test]
fn test_self_buff_expires() {
    let mut roster = Roster::new();
    let hero = spawn(&mut roster, Faction::Player, StatBlock::new(100.0, 10.0, 5.0, 2.0), 100.0, 300.0);
    let foe = spawn(&mut roster, Faction::Enemy, StatBlock::new(50.0, 5.0, 3.0, 1.0), 500.0, 300.0);

    let mut skill = Skill::melee(
        SkillDef::new("war_cry", "War Cry", 8000.0, 0.0, 6.0)
            .with_effect(SkillEffect::Buff)
            .with_target(SkillTarget::SelfOnly)
            .with_duration(1000.0),
        MeleeParams::default(),
    );
    skill.set_owner(hero);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    // Out-of-range foe does not matter for a self skill
    assert!(cast(&mut skill, &mut roster, hero, foe, &mut rng));
    assert_eq!(roster.get(hero).unwrap().effective_stats().attack, 16.0);
    assert_eq!(roster.get(foe).unwrap().health, 50.0);

    roster.get_mut(hero).unwrap().update_cooldowns(1001.0);
    assert_eq!(roster.get(hero).unwrap().effective_stats().attack, 10.0);
}

#[test]
fn test_meteor_hits_five_nearest() {
    let registry = SkillRegistry::builtin();
    let mut roster = Roster::new();
    let mage = spawn(&mut roster, Faction::Player, StatBlock::new(100.0, 10.0, 5.0, 2.0), 200.0, 300.0);
    let foes: Vec<UnitId> = (0..7)
        .map(|i| {
            spawn(
                &mut roster,
                Faction::Enemy,
                StatBlock::new(100.0, 5.0, 0.0, 1.0),
                400.0 + i as f32 * 20.0,
                300.0,
            )
        })
        .collect();

    let mut meteor = registry.instantiate("area_large").unwrap();
    meteor.set_owner(mage);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(cast(&mut meteor, &mut roster, mage, foes[0], &mut rng));

    let wounded: Vec<bool> = foes
        .iter()
        .map(|id| roster.get(*id).unwrap().health < 100.0)
        .collect();
    assert_eq!(wounded, vec![true, true, true, true, true, false, false]);
    // Falloff: the center takes the most
    let center = roster.get(foes[0]).unwrap().health;
    let far = roster.get(foes[4]).unwrap().health;
    assert!(center < far);
}

#[test]
fn test_registry_lookups() {
    let registry = SkillRegistry::builtin();
    assert_eq!(registry.len(), 6);
    assert!(registry.instantiate("fire_nova").is_none());
    assert!(matches!(
        registry.try_instantiate("fire_nova"),
        Err(BattlerError::UnknownSkill(_))
    ));

    let fresh = registry.instantiate("melee_basic").unwrap();
    assert!(fresh.owner().is_none());
    assert!(!fresh.is_ready());
}

#[test]
fn test_enemy_skills_follow_level() {
    let config = BattleConfig::default();
    let registry = SkillRegistry::builtin();
    let bestiary = Bestiary::builtin();

    let count = |level: u32| {
        EnemyBlueprint::new("orc", level)
            .build(&bestiary, &registry, &config)
            .skills
            .len()
    };
    assert_eq!(count(1), 1);
    assert_eq!(count(3), 2);
    assert_eq!(count(10), 5);
    assert_eq!(count(20), 6);

    let quiet = EnemyBlueprint::new("orc", 10)
        .without_skills()
        .build(&bestiary, &registry, &config);
    assert!(quiet.skills.is_empty());
}
