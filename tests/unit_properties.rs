//! Property tests for unit and skill invariants

use autobattler::core::{BattleConfig, Faction, Position};
use autobattler::skills::{Skill, SkillContext, SkillRegistry};
use autobattler::stats::StatBlock;
use autobattler::units::{Roster, Unit};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn unit(max_health: f32) -> Unit {
    Unit::new(
        "Subject",
        Faction::Enemy,
        StatBlock::new(max_health, 5.0, 2.0, 1.0),
        &BattleConfig::default(),
    )
}

/// A `melee_basic` that has just been used, so its cooldown is full
fn spent_skill() -> Skill {
    let config = BattleConfig::default();
    let mut roster = Roster::new();
    let mut hero = unit(100.0).at(Position::new(100.0, 300.0));
    hero.faction = Faction::Player;
    let hero = roster.spawn(hero);
    let foe = roster.spawn(unit(100.0).at(Position::new(150.0, 300.0)));

    let mut skill = SkillRegistry::builtin().instantiate("melee_basic").unwrap();
    skill.set_owner(hero);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let caster = roster.get(hero).unwrap().caster();
    let mut ctx = SkillContext {
        caster,
        roster: &mut roster,
        arena: &config.arena,
        rng: &mut rng,
    };
    assert!(skill.use_on(foe, &mut ctx));
    skill
}

proptest! {
    #[test]
    fn skill_cooldown_only_counts_down(deltas in prop::collection::vec(-100.0f32..800.0, 1..30)) {
        let mut skill = spent_skill();
        prop_assert_eq!(skill.cooldown(), 3000.0);
        for delta in deltas {
            let before = skill.cooldown();
            skill.update(delta);
            prop_assert!(skill.cooldown() <= before);
            prop_assert!(skill.cooldown() >= 0.0);
        }
    }

    #[test]
    fn health_stays_clamped(
        max_health in 1.0f32..500.0,
        hits in prop::collection::vec(-50.0f32..200.0, 0..40),
        heals in prop::collection::vec(0.0f32..100.0, 0..40),
    ) {
        let mut subject = unit(max_health);
        for (i, amount) in hits.iter().enumerate() {
            subject.take_damage(*amount);
            prop_assert!(subject.health >= 0.0);
            prop_assert!(subject.health <= subject.max_health());
            if let Some(heal) = heals.get(i) {
                subject.heal(*heal);
                prop_assert!(subject.health >= 0.0);
                prop_assert!(subject.health <= subject.max_health());
            }
        }
    }

    #[test]
    fn cooldowns_never_increase_or_go_negative(
        start in 0.0f32..5000.0,
        deltas in prop::collection::vec(0.0f32..400.0, 1..60),
    ) {
        let mut subject = unit(100.0);
        subject.attack_cooldown = start;
        subject.move_cooldown = start / 2.0;
        let mut charge = subject.skill_charge;

        for delta in deltas {
            let attack = subject.attack_cooldown;
            let movement = subject.move_cooldown;
            subject.update_cooldowns(delta);
            prop_assert!(subject.attack_cooldown <= attack);
            prop_assert!(subject.move_cooldown <= movement);
            prop_assert!(subject.attack_cooldown >= 0.0);
            prop_assert!(subject.move_cooldown >= 0.0);
            prop_assert!(subject.skill_charge >= charge);
            prop_assert!(subject.skill_charge <= 100.0);
            charge = subject.skill_charge;
        }
    }
}
