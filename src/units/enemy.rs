//! Enemy spawning
//!
//! Stats come from the species profile scaled by level, with explicit
//! overrides taking precedence. The experience reward and drop table are
//! fixed at spawn.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::{BattleConfig, Faction, Position};
use crate::skills::{enemy_schedule, SkillRegistry};
use crate::stats::{exp_reward_at_level, stats_at_level, StatOverrides};
use crate::units::loot::DropTable;
use crate::units::species::{Bestiary, Species};
use crate::units::unit::Unit;

/// What an enemy unit carries beyond a plain unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTraits {
    pub species: Species,
    pub exp_reward: u32,
    pub drops: DropTable,
}

impl EnemyTraits {
    pub fn roll_loot(&self, rng: &mut dyn RngCore) -> Vec<String> {
        self.drops.roll(rng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBlueprint {
    pub species: String,
    pub level: u32,
    pub position: Option<Position>,
    pub overrides: StatOverrides,
    pub name: Option<String>,
    pub with_skills: bool,
}

impl EnemyBlueprint {
    pub fn new(species: &str, level: u32) -> Self {
        Self {
            species: species.to_string(),
            level: level.max(1),
            position: None,
            overrides: StatOverrides::default(),
            name: None,
            with_skills: true,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_overrides(mut self, overrides: StatOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Spawn with only the basic attack
    pub fn without_skills(mut self) -> Self {
        self.with_skills = false;
        self
    }

    pub fn build(&self, bestiary: &Bestiary, skills: &SkillRegistry, config: &BattleConfig) -> Unit {
        let profile = bestiary.resolve(&self.species);
        let stats = stats_at_level(&profile.base, self.level, config).with_overrides(&self.overrides);
        let scaled = exp_reward_at_level(profile.base_exp, self.level, config.enemy_exp_growth_rate);
        let exp_reward = (scaled as f32 * profile.exp_multiplier).floor() as u32;

        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("{} Lv.{}", profile.species.display_name(), self.level));

        let mut unit = Unit::new(name, Faction::Enemy, stats, config)
            .with_level(self.level)
            .with_behavior(profile.species.behavior())
            .with_enemy(EnemyTraits {
                species: profile.species,
                exp_reward,
                drops: profile.drops.clone(),
            });
        if let Some(position) = self.position {
            unit = unit.at(position);
        }
        if self.with_skills {
            unit.set_skill_unlocks(enemy_schedule(), skills);
        }
        unit
    }
}
