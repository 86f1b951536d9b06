//! Static stage definitions

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_ENEMY_SPACING, DEFAULT_ENEMY_X, DEFAULT_ENEMY_Y};
use crate::core::Position;
use crate::stats::StatOverrides;
use crate::units::EnemyBlueprint;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub exp: u32,
    pub gold: u32,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Species name; unknown names fall back to goblin
    pub species: String,
    pub level: u32,
    #[serde(default)]
    pub position: Option<[f32; 2]>,
    #[serde(default)]
    pub stats: StatOverrides,
    #[serde(default)]
    pub name: Option<String>,
    /// Grant the level-gated skill schedule at spawn
    #[serde(default = "default_true")]
    pub skills: bool,
}

fn default_true() -> bool {
    true
}

impl EnemySpawn {
    pub fn new(species: &str, level: u32) -> Self {
        Self {
            species: species.to_string(),
            level,
            position: None,
            stats: StatOverrides::default(),
            name: None,
            skills: true,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some([x, y]);
        self
    }

    pub fn without_skills(mut self) -> Self {
        self.skills = false;
        self
    }

    /// Configured position, or the default column layout for slot `index`
    pub fn position_or_default(&self, index: usize) -> Position {
        match self.position {
            Some([x, y]) => Position::new(x, y),
            None => Position::new(
                DEFAULT_ENEMY_X,
                DEFAULT_ENEMY_Y + index as f32 * DEFAULT_ENEMY_SPACING,
            ),
        }
    }

    pub fn blueprint(&self, index: usize) -> EnemyBlueprint {
        let mut blueprint = EnemyBlueprint::new(&self.species, self.level)
            .at(self.position_or_default(index))
            .with_overrides(self.stats);
        if let Some(name) = &self.name {
            blueprint = blueprint.named(name);
        }
        if !self.skills {
            blueprint = blueprint.without_skills();
        }
        blueprint
    }
}

/// Conditional boss: rolled once at setup, spawned once the initial roster
/// is defeated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    /// Probability in [0, 1]
    pub chance: f64,
    pub enemy: EnemySpawn,
    /// Replaces the stage's base exp and gold; items are added
    pub rewards: Rewards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 1 (easy) to 5 (hard)
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    pub recommended_level: u32,
    pub rewards: Rewards,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub boss: Option<BossSpawn>,
}

fn default_difficulty() -> u8 {
    1
}

impl StageConfig {
    pub fn new(id: &str, name: &str, recommended_level: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            difficulty: 1,
            recommended_level,
            rewards: Rewards::default(),
            enemies: Vec::new(),
            boss: None,
        }
    }

    pub fn with_enemy(mut self, spawn: EnemySpawn) -> Self {
        self.enemies.push(spawn);
        self
    }

    pub fn with_rewards(mut self, exp: u32, gold: u32, items: &[&str]) -> Self {
        self.rewards = Rewards {
            exp,
            gold,
            items: items.iter().map(|s| s.to_string()).collect(),
        };
        self
    }

    pub fn with_boss(mut self, boss: BossSpawn) -> Self {
        self.boss = Some(boss);
        self
    }
}
