//! Stage lookup table keyed by id

use serde::{Deserialize, Serialize};

use crate::battle::constants::STAGE_UNLOCK_RATIO;
use crate::core::{BattlerError, Result};
use crate::stages::config::{BossSpawn, EnemySpawn, Rewards, StageConfig};
use crate::stats::StatOverrides;

/// Row of the stage select list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub id: String,
    pub name: String,
    pub recommended_level: u32,
}

/// Ordered stage table; the first entry is the fallback for unknown ids
#[derive(Debug, Clone, Default)]
pub struct StageCatalog {
    stages: Vec<StageConfig>,
}

impl StageCatalog {
    pub fn new(stages: Vec<StageConfig>) -> Self {
        Self { stages }
    }

    /// The goblin forest stages 1-1 to 1-3
    pub fn builtin() -> Self {
        let stage_1_1 = StageConfig {
            description: "The edge of the goblin forest. A gentle start.".to_string(),
            difficulty: 1,
            ..StageConfig::new("1-1", "Goblin Forest 1", 1)
                .with_rewards(50, 30, &["potion_small"])
                .with_enemy(EnemySpawn::new("goblin", 1).at(600.0, 300.0))
        };

        let stage_1_2 = StageConfig {
            description: "Deeper into the forest. Goblins travel in pairs here.".to_string(),
            difficulty: 2,
            ..StageConfig::new("1-2", "Goblin Forest 2", 3)
                .with_rewards(80, 50, &["potion_small", "potion_small"])
                .with_enemy(EnemySpawn::new("goblin", 2).at(550.0, 200.0))
                .with_enemy(EnemySpawn::new("goblin", 2).at(650.0, 400.0))
        };

        let chief = EnemySpawn {
            name: Some("Goblin Chief".to_string()),
            stats: StatOverrides {
                max_health: Some(200.0),
                attack: Some(15.0),
                defense: Some(8.0),
                speed: Some(1.2),
            },
            ..EnemySpawn::new("goblin", 5).at(500.0, 300.0)
        };
        let stage_1_3 = StageConfig {
            description: "The heart of the forest. The goblin chief may show up.".to_string(),
            difficulty: 3,
            ..StageConfig::new("1-3", "Goblin Forest 3", 5)
                .with_rewards(120, 80, &["potion_medium", "armor_goblin"])
                .with_enemy(EnemySpawn::new("goblin", 3).at(500.0, 200.0))
                .with_enemy(EnemySpawn::new("goblin", 3).at(650.0, 300.0))
                .with_enemy(EnemySpawn::new("goblin", 2).at(550.0, 400.0))
                .with_boss(BossSpawn {
                    chance: 0.3,
                    enemy: chief,
                    rewards: Rewards {
                        exp: 200,
                        gold: 150,
                        items: vec!["weapon_goblin_chief".to_string()],
                    },
                })
        };

        Self::new(vec![stage_1_1, stage_1_2, stage_1_3])
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Add a stage, replacing any stage with the same id in place
    pub fn insert(&mut self, config: StageConfig) {
        match self.stages.iter_mut().find(|s| s.id == config.id) {
            Some(existing) => *existing = config,
            None => self.stages.push(config),
        }
    }

    pub fn get(&self, id: &str) -> Option<&StageConfig> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn try_get(&self, id: &str) -> Result<&StageConfig> {
        self.get(id)
            .ok_or_else(|| BattlerError::UnknownStage(id.to_string()))
    }

    /// Stage by id; unknown ids warn and yield the first stage
    pub fn get_or_default(&self, id: &str) -> Option<&StageConfig> {
        match self.get(id) {
            Some(stage) => Some(stage),
            None => {
                let fallback = self.stages.first();
                if let Some(first) = fallback {
                    tracing::warn!(stage = %id, fallback = %first.id, "Unknown stage id");
                }
                fallback
            }
        }
    }

    pub fn available(&self) -> Vec<StageSummary> {
        self.stages
            .iter()
            .map(|s| StageSummary {
                id: s.id.clone(),
                name: s.name.clone(),
                recommended_level: s.recommended_level,
            })
            .collect()
    }

    /// First stage always; others at `ceil(recommended * 0.7)` or above
    pub fn is_unlocked(&self, id: &str, player_level: u32) -> bool {
        let Some(position) = self.stages.iter().position(|s| s.id == id) else {
            return false;
        };
        if position == 0 {
            return true;
        }
        let required = (self.stages[position].recommended_level as f32 * STAGE_UNLOCK_RATIO).ceil();
        player_level as f32 >= required
    }
}
