//! Load stage tables from TOML
//!
//! ```toml
//! [[stages]]
//! id = "2-1"
//! name = "Orc Camp"
//! recommended_level = 6
//! rewards = { exp = 150, gold = 90, items = ["iron_ore"] }
//!
//! [[stages.enemies]]
//! species = "orc"
//! level = 5
//! position = [600.0, 300.0]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::{BattlerError, Result};
use crate::stages::catalog::StageCatalog;
use crate::stages::config::StageConfig;

#[derive(Debug, Deserialize)]
struct StageFile {
    #[serde(default)]
    stages: Vec<StageConfig>,
}

/// Parse a stage table; ids must be unique and every stage needs an enemy
pub fn parse_stages_toml(content: &str) -> Result<Vec<StageConfig>> {
    let file: StageFile = toml::from_str(content)?;
    for (index, stage) in file.stages.iter().enumerate() {
        if stage.enemies.is_empty() {
            return Err(BattlerError::InvalidConfig(format!(
                "stage {} has no enemies",
                stage.id
            )));
        }
        if file.stages[..index].iter().any(|s| s.id == stage.id) {
            return Err(BattlerError::InvalidConfig(format!(
                "duplicate stage id {}",
                stage.id
            )));
        }
        if let Some(boss) = &stage.boss {
            if !(0.0..=1.0).contains(&boss.chance) {
                return Err(BattlerError::InvalidConfig(format!(
                    "stage {} boss chance {} outside [0, 1]",
                    stage.id, boss.chance
                )));
            }
        }
    }
    Ok(file.stages)
}

pub fn load_stages(path: &Path) -> Result<StageCatalog> {
    let content = fs::read_to_string(path)?;
    let stages = parse_stages_toml(&content)?;
    tracing::info!(path = %path.display(), count = stages.len(), "Loaded stages");
    Ok(StageCatalog::new(stages))
}
