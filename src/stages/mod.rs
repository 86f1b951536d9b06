//! Stages: encounter definitions, the encounter lifecycle and the stage table

pub mod catalog;
pub mod config;
pub mod loader;
pub mod stage;

pub use catalog::{StageCatalog, StageSummary};
pub use config::{BossSpawn, EnemySpawn, Rewards, StageConfig};
pub use loader::{load_stages, parse_stages_toml};
pub use stage::{DefeatRecord, Stage, StageResult, StageStatus};
