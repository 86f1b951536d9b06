//! Battle system - tick-driven combat between the player and a stage's enemies
//!
//! - `ai`: per-species behaviors deciding one action per tick
//! - `execution`: carries out actions against the roster
//! - `orchestrator`: owns the roster, stage, RNG and observer for one encounter

pub mod ai;
pub mod constants;
pub mod events;
pub mod execution;
pub mod orchestrator;
pub mod result;

pub use constants::*;
pub use events::{BattleEvent, BattleObserver, EventLog, NullObserver};
pub use execution::{basic_attack, charged_strike, tick_unit, use_skill, CombatEnv};
pub use orchestrator::Battle;
pub use result::BattleResult;
