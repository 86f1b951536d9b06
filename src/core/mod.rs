pub mod arena;
pub mod config;
pub mod error;
pub mod types;

pub use arena::Arena;
pub use config::BattleConfig;
pub use error::{BattlerError, Result};
pub use types::{Faction, Position, UnitId};
