//! Combatants: the unit state machine, the per-battle roster, and the
//! enemy side (species table, spawn blueprints, loot)

pub mod enemy;
pub mod loot;
pub mod roster;
pub mod species;
pub mod unit;

pub use enemy::{EnemyBlueprint, EnemyTraits};
pub use loot::{DropEntry, DropTable};
pub use roster::Roster;
pub use species::{Bestiary, Species, SpeciesProfile};
pub use unit::{Unit, UnitTuning};
