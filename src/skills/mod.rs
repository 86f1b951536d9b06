//! Skill system
//!
//! A skill is a cooldown-gated, range-gated action bound to one owning unit.
//! Three resolution variants share one gate:
//!
//! - Melee: single target, heavy defense mitigation, optional knockback
//! - Ranged: single target, accuracy roll; a miss still spends the cooldown
//! - Area: everything within a radius of the target; no hits means no cooldown

pub mod area;
pub mod definitions;
pub mod library;
pub mod melee;
pub mod ranged;
pub mod skill;
pub mod unlocks;

pub use area::AreaParams;
pub use definitions::{SkillDef, SkillEffect, SkillTarget};
pub use library::SkillRegistry;
pub use melee::MeleeParams;
pub use ranged::RangedParams;
pub use skill::{Caster, Skill, SkillContext, SkillKind};
pub use unlocks::{enemy_schedule, player_schedule, SkillUnlock};
