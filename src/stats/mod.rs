//! Unit statistics: base blocks, level scaling, modifiers, progression
//!
//! Base stats are fixed when a unit spawns. Everything that changes them
//! mid-battle (enrage, buffs, debuffs) goes through a [`ModifierStack`]
//! layered on top, so the base block never mutates outside a level-up.

pub mod block;
pub mod growth;
pub mod modifiers;
pub mod progression;

pub use block::{StatBlock, StatKind, StatOverrides};
pub use growth::{exp_reward_at_level, scale_stat, stats_at_level};
pub use modifiers::{Expiry, ModifierOp, ModifierStack, StatModifier};
pub use progression::{LevelUpGains, Progression};
