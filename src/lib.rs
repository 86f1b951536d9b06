//! Autobattler - tick-driven auto-battler combat and progression core
//!
//! A battle advances in fixed-order frames: every player unit, then the
//! active stage (its enemies, deaths, end conditions). Time only moves when
//! a caller passes a delta, and every random roll comes from a seeded RNG,
//! so a battle replays exactly from its seed.

pub mod battle;
pub mod core;
pub mod player;
pub mod skills;
pub mod stages;
pub mod stats;
pub mod units;
