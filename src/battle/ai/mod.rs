//! Unit AI: per-tick decision making
//!
//! Architecture: trait + snapshot
//! - Behavior trait is the swappable strategy, chosen per species at spawn
//! - DecisionContext is an owned snapshot of the unit and its target
//! - Execution of the returned Action lives in battle::execution

pub mod behavior;
pub mod decision_context;
pub mod goblin;
pub mod orc;
pub mod slime;

pub use behavior::{standard_action, Action, Behavior, StandardBehavior};
pub use decision_context::{DecisionContext, SkillChoice};
pub use goblin::GoblinBehavior;
pub use orc::OrcBehavior;
pub use slime::SlimeBehavior;
