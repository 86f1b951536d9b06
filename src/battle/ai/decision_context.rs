//! A unit's view of the fight at decision time
//!
//! Built fresh each tick as an owned snapshot so behaviors never hold
//! borrows into the roster.

use crate::core::Position;
use crate::units::Unit;

/// Which owned skill, if any, the unit could fire this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillChoice {
    /// No skill is ready
    None,
    /// A ready skill has the target in range
    InRange(usize),
    /// Skills are ready but the target is too far for all of them
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    pub delta_ms: f32,
    pub position: Position,
    pub target_position: Position,
    pub distance: f32,
    pub health_ratio: f32,
    pub attack_ready: bool,
    pub charge_full: bool,
    /// A movement target is already set
    pub move_pending: bool,
    pub can_move: bool,
    /// Effective speed (after modifiers)
    pub speed: f32,
    pub basic_attack_range: f32,
    pub approach_min: f32,
    pub approach_max: f32,
    pub skill: SkillChoice,
}

impl DecisionContext {
    pub fn observe(unit: &Unit, target_position: Position, delta_ms: f32) -> Self {
        let distance = unit.position.distance(target_position);
        Self {
            delta_ms,
            position: unit.position,
            target_position,
            distance,
            health_ratio: unit.health_ratio(),
            attack_ready: unit.attack_cooldown <= 0.0,
            charge_full: unit.skill_charge >= unit.tuning.skill_charge_max,
            move_pending: unit.movement_target.is_some(),
            can_move: unit.move_cooldown <= 0.0,
            speed: unit.effective_stats().speed,
            basic_attack_range: unit.tuning.basic_attack_range,
            approach_min: unit.tuning.approach_min_distance,
            approach_max: unit.tuning.approach_max_distance,
            skill: unit.choose_skill(distance),
        }
    }

    pub fn in_basic_range(&self) -> bool {
        self.distance < self.basic_attack_range
    }

    /// Bearing from the unit to its target; zero when stacked
    pub fn bearing(&self) -> Position {
        (self.target_position - self.position).normalize_or_zero()
    }
}
