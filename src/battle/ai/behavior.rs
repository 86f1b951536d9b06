//! The decide-next-action interface and the shared decision table

use rand::RngCore;
use std::fmt::Debug;

use crate::battle::ai::decision_context::{DecisionContext, SkillChoice};
use crate::core::Position;
use crate::stats::StatModifier;

/// What a unit does this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Hold,
    UseSkill(usize),
    BasicAttack,
    ChargedStrike,
    /// Basic attack plus a weaker follow-up hit
    Flurry,
    /// Pick a point on a ring around the target and walk there
    Approach { min_distance: f32, max_distance: f32 },
    /// Move along `direction` by `step` this tick, ignoring move cooldown
    Dash { direction: Position, step: f32 },
}

impl Action {
    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            Action::UseSkill(_) | Action::BasicAttack | Action::ChargedStrike | Action::Flurry
        )
    }
}

/// AI strategy attached to a unit at spawn time
pub trait Behavior: Debug + Send {
    fn name(&self) -> &'static str;

    fn decide(&mut self, ctx: &DecisionContext, rng: &mut dyn RngCore) -> Action;

    /// Modifiers the strategy wants applied to its own unit this tick
    fn triggered_modifiers(&mut self, _ctx: &DecisionContext) -> Vec<StatModifier> {
        Vec::new()
    }
}

/// Decision table every behavior starts from
///
/// 1. ready skill with the target in range: use it
/// 2. ready skill but out of range: close in
/// 3. in basic range with attack ready: charged strike if charged, else basic
/// 4. in basic range on cooldown: hold
/// 5. otherwise close in
pub fn standard_action(ctx: &DecisionContext) -> Action {
    let approach = Action::Approach {
        min_distance: ctx.approach_min,
        max_distance: ctx.approach_max,
    };

    match ctx.skill {
        SkillChoice::InRange(index) => return Action::UseSkill(index),
        SkillChoice::OutOfRange => return approach,
        SkillChoice::None => {}
    }

    if ctx.in_basic_range() {
        if !ctx.attack_ready {
            Action::Hold
        } else if ctx.charge_full {
            Action::ChargedStrike
        } else {
            Action::BasicAttack
        }
    } else {
        approach
    }
}

/// Plain decision table, used by the player and as the fallback species AI
#[derive(Debug, Clone, Default)]
pub struct StandardBehavior;

impl Behavior for StandardBehavior {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn decide(&mut self, ctx: &DecisionContext, _rng: &mut dyn RngCore) -> Action {
        standard_action(ctx)
    }
}
