use rand::RngCore;

use crate::battle::ai::behavior::{standard_action, Action, Behavior};
use crate::battle::ai::decision_context::DecisionContext;
use crate::battle::constants::{
    ENRAGE_CLOSE_MAX, ENRAGE_CLOSE_MIN, ENRAGE_HEALTH_RATIO, ENRAGE_MULTIPLIER, ENRAGE_RANGE_SLACK,
    ENRAGE_SOURCE,
};
use crate::stats::{Expiry, ModifierOp, StatKind, StatModifier};

/// Orcs enrage once when badly hurt, then press into melee
#[derive(Debug, Clone, Default)]
pub struct OrcBehavior {
    enraged: bool,
}

impl OrcBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }
}

impl Behavior for OrcBehavior {
    fn name(&self) -> &'static str {
        "orc"
    }

    fn decide(&mut self, ctx: &DecisionContext, _rng: &mut dyn RngCore) -> Action {
        let action = standard_action(ctx);
        if self.enraged
            && !action.is_attack()
            && ctx.distance > ctx.basic_attack_range - ENRAGE_RANGE_SLACK
        {
            return Action::Approach {
                min_distance: ENRAGE_CLOSE_MIN,
                max_distance: ENRAGE_CLOSE_MAX,
            };
        }
        action
    }

    fn triggered_modifiers(&mut self, ctx: &DecisionContext) -> Vec<StatModifier> {
        if self.enraged || ctx.health_ratio <= 0.0 || ctx.health_ratio > ENRAGE_HEALTH_RATIO {
            return Vec::new();
        }
        self.enraged = true;
        [StatKind::Attack, StatKind::Speed]
            .into_iter()
            .map(|stat| {
                StatModifier::new(
                    ENRAGE_SOURCE,
                    stat,
                    ModifierOp::Multiply(ENRAGE_MULTIPLIER),
                    Expiry::Permanent,
                )
            })
            .collect()
    }
}
