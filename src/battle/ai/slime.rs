use rand::{Rng, RngCore};

use crate::battle::ai::behavior::{standard_action, Action, Behavior};
use crate::battle::ai::decision_context::DecisionContext;
use crate::battle::constants::{
    DASH_CHANCE, DASH_CONTACT_DISTANCE, DASH_COOLDOWN_MS, DASH_DURATION_MS, DASH_SPEED_MULTIPLIER,
};
use crate::core::Position;

/// Slimes occasionally dash straight at their target
#[derive(Debug, Clone, Default)]
pub struct SlimeBehavior {
    dash_cooldown: f32,
    dash_remaining: f32,
    direction: Option<Position>,
}

impl SlimeBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dashing(&self) -> bool {
        self.direction.is_some()
    }

    fn end_dash(&mut self) {
        self.direction = None;
        self.dash_remaining = 0.0;
        self.dash_cooldown = DASH_COOLDOWN_MS;
        tracing::debug!("Slime dash ended");
    }
}

impl Behavior for SlimeBehavior {
    fn name(&self) -> &'static str {
        "slime"
    }

    fn decide(&mut self, ctx: &DecisionContext, rng: &mut dyn RngCore) -> Action {
        if let Some(direction) = self.direction {
            self.dash_remaining -= ctx.delta_ms;
            if ctx.distance < DASH_CONTACT_DISTANCE {
                self.end_dash();
                return if ctx.attack_ready {
                    Action::BasicAttack
                } else {
                    Action::Hold
                };
            }
            if self.dash_remaining > 0.0 {
                return Action::Dash {
                    direction,
                    step: ctx.speed * DASH_SPEED_MULTIPLIER,
                };
            }
            self.end_dash();
        }

        self.dash_cooldown = (self.dash_cooldown - ctx.delta_ms).max(0.0);
        if self.dash_cooldown <= 0.0
            && ctx.distance >= DASH_CONTACT_DISTANCE
            && rng.gen::<f64>() < DASH_CHANCE
        {
            let direction = ctx.bearing();
            if direction != Position::ZERO {
                self.direction = Some(direction);
                self.dash_remaining = DASH_DURATION_MS;
                tracing::debug!("Slime dash started");
                return Action::Dash {
                    direction,
                    step: ctx.speed * DASH_SPEED_MULTIPLIER,
                };
            }
        }

        standard_action(ctx)
    }
}
