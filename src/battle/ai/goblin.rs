use rand::{Rng, RngCore};

use crate::battle::ai::behavior::{standard_action, Action, Behavior};
use crate::battle::ai::decision_context::DecisionContext;
use crate::battle::constants::{
    FLURRY_CHANCE, FLURRY_CLOSE_MAX, FLURRY_CLOSE_MIN, FLURRY_CLOSE_TRIGGER,
    FLURRY_MAX_CONSECUTIVE, FLURRY_RESET_MS,
};

/// Goblins chain quick attacks and stay close while a streak is running
#[derive(Debug, Clone, Default)]
pub struct GoblinBehavior {
    consecutive: u32,
    since_last_attack: f32,
}

impl GoblinBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.consecutive
    }
}

impl Behavior for GoblinBehavior {
    fn name(&self) -> &'static str {
        "goblin"
    }

    fn decide(&mut self, ctx: &DecisionContext, rng: &mut dyn RngCore) -> Action {
        self.since_last_attack += ctx.delta_ms;
        if self.consecutive > 0 && self.since_last_attack > FLURRY_RESET_MS {
            self.consecutive = 0;
        }

        if self.consecutive > 0 && ctx.distance > FLURRY_CLOSE_TRIGGER {
            return Action::Approach {
                min_distance: FLURRY_CLOSE_MIN,
                max_distance: FLURRY_CLOSE_MAX,
            };
        }

        let action = standard_action(ctx);
        if action != Action::BasicAttack {
            return action;
        }

        self.consecutive += 1;
        self.since_last_attack = 0.0;
        if self.consecutive < FLURRY_MAX_CONSECUTIVE && rng.gen::<f64>() < FLURRY_CHANCE {
            Action::Flurry
        } else {
            Action::BasicAttack
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::ai::behavior::tests::context;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_streak_closes_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut goblin = GoblinBehavior::new();

        let first = goblin.decide(&context(90.0), &mut rng);
        assert!(matches!(first, Action::BasicAttack | Action::Flurry));
        assert_eq!(goblin.streak(), 1);

        let next = goblin.decide(&context(120.0), &mut rng);
        assert_eq!(
            next,
            Action::Approach {
                min_distance: 50.0,
                max_distance: 80.0
            }
        );
    }

    #[test]
    fn test_streak_resets_after_quiet_period() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut goblin = GoblinBehavior::new();
        goblin.decide(&context(90.0), &mut rng);

        let quiet = DecisionContext {
            delta_ms: 2100.0,
            attack_ready: false,
            ..context(120.0)
        };
        assert_eq!(goblin.decide(&quiet, &mut rng), Action::Hold);
        assert_eq!(goblin.streak(), 0);
    }

    #[test]
    fn test_follow_ups_are_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut goblin = GoblinBehavior::new();
        let actions: Vec<Action> = (0..50)
            .map(|_| goblin.decide(&context(90.0), &mut rng))
            .collect();
        assert!(actions[2..].iter().all(|a| *a == Action::BasicAttack));
    }
}
