use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::UnitId;
use crate::skills::definitions::SkillDef;
use crate::skills::skill::{apply_effect, SkillContext};

pub const DEFAULT_ACCURACY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedParams {
    /// Hit probability per use
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    /// Presentation only; resolution is instant
    #[serde(default)]
    pub projectile_speed: f32,
}

fn default_accuracy() -> f64 {
    DEFAULT_ACCURACY
}

impl Default for RangedParams {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            projectile_speed: 0.0,
        }
    }
}

/// Accuracy roll, then `max(1, power - defense / 4)` on a hit
///
/// A miss still counts as a use: the cooldown restarts either way.
pub(crate) fn resolve(
    def: &SkillDef,
    params: &RangedParams,
    target: UnitId,
    ctx: &mut SkillContext<'_>,
) -> bool {
    if !ctx.roster.is_alive(target) {
        return false;
    }
    let roll: f64 = ctx.rng.gen();
    if roll > params.accuracy {
        tracing::debug!(skill = %def.id, caster = %ctx.caster.id, %target, "Ranged skill missed");
        return true;
    }

    match ctx.roster.get_mut(target) {
        Some(unit) => {
            apply_effect(def, unit, def.power, 4.0);
            true
        }
        None => false,
    }
}
