use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::UnitId;
use crate::skills::definitions::SkillDef;
use crate::skills::skill::{apply_effect, SkillContext};

pub const DEFAULT_FALLOFF_RATE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaParams {
    /// Scale power down linearly with distance from the center
    #[serde(default = "default_falloff")]
    pub falloff: bool,
    /// Fraction of power lost at the radius edge
    #[serde(default = "default_falloff_rate")]
    pub falloff_rate: f32,
    /// Nearest-first cap on recipients
    #[serde(default)]
    pub max_targets: Option<usize>,
}

fn default_falloff() -> bool {
    true
}

fn default_falloff_rate() -> f32 {
    DEFAULT_FALLOFF_RATE
}

impl Default for AreaParams {
    fn default() -> Self {
        Self {
            falloff: true,
            falloff_rate: DEFAULT_FALLOFF_RATE,
            max_targets: None,
        }
    }
}

impl AreaParams {
    pub fn multiplier(&self, distance: f32, radius: f32) -> f32 {
        if !self.falloff || radius <= 0.0 {
            return 1.0;
        }
        1.0 - (distance / radius).min(1.0) * self.falloff_rate
    }
}

/// Hit every qualifying living unit within the radius of `center`
///
/// Damage and debuffs select the caster's opponents, heals and buffs its
/// allies. The caster itself is never a recipient. No recipients means the
/// skill fails and keeps its cooldown.
pub(crate) fn resolve(
    def: &SkillDef,
    params: &AreaParams,
    center: UnitId,
    ctx: &mut SkillContext<'_>,
) -> bool {
    let Some(center) = ctx.roster.get(center).map(|unit| unit.position) else {
        return false;
    };
    let faction = if def.effect.hits_opponents() {
        ctx.caster.faction.opposing()
    } else {
        ctx.caster.faction
    };
    let radius = def.area_radius;
    let caster = ctx.caster.id;

    let mut recipients: Vec<(UnitId, f32)> = ctx
        .roster
        .living(Some(faction))
        .filter(|unit| unit.id != caster)
        .map(|unit| (unit.id, unit.position.distance(center)))
        .filter(|(_, distance)| *distance <= radius)
        .collect();

    if recipients.is_empty() {
        return false;
    }

    recipients.sort_by_key(|(_, distance)| OrderedFloat(*distance));
    if let Some(max) = params.max_targets {
        recipients.truncate(max);
    }

    for (id, distance) in recipients {
        if let Some(unit) = ctx.roster.get_mut(id) {
            let magnitude = def.power * params.multiplier(distance, radius);
            apply_effect(def, unit, magnitude, 3.0);
        }
    }
    true
}
