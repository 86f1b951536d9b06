use serde::{Deserialize, Serialize};

use crate::core::UnitId;
use crate::skills::definitions::SkillDef;
use crate::skills::skill::{apply_effect, SkillContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeleeParams {
    /// Distance the target is pushed away from the caster; 0 disables
    #[serde(default)]
    pub knockback: f32,
}

/// Single target, damage `max(1, power - defense / 2)`, then knockback
pub(crate) fn resolve(
    def: &SkillDef,
    params: &MeleeParams,
    target: UnitId,
    ctx: &mut SkillContext<'_>,
) -> bool {
    let origin = ctx.caster.position;
    let Some(unit) = ctx.roster.get_mut(target).filter(|u| u.is_alive()) else {
        return false;
    };

    apply_effect(def, unit, def.power, 2.0);

    if params.knockback > 0.0 && target != ctx.caster.id {
        let direction = (unit.position - origin).normalize_or_zero();
        unit.position = ctx.arena.clamp(unit.position + direction * params.knockback);
    }
    true
}
