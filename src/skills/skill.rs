//! Skill instances: cooldown, ownership and the shared use gate

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::{Arena, Faction, Position, UnitId};
use crate::skills::area::{self, AreaParams};
use crate::skills::definitions::{SkillDef, SkillEffect, SkillTarget};
use crate::skills::melee::{self, MeleeParams};
use crate::skills::ranged::{self, RangedParams};
use crate::stats::{Expiry, ModifierOp, StatBlock, StatKind, StatModifier};
use crate::units::{Roster, Unit};

/// Default radius for area skills declared without one
pub const DEFAULT_AREA_RADIUS: f32 = 100.0;

/// Variant-specific resolution parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillKind {
    Melee(MeleeParams),
    Ranged(RangedParams),
    Area(AreaParams),
}

impl SkillKind {
    pub fn label(&self) -> &'static str {
        match self {
            SkillKind::Melee(_) => "melee",
            SkillKind::Ranged(_) => "ranged",
            SkillKind::Area(_) => "area",
        }
    }
}

/// Snapshot of the unit using a skill
///
/// Taken before resolution so the roster can be borrowed mutably while the
/// skill runs.
#[derive(Debug, Clone, Copy)]
pub struct Caster {
    pub id: UnitId,
    pub faction: Faction,
    pub position: Position,
    pub stats: StatBlock,
}

/// Everything a skill may touch while resolving
pub struct SkillContext<'a> {
    pub caster: Caster,
    pub roster: &'a mut Roster,
    pub arena: &'a Arena,
    pub rng: &'a mut dyn RngCore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub def: SkillDef,
    pub kind: SkillKind,
    cooldown: f32,
    owner: Option<UnitId>,
}

impl Skill {
    pub fn melee(mut def: SkillDef, params: MeleeParams) -> Self {
        if def.target == SkillTarget::Area {
            tracing::warn!(skill = %def.id, "Melee skill declared with area target, using single");
            def.target = SkillTarget::Single;
        }
        Self::with_kind(def, SkillKind::Melee(params))
    }

    pub fn ranged(mut def: SkillDef, params: RangedParams) -> Self {
        if def.target == SkillTarget::Area {
            tracing::warn!(skill = %def.id, "Ranged skill declared with area target, using single");
            def.target = SkillTarget::Single;
        }
        Self::with_kind(def, SkillKind::Ranged(params))
    }

    pub fn area(mut def: SkillDef, params: AreaParams) -> Self {
        if def.target != SkillTarget::Area {
            def.target = SkillTarget::Area;
        }
        if def.area_radius <= 0.0 {
            tracing::warn!(
                skill = %def.id,
                "Area skill without radius, using {}",
                DEFAULT_AREA_RADIUS
            );
            def.area_radius = DEFAULT_AREA_RADIUS;
        }
        Self::with_kind(def, SkillKind::Area(params))
    }

    fn with_kind(def: SkillDef, kind: SkillKind) -> Self {
        Self {
            def,
            kind,
            cooldown: 0.0,
            owner: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn range(&self) -> f32 {
        self.def.range
    }

    pub fn owner(&self) -> Option<UnitId> {
        self.owner
    }

    /// Bind the skill to its unit; required before the first use
    pub fn set_owner(&mut self, owner: UnitId) {
        self.owner = Some(owner);
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// 0.0 right after use, 1.0 when ready
    pub fn cooldown_progress(&self) -> f32 {
        if self.def.cooldown_ms <= 0.0 {
            return 1.0;
        }
        1.0 - (self.cooldown / self.def.cooldown_ms).clamp(0.0, 1.0)
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0 && self.owner.is_some()
    }

    /// Range check from the caster to the candidate (or the area center)
    pub fn can_target(&self, caster: &Caster, candidate: &Unit) -> bool {
        caster.position.distance(candidate.position) <= self.def.range
    }

    /// Single-target damage and debuffs take opponents, heals and buffs allies
    ///
    /// Area centers are only positions; recipients are filtered on resolution.
    fn accepts_faction(&self, caster: Faction, candidate: Faction) -> bool {
        match self.def.target {
            SkillTarget::SelfOnly | SkillTarget::Area => true,
            SkillTarget::Single if self.def.effect.hits_opponents() => {
                candidate == caster.opposing()
            }
            SkillTarget::Single => candidate == caster,
        }
    }

    pub fn update(&mut self, delta_ms: f32) {
        if delta_ms > 0.0 {
            self.cooldown = (self.cooldown - delta_ms).max(0.0);
        }
    }

    /// Try to use the skill on `target`
    ///
    /// Returns false without side effects when the skill is not ready, or the
    /// target is dead, of the wrong faction or out of range. Otherwise the variant resolves, and only a
    /// successful resolution restarts the cooldown.
    pub fn use_on(&mut self, target: UnitId, ctx: &mut SkillContext<'_>) -> bool {
        if !self.is_ready() {
            return false;
        }
        if self.owner != Some(ctx.caster.id) {
            tracing::warn!(
                skill = %self.def.id,
                caster = %ctx.caster.id,
                "Skill used by a unit that does not own it"
            );
            return false;
        }

        let target = match self.def.target {
            SkillTarget::SelfOnly => ctx.caster.id,
            _ => target,
        };
        let valid = match ctx.roster.get(target) {
            Some(unit) => {
                unit.is_alive()
                    && self.accepts_faction(ctx.caster.faction, unit.faction)
                    && self.can_target(&ctx.caster, unit)
            }
            None => false,
        };
        if !valid {
            return false;
        }

        let resolved = match &self.kind {
            SkillKind::Melee(params) => melee::resolve(&self.def, params, target, ctx),
            SkillKind::Ranged(params) => ranged::resolve(&self.def, params, target, ctx),
            SkillKind::Area(params) => area::resolve(&self.def, params, target, ctx),
        };

        if resolved {
            self.cooldown = self.def.cooldown_ms;
        }
        resolved
    }
}

/// Apply the skill's effect to one recipient
///
/// `magnitude` is the power after any falloff; damage is mitigated by
/// `defense / defense_divisor` and floored at 1. Returns the amount applied.
pub(crate) fn apply_effect(
    def: &SkillDef,
    target: &mut Unit,
    magnitude: f32,
    defense_divisor: f32,
) -> f32 {
    let expiry = if def.duration_ms > 0.0 {
        Expiry::AfterMs(def.duration_ms)
    } else {
        Expiry::Permanent
    };

    match def.effect {
        SkillEffect::Damage => {
            let defense = target.effective_stats().defense;
            let damage = (magnitude - defense / defense_divisor).max(1.0);
            target.take_damage(damage)
        }
        SkillEffect::Heal => target.heal(magnitude),
        SkillEffect::Buff => {
            target.modifiers.push(StatModifier::new(
                def.id.clone(),
                StatKind::Attack,
                ModifierOp::Add(magnitude),
                expiry,
            ));
            magnitude
        }
        SkillEffect::Debuff => {
            target.modifiers.push(StatModifier::new(
                def.id.clone(),
                StatKind::Defense,
                ModifierOp::Add(-magnitude),
                expiry,
            ));
            magnitude
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BattleConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Field {
        roster: Roster,
        arena: Arena,
        rng: ChaCha8Rng,
        hero: UnitId,
        squire: UnitId,
        goblin: UnitId,
    }

    impl Field {
        fn new() -> Self {
            let config = BattleConfig::default();
            let mut roster = Roster::new();
            let stats = StatBlock::new(100.0, 10.0, 5.0, 2.0);
            let hero = roster
                .spawn(Unit::new("Hero", Faction::Player, stats, &config).at(Position::new(100.0, 300.0)));
            let squire = roster
                .spawn(Unit::new("Squire", Faction::Player, stats, &config).at(Position::new(100.0, 350.0)));
            let goblin = roster.spawn(
                Unit::new("Goblin", Faction::Enemy, StatBlock::new(40.0, 8.0, 3.0, 1.5), &config)
                    .at(Position::new(150.0, 300.0)),
            );
            Self {
                roster,
                arena: Arena::default(),
                rng: ChaCha8Rng::seed_from_u64(42),
                hero,
                squire,
                goblin,
            }
        }

        fn cast(&mut self, skill: &mut Skill, target: UnitId) -> bool {
            let caster = self.roster.get(self.hero).unwrap().caster();
            let mut ctx = SkillContext {
                caster,
                roster: &mut self.roster,
                arena: &self.arena,
                rng: &mut self.rng,
            };
            skill.use_on(target, &mut ctx)
        }

        fn health(&self, id: UnitId) -> f32 {
            self.roster.get(id).unwrap().health
        }
    }

    fn slash() -> Skill {
        Skill::melee(
            SkillDef::new("slash", "Slash", 3000.0, 150.0, 15.0),
            MeleeParams::default(),
        )
    }

    fn mend() -> Skill {
        Skill::melee(
            SkillDef::new("mend", "Mend", 4000.0, 150.0, 20.0).with_effect(SkillEffect::Heal),
            MeleeParams::default(),
        )
    }

    #[test]
    fn test_unowned_skill_is_not_ready() {
        let mut field = Field::new();
        let mut skill = slash();
        assert!(!skill.is_ready());
        assert!(!field.cast(&mut skill, field.goblin));
        assert_eq!(skill.cooldown(), 0.0);
        assert_eq!(field.health(field.goblin), 40.0);
    }

    #[test]
    fn test_cooling_down_skill_is_a_no_op() {
        let mut field = Field::new();
        let mut skill = slash();
        skill.set_owner(field.hero);
        assert!(field.cast(&mut skill, field.goblin));
        let health = field.health(field.goblin);

        skill.update(1000.0);
        assert!(!skill.is_ready());
        assert!(!field.cast(&mut skill, field.goblin));
        assert_eq!(skill.cooldown(), 2000.0);
        assert_eq!(field.health(field.goblin), health);
    }

    #[test]
    fn test_dead_target_keeps_cooldown() {
        let mut field = Field::new();
        field.roster.get_mut(field.goblin).unwrap().take_damage(1000.0);
        let mut skill = slash();
        skill.set_owner(field.hero);

        assert!(!field.cast(&mut skill, field.goblin));
        assert_eq!(skill.cooldown(), 0.0);
        assert!(skill.is_ready());
    }

    #[test]
    fn test_damage_skips_allies() {
        let mut field = Field::new();
        let mut skill = slash();
        skill.set_owner(field.hero);

        assert!(!field.cast(&mut skill, field.squire));
        assert_eq!(field.health(field.squire), 100.0);
        assert_eq!(skill.cooldown(), 0.0);
    }

    #[test]
    fn test_heal_skips_opponents() {
        let mut field = Field::new();
        field.roster.get_mut(field.goblin).unwrap().take_damage(20.0);
        field.roster.get_mut(field.squire).unwrap().take_damage(30.0);
        let mut skill = mend();
        skill.set_owner(field.hero);

        assert!(!field.cast(&mut skill, field.goblin));
        assert_eq!(field.health(field.goblin), 20.0);
        assert!(field.cast(&mut skill, field.squire));
        assert_eq!(field.health(field.squire), 90.0);
        assert_eq!(skill.cooldown(), 4000.0);
    }
}
