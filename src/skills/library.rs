//! Skill registry keyed by id
//!
//! Unlock schedules and stage data refer to skills by id only; the registry
//! turns an id into a fresh, unowned instance.

use ahash::AHashMap;

use crate::core::{BattlerError, Result};
use crate::skills::area::AreaParams;
use crate::skills::definitions::{SkillDef, SkillTarget};
use crate::skills::melee::MeleeParams;
use crate::skills::ranged::RangedParams;
use crate::skills::skill::Skill;

#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    templates: AHashMap<String, Skill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the six stock skills
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Skill::melee(
            SkillDef::new("melee_basic", "Slash", 3000.0, 150.0, 15.0)
                .described("A quick blade strike"),
            MeleeParams::default(),
        ));
        registry.register(Skill::melee(
            SkillDef::new("melee_power", "Power Strike", 5000.0, 150.0, 25.0)
                .described("A heavy blow that knocks the target back"),
            MeleeParams { knockback: 40.0 },
        ));
        registry.register(Skill::ranged(
            SkillDef::new("range_basic", "Arrow", 4000.0, 300.0, 12.0)
                .described("A single arrow"),
            RangedParams {
                accuracy: 0.9,
                projectile_speed: 400.0,
            },
        ));
        registry.register(Skill::ranged(
            SkillDef::new("range_precision", "Precision Shot", 6000.0, 400.0, 20.0)
                .described("A carefully aimed long shot"),
            RangedParams {
                accuracy: 0.98,
                projectile_speed: 600.0,
            },
        ));
        registry.register(Skill::area(
            SkillDef::new("area_basic", "Fireball", 6000.0, 200.0, 14.0)
                .described("Explodes around the target")
                .with_target(SkillTarget::Area)
                .with_radius(150.0),
            AreaParams::default(),
        ));
        registry.register(Skill::area(
            SkillDef::new("area_large", "Meteor", 9000.0, 250.0, 18.0)
                .described("Strikes up to five nearby foes")
                .with_target(SkillTarget::Area)
                .with_radius(220.0),
            AreaParams {
                max_targets: Some(5),
                ..Default::default()
            },
        ));

        registry
    }

    /// Add or replace a template
    pub fn register(&mut self, skill: Skill) {
        self.templates.insert(skill.id().to_string(), skill);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Fresh copy of a template; unknown ids warn and yield None
    pub fn instantiate(&self, id: &str) -> Option<Skill> {
        let skill = self.templates.get(id).cloned();
        if skill.is_none() {
            tracing::warn!(skill = %id, "Unknown skill id, skipping");
        }
        skill
    }

    pub fn try_instantiate(&self, id: &str) -> Result<Skill> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| BattlerError::UnknownSkill(id.to_string()))
    }
}
