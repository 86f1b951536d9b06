//! Static skill parameters shared by every variant

use serde::{Deserialize, Serialize};

/// Who a skill lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTarget {
    Single,
    Area,
    SelfOnly,
}

/// What a skill does to whoever it lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEffect {
    Damage,
    Heal,
    Buff,
    Debuff,
}

impl SkillEffect {
    /// Damage and debuffs go to the other side, heals and buffs to allies
    pub fn hits_opponents(self) -> bool {
        matches!(self, SkillEffect::Damage | SkillEffect::Debuff)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Cooldown restored after a successful use (ms)
    pub cooldown_ms: f32,
    pub target: SkillTarget,
    pub effect: SkillEffect,
    pub range: f32,
    /// Base magnitude: damage, heal amount, or modifier size
    pub power: f32,
    #[serde(default)]
    pub area_radius: f32,
    /// Lifetime of buff/debuff modifiers (ms); 0 means permanent
    #[serde(default)]
    pub duration_ms: f32,
}

impl SkillDef {
    pub fn new(id: &str, name: &str, cooldown_ms: f32, range: f32, power: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            cooldown_ms,
            target: SkillTarget::Single,
            effect: SkillEffect::Damage,
            range,
            power,
            area_radius: 0.0,
            duration_ms: 0.0,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_target(mut self, target: SkillTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.area_radius = radius;
        self
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
