//! Hooks the combat core fires toward presentation code
//!
//! All hooks are fire-and-forget with no-op defaults, so an observer only
//! implements what it cares about.

use serde::{Deserialize, Serialize};

use crate::battle::result::BattleResult;
use crate::core::UnitId;

pub trait BattleObserver {
    /// A basic attack (or follow-up hit) landed
    fn on_attack_effect(&mut self, _attacker: UnitId, _target: UnitId, _damage: f32) {}

    /// A skill or charged strike was used
    fn on_skill_effect(&mut self, _caster: UnitId, _target: UnitId, _skill_id: &str) {}

    /// Health reached 0; fired once, before cleanup
    fn on_unit_death(&mut self, _unit: UnitId) {}

    fn on_level_up(&mut self, _unit: UnitId, _level: u32) {}

    fn on_skill_unlocked(&mut self, _unit: UnitId, _skill_id: &str, _message: Option<&str>) {}

    fn on_experience_gained(&mut self, _unit: UnitId, _amount: u32) {}

    /// Fired exactly once per battle
    fn on_battle_ended(&mut self, _result: &BattleResult) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    Attack {
        attacker: UnitId,
        target: UnitId,
        damage: f32,
    },
    Skill {
        caster: UnitId,
        target: UnitId,
        skill: String,
    },
    Death {
        unit: UnitId,
    },
    LevelUp {
        unit: UnitId,
        level: u32,
    },
    SkillUnlocked {
        unit: UnitId,
        skill: String,
        message: Option<String>,
    },
    Experience {
        unit: UnitId,
        amount: u32,
    },
    BattleEnded {
        result: BattleResult,
    },
}

/// Observer that records every hook call in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BattleObserver for EventLog {
    fn on_attack_effect(&mut self, attacker: UnitId, target: UnitId, damage: f32) {
        self.events.push(BattleEvent::Attack {
            attacker,
            target,
            damage,
        });
    }

    fn on_skill_effect(&mut self, caster: UnitId, target: UnitId, skill_id: &str) {
        self.events.push(BattleEvent::Skill {
            caster,
            target,
            skill: skill_id.to_string(),
        });
    }

    fn on_unit_death(&mut self, unit: UnitId) {
        self.events.push(BattleEvent::Death { unit });
    }

    fn on_level_up(&mut self, unit: UnitId, level: u32) {
        self.events.push(BattleEvent::LevelUp { unit, level });
    }

    fn on_skill_unlocked(&mut self, unit: UnitId, skill_id: &str, message: Option<&str>) {
        self.events.push(BattleEvent::SkillUnlocked {
            unit,
            skill: skill_id.to_string(),
            message: message.map(str::to_string),
        });
    }

    fn on_experience_gained(&mut self, unit: UnitId, amount: u32) {
        self.events.push(BattleEvent::Experience { unit, amount });
    }

    fn on_battle_ended(&mut self, result: &BattleResult) {
        self.events.push(BattleEvent::BattleEnded {
            result: result.clone(),
        });
    }
}
