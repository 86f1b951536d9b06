//! A single combatant
//!
//! Health, cooldowns, movement intent, skills and progression all live here.
//! Anything that needs a second unit (attacks, skill resolution, targeting
//! lookups) goes through the roster in `battle::execution`.

use crate::battle::ai::{Behavior, SkillChoice, StandardBehavior};
use crate::battle::events::BattleObserver;
use crate::core::{Arena, BattleConfig, Faction, Position, UnitId};
use crate::skills::{Caster, Skill, SkillRegistry, SkillTarget, SkillUnlock};
use crate::stats::{LevelUpGains, ModifierStack, Progression, StatBlock};
use crate::units::enemy::EnemyTraits;

/// Per-unit copy of the config values the tick loop reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTuning {
    pub basic_attack_range: f32,
    pub attack_cooldown_ms: f32,
    pub move_cooldown_ms: f32,
    pub skill_charge_max: f32,
    pub skill_charge_rate: f32,
    pub wander_interval_ms: f32,
    pub arrival_threshold: f32,
    pub approach_min_distance: f32,
    pub approach_max_distance: f32,
    pub experience_growth: f32,
    pub gains: LevelUpGains,
}

impl UnitTuning {
    pub fn from_config(config: &BattleConfig) -> Self {
        Self {
            basic_attack_range: config.basic_attack_range,
            attack_cooldown_ms: config.attack_cooldown_ms,
            move_cooldown_ms: config.move_cooldown_ms,
            skill_charge_max: config.skill_charge_max,
            skill_charge_rate: config.skill_charge_rate,
            wander_interval_ms: config.wander_interval_ms,
            arrival_threshold: config.arrival_threshold,
            approach_min_distance: config.approach_min_distance,
            approach_max_distance: config.approach_max_distance,
            experience_growth: config.experience_growth,
            gains: LevelUpGains::from_config(config),
        }
    }
}

#[derive(Debug)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub faction: Faction,

    /// Base stats, fixed except on level-up
    pub base: StatBlock,
    pub modifiers: ModifierStack,

    /// Always within [0, base.max_health]
    pub health: f32,
    pub position: Position,
    pub movement_target: Option<Position>,
    target: Option<UnitId>,

    /// Counts down to 0
    pub attack_cooldown: f32,
    /// Counts down to 0
    pub move_cooldown: f32,
    /// Counts up to `tuning.skill_charge_max`
    pub skill_charge: f32,
    pub wander_timer: f32,

    pub progression: Progression,
    pub skills: Vec<Skill>,
    pub active_skill_index: usize,
    skill_unlocks: Vec<SkillUnlock>,

    pub behavior: Box<dyn Behavior>,
    /// Present on enemy units only
    pub enemy: Option<EnemyTraits>,

    /// Set once the death hook, loot and bookkeeping ran
    pub death_processed: bool,
    destroyed: bool,
    pub tuning: UnitTuning,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        faction: Faction,
        stats: StatBlock,
        config: &BattleConfig,
    ) -> Self {
        Self {
            id: UnitId(0),
            name: name.into(),
            faction,
            base: stats,
            modifiers: ModifierStack::new(),
            health: stats.max_health.max(0.0),
            position: config.arena.center(),
            movement_target: None,
            target: None,
            attack_cooldown: 0.0,
            move_cooldown: 0.0,
            skill_charge: 0.0,
            wander_timer: 0.0,
            progression: Progression::default(),
            skills: Vec::new(),
            active_skill_index: 0,
            skill_unlocks: Vec::new(),
            behavior: Box::new(StandardBehavior),
            enemy: None,
            death_processed: false,
            destroyed: false,
            tuning: UnitTuning::from_config(config),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_level(self, level: u32) -> Self {
        self.with_progression(Progression::at_level(level))
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_enemy(mut self, traits: EnemyTraits) -> Self {
        self.enemy = Some(traits);
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.add_skill(skill);
        self
    }

    /// Assign the roster id and rebind every owned skill to it
    pub fn bind_id(&mut self, id: UnitId) {
        self.id = id;
        for skill in &mut self.skills {
            skill.set_owner(id);
        }
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn max_health(&self) -> f32 {
        self.base.max_health
    }

    pub fn health_ratio(&self) -> f32 {
        if self.base.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.base.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0 && !self.destroyed
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_player(&self) -> bool {
        self.faction.is_player()
    }

    /// Base stats with every active modifier applied
    pub fn effective_stats(&self) -> StatBlock {
        self.modifiers.apply(&self.base)
    }

    pub fn caster(&self) -> Caster {
        Caster {
            id: self.id,
            faction: self.faction,
            position: self.position,
            stats: self.effective_stats(),
        }
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<UnitId>) {
        self.target = target;
    }

    /// Subtract health, clamped at zero; returns the amount actually removed
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.base.max_health);
        before - self.health
    }

    /// Restore health up to the maximum; the dead stay dead
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.base.max_health);
        self.health - before
    }

    pub fn update_cooldowns(&mut self, delta_ms: f32) {
        let delta = delta_ms.max(0.0);
        self.attack_cooldown = (self.attack_cooldown - delta).max(0.0);
        self.move_cooldown = (self.move_cooldown - delta).max(0.0);
        self.skill_charge = (self.skill_charge + delta * self.tuning.skill_charge_rate)
            .min(self.tuning.skill_charge_max);
        for skill in &mut self.skills {
            skill.update(delta);
        }
        self.modifiers.tick(delta);
    }

    /// Step toward the movement target at `speed` units per tick
    pub fn update_movement(&mut self, arena: &Arena) {
        if self.move_cooldown > 0.0 {
            return;
        }
        let Some(destination) = self.movement_target else {
            return;
        };

        let distance = self.position.distance(destination);
        if distance < self.tuning.arrival_threshold {
            self.movement_target = None;
            return;
        }

        let step = self.effective_stats().speed;
        if step >= distance {
            self.position = arena.clamp(destination);
            self.movement_target = None;
        } else {
            let direction = (destination - self.position) / distance;
            self.position = arena.clamp(self.position + direction * step);
        }
    }

    /// Set a movement intent; walking starts once the move cooldown expires
    pub fn set_movement_target(&mut self, point: Position) {
        self.movement_target = Some(point);
        self.move_cooldown = self.tuning.move_cooldown_ms;
    }

    /// A new intent may be issued only when idle and off cooldown
    pub fn can_issue_move(&self) -> bool {
        self.movement_target.is_none() && self.move_cooldown <= 0.0
    }

    pub fn reset_attack_cooldown(&mut self) {
        self.attack_cooldown = self.tuning.attack_cooldown_ms;
    }

    /// Pick the skill to fire at a target `distance` away
    ///
    /// Among ready skills with the target in range, the active index wins,
    /// then inventory order. Self-targeted skills are always in range.
    pub fn choose_skill(&self, distance: f32) -> SkillChoice {
        let in_range = |skill: &Skill| {
            skill.def.target == SkillTarget::SelfOnly || distance <= skill.range()
        };

        let mut any_ready = false;
        let mut first = None;
        for (index, skill) in self.skills.iter().enumerate() {
            if !skill.is_ready() {
                continue;
            }
            any_ready = true;
            if in_range(skill) {
                if index == self.active_skill_index {
                    return SkillChoice::InRange(index);
                }
                first.get_or_insert(index);
            }
        }

        match first {
            Some(index) => SkillChoice::InRange(index),
            None if any_ready => SkillChoice::OutOfRange,
            None => SkillChoice::None,
        }
    }

    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.iter().any(|s| s.id() == id)
    }

    pub fn add_skill(&mut self, mut skill: Skill) {
        skill.set_owner(self.id);
        self.skills.push(skill);
    }

    pub fn skill_unlocks(&self) -> &[SkillUnlock] {
        &self.skill_unlocks
    }

    /// Replace the unlock schedule and grant everything at or below the
    /// current level
    pub fn set_skill_unlocks(&mut self, rules: Vec<SkillUnlock>, registry: &SkillRegistry) {
        self.skill_unlocks = rules;
        let level = self.level();
        let due: Vec<String> = self
            .skill_unlocks
            .iter()
            .filter(|rule| rule.level <= level)
            .map(|rule| rule.skill_id.clone())
            .collect();
        for id in due {
            if self.has_skill(&id) {
                continue;
            }
            if let Some(skill) = registry.instantiate(&id) {
                self.add_skill(skill);
            }
        }
    }

    /// Grant experience, looping through every threshold crossed
    ///
    /// Each level restores health to the new maximum and evaluates the
    /// unlock schedule. Returns whether at least one level was gained.
    pub fn add_experience(
        &mut self,
        exp: u32,
        registry: &SkillRegistry,
        observer: &mut dyn BattleObserver,
    ) -> bool {
        if exp == 0 {
            return false;
        }
        observer.on_experience_gained(self.id, exp);

        let previous = self.level();
        let gained = self.progression.gain(exp, self.tuning.experience_growth);
        if gained == 0 {
            return false;
        }

        self.tuning.gains.apply(&mut self.base, gained);
        self.health = self.base.max_health;

        for level in previous + 1..=self.level() {
            tracing::info!(unit = %self.name, level, "Level up");
            observer.on_level_up(self.id, level);
            self.unlock_for_level(level, registry, observer);
        }
        true
    }

    fn unlock_for_level(
        &mut self,
        level: u32,
        registry: &SkillRegistry,
        observer: &mut dyn BattleObserver,
    ) {
        let due: Vec<SkillUnlock> = self
            .skill_unlocks
            .iter()
            .filter(|rule| rule.level == level)
            .cloned()
            .collect();
        for rule in due {
            if self.has_skill(&rule.skill_id) {
                continue;
            }
            let Some(skill) = registry.instantiate(&rule.skill_id) else {
                continue;
            };
            tracing::info!(unit = %self.name, skill = %rule.skill_id, "Skill unlocked");
            observer.on_skill_unlocked(self.id, &rule.skill_id, rule.message.as_deref());
            self.add_skill(skill);
        }
    }

    /// Mark destroyed; no further ticks are delivered
    pub fn cleanup(&mut self) {
        self.movement_target = None;
        self.target = None;
        self.destroyed = true;
    }
}
