//! Per-tick unit execution
//!
//! Order per unit: cooldowns, movement, AI decision, action, wander timer.
//! The unit is skipped entirely without a target, and the AI only runs
//! while that target is alive.

use rand::{Rng, RngCore};
use std::f32::consts::TAU;

use crate::battle::ai::{standard_action, Action, DecisionContext, SkillChoice};
use crate::battle::constants::{
    BASIC_ATTACK_DEFENSE_DIVISOR, CHARGED_STRIKE_ID, CHARGED_STRIKE_MIN_DAMAGE,
    CHARGED_STRIKE_MULTIPLIER, FLURRY_DEFENSE_DIVISOR, MIN_DAMAGE,
};
use crate::battle::events::BattleObserver;
use crate::core::{BattleConfig, Position, UnitId};
use crate::skills::{SkillContext, SkillRegistry};
use crate::units::{Bestiary, Roster};

/// Shared read-only tables plus the mutable services a tick needs
pub struct CombatEnv<'a> {
    pub config: &'a BattleConfig,
    pub skills: &'a SkillRegistry,
    pub bestiary: &'a Bestiary,
    pub rng: &'a mut dyn RngCore,
    pub observer: &'a mut dyn BattleObserver,
}

/// Advance one unit by `delta_ms`; returns the action it executed
pub fn tick_unit(
    roster: &mut Roster,
    id: UnitId,
    delta_ms: f32,
    env: &mut CombatEnv<'_>,
) -> Option<Action> {
    let arena = env.config.arena;
    let target = {
        let unit = roster.get_mut(id)?;
        if !unit.is_alive() {
            return None;
        }
        let target = unit.target()?;
        unit.update_cooldowns(delta_ms);
        unit.update_movement(&arena);
        target
    };

    let target_position = roster
        .get(target)
        .filter(|t| t.is_alive())
        .map(|t| t.position)?;

    let action = {
        let unit = roster.get_mut(id)?;
        let mut ctx = DecisionContext::observe(unit, target_position, delta_ms);
        let triggered = unit.behavior.triggered_modifiers(&ctx);
        if !triggered.is_empty() {
            for modifier in triggered {
                tracing::info!(unit = %unit.name, source = %modifier.source, "Modifier triggered");
                unit.modifiers.push(modifier);
            }
            ctx = DecisionContext::observe(unit, target_position, delta_ms);
        }
        unit.behavior.decide(&ctx, &mut *env.rng)
    };

    let executed = execute(roster, id, target, target_position, action, env);
    update_wander(roster, id, target_position, delta_ms, env);
    Some(executed)
}

/// Carry out `action`; a failed skill falls back to the non-skill table
fn execute(
    roster: &mut Roster,
    id: UnitId,
    target: UnitId,
    target_position: Position,
    action: Action,
    env: &mut CombatEnv<'_>,
) -> Action {
    match action {
        Action::Hold => {}
        Action::UseSkill(index) => {
            if use_skill(roster, id, target, index, env) {
                return action;
            }
            let Some(unit) = roster.get(id) else {
                return Action::Hold;
            };
            let ctx = DecisionContext {
                skill: SkillChoice::None,
                ..DecisionContext::observe(unit, target_position, 0.0)
            };
            let fallback = standard_action(&ctx);
            return execute(roster, id, target, target_position, fallback, env);
        }
        Action::BasicAttack => {
            basic_attack(roster, id, target, env);
        }
        Action::ChargedStrike => {
            charged_strike(roster, id, target, env);
        }
        Action::Flurry => {
            basic_attack(roster, id, target, env);
            follow_up(roster, id, target, env);
        }
        Action::Approach {
            min_distance,
            max_distance,
        } => {
            approach(roster, id, target_position, min_distance, max_distance, env);
        }
        Action::Dash { direction, step } => {
            if let Some(unit) = roster.get_mut(id) {
                unit.position = env.config.arena.clamp(unit.position + direction * step);
            }
        }
    }
    action
}

/// Attack and defense of the two parties, if both can fight
fn duel_stats(roster: &Roster, attacker: UnitId, target: UnitId) -> Option<(f32, f32)> {
    let attack = roster.get(attacker)?.effective_stats().attack;
    let victim = roster.get(target).filter(|t| t.is_alive())?;
    Some((attack, victim.effective_stats().defense))
}

fn strike(roster: &mut Roster, target: UnitId, damage: f32) -> Option<f32> {
    let victim = roster.get_mut(target)?;
    Some(victim.take_damage(damage))
}

/// `max(1, attack - defense / 2)`, then the attack cooldown restarts
pub fn basic_attack(
    roster: &mut Roster,
    attacker: UnitId,
    target: UnitId,
    env: &mut CombatEnv<'_>,
) -> Option<f32> {
    let (attack, defense) = duel_stats(roster, attacker, target)?;
    let damage = (attack - defense / BASIC_ATTACK_DEFENSE_DIVISOR).max(MIN_DAMAGE);
    strike(roster, target, damage)?;
    if let Some(unit) = roster.get_mut(attacker) {
        unit.reset_attack_cooldown();
    }
    env.observer.on_attack_effect(attacker, target, damage);
    Some(damage)
}

/// Goblin follow-up hit: `max(1, floor(attack / 2 - defense / 3))`
fn follow_up(
    roster: &mut Roster,
    attacker: UnitId,
    target: UnitId,
    env: &mut CombatEnv<'_>,
) -> Option<f32> {
    let (attack, defense) = duel_stats(roster, attacker, target)?;
    let damage = (attack / 2.0 - defense / FLURRY_DEFENSE_DIVISOR)
        .floor()
        .max(MIN_DAMAGE);
    strike(roster, target, damage)?;
    tracing::debug!(%attacker, %target, damage, "Follow-up hit");
    env.observer.on_attack_effect(attacker, target, damage);
    Some(damage)
}

/// Spend a full charge: `max(2, attack * 2 - defense)`
pub fn charged_strike(
    roster: &mut Roster,
    attacker: UnitId,
    target: UnitId,
    env: &mut CombatEnv<'_>,
) -> Option<f32> {
    let (attack, defense) = duel_stats(roster, attacker, target)?;
    let damage = (attack * CHARGED_STRIKE_MULTIPLIER - defense).max(CHARGED_STRIKE_MIN_DAMAGE);
    strike(roster, target, damage)?;
    if let Some(unit) = roster.get_mut(attacker) {
        unit.skill_charge = 0.0;
        unit.reset_attack_cooldown();
    }
    env.observer.on_skill_effect(attacker, target, CHARGED_STRIKE_ID);
    Some(damage)
}

/// Fire owned skill `index` at `target`
///
/// The skill list is taken out of the unit while it resolves so the skill
/// can borrow the whole roster.
pub fn use_skill(
    roster: &mut Roster,
    id: UnitId,
    target: UnitId,
    index: usize,
    env: &mut CombatEnv<'_>,
) -> bool {
    let Some(unit) = roster.get_mut(id) else {
        return false;
    };
    if index >= unit.skills.len() {
        return false;
    }
    let mut skills = std::mem::take(&mut unit.skills);
    let caster = unit.caster();

    let used = {
        let mut ctx = SkillContext {
            caster,
            roster: &mut *roster,
            arena: &env.config.arena,
            rng: &mut *env.rng,
        };
        skills[index].use_on(target, &mut ctx)
    };
    let skill_id = skills[index].id().to_string();

    if let Some(unit) = roster.get_mut(id) {
        unit.skills = skills;
    }
    if used {
        tracing::debug!(caster = %id, %target, skill = %skill_id, "Skill used");
        env.observer.on_skill_effect(id, target, &skill_id);
    }
    used
}

/// Walk to a random point on a ring around the target, if idle
fn approach(
    roster: &mut Roster,
    id: UnitId,
    target_position: Position,
    min_distance: f32,
    max_distance: f32,
    env: &mut CombatEnv<'_>,
) {
    let Some(unit) = roster.get_mut(id) else {
        return;
    };
    if !unit.can_issue_move() {
        return;
    }
    let distance = if max_distance > min_distance {
        env.rng.gen_range(min_distance..=max_distance)
    } else {
        min_distance
    };
    let angle = env.rng.gen_range(0.0..TAU);
    let point = target_position + Position::new(angle.cos(), angle.sin()) * distance;
    unit.set_movement_target(env.config.arena.clamp(point));
}

fn update_wander(
    roster: &mut Roster,
    id: UnitId,
    target_position: Position,
    delta_ms: f32,
    env: &mut CombatEnv<'_>,
) {
    let Some(unit) = roster.get_mut(id) else {
        return;
    };
    unit.wander_timer += delta_ms;
    if unit.wander_timer < unit.tuning.wander_interval_ms {
        return;
    }
    unit.wander_timer = 0.0;
    let (min, max) = (
        unit.tuning.approach_min_distance,
        unit.tuning.approach_max_distance,
    );
    approach(roster, id, target_position, min, max, env);
}
