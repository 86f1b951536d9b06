//! Encounter lifecycle
//!
//! `NotStarted -> InProgress -> {Victory, Defeat}`. Terminal states are
//! final: once reached, `update` neither ticks units nor changes status
//! until `cleanup` resets the stage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::execution::{tick_unit, CombatEnv};
use crate::battle::result::BattleResult;
use crate::core::{Faction, UnitId};
use crate::stages::config::StageConfig;
use crate::units::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    NotStarted,
    InProgress,
    Victory,
    Defeat,
}

impl StageStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StageStatus::Victory | StageStatus::Defeat)
    }
}

/// One defeated enemy's contribution to the rewards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefeatRecord {
    pub unit: UnitId,
    pub exp: u32,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_id: String,
    pub status: StageStatus,
    pub battle_result: Option<BattleResult>,
    pub enemies_defeated: usize,
    pub total_enemies: usize,
    pub time_taken_ms: f32,
}

#[derive(Debug, Clone)]
pub struct Stage {
    config: StageConfig,
    status: StageStatus,
    elapsed_ms: f32,
    player: Option<UnitId>,
    enemies: Vec<UnitId>,
    defeated: Vec<DefeatRecord>,
    boss_armed: bool,
    boss: Option<UnitId>,
    result: Option<BattleResult>,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            status: StageStatus::NotStarted,
            elapsed_ms: 0.0,
            player: None,
            enemies: Vec::new(),
            defeated: Vec::new(),
            boss_armed: false,
            boss: None,
            result: None,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn player(&self) -> Option<UnitId> {
        self.player
    }

    /// Spawned enemies in inventory order (the boss last, once it appears)
    pub fn enemies(&self) -> &[UnitId] {
        &self.enemies
    }

    pub fn defeated(&self) -> &[DefeatRecord] {
        &self.defeated
    }

    pub fn boss_armed(&self) -> bool {
        self.boss_armed
    }

    pub fn boss(&self) -> Option<UnitId> {
        self.boss
    }

    /// Bind the player, spawn the configured enemies and wire up targets
    ///
    /// The boss roll happens here, once per run.
    pub fn initialize(&mut self, player: UnitId, roster: &mut Roster, env: &mut CombatEnv<'_>) {
        if self.status != StageStatus::NotStarted || self.player.is_some() {
            tracing::warn!(stage = %self.config.id, "Stage already initialized");
            return;
        }
        self.player = Some(player);

        for (index, spawn) in self.config.enemies.iter().enumerate() {
            let mut unit = spawn
                .blueprint(index)
                .build(env.bestiary, env.skills, env.config);
            unit.set_target(Some(player));
            self.enemies.push(roster.spawn(unit));
        }

        if let Some(boss) = &self.config.boss {
            self.boss_armed = env.rng.gen::<f64>() < boss.chance;
            tracing::debug!(stage = %self.config.id, armed = self.boss_armed, "Boss roll");
        }

        if let Some(unit) = roster.get_mut(player) {
            unit.set_target(self.enemies.first().copied());
        }

        tracing::info!(
            stage = %self.config.id,
            enemies = self.enemies.len(),
            "Stage initialized"
        );
    }

    pub fn start(&mut self) -> bool {
        if self.status != StageStatus::NotStarted {
            tracing::warn!(stage = %self.config.id, status = ?self.status, "Stage cannot start");
            return false;
        }
        if self.player.is_none() {
            tracing::warn!(stage = %self.config.id, "Stage started before initialize");
            return false;
        }
        self.status = StageStatus::InProgress;
        self.elapsed_ms = 0.0;
        tracing::info!(stage = %self.config.id, name = %self.config.name, "Stage started");
        true
    }

    /// Tick every living enemy, then evaluate end conditions
    ///
    /// Returns the battle result on the tick the stage turns terminal.
    pub fn update(
        &mut self,
        delta_ms: f32,
        roster: &mut Roster,
        env: &mut CombatEnv<'_>,
    ) -> Option<BattleResult> {
        if self.status != StageStatus::InProgress {
            return None;
        }
        self.elapsed_ms += delta_ms;

        for index in 0..self.enemies.len() {
            let id = self.enemies[index];
            if roster.is_alive(id) {
                tick_unit(roster, id, delta_ms, env);
            }
        }
        self.process_deaths(roster, env);
        self.evaluate(roster, env)
    }

    /// Fire death hooks, roll loot and retarget the player
    ///
    /// Safe to call any number of times per tick; each death is handled once.
    pub fn process_deaths(&mut self, roster: &mut Roster, env: &mut CombatEnv<'_>) {
        let dead = roster.reap_deaths();
        if dead.is_empty() {
            return;
        }

        for id in dead {
            env.observer.on_unit_death(id);
            let Some(unit) = roster.get(id) else {
                continue;
            };
            tracing::info!(unit = %unit.name, "Unit defeated");
            if !self.enemies.contains(&id) {
                continue;
            }
            if let Some(traits) = &unit.enemy {
                let items = traits.roll_loot(&mut *env.rng);
                self.defeated.push(DefeatRecord {
                    unit: id,
                    exp: traits.exp_reward,
                    items,
                });
            }
        }

        self.set_next_target(roster);
    }

    /// Point the player at the first living enemy if its target is gone
    pub fn set_next_target(&mut self, roster: &mut Roster) {
        let Some(player) = self.player else {
            return;
        };
        let current = roster.get(player).and_then(|u| u.target());
        if current.is_some_and(|t| roster.is_alive(t)) {
            return;
        }
        let next = self.enemies.iter().copied().find(|id| roster.is_alive(*id));
        if let Some(unit) = roster.get_mut(player) {
            unit.set_target(next);
        }
    }

    fn evaluate(&mut self, roster: &mut Roster, env: &mut CombatEnv<'_>) -> Option<BattleResult> {
        let player_alive = self.player.is_some_and(|p| roster.is_alive(p));
        if !player_alive {
            return Some(self.declare_defeat(roster));
        }

        let enemies_alive = self.enemies.iter().any(|id| roster.is_alive(*id));
        if enemies_alive {
            return None;
        }

        if self.boss_armed && self.boss.is_none() {
            self.spawn_boss(roster, env);
            if self.boss.is_some() {
                return None;
            }
        }

        Some(self.declare_victory())
    }

    fn spawn_boss(&mut self, roster: &mut Roster, env: &mut CombatEnv<'_>) {
        let (Some(boss), Some(player)) = (&self.config.boss, self.player) else {
            return;
        };
        let index = self.enemies.len();
        let mut unit = boss
            .enemy
            .blueprint(index)
            .build(env.bestiary, env.skills, env.config);
        unit.set_target(Some(player));
        tracing::info!(stage = %self.config.id, boss = %unit.name, "Boss appeared");

        let id = roster.spawn(unit);
        self.enemies.push(id);
        self.boss = Some(id);
        if let Some(player) = roster.get_mut(player) {
            player.set_target(Some(id));
        }
    }

    fn declare_victory(&mut self) -> BattleResult {
        let boss_defeated = self.boss.is_some();
        let (mut exp, gold, mut items) = match (&self.config.boss, boss_defeated) {
            (Some(boss), true) => {
                let mut items = self.config.rewards.items.clone();
                items.extend(boss.rewards.items.iter().cloned());
                (boss.rewards.exp, boss.rewards.gold, items)
            }
            _ => (
                self.config.rewards.exp,
                self.config.rewards.gold,
                self.config.rewards.items.clone(),
            ),
        };

        for record in &self.defeated {
            exp += record.exp;
            items.extend(record.items.iter().cloned());
        }

        let result = BattleResult {
            victory: true,
            exp,
            gold,
            items,
            victor: self.player,
            defeated: self.defeated.last().map(|r| r.unit),
        };
        self.status = StageStatus::Victory;
        tracing::info!(
            stage = %self.config.id,
            exp = result.exp,
            gold = result.gold,
            items = result.items.len(),
            "Stage cleared"
        );
        self.result = Some(result.clone());
        result
    }

    fn declare_defeat(&mut self, roster: &Roster) -> BattleResult {
        let victor = self.enemies.iter().copied().find(|id| roster.is_alive(*id));
        let result = BattleResult::defeat(victor, self.player);
        self.status = StageStatus::Defeat;
        tracing::info!(stage = %self.config.id, "Stage failed");
        self.result = Some(result.clone());
        result
    }

    pub fn get_result(&self) -> StageResult {
        StageResult {
            stage_id: self.config.id.clone(),
            status: self.status,
            battle_result: self.result.clone(),
            enemies_defeated: self.defeated.len(),
            total_enemies: self.enemies.len(),
            time_taken_ms: self.elapsed_ms,
        }
    }

    /// Drop unit references and reset to `NotStarted`
    ///
    /// Units are not destroyed here; that is the orchestrator's job.
    pub fn cleanup(&mut self) {
        self.status = StageStatus::NotStarted;
        self.elapsed_ms = 0.0;
        self.player = None;
        self.enemies.clear();
        self.defeated.clear();
        self.boss_armed = false;
        self.boss = None;
        self.result = None;
    }

    pub fn living_enemies(&self, roster: &Roster) -> usize {
        roster
            .living(Some(Faction::Enemy))
            .filter(|u| self.enemies.contains(&u.id))
            .count()
    }
}
