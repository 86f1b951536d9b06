//! Battle configuration with documented constants
//!
//! All tunable numbers of the combat loop are collected here. The config is
//! passed explicitly into the orchestrator; there is no process-wide instance.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::arena::Arena;
use crate::core::error::{BattlerError, Result};

/// Configuration for the combat and progression systems
///
/// Durations are milliseconds of simulated time, distances are arena units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    // === ARENA ===
    /// Playable area; movement, knockback and dashes are clamped into it
    pub arena: Arena,

    // === BASIC COMBAT ===
    /// Distance under which a unit may use its basic attack
    pub basic_attack_range: f32,

    /// Delay between two basic attacks
    pub attack_cooldown_ms: f32,

    /// Delay after issuing a movement intent before the unit starts walking
    pub move_cooldown_ms: f32,

    // === SKILL CHARGE ===
    /// Charge value at which the charged strike becomes available
    pub skill_charge_max: f32,

    /// Charge gained per millisecond
    ///
    /// At 0.02 a unit charges from empty to 100 in 5000 ms.
    pub skill_charge_rate: f32,

    // === MOVEMENT ===
    /// Period of the idle-wander timer that keeps units from freezing
    pub wander_interval_ms: f32,

    /// A movement target closer than this counts as reached
    pub arrival_threshold: f32,

    /// Approach points are picked on a ring around the target
    pub approach_min_distance: f32,
    pub approach_max_distance: f32,

    // === PROGRESSION ===
    /// Multiplier applied to the experience threshold on every level-up
    pub experience_growth: f32,

    /// Flat stat gains granted on every level-up
    pub level_up_health: f32,
    pub level_up_attack: f32,
    pub level_up_defense: f32,
    pub level_up_speed: f32,

    // === ENEMY SCALING ===
    /// Per-level growth rate for health, attack and defense
    pub enemy_growth_rate: f32,

    /// Per-level growth rate for speed (kept small so high levels stay catchable)
    pub enemy_speed_growth_rate: f32,

    /// Per-level growth rate for the experience reward
    pub enemy_exp_growth_rate: f32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),

            basic_attack_range: 150.0,
            attack_cooldown_ms: 1500.0,
            move_cooldown_ms: 500.0,

            skill_charge_max: 100.0,
            skill_charge_rate: 0.02,

            wander_interval_ms: 3000.0,
            arrival_threshold: 5.0,
            approach_min_distance: 100.0,
            approach_max_distance: 200.0,

            experience_growth: 1.5,
            level_up_health: 10.0,
            level_up_attack: 2.0,
            level_up_defense: 1.0,
            level_up_speed: 0.2,

            enemy_growth_rate: 0.2,
            enemy_speed_growth_rate: 0.05,
            enemy_exp_growth_rate: 0.3,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let arena = &self.arena;
        if arena.width <= arena.margin * 2.0 || arena.height <= arena.margin * 2.0 {
            return Err(BattlerError::InvalidConfig(format!(
                "arena {}x{} leaves no room inside margin {}",
                arena.width, arena.height, arena.margin
            )));
        }

        if self.approach_min_distance > self.approach_max_distance {
            return Err(BattlerError::InvalidConfig(format!(
                "approach_min_distance ({}) should be <= approach_max_distance ({})",
                self.approach_min_distance, self.approach_max_distance
            )));
        }

        // Thresholds must keep growing or progression stalls
        if self.experience_growth <= 1.0 {
            return Err(BattlerError::InvalidConfig(format!(
                "experience_growth ({}) must be > 1.0",
                self.experience_growth
            )));
        }

        if self.attack_cooldown_ms < 0.0
            || self.move_cooldown_ms < 0.0
            || self.skill_charge_rate < 0.0
            || self.wander_interval_ms <= 0.0
        {
            return Err("Timers must be non-negative".into());
        }

        Ok(())
    }
}

impl From<&str> for BattlerError {
    fn from(message: &str) -> Self {
        BattlerError::InvalidConfig(message.to_string())
    }
}
