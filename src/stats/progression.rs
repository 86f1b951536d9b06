//! Level and experience bookkeeping shared by units and the player profile

use serde::{Deserialize, Serialize};

use crate::core::config::BattleConfig;
use crate::stats::block::StatBlock;

pub const STARTING_REQUIRED_EXPERIENCE: u32 = 100;

/// Flat stat increases granted per level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUpGains {
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
}

impl LevelUpGains {
    pub fn from_config(config: &BattleConfig) -> Self {
        Self {
            max_health: config.level_up_health,
            attack: config.level_up_attack,
            defense: config.level_up_defense,
            speed: config.level_up_speed,
        }
    }

    /// Apply `levels` worth of gains to a stat block
    pub fn apply(&self, stats: &mut StatBlock, levels: u32) {
        let n = levels as f32;
        stats.max_health += self.max_health * n;
        stats.attack += self.attack * n;
        stats.defense += self.defense * n;
        stats.speed += self.speed * n;
    }
}

/// Level, carried experience and the threshold for the next level
///
/// Level and threshold only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    pub required_experience: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::at_level(1)
    }
}

impl Progression {
    pub fn at_level(level: u32) -> Self {
        Self {
            level: level.max(1),
            experience: 0,
            required_experience: STARTING_REQUIRED_EXPERIENCE,
        }
    }

    /// Add experience and level up as many times as the total allows
    ///
    /// Returns the number of levels gained. Remainders carry over and each
    /// threshold is the previous one times `growth`, floored.
    pub fn gain(&mut self, amount: u32, growth: f32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.required_experience {
            self.experience -= self.required_experience;
            self.level += 1;
            let next = (self.required_experience as f32 * growth).floor() as u32;
            // Never let the threshold stall or shrink
            self.required_experience = next.max(self.required_experience + 1);
            gained += 1;
        }
        gained
    }

    pub fn progress(&self) -> f32 {
        self.experience as f32 / self.required_experience as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_threshold_is_one_level() {
        let mut p = Progression::default();
        assert_eq!(p.gain(100, 1.5), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 0);
        assert_eq!(p.required_experience, 150);
    }

    #[test]
    fn test_large_grant_crosses_multiple_thresholds() {
        let mut p = Progression::default();
        assert_eq!(p.gain(250, 1.5), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.experience, 0);
        assert_eq!(p.required_experience, 225);
    }

    #[test]
    fn test_remainder_carries() {
        let mut p = Progression::default();
        assert_eq!(p.gain(130, 1.5), 1);
        assert_eq!(p.experience, 30);
        assert_eq!(p.gain(10, 1.5), 0);
        assert_eq!(p.experience, 40);
    }

    #[test]
    fn test_gains_scale_with_levels() {
        let mut stats = StatBlock::new(100.0, 10.0, 5.0, 2.0);
        LevelUpGains::from_config(&BattleConfig::default()).apply(&mut stats, 2);
        assert_eq!(stats.max_health, 120.0);
        assert_eq!(stats.attack, 14.0);
        assert_eq!(stats.defense, 7.0);
        assert!((stats.speed - 2.4).abs() < 1e-5);
    }
}
