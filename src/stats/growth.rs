//! Level scaling for spawned enemies
//!
//! `stat_at_level = floor(base * (1 + (level - 1) * rate))`

use crate::core::config::BattleConfig;
use crate::stats::block::StatBlock;

/// Scale one stat by level; level 1 (and 0) returns the floored base
pub fn scale_stat(base: f32, level: u32, rate: f32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (base * (1.0 + steps * rate)).floor()
}

/// Derive a full stat block for `level` from a species base block
///
/// Speed uses its own smaller rate and is not floored, since base speeds
/// are fractional (1.5 units per tick and similar).
pub fn stats_at_level(base: &StatBlock, level: u32, config: &BattleConfig) -> StatBlock {
    let rate = config.enemy_growth_rate;
    let steps = level.saturating_sub(1) as f32;
    StatBlock {
        max_health: scale_stat(base.max_health, level, rate),
        attack: scale_stat(base.attack, level, rate),
        defense: scale_stat(base.defense, level, rate),
        speed: base.speed * (1.0 + steps * config.enemy_speed_growth_rate),
    }
}

/// Experience granted for defeating an enemy of `level`
pub fn exp_reward_at_level(base_exp: u32, level: u32, rate: f32) -> u32 {
    scale_stat(base_exp as f32, level, rate) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_is_base() {
        assert_eq!(scale_stat(40.0, 1, 0.2), 40.0);
    }

    #[test]
    fn test_growth_is_floored() {
        // 8 * 1.4 = 11.2
        assert_eq!(scale_stat(8.0, 3, 0.2), 11.0);
        // 3 * 1.8 = 5.4
        assert_eq!(scale_stat(3.0, 5, 0.2), 5.0);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let config = BattleConfig::default();
        let base = StatBlock::new(45.0, 7.0, 4.0, 1.8);
        let mut previous = stats_at_level(&base, 1, &config);
        for level in 2..30 {
            let next = stats_at_level(&base, level, &config);
            assert!(next.max_health >= previous.max_health);
            assert!(next.attack >= previous.attack);
            assert!(next.defense >= previous.defense);
            assert!(next.speed > previous.speed);
            previous = next;
        }
    }

    #[test]
    fn test_exp_reward_scaling() {
        assert_eq!(exp_reward_at_level(10, 1, 0.3), 10);
        // 10 * 2.2 = 22
        assert_eq!(exp_reward_at_level(10, 5, 0.3), 22);
    }
}
