//! Persistent player state carried between battles

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::battle::constants::{DEFAULT_PLAYER_X, DEFAULT_PLAYER_Y};
use crate::battle::BattleResult;
use crate::core::{BattleConfig, Faction, Position, Result};
use crate::player::equipment::{Equipment, EquipmentItem, EquipmentSlot, StatBonus};
use crate::player::inventory::{Inventory, InventoryItem, ItemEffect, ItemKind};
use crate::skills::{player_schedule, SkillRegistry};
use crate::stats::{LevelUpGains, Progression, StatBlock};
use crate::units::Unit;

pub const STARTING_GOLD: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub progression: Progression,
    /// Stats before equipment bonuses
    pub base: StatBlock,
    pub gold: u32,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub equipment: Equipment,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        let mut inventory = Inventory::new();
        inventory.insert(InventoryItem {
            id: "potion_small".to_string(),
            name: "Small Potion".to_string(),
            kind: ItemKind::Consumable,
            quantity: 3,
            effect: Some(ItemEffect {
                heal_health: Some(30.0),
                temporary_boost: None,
            }),
        });

        let mut equipment = Equipment::default();
        equipment.equip(EquipmentItem {
            id: "sword_basic".to_string(),
            name: "Basic Sword".to_string(),
            slot: EquipmentSlot::Weapon,
            bonus: StatBonus {
                attack: 3.0,
                ..Default::default()
            },
        });
        equipment.equip(EquipmentItem {
            id: "armor_leather".to_string(),
            name: "Leather Armor".to_string(),
            slot: EquipmentSlot::Armor,
            bonus: StatBonus {
                defense: 2.0,
                ..Default::default()
            },
        });

        Self {
            name: "Hero".to_string(),
            progression: Progression::default(),
            base: StatBlock::new(100.0, 10.0, 5.0, 2.0),
            gold: STARTING_GOLD,
            inventory,
            equipment,
        }
    }
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    /// Base stats plus everything equipped
    pub fn battle_stats(&self) -> StatBlock {
        self.equipment.total_bonus().apply(&self.base)
    }

    /// Build the battle unit for this profile at the default player spot
    pub fn build_unit(&self, config: &BattleConfig, registry: &SkillRegistry) -> Unit {
        let mut unit = Unit::new(&self.name, Faction::Player, self.battle_stats(), config)
            .at(Position::new(DEFAULT_PLAYER_X, DEFAULT_PLAYER_Y))
            .with_progression(self.progression);
        unit.set_skill_unlocks(player_schedule(), registry);
        unit
    }

    pub fn add_gold(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Returns the number of levels gained
    pub fn gain_experience(&mut self, exp: u32, config: &BattleConfig) -> u32 {
        let gained = self.progression.gain(exp, config.experience_growth);
        if gained > 0 {
            LevelUpGains::from_config(config).apply(&mut self.base, gained);
            tracing::info!(player = %self.name, level = self.level(), "Profile level up");
        }
        gained
    }

    /// Fold a finished battle into the profile; defeats change nothing
    pub fn apply_result(&mut self, result: &BattleResult, config: &BattleConfig) -> u32 {
        if !result.victory {
            return 0;
        }
        self.add_gold(i64::from(result.gold));
        for item in &result.items {
            self.inventory.add(item, 1);
        }
        self.gain_experience(result.exp, config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), "Saved player profile");
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Back to a fresh level 1 profile, keeping the name
    pub fn reset(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn victory(exp: u32, gold: u32, items: &[&str]) -> BattleResult {
        BattleResult {
            victory: true,
            exp,
            gold,
            items: items.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_profile() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.level(), 1);
        assert_eq!(profile.gold, 100);
        assert_eq!(profile.inventory.quantity("potion_small"), 3);
        let stats = profile.battle_stats();
        assert_eq!(stats.attack, 13.0);
        assert_eq!(stats.defense, 7.0);
        assert_eq!(stats.max_health, 100.0);
    }

    #[test]
    fn test_apply_victory() {
        let config = BattleConfig::default();
        let mut profile = PlayerProfile::default();
        let levels = profile.apply_result(&victory(250, 30, &["goblin_ear", "potion_small"]), &config);

        assert_eq!(levels, 2);
        assert_eq!(profile.level(), 3);
        assert_eq!(profile.gold, 130);
        assert_eq!(profile.inventory.quantity("potion_small"), 4);
        assert_eq!(profile.inventory.quantity("goblin_ear"), 1);
        assert_eq!(profile.base.max_health, 120.0);
        assert_eq!(profile.base.attack, 14.0);
    }

    #[test]
    fn test_defeat_changes_nothing() {
        let config = BattleConfig::default();
        let mut profile = PlayerProfile::default();
        let before = profile.clone();
        profile.apply_result(&BattleResult::default(), &config);
        assert_eq!(profile, before);
    }

    #[test]
    fn test_add_gold_ignores_non_positive() {
        let mut profile = PlayerProfile::default();
        profile.add_gold(0);
        profile.add_gold(-50);
        assert_eq!(profile.gold, 100);
        assert!(!profile.spend_gold(500));
        assert!(profile.spend_gold(40));
        assert_eq!(profile.gold, 60);
    }

    #[test]
    fn test_build_unit_uses_equipment_and_level() {
        let config = BattleConfig::default();
        let registry = SkillRegistry::builtin();
        let mut profile = PlayerProfile::default();
        profile.gain_experience(100, &config);

        let unit = profile.build_unit(&config, &registry);
        assert_eq!(unit.level(), 2);
        assert_eq!(unit.base.attack, 15.0);
        assert_eq!(unit.position, Position::new(200.0, 300.0));
        assert!(unit.has_skill("melee_basic"));
    }

    #[test]
    fn test_json_save_and_load() {
        let mut profile = PlayerProfile::new("Aria");
        profile.add_gold(25);
        let path = std::env::temp_dir().join(format!("autobattler_profile_{}.json", std::process::id()));

        profile.save_json(&path).unwrap();
        let loaded = PlayerProfile::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_reset_keeps_name() {
        let config = BattleConfig::default();
        let mut profile = PlayerProfile::new("Aria");
        profile.apply_result(&victory(500, 10, &[]), &config);
        profile.reset();
        assert_eq!(profile.name, "Aria");
        assert_eq!(profile, PlayerProfile::new("Aria"));
    }
}
