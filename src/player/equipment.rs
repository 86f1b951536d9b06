use serde::{Deserialize, Serialize};

use crate::stats::StatBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

/// Flat stat bonus granted while equipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
}

impl StatBonus {
    pub fn apply(&self, stats: &StatBlock) -> StatBlock {
        StatBlock {
            max_health: stats.max_health + self.health,
            attack: stats.attack + self.attack,
            defense: stats.defense + self.defense,
            speed: stats.speed + self.speed,
        }
    }
}

impl std::ops::Add for StatBonus {
    type Output = StatBonus;

    fn add(self, other: StatBonus) -> StatBonus {
        StatBonus {
            health: self.health + other.health,
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            speed: self.speed + other.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub bonus: StatBonus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<EquipmentItem>,
    #[serde(default)]
    pub armor: Option<EquipmentItem>,
    #[serde(default)]
    pub accessory: Option<EquipmentItem>,
}

impl Equipment {
    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquipmentItem> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Equip into the item's slot; returns what was there before
    pub fn equip(&mut self, item: EquipmentItem) -> Option<EquipmentItem> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentItem> {
        self.slot_mut(slot).take()
    }

    pub fn total_bonus(&self) -> StatBonus {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .flatten()
            .fold(StatBonus::default(), |acc, item| acc + item.bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(attack: f32) -> EquipmentItem {
        EquipmentItem {
            id: "sword".to_string(),
            name: "Sword".to_string(),
            slot: EquipmentSlot::Weapon,
            bonus: StatBonus {
                attack,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_equip_replaces_slot() {
        let mut equipment = Equipment::default();
        assert!(equipment.equip(sword(3.0)).is_none());
        let previous = equipment.equip(sword(5.0)).unwrap();
        assert_eq!(previous.bonus.attack, 3.0);
        assert_eq!(equipment.total_bonus().attack, 5.0);
        equipment.unequip(EquipmentSlot::Weapon);
        assert_eq!(equipment.total_bonus(), StatBonus::default());
    }
}
