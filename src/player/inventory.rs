use serde::{Deserialize, Serialize};

use crate::stats::StatKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Consumable,
    Equipment,
    Key,
}

impl ItemKind {
    /// Guess the kind of a loot id from its prefix
    pub fn from_item_id(id: &str) -> Self {
        if ["weapon_", "armor_", "accessory_"]
            .iter()
            .any(|prefix| id.starts_with(prefix))
        {
            ItemKind::Equipment
        } else {
            ItemKind::Consumable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporaryBoost {
    pub stat: StatKind,
    pub amount: f32,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    #[serde(default)]
    pub heal_health: Option<f32>,
    #[serde(default)]
    pub temporary_boost: Option<TemporaryBoost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u32,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Add a fully described item, stacking onto an existing entry
    pub fn insert(&mut self, item: InventoryItem) {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Add loot by id; unseen ids get a placeholder entry
    pub fn add(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.insert(InventoryItem {
            id: id.to_string(),
            name: id.to_string(),
            kind: ItemKind::from_item_id(id),
            quantity,
            effect: None,
        });
    }

    /// Take `quantity` away; fails without change if there is not enough
    pub fn remove(&mut self, id: &str, quantity: u32) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };
        let item = &mut self.items[index];
        if item.quantity < quantity {
            return false;
        }
        item.quantity -= quantity;
        if item.quantity == 0 {
            self.items.remove(index);
        }
        true
    }

    /// Use one consumable and hand back its effect
    pub fn consume(&mut self, id: &str) -> Option<ItemEffect> {
        let item = self.get(id)?;
        if item.kind != ItemKind::Consumable {
            return None;
        }
        let effect = item.effect.clone().unwrap_or_default();
        self.remove(id, 1).then_some(effect)
    }
}
