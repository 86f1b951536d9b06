//! Player profile: progression, gold, inventory and equipment between battles

pub mod equipment;
pub mod inventory;
pub mod profile;

pub use equipment::{Equipment, EquipmentItem, EquipmentSlot, StatBonus};
pub use inventory::{Inventory, InventoryItem, ItemEffect, ItemKind, TemporaryBoost};
pub use profile::PlayerProfile;
