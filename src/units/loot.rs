//! Drop tables rolled once per enemy death

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: String,
    pub name: String,
    /// Probability in [0, 1]
    pub drop_rate: f64,
}

impl DropEntry {
    pub fn new(item_id: &str, name: &str, drop_rate: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: name.to_string(),
            drop_rate,
        }
    }
}

/// Independent Bernoulli draws: one uniform roll per entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    pub entries: Vec<DropEntry>,
}

impl DropTable {
    pub fn new(entries: Vec<DropEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item ids that dropped; zero, one or many
    pub fn roll(&self, rng: &mut dyn RngCore) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| rng.gen::<f64>() <= entry.drop_rate)
            .map(|entry| entry.item_id.clone())
            .collect()
    }
}
