use serde::{Deserialize, Serialize};

use crate::core::UnitId;

/// Outcome of one encounter, produced exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub victory: bool,
    pub exp: u32,
    pub gold: u32,
    pub items: Vec<String>,
    /// Unit that decided the fight (the player on a win, the last enemy
    /// standing on a loss)
    pub victor: Option<UnitId>,
    /// Last unit to fall
    pub defeated: Option<UnitId>,
}

impl BattleResult {
    pub fn defeat(victor: Option<UnitId>, defeated: Option<UnitId>) -> Self {
        Self {
            victory: false,
            victor,
            defeated,
            ..Default::default()
        }
    }
}
