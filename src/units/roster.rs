//! Per-battle unit store
//!
//! Units live in a dense Vec indexed by [`UnitId`]. Ids are never reused
//! within one battle; destroyed units stay in place but are invisible to
//! every lookup.

use crate::core::{Faction, UnitId};
use crate::units::unit::Unit;

#[derive(Debug, Default)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a unit and hand back its id
    pub fn spawn(&mut self, mut unit: Unit) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        unit.bind_id(id);
        self.units.push(unit);
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index()).filter(|u| !u.is_destroyed())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.index()).filter(|u| !u.is_destroyed())
    }

    pub fn is_alive(&self, id: UnitId) -> bool {
        self.get(id).is_some_and(Unit::is_alive)
    }

    /// Living units, optionally restricted to one faction
    pub fn living(&self, faction: Option<Faction>) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter(move |u| u.is_alive() && faction.map_or(true, |f| u.faction == f))
    }

    pub fn living_ids(&self, faction: Option<Faction>) -> Vec<UnitId> {
        self.living(faction).map(|u| u.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.is_destroyed())
    }

    /// Units that reached zero health since the last call
    ///
    /// Each death is reported exactly once.
    pub fn reap_deaths(&mut self) -> Vec<UnitId> {
        let mut dead = Vec::new();
        for unit in &mut self.units {
            if unit.health <= 0.0 && !unit.death_processed && !unit.is_destroyed() {
                unit.death_processed = true;
                dead.push(unit.id);
            }
        }
        dead
    }

    pub fn despawn(&mut self, id: UnitId) {
        if let Some(unit) = self.get_mut(id) {
            unit.cleanup();
        }
    }

    /// Destroy and drop every unit
    pub fn clear(&mut self) {
        for unit in &mut self.units {
            unit.cleanup();
        }
        self.units.clear();
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
