//! Enemy species and their base profiles

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::battle::ai::{Behavior, GoblinBehavior, OrcBehavior, SlimeBehavior};
use crate::core::{BattlerError, Result};
use crate::stats::StatBlock;
use crate::units::loot::{DropEntry, DropTable};

/// Base experience before level scaling and the species multiplier
pub const BASE_EXP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Goblin,
    Orc,
    Slime,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Goblin, Species::Orc, Species::Slime];

    /// Fallback for unknown species names
    pub const DEFAULT: Species = Species::Goblin;

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "goblin" => Some(Species::Goblin),
            "orc" => Some(Species::Orc),
            "slime" => Some(Species::Slime),
            _ => None,
        }
    }

    /// Parse a species name, warning and falling back to goblin on a miss
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(species = %name, "Unknown species, falling back to {:?}", Self::DEFAULT);
            Self::DEFAULT
        })
    }

    pub fn try_parse(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| BattlerError::UnknownSpecies(name.to_string()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Species::Goblin => "Goblin",
            Species::Orc => "Orc",
            Species::Slime => "Slime",
        }
    }

    /// Fresh AI strategy for a newly spawned unit
    pub fn behavior(self) -> Box<dyn Behavior> {
        match self {
            Species::Goblin => Box::new(GoblinBehavior::new()),
            Species::Orc => Box::new(OrcBehavior::new()),
            Species::Slime => Box::new(SlimeBehavior::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    pub species: Species,
    /// Level-1 stats
    pub base: StatBlock,
    pub base_exp: u32,
    pub exp_multiplier: f32,
    pub drops: DropTable,
}

impl SpeciesProfile {
    pub fn builtin(species: Species) -> Self {
        match species {
            Species::Goblin => Self {
                species,
                base: StatBlock::new(40.0, 8.0, 3.0, 1.5),
                base_exp: BASE_EXP,
                exp_multiplier: 0.9,
                drops: DropTable::new(vec![
                    DropEntry::new("goblin_ear", "Goblin Ear", 0.35),
                    DropEntry::new("potion_small", "Small Potion", 0.10),
                ]),
            },
            Species::Orc => Self {
                species,
                base: StatBlock::new(60.0, 12.0, 6.0, 1.2),
                base_exp: BASE_EXP,
                exp_multiplier: 1.2,
                drops: DropTable::new(vec![
                    DropEntry::new("orc_tusk", "Orc Tusk", 0.40),
                    DropEntry::new("iron_ore", "Iron Ore", 0.15),
                ]),
            },
            Species::Slime => Self {
                species,
                base: StatBlock::new(45.0, 7.0, 4.0, 1.8),
                base_exp: BASE_EXP,
                exp_multiplier: 0.8,
                drops: DropTable::new(vec![DropEntry::new("slime_gel", "Slime Gel", 0.25)]),
            },
        }
    }
}

/// Species lookup table
#[derive(Debug, Clone)]
pub struct Bestiary {
    profiles: AHashMap<Species, SpeciesProfile>,
    fallback: SpeciesProfile,
}

impl Default for Bestiary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Bestiary {
    pub fn builtin() -> Self {
        let profiles = Species::ALL
            .into_iter()
            .map(|species| (species, SpeciesProfile::builtin(species)))
            .collect();
        Self {
            profiles,
            fallback: SpeciesProfile::builtin(Species::DEFAULT),
        }
    }

    /// Replace a species profile
    pub fn register(&mut self, profile: SpeciesProfile) {
        if profile.species == Species::DEFAULT {
            self.fallback = profile.clone();
        }
        self.profiles.insert(profile.species, profile);
    }

    pub fn profile(&self, species: Species) -> &SpeciesProfile {
        self.profiles.get(&species).unwrap_or(&self.fallback)
    }

    /// Profile for a species name; unknown names warn and get the goblin
    pub fn resolve(&self, name: &str) -> &SpeciesProfile {
        self.profile(Species::parse_or_default(name))
    }

    pub fn try_resolve(&self, name: &str) -> Result<&SpeciesProfile> {
        Species::try_parse(name).map(|species| self.profile(species))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_insensitive() {
        assert_eq!(Species::from_name("Orc"), Some(Species::Orc));
        assert_eq!(Species::from_name(" slime "), Some(Species::Slime));
        assert_eq!(Species::from_name("dragon"), None);
    }

    #[test]
    fn test_unknown_species_falls_back_to_goblin() {
        let bestiary = Bestiary::builtin();
        assert_eq!(bestiary.resolve("dragon").species, Species::Goblin);
        assert!(matches!(
            bestiary.try_resolve("dragon"),
            Err(BattlerError::UnknownSpecies(_))
        ));
    }

    #[test]
    fn test_behaviors_match_species() {
        assert_eq!(Species::Goblin.behavior().name(), "goblin");
        assert_eq!(Species::Orc.behavior().name(), "orc");
        assert_eq!(Species::Slime.behavior().name(), "slime");
    }
}
