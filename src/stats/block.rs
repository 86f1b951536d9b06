use serde::{Deserialize, Serialize};

/// The four combat stats every unit carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
}

impl StatBlock {
    pub fn new(max_health: f32, attack: f32, defense: f32, speed: f32) -> Self {
        Self {
            max_health,
            attack,
            defense,
            speed,
        }
    }

    pub fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut f32 {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
        }
    }

    /// Apply explicit overrides; a present override always wins
    pub fn with_overrides(mut self, overrides: &StatOverrides) -> Self {
        if let Some(v) = overrides.max_health {
            self.max_health = v;
        }
        if let Some(v) = overrides.attack {
            self.attack = v;
        }
        if let Some(v) = overrides.defense {
            self.defense = v;
        }
        if let Some(v) = overrides.speed {
            self.speed = v;
        }
        self
    }
}

/// Stats that modifiers may touch
///
/// Max health is deliberately absent: health is clamped against the base
/// maximum, and letting a modifier move that bound would break the clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
}

/// Optional per-spawn stat replacements (stage configs use these for bosses)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatOverrides {
    #[serde(default)]
    pub max_health: Option<f32>,
    #[serde(default)]
    pub attack: Option<f32>,
    #[serde(default)]
    pub defense: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
}

impl StatOverrides {
    pub fn is_empty(&self) -> bool {
        self.max_health.is_none()
            && self.attack.is_none()
            && self.defense.is_none()
            && self.speed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let base = StatBlock::new(40.0, 8.0, 3.0, 1.5);
        let overrides = StatOverrides {
            max_health: Some(200.0),
            defense: Some(8.0),
            ..Default::default()
        };
        let stats = base.with_overrides(&overrides);
        assert_eq!(stats.max_health, 200.0);
        assert_eq!(stats.attack, 8.0);
        assert_eq!(stats.defense, 8.0);
        assert!(!overrides.is_empty());
        assert!(StatOverrides::default().is_empty());
    }
}
