use serde::{Deserialize, Serialize};

/// One row of a level-gated skill schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUnlock {
    pub level: u32,
    pub skill_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl SkillUnlock {
    pub fn new(level: u32, skill_id: &str) -> Self {
        Self {
            level,
            skill_id: skill_id.to_string(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Schedule shared by every enemy species
pub fn enemy_schedule() -> Vec<SkillUnlock> {
    vec![
        SkillUnlock::new(1, "melee_basic"),
        SkillUnlock::new(3, "range_basic"),
        SkillUnlock::new(5, "melee_power"),
        SkillUnlock::new(8, "area_basic"),
        SkillUnlock::new(10, "range_precision"),
        SkillUnlock::new(15, "area_large"),
    ]
}

/// Schedule for the player character
pub fn player_schedule() -> Vec<SkillUnlock> {
    vec![
        SkillUnlock::new(1, "melee_basic"),
        SkillUnlock::new(3, "range_basic").with_message("You can now strike from afar"),
        SkillUnlock::new(5, "melee_power").with_message("Your blows now knock foes back"),
        SkillUnlock::new(8, "area_basic").with_message("You learned to hit a crowd"),
    ]
}
