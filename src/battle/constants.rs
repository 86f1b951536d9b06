//! Battle system constants - fixed values that are not part of BattleConfig

// Charged strike
pub const CHARGED_STRIKE_MULTIPLIER: f32 = 2.0;
pub const CHARGED_STRIKE_MIN_DAMAGE: f32 = 2.0;
pub const CHARGED_STRIKE_ID: &str = "charged_strike";

// Basic attack mitigation: damage = max(1, attack - defense / divisor)
pub const BASIC_ATTACK_DEFENSE_DIVISOR: f32 = 2.0;
pub const MIN_DAMAGE: f32 = 1.0;

// Goblin flurry
pub const FLURRY_CHANCE: f64 = 0.5;
pub const FLURRY_MAX_CONSECUTIVE: u32 = 3;
pub const FLURRY_RESET_MS: f32 = 2000.0;
pub const FLURRY_DEFENSE_DIVISOR: f32 = 3.0;
pub const FLURRY_CLOSE_TRIGGER: f32 = 100.0;
pub const FLURRY_CLOSE_MIN: f32 = 50.0;
pub const FLURRY_CLOSE_MAX: f32 = 80.0;

// Orc enrage
pub const ENRAGE_HEALTH_RATIO: f32 = 0.3;
pub const ENRAGE_MULTIPLIER: f32 = 1.5;
pub const ENRAGE_SOURCE: &str = "enrage";
pub const ENRAGE_RANGE_SLACK: f32 = 50.0;
pub const ENRAGE_CLOSE_MIN: f32 = 50.0;
pub const ENRAGE_CLOSE_MAX: f32 = 100.0;

// Slime dash
pub const DASH_COOLDOWN_MS: f32 = 3000.0;
pub const DASH_DURATION_MS: f32 = 500.0;
pub const DASH_CHANCE: f64 = 0.01;
pub const DASH_SPEED_MULTIPLIER: f32 = 2.5;
pub const DASH_CONTACT_DISTANCE: f32 = 30.0;

// Stage layout
pub const DEFAULT_ENEMY_X: f32 = 600.0;
pub const DEFAULT_ENEMY_Y: f32 = 200.0;
pub const DEFAULT_ENEMY_SPACING: f32 = 100.0;
pub const DEFAULT_PLAYER_X: f32 = 200.0;
pub const DEFAULT_PLAYER_Y: f32 = 300.0;

// Stage unlock: level >= ceil(recommended * ratio)
pub const STAGE_UNLOCK_RATIO: f32 = 0.7;
