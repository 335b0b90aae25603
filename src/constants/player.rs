//! Player stats and controls.

/// Player sprite/hitbox width
pub const PLAYER_WIDTH: f32 = 128.0;
/// Player sprite/hitbox height
pub const PLAYER_HEIGHT: f32 = 128.0;
/// Player's starting (and maximum) health
pub const PLAYER_MAX_HEALTH: u32 = 100;
/// Player's base melee damage
pub const PLAYER_ATTACK_DAMAGE: u32 = 10;
/// Player movement speed (units per second)
pub const PLAYER_MOVE_SPEED: f32 = 300.0;
/// Seconds between player attacks
pub const PLAYER_ATTACK_COOLDOWN: f32 = 0.5;
/// How long the attacking pose stays visible (seconds)
pub const PLAYER_ATTACK_DISPLAY_TIME: f32 = 0.2;
/// Distance from the wall the player is placed at after walking through a door
pub const PLAYER_ENTRY_OFFSET: f32 = 20.0;
