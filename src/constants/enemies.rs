//! Enemy stats and AI tuning.

/// Enemy sprite/hitbox size (all archetypes)
pub const ENEMY_SIZE: f32 = 128.0;

// ZOMBIE
/// Zombie health
pub const ZOMBIE_HEALTH: u32 = 50;
/// Zombie attack damage
pub const ZOMBIE_DAMAGE: u32 = 5;
/// Zombie movement speed
pub const ZOMBIE_SPEED: f32 = 100.0;
/// Seconds between zombie attacks
pub const ZOMBIE_ATTACK_COOLDOWN: f32 = 0.8;
/// Gold credited to the score when a zombie dies
pub const ZOMBIE_GOLD_VALUE: u32 = 30;

// SKELETON
/// Skeleton health
pub const SKELETON_HEALTH: u32 = 40;
/// Skeleton attack damage
pub const SKELETON_DAMAGE: u32 = 8;
/// Skeleton movement speed (faster than zombies)
pub const SKELETON_SPEED: f32 = 120.0;
/// Seconds between skeleton attacks
pub const SKELETON_ATTACK_COOLDOWN: f32 = 0.6;
/// Gold credited to the score when a skeleton dies
pub const SKELETON_GOLD_VALUE: u32 = 40;

// BOSS
/// Boss health
pub const BOSS_HEALTH: u32 = 200;
/// Boss attack damage
pub const BOSS_DAMAGE: u32 = 15;
/// Boss movement speed (slow)
pub const BOSS_SPEED: f32 = 80.0;
/// Seconds between boss attacks
pub const BOSS_ATTACK_COOLDOWN: f32 = 1.5;
/// Gold credited to the score when the boss dies
pub const BOSS_GOLD_VALUE: u32 = 100;

// AI
/// Followers only chase a player within this distance
pub const FOLLOW_RANGE: f32 = 300.0;
/// Radius of the circle patrollers pick waypoints on
pub const PATROL_RADIUS: f32 = 200.0;
/// Patrollers break off and chase when the player is closer than this
pub const PATROL_PROXIMITY: f32 = 200.0;
/// Seconds between new wander/patrol targets
pub const DIRECTION_CHANGE_INTERVAL: f32 = 2.0;
/// Wanderers stop moving once this close to their target
pub const ARRIVAL_THRESHOLD: f32 = 5.0;
