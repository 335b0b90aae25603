//! Drop and reward tables (weights, not percentages; they are normalized).

/// Enemy death drop: health potion
pub const DROP_WEIGHT_HEALTH_POTION: u32 = 40;
/// Enemy death drop: gold coin
pub const DROP_WEIGHT_GOLD_COIN: u32 = 30;
/// Enemy death drop: key
pub const DROP_WEIGHT_KEY: u32 = 10;
/// Enemy death drop: nothing
pub const DROP_WEIGHT_NOTHING: u32 = 20;

/// Room-cleared reward: gold coin
pub const REWARD_WEIGHT_GOLD_COIN: u32 = 50;
/// Room-cleared reward: health potion
pub const REWARD_WEIGHT_HEALTH_POTION: u32 = 30;
/// Room-cleared reward: damage boost
pub const REWARD_WEIGHT_DAMAGE_BOOST: u32 = 10;
/// Room-cleared reward: key
pub const REWARD_WEIGHT_KEY: u32 = 10;

/// Fewest items spawned when a room is cleared
pub const REWARD_COUNT_MIN: u32 = 1;
/// Most items spawned when a room is cleared
pub const REWARD_COUNT_MAX: u32 = 3;
