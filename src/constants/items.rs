//! Item values and animation.

/// Item sprite/hitbox size
pub const ITEM_SIZE: f32 = 32.0;
/// Peak vertical offset of the floating animation
pub const ITEM_BOB_HEIGHT: f32 = 10.0;
/// Angular speed of the floating animation (radians per second)
pub const ITEM_BOB_SPEED: f32 = 2.0;

/// Health restored by a potion
pub const HEALTH_POTION_HEAL: u32 = 20;
/// Attack damage added by a damage boost
pub const DAMAGE_BOOST_AMOUNT: u32 = 5;
/// Gold granted by one coin
pub const GOLD_COIN_VALUE: u32 = 10;
