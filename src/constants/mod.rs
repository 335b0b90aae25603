//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! These are the defaults behind [`crate::config::BalanceConfig`]; gameplay
//! code reads the config it was handed, not these values directly.

mod enemies;
mod items;
mod loot;
mod player;
mod world;

pub use enemies::*;
pub use items::*;
pub use loot::*;
pub use player::*;
pub use world::*;
