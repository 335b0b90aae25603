//! Room-based dungeon simulation.
//!
//! A player walks between rooms joined by doors, fights enemies driven by
//! swappable movement strategies, picks up items and unlocks locked doors
//! with keys. Rendering, audio and input are left to the host: the
//! simulation talks to them through [`render::Surface`],
//! [`events::GameObserver`] and [`input::InputSource`].
//!
//! [`engine::Dungeon`] is the entry point.

pub mod ai;
pub mod config;
pub mod constants;
pub mod door;
pub mod enemy;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod factory;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod item;
pub mod loot;
pub mod pathfinding;
pub mod player;
pub mod render;
pub mod repository;
pub mod room;

pub use config::BalanceConfig;
pub use engine::Dungeon;
pub use error::{ConfigError, DungeonError, ObserverError};
pub use events::{EventBus, GameEvent, GameLogger, GameObserver, ScoreTracker};
pub use geometry::Direction;
pub use room::{Notice, Room, RoomId};
