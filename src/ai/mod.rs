//! Enemy movement strategies.
//!
//! Every enemy holds one boxed [`EnemyStrategy`] and calls it once per tick.
//! Strategies can be swapped on a live enemy; the new one is `init`ed first.
//! Built-ins:
//! - `follower`: chase the player while they are within range
//! - `random_movement`: wander between random points in the room
//! - `patrol`: circle a patrol centre, breaking off to chase a nearby player

mod follower;
mod patrol;
mod random_movement;

pub use follower::Follower;
pub use patrol::Patrol;
pub use random_movement::RandomMovement;

use glam::Vec2;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::entity::CombatStats;
use crate::geometry::clamp_to_bounds;

/// What a strategy may look at during one tick.
pub struct StrategyContext<'a> {
    pub dt: f32,
    /// Player position (bottom-left corner, same convention as enemies)
    pub player: Vec2,
    /// Room size; enemies are kept fully inside it
    pub bounds: Vec2,
    pub rng: &'a mut dyn RngCore,
}

/// Pluggable movement policy for one enemy.
pub trait EnemyStrategy {
    fn name(&self) -> &'static str;

    /// Called when the strategy is attached to an enemy (including re-attachment).
    fn init(&mut self, body: &CombatStats);

    /// Move the enemy for one tick.
    fn update(&mut self, body: &mut CombatStats, ctx: &mut StrategyContext<'_>);
}

/// Names the built-in strategies so room recipes can be written as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Follower,
    RandomMovement,
    Patrol,
}

impl StrategyKind {
    /// Build a fresh strategy tuned from `ai`; patrols circle the centre of `bounds`.
    pub fn build(self, ai: &AiConfig, bounds: Vec2) -> Box<dyn EnemyStrategy> {
        match self {
            StrategyKind::Follower => Box::new(Follower::new(ai.follow_range)),
            StrategyKind::RandomMovement => Box::new(RandomMovement::new(
                ai.direction_change_interval,
                ai.arrival_threshold,
            )),
            StrategyKind::Patrol => Box::new(Patrol::new(
                bounds * 0.5,
                ai.patrol_radius,
                ai.patrol_proximity,
                ai.direction_change_interval,
                ai.arrival_threshold,
            )),
        }
    }
}

/// Step straight at `target` at the body's speed, then clamp inside the room.
pub(crate) fn step_towards(body: &mut CombatStats, target: Vec2, dt: f32, bounds: Vec2) {
    let direction = (target - body.position()).normalize_or_zero();
    let next = body.position() + direction * body.move_speed * dt;
    body.set_position(clamp_to_bounds(next, body.size(), bounds));
}

/// Like [`step_towards`], but stands still once within `threshold` of the target.
pub(crate) fn seek(body: &mut CombatStats, target: Vec2, threshold: f32, dt: f32, bounds: Vec2) {
    if body.position().distance(target) < threshold {
        return;
    }
    step_towards(body, target, dt, bounds);
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_step_towards_moves_at_speed() {
        let mut body = body_at(100.0, 100.0);
        step_towards(&mut body, Vec2::new(400.0, 100.0), 0.5, BOUNDS);
        assert!((body.position().x - 150.0).abs() < 1e-4);
        assert_eq!(body.position().y, 100.0);
    }

    #[test]
    fn test_step_towards_clamps_to_room() {
        let mut body = body_at(660.0, 100.0);
        step_towards(&mut body, Vec2::new(2_000.0, 100.0), 1.0, BOUNDS);
        assert_eq!(body.position().x, BOUNDS.x - 128.0);
    }

    #[test]
    fn test_seek_stops_near_target() {
        let mut body = body_at(100.0, 100.0);
        seek(&mut body, Vec2::new(103.0, 100.0), 5.0, 1.0, BOUNDS);
        assert_eq!(body.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_kind_builds_named_strategy() {
        let ai = AiConfig::default();
        assert_eq!(StrategyKind::Follower.build(&ai, BOUNDS).name(), "follower");
        assert_eq!(StrategyKind::RandomMovement.build(&ai, BOUNDS).name(), "random_movement");
        assert_eq!(StrategyKind::Patrol.build(&ai, BOUNDS).name(), "patrol");
    }
}
