use glam::Vec2;
use rand::Rng;

use crate::entity::CombatStats;

use super::{seek, EnemyStrategy, StrategyContext};

/// Wander between random points, picking a new one every `interval` seconds.
#[derive(Debug, Clone)]
pub struct RandomMovement {
    interval: f32,
    threshold: f32,
    timer: f32,
    target: Vec2,
}

impl RandomMovement {
    pub fn new(interval: f32, threshold: f32) -> Self {
        Self {
            interval,
            threshold,
            timer: 0.0,
            target: Vec2::ZERO,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}

impl EnemyStrategy for RandomMovement {
    fn name(&self) -> &'static str {
        "random_movement"
    }

    fn init(&mut self, body: &CombatStats) {
        self.timer = 0.0;
        self.target = body.position();
    }

    fn update(&mut self, body: &mut CombatStats, ctx: &mut StrategyContext<'_>) {
        self.timer += ctx.dt;
        if self.timer >= self.interval {
            let room = (ctx.bounds - body.size()).max(Vec2::ZERO);
            self.target = Vec2::new(ctx.rng.gen::<f32>() * room.x, ctx.rng.gen::<f32>() * room.y);
            self.timer = 0.0;
        }
        seek(body, self.target, self.threshold, ctx.dt, ctx.bounds);
    }
}
