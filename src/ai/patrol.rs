use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::entity::CombatStats;

use super::{seek, step_towards, EnemyStrategy, StrategyContext};

/// Walk between random waypoints on a circle around `center`.
///
/// A player closer than `proximity` is chased for that tick instead; the
/// patrol resumes as soon as they back off.
#[derive(Debug, Clone)]
pub struct Patrol {
    center: Vec2,
    radius: f32,
    proximity: f32,
    interval: f32,
    threshold: f32,
    timer: f32,
    target: Vec2,
}

impl Patrol {
    pub fn new(center: Vec2, radius: f32, proximity: f32, interval: f32, threshold: f32) -> Self {
        Self {
            center,
            radius,
            proximity,
            interval,
            threshold,
            timer: 0.0,
            target: center,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }
}

impl EnemyStrategy for Patrol {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn init(&mut self, body: &CombatStats) {
        self.timer = 0.0;
        self.target = body.position();
    }

    fn update(&mut self, body: &mut CombatStats, ctx: &mut StrategyContext<'_>) {
        self.timer += ctx.dt;
        if self.timer >= self.interval {
            let angle = ctx.rng.gen_range(0.0..TAU);
            self.target = self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius;
            self.timer = 0.0;
        }

        if body.position().distance(ctx.player) < self.proximity {
            step_towards(body, ctx.player, ctx.dt, ctx.bounds);
        } else {
            seek(body, self.target, self.threshold, ctx.dt, ctx.bounds);
        }
    }
}
