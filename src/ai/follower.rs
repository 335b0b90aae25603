use crate::entity::CombatStats;
use crate::geometry::clamp_to_bounds;

use super::{step_towards, EnemyStrategy, StrategyContext};

/// Chase the player whenever they are within `range`.
#[derive(Debug, Clone)]
pub struct Follower {
    range: f32,
}

impl Follower {
    pub fn new(range: f32) -> Self {
        Self { range }
    }
}

impl EnemyStrategy for Follower {
    fn name(&self) -> &'static str {
        "follower"
    }

    fn init(&mut self, _body: &CombatStats) {}

    fn update(&mut self, body: &mut CombatStats, ctx: &mut StrategyContext<'_>) {
        if body.position().distance(ctx.player) <= self.range {
            step_towards(body, ctx.player, ctx.dt, ctx.bounds);
        } else {
            body.set_position(clamp_to_bounds(body.position(), body.size(), ctx.bounds));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support::*;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tick(strategy: &mut Follower, body: &mut CombatStats, player: Vec2, dt: f32) {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = StrategyContext {
            dt,
            player,
            bounds: BOUNDS,
            rng: &mut rng,
        };
        strategy.update(body, &mut ctx);
    }

    #[test]
    fn test_chases_player_in_range() {
        let mut body = body_at(100.0, 100.0);
        let mut follower = Follower::new(300.0);
        let player = Vec2::new(100.0, 300.0);
        tick(&mut follower, &mut body, player, 1.0);
        assert_eq!(body.position().x, 100.0);
        assert!((body.position().y - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_ignores_player_out_of_range() {
        let mut body = body_at(0.0, 0.0);
        let mut follower = Follower::new(300.0);
        tick(&mut follower, &mut body, Vec2::new(500.0, 400.0), 1.0);
        assert_eq!(body.position(), Vec2::ZERO);
    }

    #[test]
    fn test_stays_in_bounds_while_idle() {
        let mut body = body_at(900.0, -50.0);
        let mut follower = Follower::new(300.0);
        tick(&mut follower, &mut body, Vec2::ZERO, 1.0);
        assert_eq!(body.position(), Vec2::new(672.0, 0.0));
    }

    #[test]
    fn test_standing_on_player_is_stable() {
        let mut body = body_at(200.0, 200.0);
        let mut follower = Follower::new(300.0);
        tick(&mut follower, &mut body, Vec2::new(200.0, 200.0), 1.0);
        assert_eq!(body.position(), Vec2::new(200.0, 200.0));
    }
}
