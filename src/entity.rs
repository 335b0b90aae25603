//! Shared entity contract and the combat-stats block used by the player and enemies.

use glam::Vec2;

use crate::geometry::Hitbox;
use crate::render::Surface;

/// Anything that lives in a room: has a position, advances with time,
/// can describe itself to a renderer and can be torn down.
pub trait Entity {
    fn position(&self) -> Vec2;

    /// Advance this entity's own clocks and animations by `dt` seconds.
    fn update(&mut self, dt: f32);

    fn render(&self, surface: &mut dyn Surface);

    /// Release the entity. Calling it more than once is a no-op.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Position, size, health and attack numbers shared by every fighter.
///
/// Health always stays within `0..=max_health`; the hitbox is derived from
/// position and size on demand, so it can never lag behind a move.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatStats {
    position: Vec2,
    size: Vec2,
    health: u32,
    max_health: u32,
    pub attack_damage: u32,
    pub move_speed: f32,
}

impl CombatStats {
    pub fn new(position: Vec2, size: Vec2, max_health: u32, attack_damage: u32, move_speed: f32) -> Self {
        Self {
            position,
            size,
            health: max_health,
            max_health,
            attack_damage,
            move_speed: move_speed.max(0.0),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.position, self.size)
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Returns the damage actually absorbed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.health);
        self.health -= actual;
        actual
    }

    /// Returns the health actually restored. The dead stay dead.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let actual = amount.min(self.max_health - self.health);
        self.health += actual;
        actual
    }
}

/// Capability set of anything that fights: it carries [`CombatStats`]
/// and decides for itself when it may attack.
pub trait Combatant: Entity {
    fn stats(&self) -> &CombatStats;

    fn stats_mut(&mut self) -> &mut CombatStats;

    fn can_attack(&self) -> bool;

    fn hitbox(&self) -> Hitbox {
        self.stats().hitbox()
    }

    fn set_position(&mut self, position: Vec2) {
        self.stats_mut().set_position(position);
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.stats_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.stats_mut().heal(amount)
    }

    fn is_dead(&self) -> bool {
        self.stats().is_dead()
    }

    fn health(&self) -> u32 {
        self.stats().health()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CombatStats {
        CombatStats::new(Vec2::new(10.0, 20.0), Vec2::new(128.0, 128.0), 100, 10, 300.0)
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut s = stats();
        assert_eq!(s.take_damage(30), 30);
        assert_eq!(s.health(), 70);
        assert_eq!(s.take_damage(500), 70);
        assert_eq!(s.health(), 0);
        assert!(s.is_dead());
        assert_eq!(s.take_damage(u32::MAX), 0);
        assert_eq!(s.health(), 0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut s = stats();
        s.take_damage(15);
        assert_eq!(s.heal(5), 5);
        assert_eq!(s.heal(u32::MAX), 10);
        assert_eq!(s.health(), s.max_health());
    }

    #[test]
    fn test_health_stays_in_range_for_any_sequence() {
        let mut s = stats();
        let amounts = [0, 1, 7, 99, 100, 101, 250, u32::MAX];
        for (i, amount) in amounts.iter().cycle().take(64).enumerate() {
            let before = s.health();
            if i % 3 == 0 {
                s.heal(*amount);
                assert!(s.health() >= before);
            } else {
                s.take_damage(*amount);
            }
            assert!(s.health() <= s.max_health());
        }
    }

    #[test]
    fn test_dead_stays_dead() {
        let mut s = stats();
        s.take_damage(100);
        assert!(s.is_dead());
        assert_eq!(s.heal(50), 0);
        assert!(s.is_dead());
    }

    #[test]
    fn test_hitbox_follows_position() {
        let mut s = stats();
        s.set_position(Vec2::new(321.5, 42.25));
        assert_eq!(s.hitbox().origin, Vec2::new(321.5, 42.25));
        assert_eq!(s.hitbox().size, Vec2::new(128.0, 128.0));
    }

    #[test]
    fn test_health_fraction() {
        let mut s = stats();
        s.take_damage(25);
        assert!((s.health_fraction() - 0.75).abs() < f32::EPSILON);
    }
}
