//! The player character: movement, melee, inventory and the room-transition request.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::entity::{CombatStats, Combatant, Entity};
use crate::geometry::{clamp_to_bounds, Direction};
use crate::input::InputSource;
use crate::item::ItemKind;
use crate::render::{Drawable, Sprite, Surface};

pub struct Player {
    stats: CombatStats,
    inventory: Vec<ItemKind>,
    keys: u32,
    gold: u32,
    attack_cooldown: f32,
    time_since_attack: f32,
    attack_display_time: f32,
    attack_timer: f32,
    /// Set by an attack press, consumed by the room once
    strike_armed: bool,
    /// Exit wall of a door the player walked into this frame
    transition: Option<Direction>,
    disposed: bool,
}

impl Player {
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            stats: CombatStats::new(
                position,
                Vec2::new(config.width, config.height),
                config.max_health,
                config.attack_damage,
                config.move_speed,
            ),
            inventory: Vec::new(),
            keys: 0,
            gold: 0,
            attack_cooldown: config.attack_cooldown,
            time_since_attack: 0.0,
            attack_display_time: config.attack_display_time,
            attack_timer: 0.0,
            strike_armed: false,
            transition: None,
            disposed: false,
        }
    }

    /// Spawn centred in a room of the given size.
    pub fn centered(bounds: Vec2, config: &PlayerConfig) -> Self {
        let size = Vec2::new(config.width, config.height);
        Self::new((bounds - size) * 0.5, config)
    }

    /// One frame of player logic: clocks, then movement and the attack key.
    pub fn advance(&mut self, dt: f32, input: &dyn InputSource, bounds: Vec2) {
        if self.disposed {
            return;
        }
        self.update(dt);
        if self.is_dead() {
            return;
        }
        self.apply_movement(dt, input, bounds);
        if input.attack_just_pressed() && self.can_attack() {
            self.start_attack();
        }
    }

    fn apply_movement(&mut self, dt: f32, input: &dyn InputSource, bounds: Vec2) {
        let step = self.stats.move_speed * dt;
        let mut delta = Vec2::ZERO;
        for direction in Direction::ALL {
            if input.is_pressed(direction) {
                let (dx, dy) = direction.offset();
                delta += Vec2::new(dx as f32, dy as f32) * step;
            }
        }
        if delta != Vec2::ZERO {
            let target = clamp_to_bounds(self.position() + delta, self.stats.size(), bounds);
            self.stats.set_position(target);
        }
    }

    fn start_attack(&mut self) {
        self.time_since_attack = 0.0;
        self.attack_timer = self.attack_display_time;
        self.strike_armed = true;
        log::trace!("player attacks for {}", self.stats.attack_damage);
    }

    /// Take the pending melee strike, if any. Returns its damage.
    pub fn take_strike(&mut self) -> Option<u32> {
        if std::mem::take(&mut self.strike_armed) {
            Some(self.stats.attack_damage)
        } else {
            None
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    pub fn increase_damage(&mut self, amount: u32) {
        self.stats.attack_damage = self.stats.attack_damage.saturating_add(amount);
    }

    pub fn add_to_inventory(&mut self, kind: ItemKind) {
        self.inventory.push(kind);
    }

    pub fn inventory(&self) -> &[ItemKind] {
        &self.inventory
    }

    pub fn add_key(&mut self) {
        self.keys += 1;
    }

    pub fn has_key(&self) -> bool {
        self.keys > 0
    }

    /// Spend one key. Returns false when the player has none.
    pub fn use_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    pub fn keys(&self) -> u32 {
        self.keys
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Ask the coordinator to move through the door on `exit` this frame.
    pub fn request_transition(&mut self, exit: Direction) {
        self.transition = Some(exit);
    }

    pub fn transition_request(&self) -> Option<Direction> {
        self.transition
    }

    pub fn clear_transition(&mut self) {
        self.transition = None;
    }
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.stats.position()
    }

    fn update(&mut self, dt: f32) {
        self.time_since_attack += dt;
        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.disposed {
            return;
        }
        surface.draw(Drawable {
            sprite: Sprite::Player {
                attacking: self.is_attacking(),
            },
            position: self.position(),
            size: self.stats.size(),
        });
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Combatant for Player {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn can_attack(&self) -> bool {
        self.time_since_attack >= self.attack_cooldown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn player() -> Player {
        Player::centered(BOUNDS, &PlayerConfig::default())
    }

    #[test]
    fn test_spawns_centered() {
        let p = player();
        assert_eq!(p.position(), Vec2::new(336.0, 236.0));
        assert_eq!(p.hitbox().origin, p.position());
    }

    #[test]
    fn test_moves_and_clamps() {
        let mut p = player();
        let speed = PlayerConfig::default().move_speed;
        p.advance(0.1, &InputState::holding(Direction::East), BOUNDS);
        assert!((p.position().x - (336.0 + speed * 0.1)).abs() < 1e-3);
        assert_eq!(p.hitbox().origin, p.position());

        for _ in 0..100 {
            p.advance(0.1, &InputState::holding(Direction::North), BOUNDS);
        }
        assert_eq!(p.position().y, BOUNDS.y - 128.0);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut p = player();
        p.advance(0.1, &InputState::attacking(), BOUNDS);
        assert!(!p.is_attacking(), "cooldown has not elapsed at spawn");
        assert_eq!(p.take_strike(), None);

        p.advance(0.5, &InputState::attacking(), BOUNDS);
        assert!(p.is_attacking());
        assert_eq!(p.take_strike(), Some(PlayerConfig::default().attack_damage));
        assert_eq!(p.take_strike(), None, "a strike is consumed once");

        p.advance(0.1, &InputState::attacking(), BOUNDS);
        assert_eq!(p.take_strike(), None, "still cooling down");
    }

    #[test]
    fn test_attack_pose_expires() {
        let mut p = player();
        p.advance(0.6, &InputState::attacking(), BOUNDS);
        assert!(p.is_attacking());
        p.advance(0.25, &InputState::idle(), BOUNDS);
        assert!(!p.is_attacking());
    }

    #[test]
    fn test_keys() {
        let mut p = player();
        assert!(!p.use_key());
        p.add_key();
        assert!(p.has_key());
        assert!(p.use_key());
        assert_eq!(p.keys(), 0);
    }

    #[test]
    fn test_transition_request() {
        let mut p = player();
        assert_eq!(p.transition_request(), None);
        p.request_transition(Direction::West);
        assert_eq!(p.transition_request(), Some(Direction::West));
        p.clear_transition();
        assert_eq!(p.transition_request(), None);
    }

    #[test]
    fn test_dead_player_does_not_move() {
        let mut p = player();
        p.take_damage(1_000);
        let before = p.position();
        p.advance(0.5, &InputState::holding(Direction::South), BOUNDS);
        assert_eq!(p.position(), before);
    }
}
