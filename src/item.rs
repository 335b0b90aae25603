//! Collectible items: potions, damage boosts, keys and gold.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ItemConfig;
use crate::entity::{Combatant, Entity};
use crate::geometry::Hitbox;
use crate::player::Player;
use crate::render::{Drawable, Sprite, Surface};

/// Item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    HealthPotion,
    DamageBoost,
    Key,
    GoldCoin,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::HealthPotion,
        ItemKind::DamageBoost,
        ItemKind::Key,
        ItemKind::GoldCoin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "Health Potion",
            ItemKind::DamageBoost => "Amulet of Strength",
            ItemKind::Key => "Key",
            ItemKind::GoldCoin => "Gold Coin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "Restores health",
            ItemKind::DamageBoost => "Permanently increases attack damage",
            ItemKind::Key => "Opens a locked door",
            ItemKind::GoldCoin => "A handful of gold",
        }
    }
}

/// A floating pickup lying in a room.
///
/// `collected` only ever goes from false to true.
#[derive(Debug, Clone)]
pub struct Item {
    kind: ItemKind,
    position: Vec2,
    rest_y: f32,
    size: Vec2,
    bob_height: f32,
    bob_speed: f32,
    bob_timer: f32,
    /// Room size, once placed in a room
    bounds: Option<Vec2>,
    collected: bool,
    disposed: bool,
}

impl Item {
    pub fn new(kind: ItemKind, position: Vec2, config: &ItemConfig) -> Self {
        Self {
            kind,
            position,
            rest_y: position.y,
            size: Vec2::splat(config.size),
            bob_height: config.bob_height,
            bob_speed: config.bob_speed,
            bob_timer: 0.0,
            bounds: None,
            collected: false,
            disposed: false,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.position, self.size)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// True when the item can still be picked up and `other` overlaps it.
    pub fn touches(&self, other: &Hitbox) -> bool {
        !self.collected && !self.disposed && self.hitbox().overlaps(other)
    }

    /// Pin the item inside a room of `bounds`. The resting height keeps
    /// `bob_height` of headroom on both sides where the room allows it.
    pub fn keep_within(&mut self, bounds: Vec2) {
        let max = (bounds - self.size).max(Vec2::ZERO);
        let headroom = self.bob_height.min(max.y * 0.5);
        self.position.x = self.position.x.clamp(0.0, max.x);
        self.rest_y = self.rest_y.clamp(headroom, max.y - headroom);
        self.bounds = Some(bounds);
        self.position.y = self.bobbed_y();
    }

    fn bobbed_y(&self) -> f32 {
        let y = self.rest_y + (self.bob_timer * self.bob_speed).sin() * self.bob_height;
        match self.bounds {
            Some(bounds) => y.clamp(0.0, (bounds.y - self.size.y).max(0.0)),
            None => y,
        }
    }

    /// Mark as collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    /// Apply this item's effect to the player and add it to their inventory.
    /// Returns the amount the effect was worth (health restored, damage or gold gained).
    pub fn apply_to(&self, player: &mut Player, config: &ItemConfig) -> u32 {
        let value = config.value(self.kind);
        let applied = match self.kind {
            ItemKind::HealthPotion => player.heal(value),
            ItemKind::DamageBoost => {
                player.increase_damage(value);
                value
            }
            ItemKind::Key => {
                player.add_key();
                1
            }
            ItemKind::GoldCoin => {
                player.add_gold(value);
                value
            }
        };
        player.add_to_inventory(self.kind);
        applied
    }
}

impl Entity for Item {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn update(&mut self, dt: f32) {
        if self.collected || self.disposed {
            return;
        }
        self.bob_timer += dt;
        self.position.y = self.bobbed_y();
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.collected || self.disposed {
            return;
        }
        surface.draw(Drawable {
            sprite: Sprite::Item { kind: self.kind },
            position: self.position,
            size: self.size,
        });
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
