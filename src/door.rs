//! Doors connecting a room wall to another room.

use glam::Vec2;

use crate::config::WorldConfig;
use crate::entity::Entity;
use crate::geometry::{Direction, Hitbox};
use crate::render::{Drawable, Sprite, Surface};
use crate::room::RoomId;

/// A door on one wall of a room, leading to `target`.
///
/// Locks belong to the door, not the connection: unlocking this door leaves
/// the door on the other side untouched.
#[derive(Debug, Clone)]
pub struct Door {
    direction: Direction,
    target: RoomId,
    locked: bool,
    position: Vec2,
    size: Vec2,
    disposed: bool,
}

impl Door {
    /// Build a door whose wall anchor is `anchor` (the midpoint of the door
    /// along its wall). The sprite is centred on the anchor along the wall
    /// and pokes `door_inset` of its depth into the room.
    pub fn new(anchor: Vec2, direction: Direction, target: RoomId, locked: bool, world: &WorldConfig) -> Self {
        // East/west doors lie on their side
        let size = if direction.is_vertical() {
            Vec2::new(world.door_width, world.door_height)
        } else {
            Vec2::new(world.door_height, world.door_width)
        };
        let inset = world.door_inset;
        let position = match direction {
            Direction::North => Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y * inset),
            Direction::South => Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y * (1.0 - inset)),
            Direction::East => Vec2::new(anchor.x - size.x * inset, anchor.y - size.y / 2.0),
            Direction::West => Vec2::new(anchor.x - size.x * (1.0 - inset), anchor.y - size.y / 2.0),
        };
        Self {
            direction,
            target,
            locked,
            position,
            size,
            disposed: false,
        }
    }

    /// A door centred on the `direction` wall of a room of size `bounds`.
    pub fn on_wall(direction: Direction, target: RoomId, locked: bool, bounds: Vec2, world: &WorldConfig) -> Self {
        let anchor = match direction {
            Direction::North => Vec2::new(bounds.x / 2.0, bounds.y),
            Direction::South => Vec2::new(bounds.x / 2.0, 0.0),
            Direction::East => Vec2::new(bounds.x, bounds.y / 2.0),
            Direction::West => Vec2::new(0.0, bounds.y / 2.0),
        };
        Self::new(anchor, direction, target, locked, world)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target(&self) -> RoomId {
        self.target
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Doors never re-lock.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.position, self.size)
    }

    pub fn touches(&self, other: &Hitbox) -> bool {
        !self.disposed && self.hitbox().overlaps(other)
    }
}

impl Entity for Door {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn update(&mut self, _dt: f32) {}

    fn render(&self, surface: &mut dyn Surface) {
        if self.disposed {
            return;
        }
        surface.draw(Drawable {
            sprite: Sprite::Door {
                direction: self.direction,
                locked: self.locked,
            },
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
