//! Rendering boundary.
//!
//! The simulation never touches pixels. Entities describe themselves as
//! [`Drawable`]s and hand them to a host-provided [`Surface`].

use glam::Vec2;

use crate::enemy::EnemyKind;
use crate::geometry::Direction;
use crate::item::ItemKind;
use crate::room::RoomId;

/// Which texture/visual state the host should use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    RoomBackground { room: RoomId },
    Player { attacking: bool },
    Enemy { kind: EnemyKind, health_fraction: f32 },
    Item { kind: ItemKind },
    Door { direction: Direction, locked: bool },
}

/// Entity ready for rendering with all visual state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub sprite: Sprite,
    pub position: Vec2,
    pub size: Vec2,
}

/// Opaque drawing target supplied by the host renderer.
pub trait Surface {
    fn draw(&mut self, drawable: Drawable);
}

/// A [`Surface`] that just records draw calls in order.
#[derive(Debug, Default)]
pub struct RenderList {
    pub drawables: Vec<Drawable>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.drawables.clear();
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter()
    }
}

impl Surface for RenderList {
    fn draw(&mut self, drawable: Drawable) {
        self.drawables.push(drawable);
    }
}
