//! Input boundary.
//!
//! The player reads an abstract [`InputSource`] instead of polling hardware.
//! Hosts translate their keyboard/gamepad state into one of these per frame.

use std::collections::HashSet;

use crate::geometry::Direction;

/// Per-frame view of the controls.
pub trait InputSource {
    /// Movement key for `direction` is held this frame.
    fn is_pressed(&self, direction: Direction) -> bool;

    /// Attack key went down this frame.
    fn attack_just_pressed(&self) -> bool;
}

/// Input state tracking
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub held: HashSet<Direction>,
    pub attack_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing held, nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(direction: Direction) -> Self {
        let mut input = Self::new();
        input.press(direction);
        input
    }

    pub fn attacking() -> Self {
        Self {
            held: HashSet::new(),
            attack_pressed: true,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    /// Forget the one-frame attack press once it has been consumed.
    pub fn end_frame(&mut self) {
        self.attack_pressed = false;
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    fn attack_just_pressed(&self) -> bool {
        self.attack_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.press(Direction::North);
        input.press(Direction::East);
        assert!(input.is_pressed(Direction::North));
        assert!(input.is_pressed(Direction::East));
        input.release(Direction::North);
        assert!(!input.is_pressed(Direction::North));
    }

    #[test]
    fn test_attack_lasts_one_frame() {
        let mut input = InputState::attacking();
        assert!(input.attack_just_pressed());
        input.end_frame();
        assert!(!input.attack_just_pressed());
    }
}
