//! World and room geometry constants.

/// Width of every room (world units)
pub const WORLD_WIDTH: f32 = 800.0;
/// Height of every room (world units)
pub const WORLD_HEIGHT: f32 = 600.0;

/// Door width when set into a north or south wall (swapped for east/west)
pub const DOOR_WIDTH: f32 = 64.0;
/// Door height when set into a north or south wall (swapped for east/west)
pub const DOOR_HEIGHT: f32 = 128.0;
/// Fraction of the door's depth that pokes into the room past the wall line
pub const DOOR_INSET_FRACTION: f32 = 0.1;

/// Id of the room the player starts in
pub const START_ROOM_ID: u32 = 0;
