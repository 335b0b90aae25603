//! Moving the player from one room to the next through a door.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::entity::Combatant;
use crate::geometry::Direction;
use crate::player::Player;
use crate::repository::RoomRepository;
use crate::room::RoomId;

/// Result of a room transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomTransitionResult {
    pub from: RoomId,
    pub to: RoomId,
    /// Wall of the new room the player came in through
    pub entry: Direction,
    pub player_position: Vec2,
}

/// Where a player entering through the `entry` wall of a room of size
/// `bounds` should stand: centred on that wall, `offset` in from its edge.
pub fn entry_position(entry: Direction, bounds: Vec2, player_size: Vec2, offset: f32) -> Vec2 {
    let centred = (bounds - player_size) * 0.5;
    match entry {
        Direction::North => Vec2::new(centred.x, bounds.y - player_size.y - offset),
        Direction::South => Vec2::new(centred.x, offset),
        Direction::East => Vec2::new(bounds.x - player_size.x - offset, centred.y),
        Direction::West => Vec2::new(offset, centred.y),
    }
}

/// Work out where the pending door request leads, without changing anything.
/// `None` when there is no request, no door on that wall, the door is
/// locked, or its target room does not exist.
pub fn plan_transition<R: RoomRepository + ?Sized>(
    rooms: &R,
    current: RoomId,
    player: &Player,
    config: &PlayerConfig,
) -> Option<RoomTransitionResult> {
    let exit = player.transition_request()?;
    let door = rooms.find(current)?.door(exit)?;
    if door.is_locked() {
        return None;
    }
    let next = rooms.find(door.target())?;
    let entry = exit.opposite();
    let position = entry_position(entry, next.size(), player.stats().size(), config.entry_offset);
    Some(RoomTransitionResult {
        from: current,
        to: next.id(),
        entry,
        player_position: position,
    })
}

/// Consume the player's transition request. Moves the player when the
/// request leads somewhere; the request is cleared either way.
pub fn handle_room_transition<R: RoomRepository + ?Sized>(
    rooms: &R,
    current: RoomId,
    player: &mut Player,
    config: &PlayerConfig,
) -> Option<RoomTransitionResult> {
    let requested = player.transition_request();
    let result = plan_transition(rooms, current, player, config);
    player.clear_transition();

    match (requested, result) {
        (_, Some(result)) => {
            player.set_position(result.player_position);
            log::info!("moving from room {} to room {}", result.from, result.to);
            Some(result)
        }
        (Some(exit), None) => {
            log::debug!("room {current}: no way through the {exit} wall");
            None
        }
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use crate::door::Door;
    use crate::entity::Entity;
    use crate::repository::InMemoryRoomRepository;
    use crate::room::Room;

    fn rooms(locked: bool, target: RoomId) -> InMemoryRoomRepository {
        let config = BalanceConfig::default();
        let bounds = config.bounds();
        let mut repo = InMemoryRoomRepository::new();
        let mut a = Room::new(0, bounds);
        a.set_door(Door::on_wall(Direction::East, target, locked, bounds, &config.world));
        repo.save(a);
        let mut b = Room::new(1, bounds);
        b.set_door(Door::on_wall(Direction::West, 0, false, bounds, &config.world));
        repo.save(b);
        repo
    }

    fn player() -> Player {
        let config = BalanceConfig::default();
        Player::centered(config.bounds(), &config.player)
    }

    #[test]
    fn test_entry_positions() {
        let bounds = Vec2::new(800.0, 600.0);
        let size = Vec2::splat(128.0);
        assert_eq!(entry_position(Direction::South, bounds, size, 20.0), Vec2::new(336.0, 20.0));
        assert_eq!(entry_position(Direction::North, bounds, size, 20.0), Vec2::new(336.0, 452.0));
        assert_eq!(entry_position(Direction::West, bounds, size, 20.0), Vec2::new(20.0, 236.0));
        assert_eq!(entry_position(Direction::East, bounds, size, 20.0), Vec2::new(652.0, 236.0));
    }

    #[test]
    fn test_transition_through_open_door() {
        let repo = rooms(false, 1);
        let mut p = player();
        p.request_transition(Direction::East);
        let result = handle_room_transition(&repo, 0, &mut p, &BalanceConfig::default().player);
        let result = result.expect("door is open");
        assert_eq!(result.to, 1);
        assert_eq!(result.entry, Direction::West);
        assert_eq!(p.position(), Vec2::new(20.0, 236.0));
        assert_eq!(p.transition_request(), None);
    }

    #[test]
    fn test_request_cleared_when_blocked() {
        let config = BalanceConfig::default();
        for (repo, exit) in [
            (rooms(true, 1), Direction::East),  // locked
            (rooms(false, 42), Direction::East), // missing target
            (rooms(false, 1), Direction::North), // no door there
        ] {
            let mut p = player();
            let before = p.position();
            p.request_transition(exit);
            assert!(handle_room_transition(&repo, 0, &mut p, &config.player).is_none());
            assert_eq!(p.transition_request(), None);
            assert_eq!(p.position(), before);
        }
    }

    #[test]
    fn test_no_request_is_noop() {
        let repo = rooms(false, 1);
        let mut p = player();
        assert!(handle_room_transition(&repo, 0, &mut p, &BalanceConfig::default().player).is_none());
    }
}
