//! Dungeon engine - owns the rooms, the player and the event bus, and drives one frame at a time.
//!
//! The engine handles:
//! - Per-frame update dispatch (player, then the current room)
//! - Room transitions through doors
//! - Render dispatch to a host surface
//! - Route queries over the room graph
//!
//! The host only handles:
//! - Translating its input devices into an [`InputSource`]
//! - Calling [`Dungeon::update`] once per frame
//! - Drawing what [`Dungeon::render`] hands its surface

pub mod room_transition;

pub use room_transition::{entry_position, handle_room_transition, plan_transition, RoomTransitionResult};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BalanceConfig;
use crate::constants::START_ROOM_ID;
use crate::entity::{Combatant, Entity};
use crate::error::DungeonError;
use crate::events::EventBus;
use crate::factory::standard_dungeon;
use crate::graph::DungeonGraph;
use crate::input::InputSource;
use crate::pathfinding;
use crate::player::Player;
use crate::render::Surface;
use crate::repository::{InMemoryRoomRepository, RoomRepository};
use crate::room::{Notice, Room, RoomContext, RoomId};

/// One game session.
pub struct Dungeon<R: RoomRepository = InMemoryRoomRepository> {
    config: BalanceConfig,
    rooms: R,
    current: RoomId,
    player: Player,
    events: EventBus,
    rng: StdRng,
    /// Latest message for the HUD
    notice: Option<Notice>,
    disposed: bool,
}

impl Dungeon<InMemoryRoomRepository> {
    /// The standard four-room dungeon, starting in room 0.
    pub fn standard(config: BalanceConfig, seed: u64) -> Result<Self, DungeonError> {
        config.validate()?;
        let rooms = standard_dungeon(&config);
        Self::new(config, rooms, START_ROOM_ID, EventBus::new(), seed)
    }
}

impl<R: RoomRepository> Dungeon<R> {
    /// Start a session in `start`, with the player centred in that room.
    pub fn new(config: BalanceConfig, rooms: R, start: RoomId, events: EventBus, seed: u64) -> Result<Self, DungeonError> {
        config.validate()?;
        let Some(room) = rooms.find(start) else {
            return Err(DungeonError::MissingRoom(start));
        };
        let player = Player::centered(room.size(), &config.player);
        log::info!("dungeon session started in room {} ({} rooms)", start, rooms.count());
        Ok(Self {
            config,
            rooms,
            current: start,
            player,
            events,
            rng: StdRng::seed_from_u64(seed),
            notice: None,
            disposed: false,
        })
    }

    /// Advance one frame: player, then the current room, then any pending transition.
    pub fn update(&mut self, dt: f32, input: &dyn InputSource) {
        puffin::profile_function!();
        if self.disposed || self.player.is_dead() {
            return;
        }

        let Some(room) = self.rooms.find_mut(self.current) else {
            self.player.clear_transition();
            return;
        };
        self.player.advance(dt, input, room.size());

        let mut ctx = RoomContext {
            dt,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        let notices = room.update(&mut self.player, &mut ctx);
        if let Some(last) = notices.last() {
            self.notice = Some(*last);
        }

        if let Some(result) = handle_room_transition(&self.rooms, self.current, &mut self.player, &self.config.player) {
            self.current = result.to;
            self.notice = Some(Notice::EnteredRoom { room: result.to });
        }

        if self.player.is_dead() {
            log::info!("the player has fallen in room {}", self.current);
        }
    }

    /// Draw the current room, then the player.
    pub fn render(&self, surface: &mut dyn Surface) {
        if self.disposed {
            return;
        }
        if let Some(room) = self.rooms.find(self.current) {
            room.render(surface);
        }
        self.player.render(surface);
    }

    /// Rooms to walk through to reach `goal`, starting with the current one.
    /// Empty when `goal` cannot be reached.
    pub fn route_to(&self, goal: RoomId) -> Vec<RoomId> {
        let graph = DungeonGraph::from_repository(&self.rooms, self.current);
        pathfinding::find_path(&graph, self.current, goal)
    }

    /// The neighbouring room to head for next on the way to `goal`.
    /// `None` when already there or when `goal` cannot be reached.
    pub fn next_room_toward(&self, goal: RoomId) -> Option<RoomId> {
        let graph = DungeonGraph::from_repository(&self.rooms, self.current);
        pathfinding::next_step_toward(&graph, self.current, goal)
    }

    pub fn graph(&self) -> DungeonGraph {
        DungeonGraph::from_repository(&self.rooms, self.current)
    }

    pub fn current_room_id(&self) -> RoomId {
        self.current
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.find(self.current)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.rooms.find_mut(self.current)
    }

    pub fn rooms(&self) -> &R {
        &self.rooms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// True once the player is dead.
    pub fn is_over(&self) -> bool {
        self.player.is_dead()
    }

    /// Tear down every room and the player. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for id in self.rooms.ids() {
            if let Some(room) = self.rooms.find_mut(id) {
                room.dispose();
            }
        }
        self.player.dispose();
        self.disposed = true;
        log::debug!("dungeon disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
