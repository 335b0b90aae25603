//! Game event system for decoupled communication between the simulation and its listeners.
//!
//! Rooms publish events while they update; observers (score keeping,
//! logging, audio) subscribe on the [`EventBus`] owned by the dungeon.
//! Delivery is synchronous and in subscription order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::enemy::EnemyKind;
use crate::error::ObserverError;
use crate::geometry::Direction;
use crate::item::ItemKind;
use crate::room::RoomId;

/// Game events that observers can subscribe to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player picked up an item
    ItemCollected {
        room: RoomId,
        item: ItemKind,
        /// Health restored, damage gained or gold added
        value: u32,
    },
    /// An enemy's health reached zero
    EnemyDefeated {
        room: RoomId,
        enemy: EnemyKind,
        gold_value: u32,
    },
    /// The last enemy in a room died
    RoomCleared { room: RoomId, rewards: u32 },
    /// An enemy hit the player
    PlayerDamaged {
        attacker: EnemyKind,
        damage: u32,
        remaining_health: u32,
    },
    /// The player spent a key on a door
    DoorUnlocked {
        room: RoomId,
        direction: Direction,
        target: RoomId,
    },
}

/// Fire-and-forget sound an audio host may play for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Hit,
    EnemyDown,
    Pickup,
    Unlock,
    Victory,
}

impl GameEvent {
    pub fn audio_cue(&self) -> AudioCue {
        match self {
            GameEvent::ItemCollected { .. } => AudioCue::Pickup,
            GameEvent::EnemyDefeated { .. } => AudioCue::EnemyDown,
            GameEvent::RoomCleared { .. } => AudioCue::Victory,
            GameEvent::PlayerDamaged { .. } => AudioCue::Hit,
            GameEvent::DoorUnlocked { .. } => AudioCue::Unlock,
        }
    }
}

/// Anything that wants to hear about game events.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ObserverError>;
}

/// Lets the host keep a handle on an observer after subscribing it.
impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ObserverError> {
        self.borrow_mut().on_event(event)
    }
}

/// Adapts a closure into an observer.
pub struct FnObserver<F>(pub F);

impl<F> GameObserver for FnObserver<F>
where
    F: FnMut(&GameEvent) -> Result<(), ObserverError>,
{
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ObserverError> {
        (self.0)(event)
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Ordered registry of observers.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(ObserverId, Box<dyn GameObserver>)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn subscribe_fn<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(&GameEvent) -> Result<(), ObserverError> + 'static,
    {
        self.subscribe(Box::new(FnObserver(f)))
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver to every observer in subscription order. A failing observer is
    /// logged and skipped; the rest still get the event. Returns the number of failures.
    pub fn publish(&mut self, event: GameEvent) -> usize {
        let mut failures = 0;
        for (id, observer) in self.observers.iter_mut() {
            if let Err(err) = observer.on_event(&event) {
                log::warn!("observer {:?} failed on {:?}: {}", id, event, err);
                failures += 1;
            }
        }
        failures
    }

    pub fn notify_item_collected(&mut self, room: RoomId, item: ItemKind, value: u32) {
        self.publish(GameEvent::ItemCollected { room, item, value });
    }

    pub fn notify_enemy_defeated(&mut self, room: RoomId, enemy: EnemyKind, gold_value: u32) {
        self.publish(GameEvent::EnemyDefeated {
            room,
            enemy,
            gold_value,
        });
    }

    pub fn notify_room_cleared(&mut self, room: RoomId, rewards: u32) {
        self.publish(GameEvent::RoomCleared { room, rewards });
    }

    pub fn notify_player_damaged(&mut self, attacker: EnemyKind, damage: u32, remaining_health: u32) {
        self.publish(GameEvent::PlayerDamaged {
            attacker,
            damage,
            remaining_health,
        });
    }

    pub fn notify_door_unlocked(&mut self, room: RoomId, direction: Direction, target: RoomId) {
        self.publish(GameEvent::DoorUnlocked {
            room,
            direction,
            target,
        });
    }
}

/// Running score for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    pub enemies_killed: u32,
    /// Gold from coins plus each defeated enemy's gold value
    pub gold: u32,
    pub items_collected: u32,
    pub rooms_cleared: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameObserver for ScoreTracker {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ObserverError> {
        match *event {
            GameEvent::ItemCollected { item, value, .. } => {
                self.items_collected += 1;
                if item == ItemKind::GoldCoin {
                    self.gold = self.gold.saturating_add(value);
                }
            }
            GameEvent::EnemyDefeated { gold_value, .. } => {
                self.enemies_killed += 1;
                self.gold = self.gold.saturating_add(gold_value);
            }
            GameEvent::RoomCleared { .. } => self.rooms_cleared += 1,
            GameEvent::PlayerDamaged { .. } | GameEvent::DoorUnlocked { .. } => {}
        }
        Ok(())
    }
}

/// Writes every event to the log: `debug` normally, `info` when verbose.
#[derive(Debug, Clone, Default)]
pub struct GameLogger {
    verbose: bool,
}

impl GameLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn describe(event: &GameEvent) -> String {
        match *event {
            GameEvent::ItemCollected { room, item, value } => {
                format!("room {room}: collected {} ({value})", item.name())
            }
            GameEvent::EnemyDefeated {
                room,
                enemy,
                gold_value,
            } => format!("room {room}: {} defeated, worth {gold_value} gold", enemy.name()),
            GameEvent::RoomCleared { room, rewards } => {
                format!("room {room} cleared, {rewards} rewards spawned")
            }
            GameEvent::PlayerDamaged {
                attacker,
                damage,
                remaining_health,
            } => format!(
                "{} hit the player for {damage}, {remaining_health} health left",
                attacker.name()
            ),
            GameEvent::DoorUnlocked {
                room,
                direction,
                target,
            } => format!("room {room}: {direction} door to room {target} unlocked"),
        }
    }
}

impl GameObserver for GameLogger {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ObserverError> {
        let line = Self::describe(event);
        if self.verbose {
            log::info!("{line}");
        } else {
            log::debug!("{line}");
        }
        Ok(())
    }
}
