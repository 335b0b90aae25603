//! Balance configuration.
//!
//! Every tunable number in the simulation lives here. Defaults come from
//! [`crate::constants`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enemy::EnemyKind;
use crate::error::ConfigError;
use crate::item::ItemKind;
use crate::loot::{LootEntry, LootTable};

/// Per-archetype enemy stats, copied into an enemy when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub attack_cooldown: f32,
    pub gold_value: u32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub door_width: f32,
    pub door_height: f32,
    pub door_inset: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            door_width: DOOR_WIDTH,
            door_height: DOOR_HEIGHT,
            door_inset: DOOR_INSET_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    pub attack_damage: u32,
    pub move_speed: f32,
    pub attack_cooldown: f32,
    pub attack_display_time: f32,
    pub entry_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            max_health: PLAYER_MAX_HEALTH,
            attack_damage: PLAYER_ATTACK_DAMAGE,
            move_speed: PLAYER_MOVE_SPEED,
            attack_cooldown: PLAYER_ATTACK_COOLDOWN,
            attack_display_time: PLAYER_ATTACK_DISPLAY_TIME,
            entry_offset: PLAYER_ENTRY_OFFSET,
        }
    }
}

/// Stats for every [`EnemyKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyCatalog {
    pub zombie: EnemyStats,
    pub skeleton: EnemyStats,
    pub boss: EnemyStats,
}

impl EnemyCatalog {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Zombie => &self.zombie,
            EnemyKind::Skeleton => &self.skeleton,
            EnemyKind::Boss => &self.boss,
        }
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self {
            zombie: EnemyStats {
                health: ZOMBIE_HEALTH,
                damage: ZOMBIE_DAMAGE,
                move_speed: ZOMBIE_SPEED,
                attack_cooldown: ZOMBIE_ATTACK_COOLDOWN,
                gold_value: ZOMBIE_GOLD_VALUE,
                size: ENEMY_SIZE,
            },
            skeleton: EnemyStats {
                health: SKELETON_HEALTH,
                damage: SKELETON_DAMAGE,
                move_speed: SKELETON_SPEED,
                attack_cooldown: SKELETON_ATTACK_COOLDOWN,
                gold_value: SKELETON_GOLD_VALUE,
                size: ENEMY_SIZE,
            },
            boss: EnemyStats {
                health: BOSS_HEALTH,
                damage: BOSS_DAMAGE,
                move_speed: BOSS_SPEED,
                attack_cooldown: BOSS_ATTACK_COOLDOWN,
                gold_value: BOSS_GOLD_VALUE,
                size: ENEMY_SIZE,
            },
        }
    }
}

/// Movement strategy tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub follow_range: f32,
    pub patrol_radius: f32,
    pub patrol_proximity: f32,
    pub direction_change_interval: f32,
    pub arrival_threshold: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            follow_range: FOLLOW_RANGE,
            patrol_radius: PATROL_RADIUS,
            patrol_proximity: PATROL_PROXIMITY,
            direction_change_interval: DIRECTION_CHANGE_INTERVAL,
            arrival_threshold: ARRIVAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub size: f32,
    pub bob_height: f32,
    pub bob_speed: f32,
    pub health_potion_heal: u32,
    pub damage_boost: u32,
    pub gold_coin_value: u32,
}

impl ItemConfig {
    /// The amount an item of `kind` is worth (heal, damage, gold; keys are worth 0).
    pub fn value(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::HealthPotion => self.health_potion_heal,
            ItemKind::DamageBoost => self.damage_boost,
            ItemKind::Key => 0,
            ItemKind::GoldCoin => self.gold_coin_value,
        }
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            size: ITEM_SIZE,
            bob_height: ITEM_BOB_HEIGHT,
            bob_speed: ITEM_BOB_SPEED,
            health_potion_heal: HEALTH_POTION_HEAL,
            damage_boost: DAMAGE_BOOST_AMOUNT,
            gold_coin_value: GOLD_COIN_VALUE,
        }
    }
}

/// What a room spawns the moment it is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub table: LootTable,
    pub min_count: u32,
    pub max_count: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            table: LootTable::new(vec![
                LootEntry::item(ItemKind::GoldCoin, REWARD_WEIGHT_GOLD_COIN),
                LootEntry::item(ItemKind::HealthPotion, REWARD_WEIGHT_HEALTH_POTION),
                LootEntry::item(ItemKind::DamageBoost, REWARD_WEIGHT_DAMAGE_BOOST),
                LootEntry::item(ItemKind::Key, REWARD_WEIGHT_KEY),
            ]),
            min_count: REWARD_COUNT_MIN,
            max_count: REWARD_COUNT_MAX,
        }
    }
}

/// The full set of balance numbers for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyCatalog,
    pub ai: AiConfig,
    pub items: ItemConfig,
    /// Rolled once per enemy death
    pub drops: LootTable,
    pub rewards: RewardConfig,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            enemies: EnemyCatalog::default(),
            ai: AiConfig::default(),
            items: ItemConfig::default(),
            drops: LootTable::new(vec![
                LootEntry::item(ItemKind::HealthPotion, DROP_WEIGHT_HEALTH_POTION),
                LootEntry::item(ItemKind::GoldCoin, DROP_WEIGHT_GOLD_COIN),
                LootEntry::item(ItemKind::Key, DROP_WEIGHT_KEY),
                LootEntry::nothing(DROP_WEIGHT_NOTHING),
            ]),
            rewards: RewardConfig::default(),
        }
    }
}

impl BalanceConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BalanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON balance file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Room size as a vector.
    pub fn bounds(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world.width, self.world.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("world.door_width", self.world.door_width)?;
        positive("world.door_height", self.world.door_height)?;
        if !(0.0..=1.0).contains(&self.world.door_inset) {
            return Err(invalid("world.door_inset", "must be within 0..=1"));
        }

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        if self.player.width > self.world.width || self.player.height > self.world.height {
            return Err(invalid("player", "does not fit inside the world"));
        }
        if self.player.max_health == 0 {
            return Err(invalid("player.max_health", "must be at least 1"));
        }
        non_negative("player.move_speed", self.player.move_speed)?;
        non_negative("player.attack_cooldown", self.player.attack_cooldown)?;
        non_negative("player.attack_display_time", self.player.attack_display_time)?;
        non_negative("player.entry_offset", self.player.entry_offset)?;
        // Entering a room must not land the player on the door they came through
        if self.player.entry_offset <= self.world.door_height * self.world.door_inset {
            return Err(invalid("player.entry_offset", "must clear the door inset"));
        }

        for kind in EnemyKind::ALL {
            let stats = self.enemies.stats(kind);
            if stats.health == 0 {
                return Err(invalid(kind.config_key(), "health must be at least 1"));
            }
            non_negative(kind.config_key(), stats.move_speed)?;
            non_negative(kind.config_key(), stats.attack_cooldown)?;
            positive(kind.config_key(), stats.size)?;
        }

        non_negative("ai.follow_range", self.ai.follow_range)?;
        non_negative("ai.patrol_radius", self.ai.patrol_radius)?;
        non_negative("ai.patrol_proximity", self.ai.patrol_proximity)?;
        positive("ai.direction_change_interval", self.ai.direction_change_interval)?;
        non_negative("ai.arrival_threshold", self.ai.arrival_threshold)?;

        positive("items.size", self.items.size)?;
        non_negative("items.bob_height", self.items.bob_height)?;

        if self.drops.total_weight() == 0 {
            return Err(invalid("drops", "weights must not all be zero"));
        }
        if self.rewards.table.total_weight() == 0 {
            return Err(invalid("rewards.table", "weights must not all be zero"));
        }
        if self.rewards.min_count > self.rewards.max_count {
            return Err(invalid("rewards", "min_count exceeds max_count"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}
