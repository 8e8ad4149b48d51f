//! Game configuration
//!
//! Defaults are the tuning the game was designed with. At startup they can be
//! overridden, lowest to highest priority, by:
//! 1. `config/air_combat.toml` (optional)
//! 2. Environment variables (`AIR_COMBAT_SECTION__KEY`)
//!
//! The configuration is read once and never changes during a run.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Main game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub play_area: PlayAreaConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub bullet: BulletConfig,
    #[serde(default)]
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Window and play-area dimensions in pixels. The play area occupies the
/// left part of the window; the rest is the side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayAreaConfig {
    pub window_width: f64,
    pub window_height: f64,
    pub game_width: f64,
    pub game_height: f64,
}

impl Default for PlayAreaConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 800.0,
            game_width: 800.0,
            game_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub initial_health: i32,
    /// Pixels per second.
    pub speed: f64,
    /// Seconds between shots.
    pub fire_cooldown: f64,
    /// Gap between the ship and the bottom of the play area at spawn.
    pub bottom_margin: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 120.0,
            initial_health: 3,
            speed: 500.0,
            fire_cooldown: 0.1,
            bottom_margin: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletConfig {
    pub radius: f64,
    pub speed: f64,
    pub damage: i32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 800.0,
            damage: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    /// Seconds between spawns.
    pub spawn_interval: f64,
    pub health: i32,
    /// Points awarded for destroying one enemy.
    pub score: u32,
    /// Horizontal inset from both play-area edges for spawn positions.
    pub spawn_margin: f64,
    /// Spawn height, above the visible area.
    pub spawn_y: f64,
    /// How far below the play area an enemy travels before it is culled.
    pub cull_margin: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            speed: 200.0,
            spawn_interval: 1.0,
            health: 1,
            score: 10,
            spawn_margin: 30.0,
            spawn_y: -100.0,
            cull_margin: 50.0,
        }
    }
}

/// Gameplay switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Award an enemy's score when it rams the player. Off by default: being
    /// hit costs health and earns nothing.
    pub score_on_ram: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub target_fps: u32,
    /// Upper bound on a single frame's delta, in seconds.
    pub max_delta: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_delta: 0.1,
        }
    }
}

impl TimingConfig {
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

impl GameConfig {
    /// Load configuration from the default location (`config/`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let file = config_dir.as_ref().join("air_combat.toml");

        let mut figment = Figment::from(Serialized::defaults(GameConfig::default()));
        if file.exists() {
            figment = figment.merge(Toml::file(&file));
        }
        // AIR_COMBAT_ENEMY__SPAWN_INTERVAL=0.5 -> enemy.spawn_interval = 0.5
        figment = figment.merge(Env::prefixed("AIR_COMBAT_").split("__"));

        Self::from_figment(figment)
    }

    /// Extract a configuration from an already assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Reject values that would break the simulation's contracts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = &self.play_area;
        positive("play_area.game_width", area.game_width)?;
        positive("play_area.game_height", area.game_height)?;
        if area.window_width < area.game_width || area.window_height < area.game_height {
            return Err(ConfigError::invalid(
                "play_area",
                "play area must fit inside the window",
            ));
        }

        let player = &self.player;
        positive("player.width", player.width)?;
        positive("player.height", player.height)?;
        non_negative("player.speed", player.speed)?;
        non_negative("player.fire_cooldown", player.fire_cooldown)?;
        non_negative("player.bottom_margin", player.bottom_margin)?;
        if player.initial_health <= 0 {
            return Err(ConfigError::invalid("player.initial_health", "must be at least 1"));
        }
        if player.width > area.game_width
            || player.height + player.bottom_margin > area.game_height
        {
            return Err(ConfigError::invalid(
                "player",
                "player does not fit inside the play area",
            ));
        }

        let bullet = &self.bullet;
        non_negative("bullet.radius", bullet.radius)?;
        non_negative("bullet.speed", bullet.speed)?;
        if bullet.damage <= 0 {
            return Err(ConfigError::invalid("bullet.damage", "must be at least 1"));
        }

        let enemy = &self.enemy;
        positive("enemy.width", enemy.width)?;
        positive("enemy.height", enemy.height)?;
        non_negative("enemy.speed", enemy.speed)?;
        positive("enemy.spawn_interval", enemy.spawn_interval)?;
        non_negative("enemy.spawn_margin", enemy.spawn_margin)?;
        non_negative("enemy.cull_margin", enemy.cull_margin)?;
        if !enemy.spawn_y.is_finite() {
            return Err(ConfigError::invalid("enemy.spawn_y", "must be finite"));
        }
        if enemy.health <= 0 {
            return Err(ConfigError::invalid("enemy.health", "must be at least 1"));
        }
        if area.game_width - enemy.width - 2.0 * enemy.spawn_margin < 0.0 {
            return Err(ConfigError::invalid(
                "enemy.spawn_margin",
                "no room left to spawn enemies",
            ));
        }

        if self.timing.target_fps == 0 {
            return Err(ConfigError::invalid("timing.target_fps", "must be at least 1"));
        }
        positive("timing.max_delta", self.timing.max_delta)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {value}")))
    }
}
