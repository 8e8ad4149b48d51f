//! Game entity types. Plain data plus the shape views derived from it; the
//! per-frame rules live in `compute`.

use slotmap::new_key_type;

use crate::config::{BulletConfig, EnemyConfig, PlayAreaConfig, PlayerConfig};
use crate::geometry::{create_circle, create_rect, Circle, Rect, Vector2};

new_key_type! {
    /// Handle to an enemy in the world. Stale handles resolve to `None`.
    pub struct EnemyKey;

    /// Handle to a bullet in the world.
    pub struct BulletKey;
}

/// Combat attributes shared by the player and enemies.
#[derive(Clone, Debug, PartialEq)]
pub struct Attributes {
    pub health: i32,
    /// Accumulated score for the player; reward for an enemy.
    pub score: u32,
    /// Pixels per second.
    pub speed: f64,
    pub max_cooldown: f64,
    /// Counts down toward zero while positive; may act when `<= 0`.
    pub cooldown: f64,
}

impl Attributes {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn can_act(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Count the cooldown down by `dt` seconds.
    pub fn tick_cooldown(&mut self, dt: f64) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub position: Vector2,
    pub width: f64,
    pub height: f64,
    pub attributes: Attributes,
}

impl Player {
    /// A fresh ship, centered horizontally near the bottom of the play area.
    pub fn spawn(config: &PlayerConfig, area: &PlayAreaConfig) -> Self {
        Player {
            position: Vector2::new(
                (area.game_width - config.width) / 2.0,
                area.game_height - config.height - config.bottom_margin,
            ),
            width: config.width,
            height: config.height,
            attributes: Attributes {
                health: config.initial_health,
                score: 0,
                speed: config.speed,
                max_cooldown: config.fire_cooldown,
                cooldown: 0.0,
            },
        }
    }

    pub fn bounds(&self) -> Rect {
        create_rect(self.position, self.width, self.height)
    }

    /// Where bullets leave the ship: horizontal center of the top edge.
    pub fn muzzle(&self) -> Vector2 {
        Vector2::new(self.position.x + self.width / 2.0, self.position.y)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Top-left corner.
    pub position: Vector2,
    pub width: f64,
    pub height: f64,
    pub attributes: Attributes,
}

impl Enemy {
    pub fn new(position: Vector2, config: &EnemyConfig) -> Self {
        Enemy {
            position,
            width: config.width,
            height: config.height,
            attributes: Attributes {
                health: config.health,
                score: config.score,
                speed: config.speed,
                max_cooldown: 0.0,
                cooldown: 0.0,
            },
        }
    }

    pub fn bounds(&self) -> Rect {
        create_rect(self.position, self.width, self.height)
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Center of the bullet.
    pub position: Vector2,
    pub radius: f64,
    pub damage: i32,
    /// Upward speed in pixels per second.
    pub speed: f64,
}

impl Bullet {
    pub fn new(position: Vector2, config: &BulletConfig) -> Self {
        Bullet {
            position,
            radius: config.radius,
            damage: config.damage,
            speed: config.speed,
        }
    }

    pub fn circle(&self) -> Circle {
        create_circle(self.position, self.radius)
    }
}
