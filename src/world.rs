//! Entity stores
//!
//! [`World`] is the single owner of the player slot and the enemy and bullet
//! arenas. Enemies and bullets are addressed by generational keys, so a key
//! held past its entity's removal resolves to `None` instead of aliasing a
//! reused slot.

use slotmap::SlotMap;

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletKey, Enemy, EnemyKey, Player};
use crate::geometry::Vector2;

/// All mutable game state for one round.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) config: GameConfig,
    pub(crate) player: Option<Player>,
    pub(crate) enemies: SlotMap<EnemyKey, Enemy>,
    pub(crate) bullets: SlotMap<BulletKey, Bullet>,
    /// Seconds accrued toward the next enemy spawn.
    pub(crate) spawn_timer: f64,
}

impl World {
    /// Create an empty world (no player yet).
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "world built from an invalid config");
        Self {
            config,
            player: None,
            enemies: SlotMap::with_key(),
            bullets: SlotMap::with_key(),
            spawn_timer: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ── Player ───────────────────────────────────────────────────────────────

    /// Create (or recreate) the player with full health and zero score.
    pub fn create_player(&mut self) -> &mut Player {
        self.player
            .insert(Player::spawn(&self.config.player, &self.config.play_area))
    }

    pub fn destroy_player(&mut self) {
        self.player = None;
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    // ── Enemies ──────────────────────────────────────────────────────────────

    /// Add an enemy with the configured attributes at `position` (top-left).
    pub fn spawn_enemy(&mut self, position: Vector2) -> EnemyKey {
        self.enemies.insert(Enemy::new(position, &self.config.enemy))
    }

    pub fn destroy_enemy(&mut self, key: EnemyKey) -> Option<Enemy> {
        self.enemies.remove(key)
    }

    pub fn enemy(&self, key: EnemyKey) -> Option<&Enemy> {
        self.enemies.get(key)
    }

    pub fn enemy_mut(&mut self, key: EnemyKey) -> Option<&mut Enemy> {
        self.enemies.get_mut(key)
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EnemyKey, &Enemy)> + '_ {
        self.enemies.iter()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }

    // ── Bullets ──────────────────────────────────────────────────────────────

    /// Add a bullet centered at `position` with the configured damage, speed
    /// and radius.
    pub fn spawn_bullet(&mut self, position: Vector2) -> BulletKey {
        self.bullets.insert(Bullet::new(position, &self.config.bullet))
    }

    pub fn destroy_bullet(&mut self, key: BulletKey) -> Option<Bullet> {
        self.bullets.remove(key)
    }

    pub fn bullet(&self, key: BulletKey) -> Option<&Bullet> {
        self.bullets.get(key)
    }

    pub fn bullets(&self) -> impl Iterator<Item = (BulletKey, &Bullet)> + '_ {
        self.bullets.iter()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn clear_bullets(&mut self) {
        self.bullets.clear();
    }

    // ── Round lifecycle ──────────────────────────────────────────────────────

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    /// Start a fresh round: new player, no enemies or bullets, spawn timer
    /// restarted.
    pub fn reset_round(&mut self) {
        self.create_player();
        self.clear_enemies();
        self.clear_bullets();
        self.spawn_timer = 0.0;
    }

    /// Drop every entity, including the player.
    pub fn teardown(&mut self) {
        self.destroy_player();
        self.clear_enemies();
        self.clear_bullets();
        self.spawn_timer = 0.0;
    }
}
