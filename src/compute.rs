//! Per-frame game logic.
//!
//! A frame is `advance` (movement, firing, spawning, culling) followed by
//! `resolve_collisions`. Randomness only enters through the injected RNG, so
//! tests drive the world with a seeded one.
//!
//! Entities are never removed while a collection is being scanned: each pass
//! collects the keys to drop and compacts once the scan is over.

use rand::Rng;

use crate::entities::{BulletKey, EnemyKey};
use crate::geometry::{clamp, is_rect_circle_collision, is_rect_rect_collision, Vector2};
use crate::input::InputState;
use crate::world::World;

/// What the collision passes did this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Enemies that rammed the player.
    pub player_hits: u32,
    /// Enemies destroyed by bullets.
    pub enemies_destroyed: u32,
    pub bullets_spent: u32,
    /// Set when the player died and the round was reset.
    pub round_reset: Option<RoundSummary>,
}

/// Final numbers of a round that ended in the player's death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
}

impl World {
    /// Run one full simulation step: advance every entity, then resolve
    /// collisions.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        input: &InputState,
        rng: &mut R,
    ) -> CollisionReport {
        self.advance(dt, input, rng);
        self.resolve_collisions()
    }

    /// Move every entity by `dt` seconds, fire, spawn and cull.
    ///
    /// `dt` is expected to be clamped by the caller; negative values are
    /// treated as zero.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, input: &InputState, rng: &mut R) {
        let dt = dt.max(0.0);
        self.update_player(dt, input);
        self.update_enemies(dt, rng);
        self.update_bullets(dt, input);
    }

    // ── 1. Player ────────────────────────────────────────────────────────────

    pub fn update_player(&mut self, dt: f64, input: &InputState) {
        let area = &self.config.play_area;
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let direction = input.direction().normalize();
        player.position += direction * (player.attributes.speed * dt);

        player.position = Vector2::new(
            clamp(player.position.x, 0.0, area.game_width - player.width),
            clamp(player.position.y, 0.0, area.game_height - player.height),
        );

        player.attributes.tick_cooldown(dt);
    }

    // ── 2. Enemies ───────────────────────────────────────────────────────────

    pub fn update_enemies<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        self.spawn_enemies(dt, rng);

        let limit = self.config.play_area.game_height + self.config.enemy.cull_margin;
        for enemy in self.enemies.values_mut() {
            enemy.position.y += enemy.attributes.speed * dt;
        }
        let before = self.enemies.len();
        self.enemies.retain(|_, enemy| enemy.position.y <= limit);
        let culled = before - self.enemies.len();
        if culled > 0 {
            log::trace!("culled {culled} enemies below the play area");
        }
    }

    /// Accrue `dt` on the spawn timer and spawn one enemy per whole interval
    /// it holds. A slow frame may spawn several; the remainder carries over.
    /// Returns how many enemies were spawned.
    pub fn spawn_enemies<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) -> usize {
        let interval = self.config.enemy.spawn_interval;
        self.spawn_timer += dt.max(0.0);

        let mut spawned = 0;
        while self.spawn_timer >= interval {
            self.spawn_random_enemy(rng);
            self.spawn_timer -= interval;
            spawned += 1;
        }
        if spawned > 0 {
            log::debug!("spawned {spawned} enemies, {} alive", self.enemies.len());
        }
        spawned
    }

    /// Spawn one enemy at a random x inside the margin-inset range, above the
    /// visible area.
    pub fn spawn_random_enemy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EnemyKey {
        let enemy = &self.config.enemy;
        let min_x = enemy.spawn_margin;
        let max_x = (self.config.play_area.game_width - enemy.width - enemy.spawn_margin).max(min_x);
        let x = rng.gen_range(min_x..=max_x);
        let y = enemy.spawn_y;
        self.spawn_enemy(Vector2::new(x, y))
    }

    // ── 3. Bullets ───────────────────────────────────────────────────────────

    pub fn update_bullets(&mut self, dt: f64, input: &InputState) {
        self.try_fire(input);

        for bullet in self.bullets.values_mut() {
            bullet.position.y -= bullet.speed * dt;
        }
        self.bullets
            .retain(|_, bullet| bullet.position.y + bullet.radius >= 0.0);
    }

    /// Fire one bullet from the player's muzzle if fire is held and the
    /// cooldown has run out.
    pub fn try_fire(&mut self, input: &InputState) -> Option<BulletKey> {
        if !input.fire {
            return None;
        }
        let player = self.player.as_mut()?;
        if !player.attributes.can_act() {
            return None;
        }
        player.attributes.cooldown = player.attributes.max_cooldown;
        let muzzle = player.muzzle();
        Some(self.spawn_bullet(muzzle))
    }

    // ── 4. Collisions ────────────────────────────────────────────────────────

    /// Player-vs-enemies, then bullets-vs-enemies.
    pub fn resolve_collisions(&mut self) -> CollisionReport {
        let mut report = CollisionReport::default();
        self.collide_player_enemies(&mut report);
        if report.round_reset.is_none() {
            self.collide_bullets_enemies(&mut report);
        }
        report
    }

    /// Every enemy overlapping the player costs one health point and is
    /// removed. Reaching zero health resets the round and ends the pass.
    pub fn collide_player_enemies(&mut self, report: &mut CollisionReport) {
        let score_on_ram = self.config.rules.score_on_ram;
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let player_rect = player.bounds();

        let mut rammed: Vec<EnemyKey> = Vec::new();
        for (key, enemy) in &self.enemies {
            if !is_rect_rect_collision(player_rect, enemy.bounds()) {
                continue;
            }
            player.attributes.health -= 1;
            if score_on_ram {
                player.attributes.score += enemy.attributes.score;
            }
            rammed.push(key);
            report.player_hits += 1;

            if !player.attributes.is_alive() {
                break;
            }
        }

        if !player.attributes.is_alive() {
            let summary = RoundSummary {
                score: player.attributes.score,
            };
            log::info!("player destroyed with score {}, resetting round", summary.score);
            self.reset_round();
            report.round_reset = Some(summary);
            return;
        }

        for key in rammed {
            self.enemies.remove(key);
        }
    }

    /// Each bullet damages at most one enemy, the first live one it overlaps,
    /// and is consumed by the hit whether or not the enemy dies.
    pub fn collide_bullets_enemies(&mut self, report: &mut CollisionReport) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let mut spent: Vec<BulletKey> = Vec::new();
        let mut destroyed: Vec<EnemyKey> = Vec::new();

        for (bullet_key, bullet) in &self.bullets {
            let circle = bullet.circle();
            let target = self.enemies.iter_mut().find(|(_, enemy)| {
                enemy.attributes.is_alive() && is_rect_circle_collision(enemy.bounds(), circle)
            });
            let Some((enemy_key, enemy)) = target else {
                continue;
            };

            enemy.attributes.health -= bullet.damage;
            if !enemy.attributes.is_alive() {
                player.attributes.score += enemy.attributes.score;
                destroyed.push(enemy_key);
            }
            spent.push(bullet_key);
        }

        report.bullets_spent += spent.len() as u32;
        report.enemies_destroyed += destroyed.len() as u32;

        for key in spent {
            self.bullets.remove(key);
        }
        for key in destroyed {
            self.enemies.remove(key);
        }
    }
}
