use air_combat::config::GameConfig;
use air_combat::entities::*;
use air_combat::geometry::Vector2;
use air_combat::world::World;

fn make_world() -> World {
    World::new(GameConfig::default())
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_spawns_centered_with_full_health() {
    let mut world = make_world();
    assert!(world.player().is_none());

    let player = world.create_player().clone();
    assert_eq!(player.position, Vector2::new(360.0, 660.0)); // (800-80)/2, 800-120-20
    assert_eq!(player.width, 80.0);
    assert_eq!(player.height, 120.0);
    assert_eq!(player.attributes.health, 3);
    assert_eq!(player.attributes.score, 0);
    assert_eq!(player.attributes.cooldown, 0.0);
    assert_eq!(player.attributes.max_cooldown, 0.1);
    assert_eq!(world.player(), Some(&player));
}

#[test]
fn recreating_player_restores_defaults() {
    let mut world = make_world();
    world.create_player();
    {
        let p = world.player_mut().unwrap();
        p.attributes.health = 1;
        p.attributes.score = 70;
        p.position = Vector2::new(0.0, 0.0);
    }
    world.create_player();
    let p = world.player().unwrap();
    assert_eq!(p.attributes.health, 3);
    assert_eq!(p.attributes.score, 0);
    assert_eq!(p.position, Vector2::new(360.0, 660.0));
}

#[test]
fn destroy_player_leaves_no_player() {
    let mut world = make_world();
    world.create_player();
    world.destroy_player();
    assert!(world.player().is_none());
    assert!(world.player_mut().is_none());
}

#[test]
fn muzzle_is_top_center() {
    let mut world = make_world();
    let p = world.create_player();
    assert_eq!(p.muzzle(), Vector2::new(400.0, 660.0));
}

// ── Attributes ────────────────────────────────────────────────────────────────

#[test]
fn cooldown_counts_down_only_while_positive() {
    let mut a = Attributes {
        health: 1,
        score: 0,
        speed: 0.0,
        max_cooldown: 0.1,
        cooldown: 0.1,
    };
    assert!(!a.can_act());
    a.tick_cooldown(0.06);
    assert!(!a.can_act());
    a.tick_cooldown(0.06);
    assert!(a.can_act());
    let settled = a.cooldown;
    a.tick_cooldown(0.5);
    assert_eq!(a.cooldown, settled);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn spawn_enemy_uses_configured_attributes() {
    let mut world = make_world();
    let key = world.spawn_enemy(Vector2::new(100.0, -100.0));
    let e = world.enemy(key).unwrap();
    assert_eq!(e.position, Vector2::new(100.0, -100.0));
    assert_eq!(e.width, 80.0);
    assert_eq!(e.height, 80.0);
    assert_eq!(e.attributes.health, 1);
    assert_eq!(e.attributes.score, 10);
    assert_eq!(e.attributes.speed, 200.0);
    assert_eq!(world.enemy_count(), 1);
}

#[test]
fn stale_enemy_key_resolves_to_none() {
    let mut world = make_world();
    let old = world.spawn_enemy(Vector2::new(100.0, 0.0));
    assert!(world.destroy_enemy(old).is_some());
    // The freed slot is reused; the old handle must not see the newcomer
    let new = world.spawn_enemy(Vector2::new(200.0, 0.0));
    assert_ne!(old, new);
    assert!(world.enemy(old).is_none());
    assert!(world.destroy_enemy(old).is_none());
    assert_eq!(world.enemy(new).unwrap().position.x, 200.0);
}

#[test]
fn clear_enemies_empties_the_store() {
    let mut world = make_world();
    for i in 0..4 {
        world.spawn_enemy(Vector2::new(i as f64 * 100.0, 0.0));
    }
    assert_eq!(world.enemies().count(), 4);
    world.clear_enemies();
    assert_eq!(world.enemy_count(), 0);
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn spawn_bullet_uses_configured_attributes() {
    let mut world = make_world();
    let key = world.spawn_bullet(Vector2::new(50.0, 60.0));
    let b = world.bullet(key).unwrap();
    assert_eq!(b.position, Vector2::new(50.0, 60.0));
    assert_eq!(b.radius, 5.0);
    assert_eq!(b.damage, 1);
    assert_eq!(b.speed, 800.0);
    assert_eq!(b.circle().radius, 5.0);

    assert!(world.destroy_bullet(key).is_some());
    assert!(world.bullet(key).is_none());
    assert_eq!(world.bullet_count(), 0);
}

// ── Round lifecycle ───────────────────────────────────────────────────────────

#[test]
fn reset_round_and_teardown() {
    let mut world = make_world();
    world.create_player().attributes.score = 40;
    world.spawn_enemy(Vector2::new(0.0, 0.0));
    world.spawn_bullet(Vector2::new(0.0, 0.0));

    world.reset_round();
    assert_eq!(world.player().unwrap().attributes.score, 0);
    assert_eq!(world.enemy_count(), 0);
    assert_eq!(world.bullet_count(), 0);
    assert_eq!(world.spawn_timer(), 0.0);

    world.spawn_enemy(Vector2::new(0.0, 0.0));
    world.teardown();
    assert!(world.player().is_none());
    assert_eq!(world.enemy_count(), 0);
}
