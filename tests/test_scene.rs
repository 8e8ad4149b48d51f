use std::cell::Cell;
use std::rc::Rc;

use air_combat::config::GameConfig;
use air_combat::geometry::{create_rect, Vector2};
use air_combat::input::InputState;
use air_combat::scene::*;
use air_combat::ui::ButtonPanel;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f64 = 1.0 / 60.0;

fn started() -> (SceneManager, StdRng) {
    let mut scenes = SceneManager::new(GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    scenes.change_scene(SceneId::StartScene);
    assert_eq!(scenes.frame(DT, &InputState::default(), &mut rng), FrameStatus::Continue);
    (scenes, rng)
}

fn idle() -> InputState {
    InputState::default()
}

fn in_game() -> (SceneManager, StdRng) {
    let (mut scenes, mut rng) = started();
    scenes.frame(DT, &InputState { confirm: true, ..idle() }, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::GameScene);
    (scenes, rng)
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn starts_with_no_scene() {
    let scenes = SceneManager::new(GameConfig::default()).unwrap();
    assert_eq!(scenes.current_id(), SceneId::None);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = GameConfig::default();
    config.enemy.spawn_interval = -1.0;
    assert!(SceneManager::new(config).is_err());
}

#[test]
fn transition_table() {
    assert!(SceneId::None.can_transition_to(SceneId::StartScene));
    assert!(SceneId::StartScene.can_transition_to(SceneId::GameScene));
    assert!(SceneId::GameScene.can_transition_to(SceneId::StartScene));
    assert!(!SceneId::None.can_transition_to(SceneId::GameScene));
    assert!(!SceneId::StartScene.can_transition_to(SceneId::StartScene));
    assert!(!SceneId::GameScene.can_transition_to(SceneId::None));
}

#[test]
fn change_applies_at_the_next_frame() {
    let (mut scenes, mut rng) = started();
    assert_eq!(scenes.current_id(), SceneId::StartScene);

    scenes.frame(DT, &InputState { confirm: true, ..idle() }, &mut rng);
    assert_eq!(scenes.current_id(), SceneId::StartScene);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::GameScene);
}

#[test]
fn disallowed_change_is_ignored() {
    let mut scenes = SceneManager::new(GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    scenes.change_scene(SceneId::GameScene);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::None);
}

#[test]
fn clicking_start_enters_the_game() {
    let (mut scenes, mut rng) = started();
    // START is centered in the 1000 × 800 window
    let click = InputState { click: Some(Vector2::new(500.0, 400.0)), ..idle() };
    scenes.frame(DT, &click, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::GameScene);
}

#[test]
fn clicking_outside_start_does_nothing() {
    let (mut scenes, mut rng) = started();
    let click = InputState { click: Some(Vector2::new(10.0, 10.0)), ..idle() };
    scenes.frame(DT, &click, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::StartScene);
}

#[test]
fn escape_on_start_quits() {
    let (mut scenes, mut rng) = started();
    let status = scenes.frame(DT, &InputState { cancel: true, ..idle() }, &mut rng);
    assert_eq!(status, FrameStatus::Quit);
}

#[test]
fn quit_signal_quits_from_any_scene() {
    let (mut scenes, mut rng) = in_game();
    let status = scenes.frame(DT, &InputState { quit: true, ..idle() }, &mut rng);
    assert_eq!(status, FrameStatus::Quit);
}

// ── Game scene lifecycle ──────────────────────────────────────────────────────

#[test]
fn entering_game_creates_a_fresh_round() {
    let (scenes, _) = in_game();
    let game = scenes.game().unwrap();
    let player = game.world().player().unwrap();
    assert_eq!(player.attributes.health, 3);
    assert_eq!(player.attributes.score, 0);
    assert_eq!(game.world().bullet_count(), 0);
    assert_eq!(game.round(), 1);
}

#[test]
fn escape_in_game_returns_to_start() {
    let (mut scenes, mut rng) = in_game();
    scenes.frame(DT, &InputState { cancel: true, ..idle() }, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.current_id(), SceneId::StartScene);
    assert!(scenes.game().is_none());
}

#[test]
fn death_resets_in_place_and_keeps_best_score() {
    let (mut scenes, mut rng) = in_game();
    {
        let world = scenes.game_mut().unwrap().world_mut();
        let player = world.player_mut().unwrap();
        player.attributes.health = 1;
        player.attributes.score = 50;
        let at = player.position;
        world.spawn_enemy(Vector2::new(at.x, at.y + 20.0));
        world.spawn_enemy(Vector2::new(10.0, 10.0));
    }

    scenes.frame(DT, &idle(), &mut rng);

    assert_eq!(scenes.current_id(), SceneId::GameScene);
    let game = scenes.game().unwrap();
    assert_eq!(game.round(), 2);
    assert_eq!(game.best_score(), 50);
    assert!(game.last_report().round_reset.is_some());
    let player = game.world().player().unwrap();
    assert_eq!(player.attributes.health, 3);
    assert_eq!(player.attributes.score, 0);
    assert_eq!(game.world().enemy_count(), 0);
}

#[test]
fn best_score_survives_returning_to_the_menu() {
    let (mut scenes, mut rng) = in_game();
    scenes
        .game_mut()
        .unwrap()
        .world_mut()
        .player_mut()
        .unwrap()
        .attributes
        .score = 80;
    scenes.frame(DT, &InputState { cancel: true, ..idle() }, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    assert_eq!(scenes.best_score(), 80);

    scenes.frame(DT, &InputState { confirm: true, ..idle() }, &mut rng);
    scenes.frame(DT, &idle(), &mut rng);
    let game = scenes.game().unwrap();
    assert_eq!(game.best_score(), 80);
    assert_eq!(game.world().player().unwrap().attributes.score, 0);
}

#[test]
fn shutdown_tears_everything_down() {
    let (mut scenes, _) = in_game();
    scenes.shutdown();
    assert_eq!(scenes.current_id(), SceneId::None);
}

// ── Buttons ───────────────────────────────────────────────────────────────────

#[test]
fn only_enabled_buttons_fire() {
    let clicks = Rc::new(Cell::new(0));
    let mut panel = ButtonPanel::new();
    let counter = Rc::clone(&clicks);
    let id = panel.add(
        create_rect(Vector2::new(0.0, 0.0), 100.0, 50.0),
        "OK",
        move |_| counter.set(counter.get() + 1),
    );
    let mut requests = SceneRequests::default();

    assert!(!panel.press(Vector2::new(10.0, 10.0), &mut requests));
    panel.enable(id);
    assert!(panel.press(Vector2::new(100.0, 50.0), &mut requests)); // inclusive edge
    assert!(!panel.press(Vector2::new(101.0, 10.0), &mut requests));
    panel.disable(id);
    assert!(!panel.press(Vector2::new(10.0, 10.0), &mut requests));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn first_matching_button_wins() {
    let mut panel = ButtonPanel::new();
    let rect = create_rect(Vector2::new(0.0, 0.0), 100.0, 50.0);
    let a = panel.add(rect, "A", |r| r.change(SceneId::GameScene));
    let b = panel.add(rect, "B", |r| r.quit());
    panel.enable(a);
    panel.enable(b);

    let mut requests = SceneRequests::default();
    assert!(panel.press(Vector2::new(50.0, 25.0), &mut requests));
    assert_eq!(requests.next, Some(SceneId::GameScene));
    assert!(!requests.quit);

    panel.clear();
    assert!(panel.is_empty());
    assert!(panel.get(a).is_none());
}
