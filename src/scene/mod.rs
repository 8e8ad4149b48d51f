//! Scene state machine
//!
//! `None → StartScene → GameScene → StartScene …`. A requested change is
//! applied at the beginning of the next frame: the old scene unloads, the new
//! one is built and loads. Player death is handled inside the game scene as
//! an in-place round reset.

mod game;
mod start;

pub use game::GameScene;
pub use start::StartScene;

use std::io;

use rand::RngCore;

use crate::config::GameConfig;
use crate::display::Surface;
use crate::error::ConfigError;
use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneId {
    None,
    StartScene,
    GameScene,
}

impl SceneId {
    /// The only scene changes the game makes.
    pub fn can_transition_to(self, next: SceneId) -> bool {
        matches!(
            (self, next),
            (SceneId::None, SceneId::StartScene)
                | (SceneId::StartScene, SceneId::GameScene)
                | (SceneId::GameScene, SceneId::StartScene)
        )
    }
}

/// Requests a scene raises while handling input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneRequests {
    pub next: Option<SceneId>,
    pub quit: bool,
}

impl SceneRequests {
    pub fn change(&mut self, next: SceneId) {
        self.next = Some(next);
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }
}

/// The capabilities every scene provides.
pub trait SceneBehavior {
    fn load(&mut self);
    fn unload(&mut self);
    fn process_input(&mut self, input: &InputState, requests: &mut SceneRequests);
    fn check_collision(&mut self);
    fn update(&mut self, dt: f64, input: &InputState, rng: &mut dyn RngCore);
    fn render(&self, surface: &mut dyn Surface) -> io::Result<()>;
}

pub enum Scene {
    None,
    Start(StartScene),
    Game(GameScene),
}

impl Scene {
    pub fn id(&self) -> SceneId {
        match self {
            Scene::None => SceneId::None,
            Scene::Start(_) => SceneId::StartScene,
            Scene::Game(_) => SceneId::GameScene,
        }
    }

    fn behavior(&self) -> Option<&dyn SceneBehavior> {
        match self {
            Scene::None => None,
            Scene::Start(s) => Some(s),
            Scene::Game(s) => Some(s),
        }
    }

    fn behavior_mut(&mut self) -> Option<&mut dyn SceneBehavior> {
        match self {
            Scene::None => None,
            Scene::Start(s) => Some(s),
            Scene::Game(s) => Some(s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

/// Owns the current scene and drives it one frame at a time.
pub struct SceneManager {
    config: GameConfig,
    current: Scene,
    pending: Option<SceneId>,
    /// Best score this session, carried across game scenes.
    best_score: u32,
}

impl SceneManager {
    /// Validates `config` once; every scene built afterwards trusts it.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            current: Scene::None,
            pending: None,
            best_score: 0,
        })
    }

    pub fn current_id(&self) -> SceneId {
        self.current.id()
    }

    pub fn current(&self) -> &Scene {
        &self.current
    }

    pub fn game(&self) -> Option<&GameScene> {
        match &self.current {
            Scene::Game(g) => Some(g),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameScene> {
        match &mut self.current {
            Scene::Game(g) => Some(g),
            _ => None,
        }
    }

    pub fn best_score(&self) -> u32 {
        match &self.current {
            Scene::Game(g) => g.best_score(),
            _ => self.best_score,
        }
    }

    /// Queue a scene change for the start of the next frame.
    pub fn change_scene(&mut self, next: SceneId) {
        self.pending = Some(next);
    }

    /// Input, update, then collision for the current scene.
    pub fn frame(&mut self, dt: f64, input: &InputState, rng: &mut dyn RngCore) -> FrameStatus {
        self.apply_pending();

        if input.quit {
            return FrameStatus::Quit;
        }

        let mut requests = SceneRequests::default();
        if let Some(scene) = self.current.behavior_mut() {
            scene.process_input(input, &mut requests);
            scene.update(dt, input, rng);
            scene.check_collision();
        }

        if let Some(next) = requests.next {
            self.change_scene(next);
        }
        if requests.quit {
            return FrameStatus::Quit;
        }
        FrameStatus::Continue
    }

    pub fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        match self.current.behavior() {
            Some(scene) => scene.render(surface),
            None => {
                surface.clear(crate::display::C_BACKGROUND)?;
                surface.present()
            }
        }
    }

    /// Tear down the current scene, e.g. at shutdown.
    pub fn shutdown(&mut self) {
        self.leave_current();
        self.current = Scene::None;
        self.pending = None;
    }

    fn apply_pending(&mut self) {
        let Some(next) = self.pending.take() else {
            return;
        };
        let from = self.current.id();
        if !from.can_transition_to(next) {
            log::warn!("ignoring scene change {from:?} -> {next:?}");
            return;
        }

        self.leave_current();
        self.current = match next {
            SceneId::None => Scene::None,
            SceneId::StartScene => Scene::Start(StartScene::new(&self.config)),
            SceneId::GameScene => Scene::Game(GameScene::new(self.config.clone(), self.best_score)),
        };
        if let Some(scene) = self.current.behavior_mut() {
            scene.load();
        }
        log::info!("scene {from:?} -> {next:?}");
    }

    fn leave_current(&mut self) {
        if let Scene::Game(game) = &self.current {
            self.best_score = self.best_score.max(game.best_score());
        }
        if let Some(scene) = self.current.behavior_mut() {
            scene.unload();
        }
    }
}
