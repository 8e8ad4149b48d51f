use std::io;

use rand::RngCore;

use super::{SceneBehavior, SceneId, SceneRequests};
use crate::config::GameConfig;
use crate::display::{render_start, Surface};
use crate::geometry::{create_rect, Vector2};
use crate::input::InputState;
use crate::ui::ButtonPanel;

const START_BUTTON_WIDTH: f64 = 240.0;
const START_BUTTON_HEIGHT: f64 = 120.0;

/// Title screen with a single START button.
pub struct StartScene {
    window_width: f64,
    window_height: f64,
    buttons: ButtonPanel,
}

impl StartScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            window_width: config.play_area.window_width,
            window_height: config.play_area.window_height,
            buttons: ButtonPanel::new(),
        }
    }

    pub fn buttons(&self) -> &ButtonPanel {
        &self.buttons
    }
}

impl SceneBehavior for StartScene {
    fn load(&mut self) {
        let rect = create_rect(
            Vector2::new(
                (self.window_width - START_BUTTON_WIDTH) / 2.0,
                (self.window_height - START_BUTTON_HEIGHT) / 2.0,
            ),
            START_BUTTON_WIDTH,
            START_BUTTON_HEIGHT,
        );
        let id = self
            .buttons
            .add(rect, "START", |requests| requests.change(SceneId::GameScene));
        self.buttons.enable(id);
    }

    fn unload(&mut self) {
        self.buttons.clear();
    }

    fn process_input(&mut self, input: &InputState, requests: &mut SceneRequests) {
        if let Some(at) = input.click {
            self.buttons.press(at, requests);
        }
        // Keyboard fallback
        if input.confirm {
            requests.change(SceneId::GameScene);
        }
        if input.cancel {
            requests.quit();
        }
    }

    fn check_collision(&mut self) {}

    fn update(&mut self, _dt: f64, _input: &InputState, _rng: &mut dyn RngCore) {}

    fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        render_start(surface, &self.buttons)
    }
}
