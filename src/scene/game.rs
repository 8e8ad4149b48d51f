use std::io;

use rand::RngCore;

use super::{SceneBehavior, SceneId, SceneRequests};
use crate::compute::CollisionReport;
use crate::config::GameConfig;
use crate::display::{render_game, Hud, Surface};
use crate::input::InputState;
use crate::world::World;

/// The playing field. Owns the [`World`] for as long as the scene is active.
pub struct GameScene {
    world: World,
    best_score: u32,
    round: u32,
    last_report: CollisionReport,
}

impl GameScene {
    pub fn new(config: GameConfig, best_score: u32) -> Self {
        Self {
            world: World::new(config),
            best_score,
            round: 0,
            last_report: CollisionReport::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Highest score seen this session, including the running round.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// 1-based number of the round in progress.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// What the collision passes did on the most recent frame.
    pub fn last_report(&self) -> &CollisionReport {
        &self.last_report
    }

    fn hud(&self) -> Hud {
        Hud {
            best_score: self.best_score,
            round: self.round,
        }
    }
}

impl SceneBehavior for GameScene {
    fn load(&mut self) {
        self.world.reset_round();
        self.round = 1;
    }

    fn unload(&mut self) {
        self.world.teardown();
    }

    fn process_input(&mut self, input: &InputState, requests: &mut SceneRequests) {
        if input.cancel {
            requests.change(SceneId::StartScene);
        }
    }

    fn check_collision(&mut self) {
        let report = self.world.resolve_collisions();

        if let Some(summary) = report.round_reset {
            self.best_score = self.best_score.max(summary.score);
            self.round += 1;
            log::info!("round {} started (best score {})", self.round, self.best_score);
        }
        if let Some(player) = self.world.player() {
            self.best_score = self.best_score.max(player.attributes.score);
        }
        self.last_report = report;
    }

    fn update(&mut self, dt: f64, input: &InputState, rng: &mut dyn RngCore) {
        self.world.advance(dt, input, rng);
    }

    fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        render_game(surface, &self.world, self.hud())
    }
}
