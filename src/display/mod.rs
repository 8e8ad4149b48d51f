//! Rendering layer.
//!
//! Render functions receive a [`Surface`] and an immutable view of the game
//! state. No game logic is performed here; this module only translates
//! state into draw calls. [`terminal::TerminalSurface`] is the crossterm
//! backed surface the binary draws to.

pub mod terminal;

use std::io;

use crate::geometry::{create_rect, Circle, Rect, Vector2};
use crate::ui::ButtonPanel;
use crate::world::World;

/// 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgb = Rgb::new(0, 0, 0);
pub const C_PANEL: Rgb = Rgb::new(40, 40, 48);
pub const C_TEXT: Rgb = Rgb::new(255, 255, 255);
pub const C_PLAYER: Rgb = Rgb::new(0, 0, 255);
pub const C_ENEMY: Rgb = Rgb::new(220, 60, 60);
pub const C_BULLET: Rgb = Rgb::new(255, 0, 0);
pub const C_BUTTON: Rgb = Rgb::new(40, 120, 200);
pub const C_HINT: Rgb = Rgb::new(128, 128, 128);

/// A 2D draw target in window pixel coordinates.
pub trait Surface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Rgb) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()>;
    fn fill_circle(&mut self, circle: Circle, color: Rgb) -> io::Result<()>;
    /// Draw `text` with its top-left corner at `at`.
    fn draw_text(&mut self, at: Vector2, text: &str, color: Rgb) -> io::Result<()>;
    /// Finish the frame.
    fn present(&mut self) -> io::Result<()>;
}

/// Session numbers shown next to the play area. Derived from the game scene,
/// never stored in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    pub best_score: u32,
    pub round: u32,
}

/// Render one complete frame of the game scene.
pub fn render_game<S: Surface + ?Sized>(surface: &mut S, world: &World, hud: Hud) -> io::Result<()> {
    let area = &world.config().play_area;
    surface.clear(C_PANEL)?;
    surface.fill_rect(
        create_rect(Vector2::ZERO, area.game_width, area.game_height),
        C_BACKGROUND,
    )?;

    if let Some(player) = world.player() {
        surface.fill_rect(player.bounds(), C_PLAYER)?;
    }
    for (_, enemy) in world.enemies() {
        surface.fill_rect(enemy.bounds(), C_ENEMY)?;
    }
    for (_, bullet) in world.bullets() {
        surface.fill_circle(bullet.circle(), C_BULLET)?;
    }

    draw_hud(surface, world, hud)?;
    surface.present()
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, world: &World, hud: Hud) -> io::Result<()> {
    let Some(player) = world.player() else {
        return Ok(());
    };
    let area = &world.config().play_area;

    surface.draw_text(
        Vector2::new(10.0, 10.0),
        &hud_line(player.attributes.health, player.attributes.score),
        C_TEXT,
    )?;

    // Side panel
    let panel_x = area.game_width + 10.0;
    surface.draw_text(Vector2::new(panel_x, 10.0), &format!("Best: {}", hud.best_score), C_TEXT)?;
    surface.draw_text(Vector2::new(panel_x, 40.0), &format!("Round: {}", hud.round), C_TEXT)?;
    surface.draw_text(
        Vector2::new(panel_x, area.window_height - 60.0),
        "WASD/Arrows move",
        C_HINT,
    )?;
    surface.draw_text(
        Vector2::new(panel_x, area.window_height - 40.0),
        "Space fire  Esc menu",
        C_HINT,
    )?;
    Ok(())
}

/// The scoreboard text for the given player numbers.
pub fn hud_line(health: i32, score: u32) -> String {
    format!("HP: {health}  Score: {score}")
}

/// Render the start menu: title plus every enabled button.
pub fn render_start<S: Surface + ?Sized>(surface: &mut S, buttons: &ButtonPanel) -> io::Result<()> {
    surface.clear(C_BACKGROUND)?;
    surface.draw_text(Vector2::new(30.0, 30.0), "Air Combat", C_TEXT)?;

    for button in buttons.iter().filter(|b| b.enabled) {
        surface.fill_rect(button.rect, C_BUTTON)?;
        surface.draw_text(
            Vector2::new(button.rect.left + 20.0, button.rect.top + 20.0),
            &button.label,
            C_TEXT,
        )?;
    }

    surface.draw_text(Vector2::new(30.0, 60.0), "Enter start  Esc/Q quit", C_HINT)?;
    surface.present()
}
