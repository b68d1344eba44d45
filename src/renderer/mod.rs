//! Rendering module
//!
//! The simulation never draws itself. Each frame, [`draw_frame`] walks the
//! game state and issues draw commands to a [`Renderer`] backend. Drawing
//! only reads state, so it can run any number of times between ticks.

pub mod record;
pub mod terminal;

pub use record::{DrawCommand, FrameRecorder};
pub use terminal::TerminalRenderer;

use std::io;

use glam::Vec2;

use crate::assets::{Sprite, SpriteKind};
use crate::sim::{Combatant, Enemy, GameState, Laser, Player, Ship};

/// Font, size and color of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: &'static str,
    pub size: u16,
    pub color: [u8; 3],
}

/// Colors for HUD elements
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const HEALTH: [u8; 3] = [120, 230, 120];
}

/// Lives / level labels
pub const MAIN_FONT: TextStyle = TextStyle {
    font: "comicsans",
    size: 50,
    color: colors::WHITE,
};

/// Loss banner
pub const LOST_FONT: TextStyle = TextStyle {
    font: "comicsans",
    size: 60,
    color: colors::WHITE,
};

/// Small HUD text (health, FPS)
pub const SMALL_FONT: TextStyle = TextStyle {
    font: "comicsans",
    size: 30,
    color: colors::HEALTH,
};

const HUD_MARGIN: f32 = 10.0;
const LOST_LABEL_Y: f32 = 350.0;

/// A drawing backend. Coordinates are field pixels, origin top-left.
pub trait Renderer {
    /// Start a new frame
    fn begin_frame(&mut self) -> io::Result<()>;

    /// Fill the whole field with a background image
    fn blit_background(&mut self, sprite: &Sprite) -> io::Result<()>;

    /// Draw a sprite with its top-left corner at `pos`
    fn blit(&mut self, sprite: &Sprite, pos: Vec2) -> io::Result<()>;

    /// Draw a text label with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) -> io::Result<()>;

    /// Rendered size of a label, used for alignment
    fn text_size(&self, text: &str, style: &TextStyle) -> Vec2 {
        let size = style.size as f32;
        Vec2::new(text.chars().count() as f32 * size * 0.5, size)
    }

    /// Finish the frame and show it
    fn present(&mut self) -> io::Result<()>;
}

/// Anything that can put itself on screen
pub trait Draw {
    fn draw(&self, renderer: &mut dyn Renderer) -> io::Result<()>;
}

impl Draw for Laser {
    fn draw(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        renderer.blit(self.sprite(), self.pos)
    }
}

impl Draw for Ship {
    fn draw(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        renderer.blit(self.sprite(), self.pos)?;
        for laser in self.lasers() {
            laser.draw(renderer)?;
        }
        Ok(())
    }
}

impl Draw for Player {
    fn draw(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        self.ship().draw(renderer)
    }
}

impl Draw for Enemy {
    fn draw(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        self.ship().draw(renderer)
    }
}

/// Render one complete frame: background, HUD, ships, loss banner
pub fn draw_frame(
    renderer: &mut dyn Renderer,
    state: &GameState,
    fps: Option<f32>,
) -> io::Result<()> {
    let field = state.rules.field;

    renderer.begin_frame()?;
    renderer.blit_background(&state.assets().sprite(SpriteKind::Background))?;

    let lives = format!("Lives: {}", state.lives);
    renderer.draw_text(&lives, Vec2::splat(HUD_MARGIN), &MAIN_FONT)?;

    let level = format!("Level: {}", state.level);
    let level_size = renderer.text_size(&level, &MAIN_FONT);
    renderer.draw_text(
        &level,
        Vec2::new(field.x - level_size.x - HUD_MARGIN, HUD_MARGIN),
        &MAIN_FONT,
    )?;

    let lives_height = renderer.text_size(&lives, &MAIN_FONT).y;
    let health = format!(
        "Health: {}/{}",
        state.player.health().max(0),
        state.player.max_health()
    );
    renderer.draw_text(
        &health,
        Vec2::new(HUD_MARGIN, HUD_MARGIN + lives_height),
        &SMALL_FONT,
    )?;

    if let Some(fps) = fps {
        let label = format!("FPS: {:.0}", fps);
        let size = renderer.text_size(&label, &SMALL_FONT);
        renderer.draw_text(
            &label,
            Vec2::new(HUD_MARGIN, field.y - size.y - HUD_MARGIN),
            &SMALL_FONT,
        )?;
    }

    for enemy in &state.enemies {
        enemy.draw(renderer)?;
    }
    state.player.draw(renderer)?;

    if state.is_lost() {
        let label = "You Lose";
        let size = renderer.text_size(label, &LOST_FONT);
        renderer.draw_text(
            label,
            Vec2::new(field.x / 2.0 - size.x / 2.0, LOST_LABEL_Y),
            &LOST_FONT,
        )?;
    }

    renderer.present()
}
