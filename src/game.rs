//! The fixed-rate game loop
//!
//! Each frame: wait for the clock, draw the current state, poll input, then
//! advance the simulation one tick. Everything runs on one thread.

use std::rc::Rc;

use rand::Rng;

use crate::assets::Assets;
use crate::error::Result;
use crate::platform::{Clock, InputSource};
use crate::renderer::{Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, Rules, TickInput, tick};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub level: u32,
    pub lives: i32,
    /// Whether the loss screen was reached (as opposed to quitting)
    pub lost: bool,
}

/// Game instance holding the match state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    show_fps: bool,
}

impl Game {
    pub fn new(settings: &Settings, assets: Rc<Assets>) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Starting match with seed {}", seed);
        let state = GameState::with_rules(seed, Rules::from_settings(settings), assets);
        Self::from_state(state, settings.show_fps)
    }

    pub fn from_state(state: GameState, show_fps: bool) -> Self {
        Self { state, show_fps }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the match stops
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
        clock: &mut dyn Clock,
    ) -> Result<RunSummary> {
        while !self.state.is_stopped() {
            clock.tick();

            let fps = self.show_fps.then(|| clock.fps());
            draw_frame(renderer, &self.state, fps)?;

            // The loss screen takes no input
            let commands = if self.state.is_lost() {
                TickInput::default()
            } else {
                input.poll()?
            };
            tick(&mut self.state, &commands);
        }

        let summary = RunSummary {
            ticks: self.state.time_ticks,
            level: self.state.level,
            lives: self.state.lives,
            lost: self.state.lost_ticks > 0,
        };
        log::info!(
            "Match over after {} ticks ({:.1}s): level {}, lives {}",
            summary.ticks,
            clock.elapsed().as_secs_f32(),
            summary.level,
            summary.lives
        );
        Ok(summary)
    }
}
