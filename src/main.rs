//! Space Shooter entry point
//!
//! Loads settings and sprites, takes over the terminal, and runs the loop.

use std::process::ExitCode;
use std::rc::Rc;

use space_shooter::Settings;
use space_shooter::assets::Assets;
use space_shooter::error::Result;
use space_shooter::game::{Game, RunSummary};
use space_shooter::platform::{FrameClock, TerminalInput, TerminalSession};
use space_shooter::renderer::TerminalRenderer;

fn main() -> ExitCode {
    // Logs go to stderr; redirect it (2>log.txt) to keep the screen clean
    env_logger::init();
    log::info!("Space Shooter starting...");

    let settings = Settings::load();
    match run(&settings) {
        Ok(summary) => {
            println!(
                "{} at level {} after {} ticks",
                if summary.lost { "Lost" } else { "Quit" },
                summary.level,
                summary.ticks
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("space-shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<RunSummary> {
    // Assets first: a load failure aborts before the terminal is touched
    let assets = Rc::new(Assets::load(settings.assets_dir.as_deref())?);
    let mut game = Game::new(settings, assets);

    let _session = TerminalSession::enter()?;
    let mut renderer = TerminalRenderer::stdout(game.state().rules.field)?;
    let mut input = TerminalInput::new();
    let mut clock = FrameClock::new(settings.fps);

    game.run(&mut renderer, &mut input, &mut clock)
}
