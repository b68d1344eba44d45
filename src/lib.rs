//! Space Shooter - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pixel-mask collision, waves)
//! - `assets`: Sprite loading and collision mask derivation
//! - `renderer`: Draw commands for the terminal (or a recorder in tests)
//! - `platform`: Keyboard input and frame pacing
//! - `game`: The fixed-rate loop tying it all together

pub mod assets;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{Assets, Sprite, SpriteKind};
pub use error::{AssetError, GameError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 750.0;
    pub const FIELD_HEIGHT: f32 = 750.0;

    /// Logical updates per second
    pub const FPS: u32 = 60;
    /// Highest accepted tick rate
    pub const MAX_FPS: u32 = 1000;
    /// Ticks between shots
    pub const COOLDOWN: u32 = 30;

    /// Velocities, in pixels per tick
    pub const PLAYER_VEL: f32 = 5.0;
    pub const LASER_VEL: f32 = 5.0;
    pub const ENEMY_VEL: f32 = 1.0;

    /// Health removed by one enemy laser
    pub const LASER_DAMAGE: i32 = 10;
    pub const START_HEALTH: i32 = 100;
    pub const START_LIVES: i32 = 5;

    /// Player spawn point (top-left of the sprite)
    pub const PLAYER_START_X: f32 = 300.0;
    pub const PLAYER_START_Y: f32 = 650.0;
    /// Player sprite is scaled to this square size
    pub const PLAYER_SIZE: u32 = 100;

    /// Wave sizing: the first wave spawned is START + GROWTH
    pub const START_WAVE_LENGTH: u32 = 5;
    pub const WAVE_GROWTH: u32 = 5;

    /// Horizontal spawn band: [SPAWN_MARGIN_LEFT, FIELD_WIDTH - SPAWN_MARGIN_RIGHT)
    pub const SPAWN_MARGIN_LEFT: i32 = 50;
    pub const SPAWN_MARGIN_RIGHT: i32 = 100;
    /// Vertical spawn band, above the visible field for a staggered entrance
    pub const SPAWN_Y_MIN: i32 = -1500;
    pub const SPAWN_Y_MAX: i32 = -100;

    /// Seconds the loss screen stays up before the loop stops
    pub const LOST_SCREEN_SECS: u32 = 5;
}
