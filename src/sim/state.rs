//! Match state and rules
//!
//! Everything the loop owns lives here: the player, the active wave, and the
//! lives/level counters.

use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyColor};
use super::player::Player;
use crate::assets::Assets;
use crate::consts::*;
use crate::settings::Settings;

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Active gameplay
    Running,
    /// Loss screen; the simulation is frozen until the timeout
    Lost,
    /// Loop exits
    Stopped,
}

/// Fixed parameters of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Ticks per second; scales the loss screen and enemy fire rate
    pub fps: u32,
    /// Whether enemies shoot at the player
    pub enemy_fire: bool,
    /// Playfield size in pixels
    pub field: Vec2,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            fps: FPS,
            enemy_fire: true,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }
}

impl Rules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fps: settings.fps.clamp(1, MAX_FPS),
            enemy_fire: settings.enemy_fire,
            ..Self::default()
        }
    }

    /// Ticks the loss screen stays up
    pub fn lost_timeout(&self) -> u32 {
        self.fps.saturating_mul(LOST_SCREEN_SECS)
    }

    /// Each enemy fires with probability 1 / this, per tick
    pub fn enemy_fire_odds(&self) -> u32 {
        self.fps.max(1).saturating_mul(2)
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    /// Drives wave layout, enemy colors and enemy fire
    pub rng: Pcg32,
    pub player: Player,
    /// Active wave, in spawn order
    pub enemies: Vec<Enemy>,
    /// Waves spawned so far
    pub level: u32,
    /// Size of the most recent wave
    pub wave_length: u32,
    pub lives: i32,
    pub phase: MatchPhase,
    /// Ticks spent in the loss screen
    pub lost_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    assets: Rc<Assets>,
}

impl GameState {
    /// Create a new match with default rules
    pub fn new(seed: u64, assets: Rc<Assets>) -> Self {
        Self::with_rules(seed, Rules::default(), assets)
    }

    pub fn with_rules(seed: u64, rules: Rules, assets: Rc<Assets>) -> Self {
        let player = Player::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y), &assets);
        Self {
            seed,
            rules,
            rng: Pcg32::seed_from_u64(seed),
            player,
            enemies: Vec::new(),
            level: 0,
            wave_length: START_WAVE_LENGTH,
            lives: START_LIVES,
            phase: MatchPhase::Running,
            lost_ticks: 0,
            time_ticks: 0,
            assets,
        }
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Add one enemy to the active wave
    pub fn spawn_enemy(&mut self, pos: Vec2, color: EnemyColor) {
        let enemy = Enemy::new(pos, color, &self.assets);
        self.enemies.push(enemy);
    }

    pub fn is_lost(&self) -> bool {
        self.phase == MatchPhase::Lost
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == MatchPhase::Stopped
    }
}
