//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (velocities are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod laser;
pub mod mask;
pub mod player;
pub mod ship;
pub mod state;
pub mod tick;

pub use enemy::{Enemy, EnemyColor};
pub use laser::Laser;
pub use mask::{Collidable, Mask, collide};
pub use player::Player;
pub use ship::{Combatant, Ship};
pub use state::{GameState, MatchPhase, Rules};
pub use tick::{TickEvents, TickInput, spawn_wave, tick};
