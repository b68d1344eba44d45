//! The player's ship

use glam::Vec2;

use super::enemy::Enemy;
use super::mask::{Collidable, Mask};
use super::ship::{Combatant, Ship};
use crate::assets::{Assets, SpriteKind};
use crate::consts::START_HEALTH;

#[derive(Debug, Clone)]
pub struct Player {
    ship: Ship,
    max_health: i32,
}

impl Player {
    pub fn new(pos: Vec2, assets: &Assets) -> Self {
        Self::with_health(pos, START_HEALTH, assets)
    }

    pub fn with_health(pos: Vec2, health: i32, assets: &Assets) -> Self {
        Self {
            ship: Ship::new(
                pos,
                health,
                assets.sprite(SpriteKind::ShipPlayer),
                assets.sprite(SpriteKind::LaserYellow),
            ),
            max_health: health,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos
    }

    /// Move by `delta` unless that would take the sprite outside the field.
    /// Returns whether the move was applied.
    pub fn try_move(&mut self, delta: Vec2, field: Vec2) -> bool {
        let next = self.ship.pos + delta;
        let max = field - Vec2::new(self.width() as f32, self.height() as f32);
        let inside = next.x >= 0.0 && next.y >= 0.0 && next.x <= max.x && next.y <= max.y;
        if inside {
            self.ship.pos = next;
        }
        inside
    }

    /// Advance own lasers upward through the enemy set; any enemy hit is
    /// destroyed. Returns the number of kills.
    pub fn move_lasers(&mut self, vel: f32, field_height: f32, enemies: &mut Vec<Enemy>) -> usize {
        self.ship.move_lasers_through(vel, field_height, enemies)
    }
}

impl Collidable for Player {
    fn position(&self) -> Vec2 {
        self.ship.pos
    }

    fn mask(&self) -> &Mask {
        self.ship.sprite().mask()
    }
}

impl Combatant for Player {
    fn ship(&self) -> &Ship {
        &self.ship
    }

    fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, PLAYER_VEL};
    use proptest::prelude::*;

    fn field() -> Vec2 {
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_move_right_stops_at_edge() {
        let assets = Assets::builtin();
        let mut player = Player::new(Vec2::new(300.0, 650.0), &assets);
        for _ in 0..200 {
            player.try_move(Vec2::new(PLAYER_VEL, 0.0), field());
        }
        assert_eq!(player.pos().x, FIELD_WIDTH - 100.0);
    }

    #[test]
    fn test_rejected_move_leaves_position() {
        let assets = Assets::builtin();
        let mut player = Player::new(Vec2::new(0.0, 650.0), &assets);
        assert!(!player.try_move(Vec2::new(-PLAYER_VEL, 0.0), field()));
        assert_eq!(player.pos(), Vec2::new(0.0, 650.0));
        assert!(!player.try_move(Vec2::new(0.0, PLAYER_VEL), field()));
        assert!(player.try_move(Vec2::new(0.0, -PLAYER_VEL), field()));
        assert_eq!(player.pos(), Vec2::new(0.0, 645.0));
    }

    #[test]
    fn test_max_health_tracks_start() {
        let assets = Assets::builtin();
        let mut player = Player::with_health(Vec2::ZERO, 40, &assets);
        player.take_damage(10);
        assert_eq!(player.health(), 30);
        assert_eq!(player.max_health(), 40);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(moves in proptest::collection::vec(0u8..4, 0..400)) {
            let assets = Assets::builtin();
            let mut player = Player::new(Vec2::new(300.0, 650.0), &assets);
            for m in moves {
                let delta = match m {
                    0 => Vec2::new(-PLAYER_VEL, 0.0),
                    1 => Vec2::new(PLAYER_VEL, 0.0),
                    2 => Vec2::new(0.0, -PLAYER_VEL),
                    _ => Vec2::new(0.0, PLAYER_VEL),
                };
                player.try_move(delta, field());
                let pos = player.pos();
                prop_assert!(pos.x >= 0.0 && pos.x <= FIELD_WIDTH - 100.0);
                prop_assert!(pos.y >= 0.0 && pos.y <= FIELD_HEIGHT - 100.0);
            }
        }
    }
}
