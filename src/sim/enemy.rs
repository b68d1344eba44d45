//! Enemy ships

use glam::Vec2;
use rand::Rng;

use super::mask::{Collidable, Mask};
use super::player::Player;
use super::ship::{Combatant, Ship};
use crate::assets::{Assets, SpriteKind};
use crate::consts::START_HEALTH;

/// Enemy palette. Color picks the ship and laser sprites; stats are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    pub fn name(self) -> &'static str {
        match self {
            EnemyColor::Red => "red",
            EnemyColor::Green => "green",
            EnemyColor::Blue => "blue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "red" => Some(EnemyColor::Red),
            "green" => Some(EnemyColor::Green),
            "blue" => Some(EnemyColor::Blue),
            _ => None,
        }
    }

    /// Uniform pick from the palette
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn ship_sprite(self) -> SpriteKind {
        match self {
            EnemyColor::Red => SpriteKind::ShipRed,
            EnemyColor::Green => SpriteKind::ShipGreen,
            EnemyColor::Blue => SpriteKind::ShipBlue,
        }
    }

    pub fn laser_sprite(self) -> SpriteKind {
        match self {
            EnemyColor::Red => SpriteKind::LaserRed,
            EnemyColor::Green => SpriteKind::LaserGreen,
            EnemyColor::Blue => SpriteKind::LaserBlue,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    ship: Ship,
    color: EnemyColor,
}

impl Enemy {
    pub fn new(pos: Vec2, color: EnemyColor, assets: &Assets) -> Self {
        Self {
            ship: Ship::new(
                pos,
                START_HEALTH,
                assets.sprite(color.ship_sprite()),
                assets.sprite(color.laser_sprite()),
            ),
            color,
        }
    }

    pub fn color(&self) -> EnemyColor {
        self.color
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos
    }

    /// Descend by `vel`; enemies never move sideways or up
    pub fn move_by(&mut self, vel: f32) {
        self.ship.pos.y += vel.max(0.0);
    }

    /// Whether the ship's bottom edge is past the bottom of the field
    pub fn escaped(&self, field_height: f32) -> bool {
        self.ship.pos.y + self.height() as f32 > field_height
    }

    /// Advance own lasers downward against the player. Returns hits dealt.
    pub fn move_lasers(&mut self, vel: f32, field_height: f32, player: &mut Player) -> u32 {
        self.ship.move_lasers_at(vel, field_height, player)
    }
}

impl Collidable for Enemy {
    fn position(&self) -> Vec2 {
        self.ship.pos
    }

    fn mask(&self) -> &Mask {
        self.ship.sprite().mask()
    }
}

impl Combatant for Enemy {
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
    use crate::consts::{FIELD_HEIGHT, LASER_DAMAGE, LASER_VEL};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_color_names_round_trip() {
        for color in EnemyColor::ALL {
            assert_eq!(EnemyColor::from_name(color.name()), Some(color));
        }
        assert_eq!(EnemyColor::from_name("BLUE"), Some(EnemyColor::Blue));
        assert_eq!(EnemyColor::from_name("purple"), None);
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(EnemyColor::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_color_selects_sprites() {
        let assets = Assets::builtin();
        let enemy = Enemy::new(Vec2::ZERO, EnemyColor::Green, &assets);
        assert_eq!(enemy.ship().sprite().kind(), SpriteKind::ShipGreen);
    }

    #[test]
    fn test_descends_only() {
        let assets = Assets::builtin();
        let mut enemy = Enemy::new(Vec2::new(100.0, 0.0), EnemyColor::Red, &assets);
        enemy.move_by(1.0);
        enemy.move_by(-3.0);
        assert_eq!(enemy.pos(), Vec2::new(100.0, 1.0));
    }

    #[test]
    fn test_escape_uses_bottom_edge() {
        let assets = Assets::builtin();
        let mut enemy = Enemy::new(Vec2::new(100.0, 0.0), EnemyColor::Blue, &assets);
        enemy.ship_mut().pos.y = FIELD_HEIGHT - enemy.height() as f32;
        assert!(!enemy.escaped(FIELD_HEIGHT));
        enemy.move_by(1.0);
        assert!(enemy.escaped(FIELD_HEIGHT));
    }

    #[test]
    fn test_laser_hit_damages_player_once() {
        let assets = Assets::builtin();
        let mut player = Player::new(Vec2::new(300.0, 650.0), &assets);
        // Enemy laser bolt is centered on x + 25, player nose on x + 50
        let mut enemy = Enemy::new(Vec2::new(325.0, 400.0), EnemyColor::Red, &assets);
        assert!(enemy.shoot());

        let mut hits = 0;
        for _ in 0..100 {
            hits += enemy.move_lasers(LASER_VEL, FIELD_HEIGHT, &mut player);
            if hits > 0 {
                break;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(player.health(), player.max_health() - LASER_DAMAGE);
        assert!(enemy.lasers().is_empty());
    }

    #[test]
    fn test_health_can_go_negative() {
        let assets = Assets::builtin();
        let mut player = Player::with_health(Vec2::ZERO, 5, &assets);
        player.take_damage(LASER_DAMAGE);
        assert_eq!(player.health(), -5);
    }
}
