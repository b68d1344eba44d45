//! Shared combatant behavior
//!
//! Player and enemy ships both own a [`Ship`]: position, health, sprite, the
//! lasers they fired and the firing cooldown. Variant-specific movement and
//! targeting live on the owning type, which exposes its ship through the
//! [`Combatant`] trait.

use std::rc::Rc;

use glam::Vec2;

use super::laser::Laser;
use super::mask::Collidable;
use crate::assets::Sprite;
use crate::consts::{COOLDOWN, LASER_DAMAGE};

/// State common to every ship
#[derive(Debug, Clone)]
pub struct Ship {
    /// Top-left corner in screen space
    pub pos: Vec2,
    /// May dip below zero; the match loop treats `<= 0` as a loss
    pub health: i32,
    sprite: Rc<Sprite>,
    laser_sprite: Rc<Sprite>,
    lasers: Vec<Laser>,
    /// 0 = ready to fire, 1..=COOLDOWN = cooling down
    cool_down_counter: u32,
}

impl Ship {
    pub fn new(pos: Vec2, health: i32, sprite: Rc<Sprite>, laser_sprite: Rc<Sprite>) -> Self {
        Self {
            pos,
            health,
            sprite,
            laser_sprite,
            lasers: Vec::new(),
            cool_down_counter: 0,
        }
    }

    /// Advance the firing cooldown by one tick
    pub fn cooldown_tick(&mut self) {
        if self.cool_down_counter >= COOLDOWN {
            self.cool_down_counter = 0;
        } else if self.cool_down_counter > 0 {
            self.cool_down_counter += 1;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cool_down_counter == 0
    }

    pub fn cooldown(&self) -> u32 {
        self.cool_down_counter
    }

    /// Fire a laser from the ship's position if the cooldown allows.
    /// Returns whether a laser was created.
    pub fn shoot(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.lasers
            .push(Laser::new(self.pos, Rc::clone(&self.laser_sprite)));
        self.cool_down_counter = 1;
        true
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn width(&self) -> u32 {
        self.sprite.width()
    }

    pub fn height(&self) -> u32 {
        self.sprite.height()
    }

    /// Advance lasers against a single target. Each hit deals
    /// [`LASER_DAMAGE`] and consumes the laser. Returns the number of hits.
    pub fn move_lasers_at<T>(&mut self, vel: f32, field_height: f32, target: &mut T) -> u32
    where
        T: Combatant + ?Sized,
    {
        self.cooldown_tick();

        let mut hits = 0;
        self.lasers.retain_mut(|laser| {
            laser.move_by(vel);
            if laser.off_screen(field_height) {
                return false;
            }
            if laser.collision(&*target) {
                target.take_damage(LASER_DAMAGE);
                hits += 1;
                return false;
            }
            true
        });
        hits
    }

    /// Advance lasers against a set of targets. A struck target is removed
    /// from the set outright, along with the laser. Returns the kill count.
    pub fn move_lasers_through<T>(
        &mut self,
        vel: f32,
        field_height: f32,
        targets: &mut Vec<T>,
    ) -> usize
    where
        T: Collidable,
    {
        self.cooldown_tick();

        let mut kills = 0;
        self.lasers.retain_mut(|laser| {
            laser.move_by(vel);
            if laser.off_screen(field_height) {
                return false;
            }
            match targets.iter().position(|t| laser.collision(t)) {
                Some(idx) => {
                    targets.remove(idx);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        kills
    }
}

/// Capability shared by the player and enemies, by delegation to their [`Ship`]
pub trait Combatant: Collidable {
    fn ship(&self) -> &Ship;
    fn ship_mut(&mut self) -> &mut Ship;

    fn health(&self) -> i32 {
        self.ship().health
    }

    fn take_damage(&mut self, amount: i32) {
        self.ship_mut().health -= amount;
    }

    fn shoot(&mut self) -> bool {
        self.ship_mut().shoot()
    }

    fn cooldown_tick(&mut self) {
        self.ship_mut().cooldown_tick();
    }

    fn lasers(&self) -> &[Laser] {
        self.ship().lasers()
    }

    fn width(&self) -> u32 {
        self.ship().width()
    }

    fn height(&self) -> u32 {
        self.ship().height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Assets, SpriteKind};

    fn ship(assets: &Assets) -> Ship {
        Ship::new(
            Vec2::new(100.0, 100.0),
            100,
            assets.sprite(SpriteKind::ShipRed),
            assets.sprite(SpriteKind::LaserRed),
        )
    }

    #[test]
    fn test_shoot_spawns_laser_at_ship() {
        let assets = Assets::builtin();
        let mut ship = ship(&assets);
        assert!(ship.shoot());
        assert_eq!(ship.lasers().len(), 1);
        assert_eq!(ship.lasers()[0].pos, ship.pos);
        assert_eq!(ship.cooldown(), 1);
    }

    #[test]
    fn test_cooldown_gates_exactly() {
        let assets = Assets::builtin();
        let mut ship = ship(&assets);
        assert!(ship.shoot());

        for _ in 0..COOLDOWN - 1 {
            ship.cooldown_tick();
            assert!(ship.cooldown() <= COOLDOWN);
            assert!(!ship.shoot());
        }
        assert_eq!(ship.lasers().len(), 1);

        ship.cooldown_tick();
        assert!(ship.is_ready());
        assert!(ship.shoot());
        assert_eq!(ship.lasers().len(), 2);
    }

    #[test]
    fn test_ready_ship_stays_ready() {
        let assets = Assets::builtin();
        let mut ship = ship(&assets);
        for _ in 0..100 {
            ship.cooldown_tick();
        }
        assert!(ship.is_ready());
    }

    #[test]
    fn test_off_screen_lasers_are_pruned_same_tick() {
        let assets = Assets::builtin();
        let mut ship = ship(&assets);
        ship.pos.y = 2.0;
        ship.shoot();

        let mut targets: Vec<Laser> = Vec::new();
        ship.move_lasers_through(-5.0, 750.0, &mut targets);
        assert!(ship.lasers().is_empty());
    }
}
