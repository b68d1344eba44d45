//! Laser projectiles

use std::rc::Rc;

use glam::Vec2;

use super::mask::{Collidable, Mask, collide};
use crate::assets::Sprite;

/// A single laser bolt, owned by the ship that fired it
#[derive(Debug, Clone)]
pub struct Laser {
    pub pos: Vec2,
    sprite: Rc<Sprite>,
}

impl Laser {
    pub fn new(pos: Vec2, sprite: Rc<Sprite>) -> Self {
        Self { pos, sprite }
    }

    /// Translate vertically (positive = down the screen)
    pub fn move_by(&mut self, vel: f32) {
        self.pos.y += vel;
    }

    /// True once the laser's origin has left the vertical range [0, height].
    /// The same rule applies to ascending and descending fire.
    pub fn off_screen(&self, height: f32) -> bool {
        !(0.0..=height).contains(&self.pos.y)
    }

    pub fn collision<T: Collidable + ?Sized>(&self, other: &T) -> bool {
        collide(self, other)
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
}

impl Collidable for Laser {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}
