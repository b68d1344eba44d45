//! Sprite set and collision masks
//!
//! Every sprite is loaded once at startup into an [`Assets`] context and
//! shared read-only with the entities that display it. A sprite's collision
//! mask is derived from its opaque pixels.

use std::path::Path;
use std::rc::Rc;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, PLAYER_SIZE};
use crate::error::AssetError;
use crate::sim::mask::{ALPHA_THRESHOLD, Mask};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    ShipRed,
    ShipGreen,
    ShipBlue,
    ShipPlayer,
    LaserRed,
    LaserGreen,
    LaserBlue,
    LaserYellow,
    Background,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 9] = [
        SpriteKind::ShipRed,
        SpriteKind::ShipGreen,
        SpriteKind::ShipBlue,
        SpriteKind::ShipPlayer,
        SpriteKind::LaserRed,
        SpriteKind::LaserGreen,
        SpriteKind::LaserBlue,
        SpriteKind::LaserYellow,
        SpriteKind::Background,
    ];

    /// File name inside the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKind::ShipRed => "pixel_ship_red_small.png",
            SpriteKind::ShipGreen => "pixel_ship_green_small.png",
            SpriteKind::ShipBlue => "pixel_ship_blue_small.png",
            SpriteKind::ShipPlayer => "blue-ship-small.png",
            SpriteKind::LaserRed => "pixel_laser_red.png",
            SpriteKind::LaserGreen => "pixel_laser_green.png",
            SpriteKind::LaserBlue => "pixel_laser_blue.png",
            SpriteKind::LaserYellow => "pixel_laser_yellow.png",
            SpriteKind::Background => "background-black.png",
        }
    }

    /// Size the loaded image is scaled to, if any
    pub fn forced_size(self) -> Option<(u32, u32)> {
        match self {
            SpriteKind::ShipPlayer => Some((PLAYER_SIZE, PLAYER_SIZE)),
            SpriteKind::Background => Some((FIELD_WIDTH as u32, FIELD_HEIGHT as u32)),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// An RGBA image plus its collision silhouette
#[derive(Debug, Clone)]
pub struct Sprite {
    kind: SpriteKind,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    mask: Mask,
}

impl Sprite {
    /// Build a sprite from row-major RGBA pixels
    pub fn from_rgba(kind: SpriteKind, width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        let alpha: Vec<u8> = pixels.iter().map(|p| p[3]).collect();
        let mask = Mask::from_alpha(width, height, &alpha);
        Self {
            kind,
            width,
            height,
            pixels,
            mask,
        }
    }

    /// Build a sprite by evaluating `color` for every pixel
    pub fn from_fn(
        kind: SpriteKind,
        width: u32,
        height: u32,
        mut color: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(color(x, y));
            }
        }
        Self::from_rgba(kind, width, height, pixels)
    }

    pub fn kind(&self) -> SpriteKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// RGBA at a pixel; out-of-range reads are transparent
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y)[3] >= ALPHA_THRESHOLD
    }
}

/// The loaded sprite set, one entry per [`SpriteKind`]
#[derive(Debug)]
pub struct Assets {
    sprites: Vec<Rc<Sprite>>,
}

impl Assets {
    /// Load from a directory if given, else use the built-in sprites
    pub fn load(dir: Option<&Path>) -> Result<Self, AssetError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => {
                log::info!("Using built-in sprites");
                Ok(Self::builtin())
            }
        }
    }

    /// Load every sprite from PNG files in `dir`
    pub fn from_dir(dir: &Path) -> Result<Self, AssetError> {
        let sprites = SpriteKind::ALL
            .iter()
            .map(|&kind| load_png(dir, kind).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} sprites from {}", sprites.len(), dir.display());
        Ok(Self { sprites })
    }

    /// Procedurally drawn sprites, no files needed
    pub fn builtin() -> Self {
        let sprites = SpriteKind::ALL
            .iter()
            .map(|&kind| Rc::new(builtin_sprite(kind)))
            .collect();
        Self { sprites }
    }

    /// Shared handle to a sprite
    pub fn sprite(&self, kind: SpriteKind) -> Rc<Sprite> {
        Rc::clone(&self.sprites[kind.index()])
    }
}

fn load_png(dir: &Path, kind: SpriteKind) -> Result<Sprite, AssetError> {
    let path = dir.join(kind.file_name());
    if !path.is_file() {
        return Err(AssetError::Missing(path));
    }

    let img = image::open(&path).map_err(|source| AssetError::Decode {
        path: path.clone(),
        source,
    })?;
    let mut rgba = img.to_rgba8();
    if let Some((w, h)) = kind.forced_size() {
        rgba = image::imageops::resize(&rgba, w, h, image::imageops::FilterType::Nearest);
    }

    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty(path));
    }
    log::debug!("Loaded {} ({}x{})", path.display(), width, height);

    let pixels = rgba.pixels().map(|p| p.0).collect();
    Ok(Sprite::from_rgba(kind, width, height, pixels))
}

// Built-in sprite geometry. Lasers are as wide as the ship that fires them,
// with the bolt centered, so a laser spawned at the ship's origin lines up
// with the ship's nose.

/// Enemy ship size
pub const ENEMY_SHIP_SIZE: (u32, u32) = (50, 40);
/// Enemy laser size
pub const ENEMY_LASER_SIZE: (u32, u32) = (50, 30);
/// Player laser size
pub const PLAYER_LASER_SIZE: (u32, u32) = (PLAYER_SIZE, 30);
const BOLT_WIDTH: u32 = 8;

const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn builtin_sprite(kind: SpriteKind) -> Sprite {
    match kind {
        SpriteKind::ShipRed => enemy_ship(kind, [220, 50, 50]),
        SpriteKind::ShipGreen => enemy_ship(kind, [60, 200, 80]),
        SpriteKind::ShipBlue => enemy_ship(kind, [70, 110, 230]),
        SpriteKind::ShipPlayer => player_ship(),
        SpriteKind::LaserRed => laser(kind, ENEMY_LASER_SIZE, [255, 70, 70]),
        SpriteKind::LaserGreen => laser(kind, ENEMY_LASER_SIZE, [90, 255, 110]),
        SpriteKind::LaserBlue => laser(kind, ENEMY_LASER_SIZE, [100, 150, 255]),
        SpriteKind::LaserYellow => laser(kind, PLAYER_LASER_SIZE, [255, 230, 60]),
        SpriteKind::Background => background(),
    }
}

/// Downward-pointing wedge, transparent in the lower corners
fn enemy_ship(kind: SpriteKind, rgb: [u8; 3]) -> Sprite {
    let (w, h) = ENEMY_SHIP_SIZE;
    let center = (w as f32 - 1.0) / 2.0;
    Sprite::from_fn(kind, w, h, |x, y| {
        let half = (h - y) as f32 * 0.6;
        if y >= 4 && (x as f32 - center).abs() <= half {
            [rgb[0], rgb[1], rgb[2], 255]
        } else {
            CLEAR
        }
    })
}

/// Upward-pointing arrowhead, transparent in the upper corners
fn player_ship() -> Sprite {
    let size = PLAYER_SIZE;
    let center = (size as f32 - 1.0) / 2.0;
    Sprite::from_fn(SpriteKind::ShipPlayer, size, size, |x, y| {
        if y < 5 || y >= size - 5 {
            return CLEAR;
        }
        let half = (y - 5) as f32 * 0.55 + 2.0;
        let dx = (x as f32 - center).abs();
        if dx > half {
            CLEAR
        } else if dx < 6.0 && y < 40 {
            [140, 220, 255, 255] // cockpit
        } else {
            [240, 200, 40, 255]
        }
    })
}

/// Vertical bolt centered in a transparent frame
fn laser(kind: SpriteKind, (w, h): (u32, u32), rgb: [u8; 3]) -> Sprite {
    let left = (w - BOLT_WIDTH) / 2;
    Sprite::from_fn(kind, w, h, |x, y| {
        if x >= left && x < left + BOLT_WIDTH && y >= 2 && y < h - 2 {
            [rgb[0], rgb[1], rgb[2], 255]
        } else {
            CLEAR
        }
    })
}

/// Black field with a sparse, fixed star pattern
fn background() -> Sprite {
    let (w, h) = (FIELD_WIDTH as u32, FIELD_HEIGHT as u32);
    Sprite::from_fn(SpriteKind::Background, w, h, |x, y| {
        let hash = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
        if hash % 1009 == 0 {
            [200, 200, 220, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
}
