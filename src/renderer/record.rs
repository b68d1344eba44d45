//! Headless renderer that records draw commands

use std::io;

use glam::Vec2;

use super::{Renderer, TextStyle};
use crate::assets::{Sprite, SpriteKind};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(SpriteKind),
    Sprite { kind: SpriteKind, pos: Vec2 },
    Text { text: String, pos: Vec2, size: u16 },
    Present,
}

/// Keeps the commands of the most recent frame
#[derive(Debug, Default)]
pub struct FrameRecorder {
    current: Vec<DrawCommand>,
    last: Vec<DrawCommand>,
    frames: usize,
}

impl FrameRecorder {
    /// Number of frames presented
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Commands of the last presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.text_pos(needle).is_some()
    }

    /// Position of the first label in the last frame equal to `needle`
    pub fn text_pos(&self, needle: &str) -> Option<Vec2> {
        self.last.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, .. } if text == needle => Some(*pos),
            _ => None,
        })
    }
}

impl Renderer for FrameRecorder {
    fn begin_frame(&mut self) -> io::Result<()> {
        self.current.clear();
        Ok(())
    }

    fn blit_background(&mut self, sprite: &Sprite) -> io::Result<()> {
        self.current.push(DrawCommand::Background(sprite.kind()));
        Ok(())
    }

    fn blit(&mut self, sprite: &Sprite, pos: Vec2) -> io::Result<()> {
        self.current.push(DrawCommand::Sprite {
            kind: sprite.kind(),
            pos,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) -> io::Result<()> {
        self.current.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size: style.size,
        });
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.current.push(DrawCommand::Present);
        self.last = std::mem::take(&mut self.current);
        self.frames += 1;
        Ok(())
    }
}
