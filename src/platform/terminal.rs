//! Terminal keyboard input and screen setup
//!
//! Terminals report key events, not key state. A key counts as held if its
//! last press or repeat arrived within `HOLD_WINDOW` ticks; terminals with
//! the keyboard-enhancement protocol also report releases, which drop the
//! key immediately. Without release events a key stays held for up to the
//! window after it is let go.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use super::input::InputSource;
use crate::sim::TickInput;

/// Ticks a key stays held after its last press/repeat event.
/// 36 ticks @ 60 Hz = 600 ms, which spans the usual OS delay before the
/// first repeat (250-600 ms) so a held key does not drop out before repeats
/// start arriving.
const HOLD_WINDOW: u64 = 36;

/// Keyboard input from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput {
    /// Each held key → the tick it was last seen
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold lettercase so A and a are the same key
    fn normalize(code: KeyCode) -> KeyCode {
        match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }

    fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }

    /// Record one key event. Returns true if it asks to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let code = Self::normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                Self::is_quit(code, key.modifiers)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                false
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                false
            }
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    /// Commands held at the current tick
    pub fn current(&self, quit: bool) -> TickInput {
        TickInput {
            left: self.any_held(&[KeyCode::Char('a'), KeyCode::Left]),
            right: self.any_held(&[KeyCode::Char('d'), KeyCode::Right]),
            up: self.any_held(&[KeyCode::Char('w'), KeyCode::Up]),
            down: self.any_held(&[KeyCode::Char('s'), KeyCode::Down]),
            fire: self.is_held(KeyCode::Char(' ')),
            quit,
        }
    }

    /// Advance to the next tick
    pub fn next_frame(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        self.key_frame
            .retain(|_, &mut last| frame.saturating_sub(last) <= HOLD_WINDOW);
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<TickInput> {
        self.next_frame();

        // Drain all pending events without blocking
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= self.handle_key(key);
            }
        }
        Ok(self.current(quit))
    }
}

/// Raw mode + alternate screen for the lifetime of the value
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Request key-release events; unsupported terminals fall back to the hold window
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        out.flush()?;
        log::debug!("Terminal session started (key release events: {keyboard_enhanced})");

        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
