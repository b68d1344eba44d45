//! Input sources

use std::collections::VecDeque;
use std::io;

use crate::sim::TickInput;

/// Polled once per tick for the commands held during that tick
pub trait InputSource {
    fn poll(&mut self) -> io::Result<TickInput>;
}

/// Replays a fixed list of inputs, then repeats a fallback
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    fallback: TickInput,
    polls: u64,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Request quit once the script runs out
    pub fn then_quit(mut self) -> Self {
        self.fallback = TickInput {
            quit: true,
            ..TickInput::default()
        };
        self
    }

    /// Number of times the source was polled
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<TickInput> {
        self.polls += 1;
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}
