//! Frame pacing
//!
//! The simulation advances one fixed tick per frame, so the clock caps the
//! frame rate instead of feeding a variable timestep.

use std::time::{Duration, Instant};

/// Number of frame times averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub trait Clock {
    /// Block until the next frame is due. Returns the time since the previous tick.
    fn tick(&mut self) -> Duration;
    /// Time since the clock was created
    fn elapsed(&self) -> Duration;
    /// Measured frames per second
    fn fps(&self) -> f32;
}

/// Real-time clock that sleeps to hold a target rate
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    start: Instant,
    last: Instant,
    // FPS tracking
    frame_times: [Duration; FPS_WINDOW],
    frame_index: usize,
    frame_count: usize,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            start: now,
            last: now,
            frame_times: [Duration::ZERO; FPS_WINDOW],
            frame_index: 0,
            frame_count: 0,
        }
    }

    /// Target duration of one frame
    pub fn frame(&self) -> Duration {
        self.frame
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> Duration {
        // Pace from the previous tick; a late frame is not made up later
        let due = self.last + self.frame;
        let now = Instant::now();
        if now < due {
            std::thread::sleep(due - now);
        }

        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;

        self.frame_times[self.frame_index] = delta;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frame_count = (self.frame_count + 1).min(FPS_WINDOW);
        delta
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn fps(&self) -> f32 {
        if self.frame_count == 0 {
            return 0.0;
        }
        let total: Duration = self.frame_times[..self.frame_count].iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.frame_count as f32 / total.as_secs_f32()
    }
}

/// Clock that advances a fixed step per tick without sleeping
#[derive(Debug, Clone)]
pub struct ManualClock {
    frame: Duration,
    ticks: u64,
}

impl ManualClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for ManualClock {
    fn tick(&mut self) -> Duration {
        self.ticks += 1;
        self.frame
    }

    fn elapsed(&self) -> Duration {
        self.frame * self.ticks as u32
    }

    fn fps(&self) -> f32 {
        1.0 / self.frame.as_secs_f32()
    }
}
