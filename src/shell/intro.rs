//! Timer-driven intro banner
//!
//! The banner is typed out one character per tick, then the shell hands off
//! to the main view. Frames are a pure function of elapsed time.

use std::time::Duration;

pub const DEFAULT_BANNER: &str = "HTMLJSON\n\nInitializing JSON Generator...";

/// Delay between revealed characters
pub const TICK: Duration = Duration::from_millis(50);

/// Time from start until the main view takes over
pub const HANDOFF: Duration = Duration::from_millis(3000);

/// What the shell should display at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    Intro(&'a str),
    Main,
}

#[derive(Debug, Clone)]
pub struct IntroAnimation {
    banner: String,
    tick: Duration,
    handoff: Duration,
}

impl Default for IntroAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_BANNER)
    }
}

impl IntroAnimation {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            tick: TICK,
            handoff: HANDOFF,
        }
    }

    pub fn with_timing(mut self, tick: Duration, handoff: Duration) -> Self {
        self.tick = tick;
        self.handoff = handoff;
        self
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn handoff(&self) -> Duration {
        self.handoff
    }

    /// Frame to show `elapsed` after the animation started
    pub fn frame_at(&self, elapsed: Duration) -> Frame<'_> {
        if elapsed >= self.handoff {
            return Frame::Main;
        }

        let revealed = if self.tick.is_zero() {
            usize::MAX
        } else {
            usize::try_from(elapsed.as_nanos() / self.tick.as_nanos()).unwrap_or(usize::MAX)
        };
        let end = self
            .banner
            .char_indices()
            .nth(revealed)
            .map_or(self.banner.len(), |(idx, _)| idx);
        Frame::Intro(&self.banner[..end])
    }

    /// Number of ticks needed to reveal the whole banner
    pub fn reveal_ticks(&self) -> usize {
        self.banner.chars().count()
    }
}
