use std::time::{Duration, Instant};

/// Screen the game is on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GameState {
    /// Waiting for the begin key.
    #[default]
    Start,
    /// Board accepts clicks; moves and time accumulate.
    Playing,
    /// Terminal. Moves and time are frozen.
    Won,
}

/// One-way `Start -> Playing -> Won` machine with a session timer.
///
/// Each transition fires at most once; there is no way back.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    state: GameState,
    started_at: Option<Instant>,
    final_elapsed: Option<Duration>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// `Start -> Playing`. Records `now` as the session start.
    ///
    /// Returns `false` (and changes nothing) from any other state.
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.state != GameState::Start {
            return false;
        }
        self.state = GameState::Playing;
        self.started_at = Some(now);
        true
    }

    /// `Playing -> Won`. Freezes and returns the elapsed time.
    ///
    /// Returns `None` (and changes nothing) from any other state.
    pub fn finish(&mut self, now: Instant) -> Option<Duration> {
        if self.state != GameState::Playing {
            return None;
        }
        let elapsed = self.live_elapsed(now);
        self.state = GameState::Won;
        self.final_elapsed = Some(elapsed);
        Some(elapsed)
    }

    /// Time spent playing: zero before the start, running while playing,
    /// frozen once won.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            GameState::Start => Duration::ZERO,
            GameState::Playing => self.live_elapsed(now),
            GameState::Won => self.final_elapsed.unwrap_or_default(),
        }
    }

    fn live_elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
    }
}
