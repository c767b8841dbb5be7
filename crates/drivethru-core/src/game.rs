//! Countdown clicking game played on the franchise markers of a route.
//!
//! The session is a plain state machine driven by its caller: one [`GameSession::tick`]
//! per elapsed second and one [`GameSession::click`] per marker click.

use serde::Serialize;

use crate::types::FranchiseMarker;

pub const GAME_DURATION_SECS: u32 = 60;
pub const POINTS_PER_MARKER: u32 = 10;
pub const VOUCHER_CODE_PREFIX: &str = "MCDGAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    phase: GamePhase,
    time_left_secs: u32,
    score: u32,
    markers: Vec<FranchiseMarker>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            time_left_secs: GAME_DURATION_SECS,
            score: 0,
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    #[must_use]
    pub fn markers(&self) -> &[FranchiseMarker] {
        &self.markers
    }

    /// Starts (or restarts) a round over `markers`, resetting score and clock.
    pub fn start(&mut self, markers: Vec<FranchiseMarker>) {
        self.markers = markers
            .into_iter()
            .map(|m| FranchiseMarker { clicked: false, ..m })
            .collect();
        self.score = 0;
        self.time_left_secs = GAME_DURATION_SECS;
        self.phase = GamePhase::Running;
    }

    /// Advances the clock by one second. Has no effect unless running.
    pub fn tick(&mut self) -> GamePhase {
        if self.phase == GamePhase::Running {
            self.time_left_secs = self.time_left_secs.saturating_sub(1);
            if self.time_left_secs == 0 {
                self.phase = GamePhase::Ended;
            }
        }
        self.phase
    }

    /// Registers a click on marker `id` and returns the points awarded.
    ///
    /// Each marker scores once per round; clicks outside a running round,
    /// repeated clicks and unknown ids score nothing.
    pub fn click(&mut self, id: &str) -> u32 {
        if self.phase != GamePhase::Running {
            return 0;
        }
        match self.markers.iter_mut().find(|m| m.id == id && !m.clicked) {
            Some(marker) => {
                marker.clicked = true;
                self.score = self.score.saturating_add(POINTS_PER_MARKER);
                POINTS_PER_MARKER
            }
            None => 0,
        }
    }

    /// The voucher earned by a finished round.
    #[must_use]
    pub fn voucher(&self, franchise: &str, year: i32) -> Option<Voucher> {
        (self.phase == GamePhase::Ended).then(|| Voucher::for_score(self.score, franchise, year))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voucher {
    pub discount_percent: u8,
    pub code: String,
    pub message: String,
}

impl Voucher {
    #[must_use]
    pub fn for_score(score: u32, franchise: &str, year: i32) -> Self {
        let discount_percent = discount_for_score(score);
        Self {
            discount_percent,
            code: format!("{VOUCHER_CODE_PREFIX}{score}{year}"),
            message: format!(
                "Congratulations! You've earned a {discount_percent}% discount at any {franchise} along this route!"
            ),
        }
    }
}

fn discount_for_score(score: u32) -> u8 {
    match score {
        100.. => 20,
        50..=99 => 10,
        _ => 5,
    }
}
