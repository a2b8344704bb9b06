//! Session progress: score, level and the pause / game-over flags

use crate::tetromino::Shape;
use std::sync::Arc;
use tracing::info;

/// Points per lock event, indexed by lines cleared. Multiplied by the level.
const LINE_CLEAR_POINTS: [u64; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: i32 = 10;

/// Fastest gravity, in seconds per row
pub const MIN_FALL_SPEED: f64 = 0.05;

/// Seconds per row at level 1, and how much each level takes off
const BASE_FALL_SPEED: f64 = 1.0;
const FALL_SPEED_STEP: f64 = 0.1;

/// Score tracking and session flags
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Current score
    pub score: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// Total lines cleared
    pub lines_cleared: u32,
    /// Counts down by lines cleared; a level is gained at zero or below
    pub lines_to_next_level: i32,
    pub paused: bool,
    /// Terminal once set
    pub game_over: bool,
    /// Preview slot. Holds the shape of the piece most recently spawned,
    /// not a lookahead.
    pub next_shape: Option<Arc<Shape>>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            lines_to_next_level: LINES_PER_LEVEL,
            paused: false,
            game_over: false,
            next_shape: None,
        }
    }

    /// Score one lock event.
    ///
    /// At most one level is gained per call, however many lines were cleared.
    pub fn add_score(&mut self, lines_cleared: u32) {
        let points = LINE_CLEAR_POINTS
            .get(lines_cleared as usize)
            .copied()
            .unwrap_or(0);
        self.score += points * u64::from(self.level);
        self.lines_cleared += lines_cleared;
        self.lines_to_next_level -= lines_cleared as i32;

        if self.lines_to_next_level <= 0 {
            self.level += 1;
            self.lines_to_next_level = LINES_PER_LEVEL;
            info!(level = self.level, lines = self.lines_cleared, "level up");
        }
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_next_shape(&mut self, shape: Arc<Shape>) {
        self.next_shape = Some(shape);
    }

    /// Seconds between automatic one-row drops at the current level
    pub fn fall_speed(&self) -> f64 {
        let level = f64::from(self.level.saturating_sub(1));
        (BASE_FALL_SPEED - level * FALL_SPEED_STEP).max(MIN_FALL_SPEED)
    }
}
