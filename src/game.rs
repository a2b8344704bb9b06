//! Core game logic
//!
//! `GameLogic` runs the spawn, fall, lock, clear, respawn cycle. The frontend
//! feeds it discrete actions and a frame time delta, then reads a `Snapshot`.

use crate::board::{Board, Grid};
use crate::error::{ConfigError, ParseActionError};
use crate::game_state::GameState;
use crate::piece::Piece;
use crate::randomizer::{ShapeSource, UniformSource};
use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace};

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Pause,
}

impl Action {
    pub fn all() -> [Action; 6] {
        [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::Rotate,
            Action::HardDrop,
            Action::Pause,
        ]
    }

    /// Wire token for this action
    pub fn token(&self) -> &'static str {
        match self {
            Action::MoveLeft => "MOVE_LEFT",
            Action::MoveRight => "MOVE_RIGHT",
            Action::SoftDrop => "SOFT_DROP",
            Action::Rotate => "ROTATE",
            Action::HardDrop => "HARD_DROP",
            Action::Pause => "PAUSE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .into_iter()
            .find(|action| action.token() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// Where the game loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Paused,
    GameOver,
}

/// Read-only view of the falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    pub name: String,
    pub cells: Vec<(i32, i32)>,
    pub color: Color,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub grid: Grid,
    pub active: Option<ActivePiece>,
    pub score: u64,
    pub level: u32,
    pub lines_cleared: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Name of the shape in the preview slot
    pub preview: Option<String>,
}

/// The main game struct
pub struct GameLogic<S = UniformSource> {
    board: Board,
    state: GameState,
    /// Current falling piece, None only after game over
    current: Option<Piece>,
    source: S,
    /// Seconds accumulated towards the next gravity step
    fall_timer: f64,
}

impl GameLogic<UniformSource> {
    /// Standard 10x20 game with random shapes
    pub fn new() -> Self {
        Self::with_source(Board::standard(), UniformSource::new())
    }

    /// Standard 10x20 game with a reproducible shape sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(Board::standard(), UniformSource::with_seed(seed))
    }
}

impl Default for GameLogic<UniformSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ShapeSource> GameLogic<S> {
    /// Start a session on the given board and spawn the first piece
    pub fn with_source(board: Board, source: S) -> Self {
        let mut game = Self {
            board,
            state: GameState::new(),
            current: None,
            source,
            fall_timer: 0.0,
        };
        game.spawn_piece();
        game
    }

    /// Start a session on a fresh board of the given size
    pub fn with_dimensions(width: usize, height: usize, source: S) -> Result<Self, ConfigError> {
        Ok(Self::with_source(Board::new(width, height)?, source))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else if self.state.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    /// Advance gravity by `dt` seconds (call every frame)
    pub fn update(&mut self, dt: f64) {
        if self.phase() != Phase::Falling {
            return;
        }

        self.fall_timer += dt;
        if self.fall_timer < self.state.fall_speed() {
            return;
        }
        self.fall_timer = 0.0;

        let Some(piece) = self.current.as_mut() else {
            return;
        };
        if self.board.is_valid_position(piece, 0, 1) {
            piece.move_by(0, 1);
        } else {
            self.lock_and_advance();
        }
    }

    /// Process an action. Only game over blocks input; gravity alone stops while paused.
    pub fn handle_input_action(&mut self, action: Action) {
        if self.phase() == Phase::GameOver {
            return;
        }

        let applied = match action {
            Action::MoveLeft => self.try_move(-1, 0),
            Action::MoveRight => self.try_move(1, 0),
            Action::SoftDrop => self.try_move(0, 1),
            Action::Rotate => self.try_rotate(),
            Action::HardDrop => {
                self.hard_drop();
                true
            }
            Action::Pause => {
                self.state.toggle_pause();
                true
            }
        };
        if !applied {
            trace!(%action, "action reverted");
        }
    }

    /// Owned copy of everything a renderer reads
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            grid: self.board.grid_snapshot(),
            active: self.current.as_ref().map(|piece| ActivePiece {
                name: piece.name().to_string(),
                cells: piece.occupied_cells(),
                color: piece.color(),
            }),
            score: self.state.score,
            level: self.state.level,
            lines_cleared: self.state.lines_cleared,
            paused: self.state.paused,
            game_over: self.state.game_over,
            preview: self
                .state
                .next_shape
                .as_ref()
                .map(|shape| shape.name().to_string()),
        }
    }

    /// Move the piece, reverting if the result is illegal. Returns true if it moved.
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        piece.move_by(dx, dy);
        if self.board.is_valid_position(piece, 0, 0) {
            true
        } else {
            piece.move_by(-dx, -dy);
            false
        }
    }

    /// Rotate clockwise, rotating back if the result is illegal
    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        piece.rotate(true);
        if self.board.is_valid_position(piece, 0, 0) {
            true
        } else {
            piece.rotate(false);
            false
        }
    }

    /// Drop as far as possible, then lock
    fn hard_drop(&mut self) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        let mut distance = 0;
        while self.board.is_valid_position(piece, 0, 1) {
            piece.move_by(0, 1);
            distance += 1;
        }
        debug!(distance, "hard drop");
        self.lock_and_advance();
    }

    /// Lock the current piece, score cleared lines and spawn the next piece
    fn lock_and_advance(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.lock_piece(&piece);
        let lines = self.board.clear_completed_lines();
        self.state.add_score(lines as u32);
        debug!(
            piece = piece.name(),
            x = piece.x,
            y = piece.y,
            lines,
            score = self.state.score,
            "piece locked"
        );

        if self.board.is_game_over() {
            self.state.set_game_over(true);
            info!(
                score = self.state.score,
                level = self.state.level,
                "game over: stack reached the top row"
            );
            return;
        }

        self.spawn_piece();
    }

    /// Spawn a new piece centered at the top
    ///
    /// The piece is placed even if it overlaps the stack. Locking it there
    /// fills the top row and ends the game.
    fn spawn_piece(&mut self) {
        let kind = self.source.next_shape();
        let x = (self.board.width() / 2).saturating_sub(1) as i32;
        let piece = Piece::from_kind(kind, x, 0);
        self.state.set_next_shape(piece.shape().clone());

        debug!(piece = piece.name(), x, "spawned piece");
        self.current = Some(piece);
    }
}
