//! Falling-block puzzle engine
//!
//! The engine (`board`, `piece`, `tetromino`, `game_state`, `game`) is driven
//! by discrete actions and a frame time delta and exposes a read-only
//! `Snapshot`. The `input`, `settings` and `ui` modules make up the terminal
//! frontend used by the binary.

pub mod board;
pub mod error;
pub mod game;
pub mod game_state;
pub mod input;
pub mod piece;
pub mod randomizer;
pub mod settings;
pub mod tetromino;
pub mod ui;

pub use board::{Board, Cell, Grid, BOARD_HEIGHT, BOARD_WIDTH};
pub use error::{ConfigError, ParseActionError, SettingsError};
pub use game::{Action, ActivePiece, GameLogic, Phase, Snapshot};
pub use game_state::GameState;
pub use piece::Piece;
pub use randomizer::{SequenceSource, ShapeSource, UniformSource};
pub use tetromino::{RotationState, Shape, ShapeKind};
