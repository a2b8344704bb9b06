//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their rotation states. Each rotation state is
//! a small occupancy matrix; the catalog is built once and shared by every piece.

use crate::error::ConfigError;
use ratatui::style::Color;
use std::sync::{Arc, LazyLock};

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl ShapeKind {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            ShapeKind::I => Color::Rgb(0, 255, 255),
            ShapeKind::O => Color::Rgb(255, 255, 0),
            ShapeKind::T => Color::Rgb(160, 32, 240),
            ShapeKind::S => Color::Rgb(0, 255, 0),
            ShapeKind::Z => Color::Rgb(255, 0, 0),
            ShapeKind::J => Color::Rgb(0, 0, 255),
            ShapeKind::L => Color::Rgb(255, 165, 0),
        }
    }

    /// Get all tetromino types, in catalog order
    pub fn all() -> [ShapeKind; 7] {
        [
            ShapeKind::I,
            ShapeKind::O,
            ShapeKind::T,
            ShapeKind::S,
            ShapeKind::Z,
            ShapeKind::J,
            ShapeKind::L,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }

    /// Shared catalog entry for this tetromino
    pub fn shape(&self) -> Arc<Shape> {
        Arc::clone(&CATALOG[*self as usize])
    }

    /// Rotation matrices, rows top to bottom
    fn rotations(&self) -> &'static [&'static [&'static [u8]]] {
        match self {
            ShapeKind::I => &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]],
            ShapeKind::O => &[&[&[1, 1], &[1, 1]]],
            ShapeKind::T => &[
                &[&[0, 1, 0], &[1, 1, 1]],
                &[&[1, 0], &[1, 1], &[1, 0]],
                &[&[1, 1, 1], &[0, 1, 0]],
                &[&[0, 1], &[1, 1], &[0, 1]],
            ],
            // North: .SS    East: S.
            //        SS.          SS
            //                     .S
            ShapeKind::S => &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]],
            // North: ZZ.    East: .Z
            //        .ZZ          ZZ
            //                     Z.
            ShapeKind::Z => &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]],
            ShapeKind::J => &[
                &[&[1, 0, 0], &[1, 1, 1]],
                &[&[1, 1], &[1, 0], &[1, 0]],
                &[&[1, 1, 1], &[0, 0, 1]],
                &[&[0, 1], &[0, 1], &[1, 1]],
            ],
            ShapeKind::L => &[
                &[&[0, 0, 1], &[1, 1, 1]],
                &[&[1, 0], &[1, 0], &[1, 1]],
                &[&[1, 1, 1], &[1, 0, 0]],
                &[&[1, 1], &[0, 1], &[0, 1]],
            ],
        }
    }
}

/// Process-wide shape catalog, indexed by `ShapeKind as usize`
static CATALOG: LazyLock<[Arc<Shape>; 7]> = LazyLock::new(|| {
    ShapeKind::all().map(|kind| {
        Arc::new(Shape {
            name: kind.name().to_string(),
            states: kind
                .rotations()
                .iter()
                .map(|rows| RotationState::from_rows(rows))
                .collect(),
            color: kind.color(),
        })
    })
});

/// One rotation of a shape: an occupancy matrix stored as [row][col]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    cells: Vec<Vec<bool>>,
}

impl RotationState {
    /// Build a matrix from rows of 0/1 flags; any nonzero value is occupied
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        Self {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Offsets (col, row) of every occupied cell, in row-major scan order
    pub fn filled_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (col as i32, row as i32))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.filled_offsets().next().is_none()
    }
}

/// A named shape: its ordered rotation states and display color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    states: Vec<RotationState>,
    color: Color,
}

impl Shape {
    /// Create a custom shape outside the standard catalog.
    ///
    /// Rejects a shape with no rotation states or with a rotation state that
    /// covers no cell, since neither can be placed on a board.
    pub fn new(
        name: impl Into<String>,
        states: Vec<RotationState>,
        color: Color,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if states.is_empty() {
            return Err(ConfigError::NoRotationStates(name));
        }
        if let Some(index) = states.iter().position(RotationState::is_empty) {
            return Err(ConfigError::EmptyRotationState { name, index });
        }
        Ok(Self {
            name,
            states,
            color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &[RotationState] {
        &self.states
    }

    pub fn color(&self) -> Color {
        self.color
    }
}
