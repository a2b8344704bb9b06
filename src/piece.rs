//! Active falling piece
//!
//! A piece only knows its shape, rotation and origin. Whether a move or
//! rotation is legal is decided by the caller against a `Board`.

use crate::tetromino::{RotationState, Shape, ShapeKind};
use ratatui::style::Color;
use std::sync::Arc;

/// A falling tetromino instance
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Shared, read-only shape data
    shape: Arc<Shape>,
    /// Index into the shape's rotation states
    pub rotation: usize,
    /// Board-space column of the matrix's top-left corner
    pub x: i32,
    /// Board-space row of the matrix's top-left corner, row 0 is the top
    pub y: i32,
}

impl Piece {
    pub fn new(shape: Arc<Shape>, x: i32, y: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            x,
            y,
        }
    }

    /// Create a catalog piece at the given origin
    pub fn from_kind(kind: ShapeKind, x: i32, y: i32) -> Self {
        Self::new(kind.shape(), x, y)
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn name(&self) -> &str {
        self.shape.name()
    }

    pub fn color(&self) -> Color {
        self.shape.color()
    }

    /// The active rotation matrix
    pub fn current_state(&self) -> &RotationState {
        &self.shape.states()[self.rotation]
    }

    /// Step the rotation index by one, wrapping in either direction
    pub fn rotate(&mut self, clockwise: bool) {
        let count = self.shape.states().len();
        self.rotation = if clockwise {
            (self.rotation + 1) % count
        } else {
            (self.rotation + count - 1) % count
        };
    }

    /// Translate the origin
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Absolute (x, y) of every occupied cell, in row-major order of the matrix
    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        self.current_state()
            .filled_offsets()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
