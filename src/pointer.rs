use std::fmt;

use enigo::{Coordinate, Enigo, Mouse, Settings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointerError {
    #[error("cannot connect to the pointer device: {0}")]
    Connect(String),
    #[error("cannot read pointer position: {0}")]
    Read(String),
    #[error("cannot move pointer: {0}")]
    Move(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shifts both coordinates by `distance`, clamping at the edges of `i32`.
    pub fn offset(self, distance: i32) -> Self {
        Self {
            x: self.x.saturating_add(distance),
            y: self.y.saturating_add(distance),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={}, y={}", self.x, self.y)
    }
}

/// Read and overwrite access to the on-screen pointer.
pub trait Pointer {
    fn position(&self) -> Result<Position, PointerError>;
    fn set_position(&mut self, to: Position) -> Result<(), PointerError>;
}

/// Pointer backed by the platform input simulation of `enigo`.
pub struct EnigoPointer {
    enigo: Enigo,
}

impl EnigoPointer {
    pub fn connect() -> Result<Self, PointerError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| PointerError::Connect(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl Pointer for EnigoPointer {
    fn position(&self) -> Result<Position, PointerError> {
        let (x, y) = self
            .enigo
            .location()
            .map_err(|e| PointerError::Read(e.to_string()))?;
        Ok(Position { x, y })
    }

    fn set_position(&mut self, to: Position) -> Result<(), PointerError> {
        self.enigo
            .move_mouse(to.x, to.y, Coordinate::Abs)
            .map_err(|e| PointerError::Move(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_diagonally() {
        assert_eq!(Position::new(100, 200).offset(5), Position::new(105, 205));
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(
            Position::new(i32::MAX - 1, 0).offset(5),
            Position::new(i32::MAX, 5)
        );
    }

    #[test]
    fn display() {
        assert_eq!(Position::new(3, -4).to_string(), "x=3, y=-4");
    }
}
