//! Positions and ranges in editor coordinates.

use serde::{Deserialize, Serialize};

/// A zero-based document position. `character` counts UTF-16 code units,
/// matching the editor convention.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open span between two positions, `start <= end` in document order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a range from raw line/character coordinates.
    pub fn from_coords(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Self {
        Self::new(
            Position::new(start_line, start_character),
            Position::new(end_line, end_character),
        )
    }

    /// Whether this range covers no positions beyond its start.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two ranges overlap at one or more covered positions.
    ///
    /// Both ranges are treated as closed position intervals, so a zero-width
    /// range still intersects anything covering its position, itself
    /// included. Symmetric.
    pub fn intersects(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
