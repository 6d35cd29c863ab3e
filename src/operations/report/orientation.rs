use std::fmt;

use crate::math::Vector2;

/// Compass bucket of a wall's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// Classifies a direction by its dominant component.
    ///
    /// When `|x| == |y|` the x component wins. Every input, including the
    /// zero vector, maps to exactly one bucket.
    #[must_use]
    pub fn classify(direction: &Vector2) -> Self {
        if direction.x.abs() >= direction.y.abs() {
            if direction.x >= 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if direction.y > 0.0 {
            Self::North
        } else {
            Self::South
        }
    }

    /// Label used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
