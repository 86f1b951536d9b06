//! Battlefield bounds

use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Rectangular arena; units are kept `margin` units away from every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Clamp a point into the playable area
    pub fn clamp(&self, point: Position) -> Position {
        Position::new(
            point.x.clamp(self.margin, self.width - self.margin),
            point.y.clamp(self.margin, self.height - self.margin),
        )
    }

    pub fn contains(&self, point: Position) -> bool {
        self.clamp(point) == point
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}
