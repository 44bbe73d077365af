use serde::{Deserialize, Serialize};

/// Full scale of both court axes, in percent.
pub const COURT_SCALE: f32 = 100.0;

/// A point on the court surface, both axes expressed as a percentage (0-100)
/// of court width/height. Used for the optional start/end ball locations of a
/// rally action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: f32,
    pub y: f32,
}

impl CourtPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Build a point from raw pointer coordinates, clamping both axes into
    /// the court range.
    pub fn clamped(x: f32, y: f32) -> Self {
        Self { x: x.clamp(0.0, COURT_SCALE), y: y.clamp(0.0, COURT_SCALE) }
    }

    pub fn is_in_bounds(&self) -> bool {
        (0.0..=COURT_SCALE).contains(&self.x) && (0.0..=COURT_SCALE).contains(&self.y)
    }
}
