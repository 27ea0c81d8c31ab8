//! Minimum-spacing bookkeeping for accepted placements.
use glam::Vec3;

/// Tracks accepted positions and answers whether a candidate keeps the
/// minimum distance to all of them.
///
/// Spacing is cumulative: every accepted point constrains all later
/// candidates, so acceptance probability drops as the area fills.
#[derive(Debug, Clone)]
pub struct SpacingIndex {
    min_distance: f32,
    positions: Vec<Vec3>,
}

impl SpacingIndex {
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            positions: Vec::new(),
        }
    }

    /// True when the candidate is at least `min_distance` from every
    /// accepted position. A non-positive `min_distance` disables the check.
    pub fn is_clear(&self, point: Vec3) -> bool {
        if self.min_distance <= 0.0 {
            return true;
        }
        let limit = self.min_distance * self.min_distance;
        self.positions
            .iter()
            .all(|&accepted| accepted.distance_squared(point) >= limit)
    }

    pub fn insert(&mut self, point: Vec3) {
        self.positions.push(point);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}
