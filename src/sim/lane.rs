//! Lane field geometry
//!
//! A fixed set of parallel lane x-positions plus the track bounds derived
//! from them. Immutable once built; reconfiguration is a full rebuild so
//! every dependent (colliders, visuals) starts from scratch.

use serde::{Deserialize, Serialize};

/// Lane lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneError {
    /// Index outside [0, lane_count)
    OutOfRange { index: usize, count: usize },
}

impl std::fmt::Display for LaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaneError::OutOfRange { index, count } => {
                write!(f, "lane index {index} out of range (lane count {count})")
            }
        }
    }
}

impl std::error::Error for LaneError {}

/// Ordered lane x-positions and the track bounds around them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneField {
    /// Lane centers, insertion order = left to right
    lanes: Vec<f32>,
    /// Extra width past the outermost lanes
    edge_offset: f32,
}

impl LaneField {
    pub fn new(lanes: &[f32], edge_offset: f32) -> Self {
        Self {
            lanes: lanes.to_vec(),
            edge_offset,
        }
    }

    /// X-position of a lane, or `OutOfRange` for a bad index
    pub fn position_of(&self, index: usize) -> Result<f32, LaneError> {
        self.lanes.get(index).copied().ok_or(LaneError::OutOfRange {
            index,
            count: self.lanes.len(),
        })
    }

    /// X-position with the index clamped into range (0 for an empty field)
    pub fn position_clamped(&self, index: usize) -> f32 {
        if self.lanes.is_empty() {
            return 0.0;
        }
        let clamped = index.min(self.lanes.len() - 1);
        self.lanes[clamped]
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Track bounds: (leftmost lane - edge offset, rightmost lane + edge offset)
    pub fn bounds(&self) -> (f32, f32) {
        let min = self.lanes.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.lanes.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (min - self.edge_offset, max + self.edge_offset)
    }

    /// Discard the current layout and rebuild from scratch
    pub fn rebuild(&mut self, lanes: &[f32], edge_offset: f32) {
        self.lanes.clear();
        self.lanes.extend_from_slice(lanes);
        self.edge_offset = edge_offset;
    }
}
