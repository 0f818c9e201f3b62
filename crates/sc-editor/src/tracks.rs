//! Grid track resizing helper.
//!
//! Column/row gestures feed pointer deltas through a `TrackResizer`,
//! which owns the min/max clamp so the gesture code stays geometry-free.

use sc_core::Track;

#[derive(Debug, Clone, Copy)]
pub struct TrackResizer {
    start: f64,
    min: f64,
    max: f64,
}

impl TrackResizer {
    pub fn new(track: &Track) -> Self {
        Self {
            start: track.size,
            min: track.min,
            max: track.max,
        }
    }

    /// The track size at the start of the gesture.
    pub fn start_size(&self) -> f64 {
        self.start
    }

    /// Candidate size for a pointer delta along the track axis, clamped
    /// to the track's constraints.
    pub fn size_for_delta(&self, delta: f64) -> f64 {
        (self.start + delta).clamp(self.min, self.max)
    }
}
