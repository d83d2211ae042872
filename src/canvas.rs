use std::f64::consts::PI;

use crate::SensorGeometry;

/// Width of the smallest canvas holding the whole fan with its apex centred.
///
/// `ceil(2 * num_range_samples * sin(field_of_view / 2))`. Fans wider than a
/// half circle are as wide as their full range diameter, so the angle is
/// capped at pi to keep the width monotonic in the field of view.
pub fn derive_output_width(field_of_view: f64, num_range_samples: usize) -> usize {
    let half_angle = field_of_view.min(PI) / 2.;
    (2. * num_range_samples as f64 * half_angle.sin()).ceil() as usize
}

/// Cartesian target image. One row per range sample, apex at the top centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputCanvas {
    pub width: usize,
    pub height: usize,
}

impl OutputCanvas {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn from_geometry(geometry: &SensorGeometry) -> Self {
        let height = geometry.num_range_samples();
        Self {
            width: derive_output_width(geometry.field_of_view, height),
            height,
        }
    }

    /// Origin of the fan, `(width / 2, 0)` with the column rounded down
    pub const fn apex(&self) -> (usize, usize) {
        (self.width / 2, 0)
    }

    /// (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
