use crate::{BeamFan, InvalidConfig};

/// Piecewise linear map from bearing angle (radians) to fractional beam index.
///
/// Knot `i` maps `bearing(i)` to `i`. Angles outside the knot range are
/// extrapolated with the slope of the nearest edge segment, so callers get a
/// (possibly out of range) beam index for every finite angle.
#[derive(Debug, Clone, PartialEq)]
pub struct BearingModel {
    bearings: Box<[f64]>,
}

impl BearingModel {
    /// Uniformly spaced beams: `bearing(i) = (i / num_beams - 0.5) * field_of_view`
    pub fn uniform(fan: &BeamFan) -> Self {
        let num_beams = fan.num_beams as usize;
        let bearings = (0..num_beams)
            .map(|i| (i as f64 / num_beams as f64 - 0.5) * fan.field_of_view)
            .collect();
        Self { bearings }
    }

    /// One bearing per beam, strictly increasing.
    pub fn from_bearings(bearings: impl Into<Vec<f64>>) -> Result<Self, InvalidConfig> {
        let bearings = bearings.into();
        if bearings.len() < 2 {
            return Err(InvalidConfig::new(format!(
                "At least 2 bearings are required, got {}",
                bearings.len()
            )));
        }
        if let Some(pos) = bearings.iter().position(|b| !b.is_finite()) {
            return Err(InvalidConfig::new(format!(
                "Bearing of beam {pos} is not finite"
            )));
        }
        if let Some(pos) = bearings.windows(2).position(|w| w[0] >= w[1]) {
            return Err(InvalidConfig::new(format!(
                "Bearings must be strictly increasing, beam {} ({}) >= beam {} ({})",
                pos,
                bearings[pos],
                pos + 1,
                bearings[pos + 1]
            )));
        }
        Ok(Self {
            bearings: bearings.into_boxed_slice(),
        })
    }

    pub fn num_beams(&self) -> usize {
        self.bearings.len()
    }

    pub fn bearing(&self, beam: usize) -> Option<f64> {
        self.bearings.get(beam).copied()
    }

    pub fn angle_to_beam(&self, angle: f64) -> f64 {
        let knots = &self.bearings;
        // first knot above `angle`, kept inside so edge segments extrapolate
        let upper = knots
            .partition_point(|&k| k <= angle)
            .clamp(1, knots.len() - 1);
        let lower = upper - 1;
        let (from, to) = (knots[lower], knots[upper]);
        lower as f64 + (angle - from) / (to - from)
    }

    /// Inverse of [`Self::angle_to_beam`]
    pub fn beam_to_angle(&self, beam: f64) -> f64 {
        let last = self.bearings.len() - 1;
        let lower = if beam.is_nan() {
            0
        } else {
            (beam.floor().max(0.) as usize).min(last - 1)
        };
        let (from, to) = (self.bearings[lower], self.bearings[lower + 1]);
        from + (beam - lower as f64) * (to - from)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn sonar_model() -> BearingModel {
        BearingModel::uniform(&BeamFan::new(PI / 2., 640).unwrap())
    }

    #[test]
    fn exact_at_knots() {
        let model = sonar_model();
        for i in 0..model.num_beams() {
            let bearing = model.bearing(i).unwrap();
            assert_eq!(i as f64, model.angle_to_beam(bearing), "beam {i}");
        }
    }

    #[test]
    fn centre_beam_looks_straight_ahead() {
        let model = sonar_model();
        assert_eq!(Some(0.), model.bearing(320));
        assert!((model.angle_to_beam(0.) - 320.).abs() < 1e-9);
    }

    #[test]
    fn strictly_increasing_over_field_of_view() {
        let model = sonar_model();
        let steps = 5000;
        let beams = (0..=steps)
            .map(|i| -PI / 4. + PI / 2. * i as f64 / steps as f64)
            .map(|angle| model.angle_to_beam(angle))
            .collect::<Vec<_>>();
        assert!(beams.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn extrapolates_with_edge_slope() {
        let model = BearingModel::from_bearings([0., 1., 3.]).unwrap();
        assert!((model.angle_to_beam(-1.) - -1.).abs() < 1e-12);
        assert!((model.angle_to_beam(5.) - 3.).abs() < 1e-12);
        assert!((model.angle_to_beam(2.) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn inverse_matches_forward() {
        let model = BearingModel::from_bearings([-0.4, -0.1, 0.2, 0.9]).unwrap();
        for beam in [-0.5, 0., 0.25, 1., 2.7, 3., 4.2] {
            let angle = model.beam_to_angle(beam);
            assert!((model.angle_to_beam(angle) - beam).abs() < 1e-9, "{beam}");
        }
    }

    #[test]
    fn rejects_unsorted_bearings() {
        assert!(BearingModel::from_bearings([0., 0.]).is_err());
        assert!(BearingModel::from_bearings([0.2, 0.1, 0.3]).is_err());
        assert!(BearingModel::from_bearings([0.1]).is_err());
        assert!(BearingModel::from_bearings([0.1, f64::NAN]).is_err());
    }
}
