use std::{f64::consts::TAU, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamFanRaw {
    /// Full opening angle in radians
    pub field_of_view: f64,
    pub num_beams: u32,
}

/// Angular layout of the sensor. Can only be obtained through validation, so
/// the bearing model never sees a degenerate fan.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BeamFan(BeamFanRaw);

impl BeamFan {
    pub fn new(field_of_view: f64, num_beams: u32) -> Result<Self, InvalidConfig> {
        BeamFanRaw {
            field_of_view,
            num_beams,
        }
        .try_into()
    }

    pub fn from_degrees(field_of_view_deg: f64, num_beams: u32) -> Result<Self, InvalidConfig> {
        Self::new(field_of_view_deg.to_radians(), num_beams)
    }

    pub fn with_range_samples(
        self,
        num_range_samples: usize,
    ) -> Result<SensorGeometry, InvalidConfig> {
        if num_range_samples == 0 {
            return Err(InvalidConfig::new(
                "num_range_samples must be at least 1, got 0",
            ));
        }
        Ok(SensorGeometry {
            fan: self,
            num_range_samples,
        })
    }
}

impl Deref for BeamFan {
    type Target = BeamFanRaw;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BeamFan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = BeamFanRaw::deserialize(deserializer)?;
        inner
            .try_into()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl From<BeamFan> for BeamFanRaw {
    fn from(value: BeamFan) -> Self {
        value.0
    }
}

impl TryFrom<BeamFanRaw> for BeamFan {
    type Error = InvalidConfig;

    fn try_from(value: BeamFanRaw) -> Result<Self, Self::Error> {
        let fov = value.field_of_view;
        if !fov.is_finite() || fov <= 0. || fov >= TAU {
            Err(InvalidConfig::new(format!(
                "field_of_view must lie in (0, 2pi) radians, got {fov}"
            )))
        } else if value.num_beams < 2 {
            Err(InvalidConfig::new(format!(
                "num_beams must be at least 2, got {}",
                value.num_beams
            )))
        } else {
            Ok(BeamFan(value))
        }
    }
}

/// Fan layout plus the number of range samples per beam (input image height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorGeometry {
    fan: BeamFan,
    num_range_samples: usize,
}

impl SensorGeometry {
    pub fn new(
        field_of_view: f64,
        num_beams: u32,
        num_range_samples: usize,
    ) -> Result<Self, InvalidConfig> {
        BeamFan::new(field_of_view, num_beams)?.with_range_samples(num_range_samples)
    }

    pub fn fan(&self) -> &BeamFan {
        &self.fan
    }

    pub const fn num_range_samples(&self) -> usize {
        self.num_range_samples
    }
}

impl Deref for SensorGeometry {
    type Target = BeamFan;

    fn deref(&self) -> &Self::Target {
        &self.fan
    }
}
