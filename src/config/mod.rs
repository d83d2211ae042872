use serde::{Deserialize, Serialize};

mod bit_depth;
mod mapping_source;
mod sensor_geometry;

pub use bit_depth::*;
pub use mapping_source::*;
pub use sensor_geometry::*;

/// Everything needed to turn a beam-indexed scan into a fan image.
///
/// The number of range samples is not part of it, as it is only known once
/// the input has been decoded (one range sample per input row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub fan: BeamFan,
    #[serde(default)]
    pub bit_depth: BitDepth,
    #[serde(default)]
    pub mapping: MappingSource,
}

impl ConverterConfig {
    pub fn new(fan: BeamFan) -> Self {
        Self {
            fan,
            bit_depth: BitDepth::default(),
            mapping: MappingSource::default(),
        }
    }

    pub fn geometry(&self, num_range_samples: usize) -> Result<SensorGeometry, InvalidConfig> {
        self.fan.with_range_samples(num_range_samples)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidConfig {
    reason: String,
}

impl InvalidConfig {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn deserialize_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config: ConverterConfig =
            serde_json::from_str(r#"{"fan": {"field_of_view": 1.5707964, "num_beams": 640}}"#)?;
        assert_eq!(640, config.fan.num_beams);
        assert_eq!(BitDepth::Sixteen, config.bit_depth);
        assert_eq!(MappingSource::Computed, config.mapping);
        Ok(())
    }

    #[test]
    fn deserialize_precomputed() -> Result<(), Box<dyn std::error::Error>> {
        let config: ConverterConfig = serde_json::from_str(
            r#"{
                "fan": {"field_of_view": 1.0, "num_beams": 2},
                "bit_depth": 8,
                "mapping": {"kind": "precomputed", "map_x": "x.bin", "map_y": "y.bin", "width": 4, "height": 3}
            }"#,
        )?;
        assert_eq!(BitDepth::Eight, config.bit_depth);
        assert_eq!(
            MappingSource::Precomputed {
                map_x: PathBuf::from("x.bin"),
                map_y: PathBuf::from("y.bin"),
                width: 4,
                height: 3,
            },
            config.mapping
        );
        Ok(())
    }

    #[test]
    fn reject_single_beam() {
        let res = serde_json::from_str::<ConverterConfig>(
            r#"{"fan": {"field_of_view": 1.0, "num_beams": 1}}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn reject_unknown_bit_depth() {
        let res = serde_json::from_str::<ConverterConfig>(
            r#"{"fan": {"field_of_view": 1.0, "num_beams": 4}, "bit_depth": 12}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn serialize_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let config = ConverterConfig::new(BeamFan::new(0.5, 16)?);
        let json = serde_json::to_string(&config)?;
        assert_eq!(config, serde_json::from_str(&json)?);
        Ok(())
    }
}
