use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    ConvertError, DimensionMismatch, InvalidConfig, MappingProvider, MappingTable, OutputCanvas,
    SizeMismatchError,
};

/// Externally supplied table in `[row][column]` layout, i.e. `map_x[y][x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecomputedMappingRaw {
    /// Beam coordinate per output pixel
    pub map_x: Vec<Vec<f32>>,
    /// Range coordinate per output pixel
    pub map_y: Vec<Vec<f32>>,
}

/// Mapping loaded from elsewhere. Its dimensions come from the table itself
/// unless an expected canvas is set, in which case they have to agree.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedMapping {
    table: MappingTable,
    expected: Option<OutputCanvas>,
}

impl PrecomputedMapping {
    /// Rows must all have the same length and both arrays the same shape.
    pub fn from_rows(map_x: &[Vec<f32>], map_y: &[Vec<f32>]) -> Result<Self, DimensionMismatch> {
        let height = map_x.len();
        let width = map_x.first().map_or(0, Vec::len);
        DimensionMismatch::check((width, height), (width, map_y.len()))?;

        let mut coords = Vec::with_capacity(width * height);
        for (row_x, row_y) in map_x.iter().zip(map_y) {
            DimensionMismatch::check((width, height), (row_x.len(), height))?;
            DimensionMismatch::check((width, height), (row_y.len(), height))?;
            coords.extend(row_x.iter().copied().zip(row_y.iter().copied()));
        }

        Ok(Self {
            table: MappingTable::from_parts(width, height, coords.into_boxed_slice()),
            expected: None,
        })
    }

    /// Two little-endian f32 blobs, row-major `[height, width]`.
    pub fn from_raw_le(
        map_x: &[u8],
        map_y: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Self, ConvertError> {
        let expected = width
            .checked_mul(height)
            .and_then(|len| len.checked_mul(std::mem::size_of::<f32>()))
            .ok_or_else(|| {
                InvalidConfig::new(format!("Mapping table of {width}x{height} is too large"))
            })?;
        for blob in [map_x, map_y] {
            if blob.len() != expected {
                return Err(SizeMismatchError {
                    expected,
                    actual: blob.len(),
                }
                .into());
            }
        }

        let coords = decode_le(map_x)
            .zip(decode_le(map_y))
            .collect::<Box<[_]>>();
        Ok(Self {
            table: MappingTable::from_parts(width, height, coords),
            expected: None,
        })
    }

    pub fn read_raw_files(
        map_x: impl AsRef<Path>,
        map_y: impl AsRef<Path>,
        width: usize,
        height: usize,
    ) -> Result<Self, ConvertError> {
        let (map_x, map_y) = (map_x.as_ref(), map_y.as_ref());
        log::debug!("Loading mapping table from {map_x:?} and {map_y:?}");
        let raw_x = std::fs::read(map_x)?;
        let raw_y = std::fs::read(map_y)?;
        Self::from_raw_le(&raw_x, &raw_y, width, height)
    }

    pub fn with_expected_canvas(mut self, canvas: OutputCanvas) -> Self {
        self.expected = Some(canvas);
        self
    }

    pub fn canvas(&self) -> OutputCanvas {
        self.table.canvas()
    }
}

fn decode_le(blob: &[u8]) -> impl Iterator<Item = f32> {
    // copies, so the blob may be unaligned
    bytemuck::pod_collect_to_vec::<u8, u32>(blob)
        .into_iter()
        .map(|bits| f32::from_bits(u32::from_le(bits)))
}

impl TryFrom<PrecomputedMappingRaw> for PrecomputedMapping {
    type Error = DimensionMismatch;

    fn try_from(value: PrecomputedMappingRaw) -> Result<Self, Self::Error> {
        Self::from_rows(&value.map_x, &value.map_y)
    }
}

impl<'de> Deserialize<'de> for PrecomputedMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = PrecomputedMappingRaw::deserialize(deserializer)?;
        raw.try_into()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl MappingProvider for PrecomputedMapping {
    fn mapping_table(&self) -> Result<MappingTable, DimensionMismatch> {
        if let Some(expected) = self.expected {
            self.table.ensure_canvas(expected)?;
        }
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::{ComputedMapping, SensorGeometry};

    use super::*;

    #[test]
    fn rows_are_transposed_into_columns() {
        let mapping =
            PrecomputedMapping::from_rows(&[vec![1., 2., 3.]], &[vec![4., 5., 6.]]).unwrap();
        let table = mapping.mapping_table().unwrap();
        assert_eq!((3, 1), table.canvas().dimensions());
        assert_eq!(Some((3., 6.)), table.get(2, 0));
        assert_eq!(None, table.get(0, 2));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = PrecomputedMapping::from_rows(
            &[vec![1., 2.], vec![1.]],
            &[vec![1., 2.], vec![1., 2.]],
        );
        assert_eq!(
            Err(DimensionMismatch {
                expected: (2, 2),
                actual: (1, 2)
            }),
            res
        );
    }

    #[test]
    fn shape_of_both_arrays_must_agree() {
        let res = PrecomputedMapping::from_rows(&[vec![1.], vec![1.]], &[vec![1.]]);
        assert!(res.is_err());
    }

    #[test]
    fn expected_canvas_is_enforced() {
        let mapping = PrecomputedMapping::from_rows(&vec![vec![0.; 4]; 3], &vec![vec![0.; 4]; 3])
            .unwrap()
            .with_expected_canvas(OutputCanvas::new(5, 3));
        assert_eq!(
            Err(DimensionMismatch {
                expected: (5, 3),
                actual: (4, 3)
            }),
            mapping.mapping_table()
        );
    }

    #[test]
    fn raw_blob_size_is_checked() {
        let err = PrecomputedMapping::from_raw_le(&[0; 16], &[0; 12], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Size(SizeMismatchError {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn oversized_raw_shape_is_rejected() {
        for (width, height) in [(1 << 62, 4), (usize::MAX, 2), (1 << 32, 1 << 32)] {
            let res = PrecomputedMapping::from_raw_le(&[], &[], width, height);
            assert!(
                matches!(res, Err(ConvertError::InvalidConfig(_))),
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn reimports_exported_tables() -> Result<(), Box<dyn std::error::Error>> {
        let geometry = SensorGeometry::new(PI / 3., 32, 20)?;
        let computed = ComputedMapping::from_geometry(&geometry).mapping_table()?;

        let (raw_x, raw_y) = computed.to_raw_le();
        let from_raw =
            PrecomputedMapping::from_raw_le(&raw_x, &raw_y, computed.width(), computed.height())?
                .with_expected_canvas(computed.canvas());
        assert_eq!(computed, from_raw.mapping_table()?);

        let json = serde_json::to_string(&computed.to_rows())?;
        let from_json: PrecomputedMapping = serde_json::from_str(&json)?;
        assert_eq!(computed, from_json.mapping_table()?);
        Ok(())
    }
}
