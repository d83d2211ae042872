use crate::{DimensionMismatch, OutputCanvas};

mod computed;
mod precomputed;

pub use computed::*;
pub use precomputed::*;

/// Anything able to hand out a mapping table for the resampler.
pub trait MappingProvider {
    fn mapping_table(&self) -> Result<MappingTable, DimensionMismatch>;
}

/// Fractional source coordinate `(beam, range)` for every output pixel.
///
/// Addressed as `(x, y)` = (column, row) of the output canvas and stored row by
/// row. Values may lie outside the source image, this is only checked while
/// resampling.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    width: usize,
    height: usize,
    coords: Box<[(f32, f32)]>,
}

impl MappingTable {
    pub(crate) fn from_parts(width: usize, height: usize, coords: Box<[(f32, f32)]>) -> Self {
        debug_assert_eq!(width * height, coords.len());
        Self {
            width,
            height,
            coords,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn canvas(&self) -> OutputCanvas {
        OutputCanvas::new(self.width, self.height)
    }

    /// (beam, range) of output pixel `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<(f32, f32)> {
        if x < self.width && y < self.height {
            Some(self.coords[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> &[(f32, f32)] {
        &self.coords[y * self.width..(y + 1) * self.width]
    }

    pub fn ensure_canvas(&self, expected: OutputCanvas) -> Result<(), DimensionMismatch> {
        DimensionMismatch::check(expected.dimensions(), self.canvas().dimensions())
    }

    /// `(map_x, map_y)` in the external `[row][column]` layout
    pub fn to_rows(&self) -> PrecomputedMappingRaw {
        let (map_x, map_y): (Vec<Vec<f32>>, Vec<Vec<f32>>) = (0..self.height)
            .map(|y| self.row(y).iter().copied().unzip())
            .unzip();
        PrecomputedMappingRaw { map_x, map_y }
    }

    /// `(map_x, map_y)` as little-endian f32 blobs, row-major
    pub fn to_raw_le(&self) -> (Vec<u8>, Vec<u8>) {
        let mut map_x = Vec::with_capacity(self.coords.len() * 4);
        let mut map_y = Vec::with_capacity(self.coords.len() * 4);
        for (beam, range) in self.coords.iter() {
            map_x.extend_from_slice(&beam.to_le_bytes());
            map_y.extend_from_slice(&range.to_le_bytes());
        }
        (map_x, map_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MappingTable {
        MappingTable::from_parts(
            3,
            2,
            vec![
                (0., 10.),
                (1., 11.),
                (2., 12.),
                (3., 13.),
                (4., 14.),
                (5., 15.),
            ]
            .into_boxed_slice(),
        )
    }

    #[test]
    fn addressed_by_column_then_row() {
        let table = table();
        assert_eq!(Some((5., 15.)), table.get(2, 1));
        assert_eq!(Some((1., 11.)), table.get(1, 0));
        assert_eq!(None, table.get(3, 0));
        assert_eq!(&[(3f32, 13f32), (4., 14.), (5., 15.)], table.row(1));
    }

    #[test]
    fn export_is_row_major() {
        let raw = table().to_rows();
        assert_eq!(vec![vec![0f32, 1., 2.], vec![3., 4., 5.]], raw.map_x);
        assert_eq!(vec![vec![10f32, 11., 12.], vec![13., 14., 15.]], raw.map_y);
    }

    #[test]
    fn export_keeps_rows_of_zero_width_table() {
        let raw = MappingTable::from_parts(0, 4, Box::new([])).to_rows();
        assert_eq!(4, raw.map_x.len());
        assert_eq!(4, raw.map_y.len());
        assert!(raw.map_x.iter().all(Vec::is_empty));
    }

    #[test]
    fn raw_export_splits_axes() {
        let (x, y) = table().to_raw_le();
        assert_eq!(24, x.len());
        assert_eq!(24, y.len());
        assert_eq!(&5f32.to_le_bytes(), &x[20..]);
        assert_eq!(&10f32.to_le_bytes(), &y[..4]);
    }

    #[test]
    fn canvas_check() {
        let table = table();
        assert!(table.ensure_canvas(OutputCanvas::new(3, 2)).is_ok());
        assert_eq!(
            Err(DimensionMismatch {
                expected: (2, 3),
                actual: (3, 2)
            }),
            table.ensure_canvas(OutputCanvas::new(2, 3))
        );
    }
}
