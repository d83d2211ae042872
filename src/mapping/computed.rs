use std::time::Instant;

use crate::{
    BearingModel, DimensionMismatch, MappingProvider, MappingTable, OutputCanvas, SensorGeometry,
};

/// Inverse polar mapping: output pixel -> (beam, range) in the scan image.
///
/// For a pixel `(x, y)` with `dx = x - apex_x` and `dy = y`, the range is the
/// distance to the apex and the bearing is `atan2(dx, dy)`, i.e. measured from
/// the vertical (down-range) axis with positive angles to the right.
pub fn build_mapping_table(model: &BearingModel, canvas: OutputCanvas) -> MappingTable {
    let start = Instant::now();
    let mut coords = vec![(0f32, 0f32); canvas.len()].into_boxed_slice();

    if !canvas.is_empty() {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            coords
                .par_chunks_mut(canvas.width)
                .enumerate()
                .for_each(|(y, row)| fill_row(model, canvas, y, row));
        }
        #[cfg(not(feature = "rayon"))]
        for (y, row) in coords.chunks_mut(canvas.width).enumerate() {
            fill_row(model, canvas, y, row);
        }
    }

    log::info!(
        "Built {}x{} mapping table in {:?}",
        canvas.width,
        canvas.height,
        start.elapsed()
    );
    MappingTable::from_parts(canvas.width, canvas.height, coords)
}

fn fill_row(model: &BearingModel, canvas: OutputCanvas, y: usize, row: &mut [(f32, f32)]) {
    let (apex_x, apex_y) = canvas.apex();
    let dy = (y - apex_y) as f64;
    for (x, coord) in row.iter_mut().enumerate() {
        let dx = x as f64 - apex_x as f64;
        let range = (dx * dx + dy * dy).sqrt();
        let angle = dx.atan2(dy);
        *coord = (model.angle_to_beam(angle) as f32, range as f32);
    }
}

/// Mapping derived from the sensor geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedMapping {
    model: BearingModel,
    canvas: OutputCanvas,
}

impl ComputedMapping {
    pub fn new(model: BearingModel, canvas: OutputCanvas) -> Self {
        Self { model, canvas }
    }

    pub fn from_geometry(geometry: &SensorGeometry) -> Self {
        Self::new(
            BearingModel::uniform(geometry.fan()),
            OutputCanvas::from_geometry(geometry),
        )
    }

    pub fn model(&self) -> &BearingModel {
        &self.model
    }

    pub fn canvas(&self) -> OutputCanvas {
        self.canvas
    }
}

impl MappingProvider for ComputedMapping {
    fn mapping_table(&self) -> Result<MappingTable, DimensionMismatch> {
        Ok(build_mapping_table(&self.model, self.canvas))
    }
}
