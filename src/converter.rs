use crate::{
    build_mapping_table, resample, ComputedMapping, ConvertError, ConverterConfig,
    DimensionMismatch, Intensity, IntensityBuffer, MappingProvider, MappingSource, MappingTable,
    OutputCanvas, PrecomputedMapping, Resampled, SensorGeometry,
};

/// Converts beam-indexed scans of one sensor geometry into fan images.
///
/// The mapping table is built (or loaded) once and reused for every scan.
#[derive(Debug, Clone)]
pub struct FanConverter {
    geometry: SensorGeometry,
    table: MappingTable,
}

impl FanConverter {
    /// Mapping computed from `geometry`
    pub fn new(geometry: SensorGeometry) -> Self {
        let table = build_computed(&geometry);
        Self { geometry, table }
    }

    pub fn with_provider(
        geometry: SensorGeometry,
        provider: &impl MappingProvider,
    ) -> Result<Self, DimensionMismatch> {
        Ok(Self {
            geometry,
            table: provider.mapping_table()?,
        })
    }

    /// Picks the mapping provider named in `config`.
    pub fn from_config(
        config: &ConverterConfig,
        num_range_samples: usize,
    ) -> Result<Self, ConvertError> {
        let geometry = config.geometry(num_range_samples)?;
        match &config.mapping {
            MappingSource::Computed => Ok(Self::new(geometry)),
            MappingSource::Precomputed {
                map_x,
                map_y,
                width,
                height,
            } => {
                // one output row per range sample, the width is the table's own
                let expected = OutputCanvas::new(*width, geometry.num_range_samples());
                let provider = PrecomputedMapping::read_raw_files(map_x, map_y, *width, *height)?
                    .with_expected_canvas(expected);
                Ok(Self::with_provider(geometry, &provider)?)
            }
        }
    }

    pub fn geometry(&self) -> &SensorGeometry {
        &self.geometry
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn canvas(&self) -> OutputCanvas {
        self.table.canvas()
    }

    /// `source` must have one row per range sample of the geometry.
    pub fn convert<T: Intensity>(
        &self,
        source: &IntensityBuffer<T>,
    ) -> Result<Resampled<T>, DimensionMismatch> {
        DimensionMismatch::check(
            (source.width(), self.geometry.num_range_samples()),
            source.dimensions(),
        )?;
        Ok(resample(source, &self.table))
    }
}

fn build_computed(geometry: &SensorGeometry) -> MappingTable {
    let mapping = ComputedMapping::from_geometry(geometry);
    let canvas = mapping.canvas();
    log::debug!(
        "Computing mapping for {} beams over {:.4} rad onto {}x{}",
        geometry.num_beams,
        geometry.field_of_view,
        canvas.width,
        canvas.height
    );
    build_mapping_table(mapping.model(), canvas)
}
