use std::time::Instant;

use crate::{Intensity, IntensityBuffer, MappingTable};

/// Both renditions of a remapped scan, sized like the mapping table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled<T> {
    /// Top-left corner of the four neighbours, not the closest one. Kept that
    /// way so results stay comparable with previously rendered fan images.
    pub nearest: IntensityBuffer<T>,
    pub interpolated: IntensityBuffer<T>,
}

/// Samples `source` at every coordinate of `table`.
///
/// Coordinates whose 2x2 neighbourhood does not lie strictly inside the
/// source (`x_left >= 0`, `x_right < width - 1`, same for rows), as well as
/// non-finite ones, yield [`Intensity::ZERO`] in both outputs. No clamping.
pub fn resample<T: Intensity>(source: &IntensityBuffer<T>, table: &MappingTable) -> Resampled<T> {
    let start = Instant::now();
    let (width, height) = table.canvas().dimensions();
    let mut nearest = IntensityBuffer::new(width, height);
    let mut interpolated = IntensityBuffer::new(width, height);

    if width > 0 {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            nearest
                .as_mut_slice()
                .par_chunks_mut(width)
                .zip(interpolated.as_mut_slice().par_chunks_mut(width))
                .enumerate()
                .for_each(|(y, (nearest_row, interpolated_row))| {
                    resample_row(source, table.row(y), nearest_row, interpolated_row)
                });
        }
        #[cfg(not(feature = "rayon"))]
        for (y, (nearest_row, interpolated_row)) in nearest
            .as_mut_slice()
            .chunks_mut(width)
            .zip(interpolated.as_mut_slice().chunks_mut(width))
            .enumerate()
        {
            resample_row(source, table.row(y), nearest_row, interpolated_row);
        }
    }

    log::info!("Remapped {width}x{height} pixels in {:?}", start.elapsed());
    Resampled {
        nearest,
        interpolated,
    }
}

fn resample_row<T: Intensity>(
    source: &IntensityBuffer<T>,
    coords: &[(f32, f32)],
    nearest_row: &mut [T],
    interpolated_row: &mut [T],
) {
    for ((&(beam, range), nearest), interpolated) in coords
        .iter()
        .zip(nearest_row.iter_mut())
        .zip(interpolated_row.iter_mut())
    {
        // untouched pixels keep the zero the buffers were created with
        if let Some((corner, blended)) = sample(source, beam, range) {
            *nearest = corner;
            *interpolated = blended;
        }
    }
}

/// (top-left corner, bilinear blend) or `None` outside the valid footprint
#[inline(always)]
fn sample<T: Intensity>(source: &IntensityBuffer<T>, x: f32, y: f32) -> Option<(T, T)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let (x_floor, y_floor) = (x.floor(), y.floor());
    let (x_frac, y_frac) = (x - x_floor, y - y_floor);

    let (x_left, y_top) = (x_floor as i64, y_floor as i64);
    let (x_right, y_bottom) = (x_left.saturating_add(1), y_top.saturating_add(1));
    let (width, height) = (source.width() as i64, source.height() as i64);
    if x_left < 0 || x_right >= width - 1 || y_top < 0 || y_bottom >= height - 1 {
        return None;
    }

    let (x_left, x_right) = (x_left as usize, x_right as usize);
    let (y_top, y_bottom) = (y_top as usize, y_bottom as usize);
    let top_left = source.sample(x_left, y_top);
    let top_right = source.sample(x_right, y_top).to_f32();
    let bottom_left = source.sample(x_left, y_bottom).to_f32();
    let bottom_right = source.sample(x_right, y_bottom).to_f32();

    let top = lerp(top_left.to_f32(), top_right, x_frac);
    let bottom = lerp(bottom_left, bottom_right, x_frac);
    let blended = lerp(top, bottom, y_frac);

    Some((top_left, T::from_f32_truncated(blended)))
}

/// Stays within `[min(a, b), max(a, b)]` for `t` in `[0, 1)`
#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
