use std::fmt::Debug;

use bytemuck::Pod;

use crate::SizeMismatchError;

/// Unsigned sample type of a single-channel buffer.
pub trait Intensity: Pod + Default + Debug + PartialEq + Send + Sync + 'static {
    /// "No data" value written outside the valid fan footprint
    const ZERO: Self;

    fn to_f32(self) -> f32;
    /// Truncates toward zero and saturates at the type bounds
    fn from_f32_truncated(value: f32) -> Self;
}

impl Intensity for u8 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline(always)]
    fn from_f32_truncated(value: f32) -> Self {
        value as u8
    }
}

impl Intensity for u16 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline(always)]
    fn from_f32_truncated(value: f32) -> Self {
        value as u16
    }
}

/// Row-major single-channel image, `x` is the column and `y` the row.
///
/// For a scan image the column is the beam index and the row the range sample.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityBuffer<T> {
    width: usize,
    height: usize,
    data: Box<[T]>,
}

impl<T: Intensity> IntensityBuffer<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::ZERO)
    }

    /// Panics on allocation failure, including `width * height` overflowing.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width.saturating_mul(height)].into_boxed_slice(),
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, SizeMismatchError> {
        // a saturated product never matches the length of an allocated vec
        let expected = width.saturating_mul(height);
        if data.len() != expected {
            return Err(SizeMismatchError {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// `data` holds at least `width * height` samples, extra ones are dropped
    #[cfg(feature = "image")]
    pub(crate) fn from_row_major(width: usize, height: usize, mut data: Vec<T>) -> Self {
        debug_assert!(data.len() >= width * height);
        data.truncate(width * height);
        Self {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Caller guarantees `x < width` and `y < height`
    #[inline(always)]
    pub(crate) fn sample(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Native-endian sample bytes, e.g. for handing the buffer to an encoder
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data.into_vec()
    }
}
