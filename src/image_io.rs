//! Bridge between intensity buffers and the `image` crate.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma, Primitive, Rgb};

use crate::{BitDepth, ConvertError, ConverterConfig, FanConverter, Intensity, IntensityBuffer};

/// Sample types which can be decoded from and encoded to image files.
pub trait ImageIntensity: Intensity + Primitive {
    /// Decodes any supported format and reduces it to luma
    fn load(path: &Path) -> Result<IntensityBuffer<Self>, ConvertError>;
    fn to_dynamic(buffer: &IntensityBuffer<Self>) -> DynamicImage;
    /// Intensity replicated into all three channels
    fn to_dynamic_rgb(buffer: &IntensityBuffer<Self>) -> DynamicImage;
}

impl ImageIntensity for u8 {
    fn load(path: &Path) -> Result<IntensityBuffer<Self>, ConvertError> {
        Ok(image::open(path)?.into_luma8().into())
    }

    fn to_dynamic(buffer: &IntensityBuffer<Self>) -> DynamicImage {
        DynamicImage::ImageLuma8(buffer.to_luma_image())
    }

    fn to_dynamic_rgb(buffer: &IntensityBuffer<Self>) -> DynamicImage {
        DynamicImage::ImageRgb8(replicate_channels(buffer))
    }
}

impl ImageIntensity for u16 {
    fn load(path: &Path) -> Result<IntensityBuffer<Self>, ConvertError> {
        Ok(image::open(path)?.into_luma16().into())
    }

    fn to_dynamic(buffer: &IntensityBuffer<Self>) -> DynamicImage {
        DynamicImage::ImageLuma16(buffer.to_luma_image())
    }

    fn to_dynamic_rgb(buffer: &IntensityBuffer<Self>) -> DynamicImage {
        DynamicImage::ImageRgb16(replicate_channels(buffer))
    }
}

fn replicate_channels<T>(buffer: &IntensityBuffer<T>) -> ImageBuffer<Rgb<T>, Vec<T>>
where
    T: Intensity,
    Rgb<T>: image::Pixel<Subpixel = T>,
{
    ImageBuffer::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        let value = buffer.sample(x as usize, y as usize);
        Rgb([value, value, value])
    })
}

impl<T: Intensity + Primitive> From<ImageBuffer<Luma<T>, Vec<T>>> for IntensityBuffer<T> {
    fn from(image: ImageBuffer<Luma<T>, Vec<T>>) -> Self {
        let (width, height) = image.dimensions();
        // single channel, so the container already is row-major intensity
        Self::from_row_major(width as usize, height as usize, image.into_raw())
    }
}

impl<T: Intensity + Primitive> IntensityBuffer<T> {
    pub fn to_luma_image(&self) -> ImageBuffer<Luma<T>, Vec<T>> {
        ImageBuffer::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            Luma([self.sample(x as usize, y as usize)])
        })
    }
}

impl<T: ImageIntensity> IntensityBuffer<T> {
    /// Three-channel image at the sample depth of `T`
    pub fn to_rgb_image(&self) -> DynamicImage {
        T::to_dynamic_rgb(self)
    }
}

pub fn load_intensity<T: ImageIntensity>(
    path: impl AsRef<Path>,
) -> Result<IntensityBuffer<T>, ConvertError> {
    let path = path.as_ref();
    let buffer = T::load(path)?;
    log::info!("Loaded {:?}: {}x{}", path, buffer.width(), buffer.height());
    Ok(buffer)
}

/// Format follows the file extension
pub fn save_intensity<T: ImageIntensity>(
    buffer: &IntensityBuffer<T>,
    path: impl AsRef<Path>,
) -> Result<(), ConvertError> {
    T::to_dynamic(buffer).save(path)?;
    Ok(())
}

/// Loads `input`, converts it and writes the nearest-corner and the smooth
/// rendition, using the sample depth configured in `config`.
pub fn convert_file(
    config: &ConverterConfig,
    input: impl AsRef<Path>,
    nearest_out: impl AsRef<Path>,
    smooth_out: impl AsRef<Path>,
) -> Result<FanConverter, ConvertError> {
    let (input, nearest_out, smooth_out) =
        (input.as_ref(), nearest_out.as_ref(), smooth_out.as_ref());
    match config.bit_depth {
        BitDepth::Eight => convert_file_as::<u8>(config, input, nearest_out, smooth_out),
        BitDepth::Sixteen => convert_file_as::<u16>(config, input, nearest_out, smooth_out),
    }
}

fn convert_file_as<T: ImageIntensity>(
    config: &ConverterConfig,
    input: &Path,
    nearest_out: &Path,
    smooth_out: &Path,
) -> Result<FanConverter, ConvertError> {
    let source = load_intensity::<T>(input)?;
    let converter = FanConverter::from_config(config, source.height())?;
    let out = converter.convert(&source)?;
    save_intensity(&out.nearest, nearest_out)?;
    save_intensity(&out.interpolated, smooth_out)?;
    Ok(converter)
}
