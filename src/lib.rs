mod bearing;
mod canvas;
mod config;
mod converter;
mod error;
#[cfg(feature = "image")]
mod image_io;
mod intensity;
mod mapping;
mod resample;

pub use bearing::*;
pub use canvas::*;
pub use config::*;
pub use converter::*;
pub use error::*;
#[cfg(feature = "image")]
pub use image_io::*;
pub use intensity::*;
pub use mapping::*;
pub use resample::*;
