//! Bridge between encoded image files and [`Raster`].
//!
//! Decoding and encoding are delegated to the `image` crate; this module only
//! moves samples between its RGB/luma buffers and the core's BGR layout.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Decode an image file. Colour images become 3-channel BGR, grayscale
/// images stay single-channel; alpha is dropped.
pub fn load_raster(path: &Path) -> Result<Raster> {
    info!(?path, "loading image file");
    let t0 = std::time::Instant::now();

    let img = image::open(path).map_err(|err| {
        Error::malformed(format!("could not decode {}: {err}", path.display()))
    })?;
    debug!(
        elapsed_ms = t0.elapsed().as_millis(),
        width = img.width(),
        height = img.height(),
        "image decode"
    );

    from_dynamic(img)
}

/// Encode `raster` to `path`; the format follows the file extension.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let t0 = std::time::Instant::now();
    to_dynamic(raster)?.save(path)?;
    info!(?path, elapsed_ms = t0.elapsed().as_millis(), "saved image");
    Ok(())
}

pub fn from_dynamic(img: DynamicImage) -> Result<Raster> {
    if img.color().has_color() {
        let rgb = img.into_rgb8();
        let (width, height) = rgb.dimensions();
        let mut data = rgb.into_raw();
        swap_red_blue(&mut data);
        Raster::from_data(width, height, 3, data)
    } else {
        let luma = img.into_luma8();
        let (width, height) = luma.dimensions();
        Raster::from_data(width, height, 1, luma.into_raw())
    }
}

pub fn to_dynamic(raster: &Raster) -> Result<DynamicImage> {
    raster.validate()?;
    let (width, height) = (raster.width, raster.height);
    let img = match raster.channels {
        1 => GrayImage::from_raw(width, height, raster.data.clone()).map(DynamicImage::ImageLuma8),
        _ => {
            let mut data = raster.data.clone();
            swap_red_blue(&mut data);
            RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
    };
    img.ok_or_else(|| Error::malformed(format!("buffer does not fit {width}x{height}")))
}

/// RGB <-> BGR, in place.
fn swap_red_blue(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
}
