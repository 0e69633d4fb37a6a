//! Raster decoding.
//!
//! TIFF files are read with the `tiff` crate so that single-channel float
//! and signed-integer DEMs decode without conversion. Everything else goes
//! through the `image` crate. Only the first channel of multi-channel
//! images is used as elevation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{DynamicImage, ImageBuffer, Pixel};
use terrain_mesh::Heightfield;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

/// Decode an image file into a heightfield.
pub fn load(path: &Path) -> Result<Heightfield> {
    let heightfield = if is_tiff(path) {
        load_tiff(path)?
    } else {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode raster from {:?}", path))?;
        from_image(&image)?
    };
    debug!(
        path = %path.display(),
        rows = heightfield.rows(),
        cols = heightfield.cols(),
        "Decoded raster"
    );
    Ok(heightfield)
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
}

/// Decode the first image of a TIFF, any sample type, channel 0.
fn load_tiff(path: &Path) -> Result<Heightfield> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut decoder = Decoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to read TIFF header from {:?}", path))?;
    let (width, height) = decoder.dimensions()?;
    let data = decoder
        .read_image()
        .with_context(|| format!("Failed to decode TIFF from {:?}", path))?;

    let samples = tiff_samples(data);
    let (rows, cols) = (height as usize, width as usize);
    let pixels = rows * cols;
    if pixels == 0 || samples.len() % pixels != 0 {
        bail!(
            "TIFF {:?} has {} samples for {}x{} pixels",
            path,
            samples.len(),
            rows,
            cols
        );
    }

    let channels = samples.len() / pixels;
    let elevations = samples.into_iter().step_by(channels).collect();
    Ok(Heightfield::from_vec(rows, cols, elevations)?)
}

fn tiff_samples(data: DecodingResult) -> Vec<f64> {
    match data {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
    }
}

/// Extract channel 0 of an image, row-major from the top row.
pub fn from_image(image: &DynamicImage) -> Result<Heightfield> {
    let samples = match image {
        DynamicImage::ImageLuma8(buf) => first_channel(buf),
        DynamicImage::ImageLumaA8(buf) => first_channel(buf),
        DynamicImage::ImageRgb8(buf) => first_channel(buf),
        DynamicImage::ImageRgba8(buf) => first_channel(buf),
        DynamicImage::ImageLuma16(buf) => first_channel(buf),
        DynamicImage::ImageLumaA16(buf) => first_channel(buf),
        DynamicImage::ImageRgb16(buf) => first_channel(buf),
        DynamicImage::ImageRgba16(buf) => first_channel(buf),
        DynamicImage::ImageRgb32F(buf) => first_channel(buf),
        DynamicImage::ImageRgba32F(buf) => first_channel(buf),
        other => bail!("Unsupported pixel layout {:?}", other.color()),
    };

    let rows = image.height() as usize;
    let cols = image.width() as usize;
    Ok(Heightfield::from_vec(rows, cols, samples)?)
}

fn first_channel<P>(buf: &ImageBuffer<P, Vec<P::Subpixel>>) -> Vec<f64>
where
    P: Pixel,
    P::Subpixel: Into<f64>,
{
    buf.pixels().map(|p| p.channels()[0].into()).collect()
}
