use crate::error::ExportError;
use crate::surface::RasterSurface;
use image::codecs::jpeg::JpegEncoder;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const JPEG_QUALITY: u8 = 90;

/// Encode the surface as JPEG bytes.
///
/// The surface background is opaque, so alpha is dropped and the pixels
/// are encoded as plain RGB.
pub fn encode_jpeg(surface: &RasterSurface) -> Result<Vec<u8>, ExportError> {
    let (width, height) = surface.size();
    let mut rgb = Vec::with_capacity(width * height * 3);
    for pixel in surface.pixels() {
        rgb.extend_from_slice(&[pixel.r(), pixel.g(), pixel.b()]);
    }

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder.encode(
        &rgb,
        width as u32,
        height as u32,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Encode the surface and write it to `dir` under a timestamped name,
/// returning the path of the written file.
pub fn save_jpeg(surface: &RasterSurface, dir: &Path) -> Result<PathBuf, ExportError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let path = unique_path(dir, millis);
    let bytes = encode_jpeg(surface)?;
    std::fs::write(&path, bytes)?;
    log::info!("saved drawing to {}", path.display());
    Ok(path)
}

/// Two saves can land in the same millisecond; suffix a counter rather
/// than overwrite the earlier file.
fn unique_path(dir: &Path, millis: u128) -> PathBuf {
    let mut path = dir.join(format!("{millis}.jpg"));
    let mut counter = 1u32;
    while path.exists() {
        path = dir.join(format!("{millis}-{counter}.jpg"));
        counter += 1;
    }
    path
}
