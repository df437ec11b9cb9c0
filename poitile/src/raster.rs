//! Tile raster decoding and persistence.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

/// Errors from reading or writing tile rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Downloaded bytes could not be decoded as an image.
    #[error("Failed to decode tile image: {0}")]
    Decode(#[source] image::ImageError),

    /// Image file could not be opened or decoded.
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image file could not be written.
    #[error("Failed to save image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decodes an encoded tile (PNG, JPEG, ...) into an RGBA raster.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, RasterError> {
    let image = image::load_from_memory(bytes).map_err(RasterError::Decode)?;
    Ok(image.to_rgba8())
}

/// Loads an image file as an RGBA raster.
pub fn load(path: impl AsRef<Path>) -> Result<RgbaImage, RasterError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| RasterError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Saves a raster; the format follows the file extension.
pub fn save(image: &RgbaImage, path: impl AsRef<Path>) -> Result<(), RasterError> {
    let path = path.as_ref();
    image.save(path).map_err(|source| RasterError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Image saved");
    Ok(())
}

/// Encodes a raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|source| RasterError::Save {
            path: PathBuf::from("<memory>"),
            source,
        })?;
    Ok(bytes)
}
