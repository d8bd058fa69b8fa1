//! Local file boundary: extension allow-list, reading and writing images.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image_wire::{ImageBuffer, WireError, decode_image, encode_image};

/// File extensions accepted as input (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Errors at the local file boundary.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Cannot find file {}", .0.display())]
    MissingInput(PathBuf),

    #[error("{} not supported, must be of extension {:?}", .0.display(), ALLOWED_EXTENSIONS)]
    UnsupportedExtension(PathBuf),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Reject paths whose extension is not in [`ALLOWED_EXTENSIONS`].
pub fn check_extension(path: &Path) -> Result<(), FileError> {
    let allowed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if !allowed {
        return Err(FileError::UnsupportedExtension(path.to_path_buf()));
    }
    Ok(())
}

/// Check an input path before any processing.
pub fn check_input(path: &Path) -> Result<(), FileError> {
    check_extension(path)?;
    if !path.is_file() {
        return Err(FileError::MissingInput(path.to_path_buf()));
    }
    Ok(())
}

/// Read an image file into a wire buffer, as RGB or as grayscale.
pub fn read_image(path: &Path, color: bool) -> Result<ImageBuffer, FileError> {
    check_input(path)?;
    let img = image::open(path)?;
    let buffer = encode_image(&img, color);
    tracing::debug!(
        path = %path.display(),
        width = buffer.width,
        height = buffer.height,
        color,
        "Read image"
    );
    Ok(buffer)
}

/// Write a wire buffer to disk. The format follows the path's extension.
pub fn write_image(image: ImageBuffer, path: &Path) -> Result<(), FileError> {
    decode_image(image)?.save(path)?;
    Ok(())
}

/// `<input>_<suffix>.png`, next to the input.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(format!("_{suffix}.png"));
    PathBuf::from(name)
}
