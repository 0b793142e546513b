use image::{DynamicImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::error::SheetError;

/// `{prefix}_{NN}.png`, where `number` is 1-based.
pub fn frame_filename(prefix: &str, number: usize) -> String {
    format!("{}_{:02}.png", prefix, number)
}

/// Writes one frame into `output_dir`, replacing any file already there.
///
/// The PNG is encoded in memory first, so a frame the encoder rejects leaves
/// nothing on disk.
pub fn write_frame(
    image: &DynamicImage,
    output_dir: &Path,
    prefix: &str,
    number: usize,
) -> Result<PathBuf, SheetError> {
    let path = output_dir.join(frame_filename(prefix, number));
    let write_err = |source| SheetError::Write {
        path: path.clone(),
        source,
    };

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(write_err)?;
    fs::write(&path, png).map_err(|e| write_err(e.into()))?;
    Ok(path)
}
