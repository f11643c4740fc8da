//! PNG output of a rendered [`Canvas`].
//!
//! This module is feature-gated behind `png` (default on) so that library
//! users who only need raw pixels do not pull in the `image` crate. The pixel
//! upscaling itself lives in [`crate::pixel`] (always available).

use icon_machine_core::canvas::{Canvas, PixelSink};
use icon_machine_core::error::IconError;
use std::path::Path;

use crate::pixel::canvas_to_rgba;

/// Writes a canvas as a PNG image, each pixel scaled to a `scale × scale`
/// block.
///
/// Returns `IconError::Encode` if the scaled image does not fit a PNG or the
/// encoder rejects it, and `IconError::Io` if the file cannot be written.
pub fn write_png(canvas: &Canvas, scale: usize, path: &Path) -> Result<(), IconError> {
    let scale = scale.max(1);
    let scaled = |n: usize| {
        n.checked_mul(scale)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| IconError::Encode(format!("{n}px at scale {scale} exceeds the PNG size limit")))
    };
    let w = scaled(canvas.width())?;
    let h = scaled(canvas.height())?;
    let rgba = canvas_to_rgba(canvas, scale);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| IconError::Encode("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| match e {
        image::ImageError::IoError(e) => IconError::Io(format!("{}: {e}", path.display())),
        other => IconError::Encode(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use icon_machine_core::IconSpec;

    #[test]
    fn write_png_round_trip() {
        let canvas = render(&IconSpec::new("png")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");

        write_png(&canvas, 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        let [x, y] = [15 * 2, 28 * 2];
        assert_eq!(img.get_pixel(x, y).0[3], 255);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let canvas = Canvas::new(8, 8).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("icon.png");
        assert!(matches!(write_png(&canvas, 1, &path), Err(IconError::Io(_))));
    }

    #[test]
    fn oversized_scale_is_encode_error() {
        let canvas = Canvas::new(8, 8).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        let result = write_png(&canvas, usize::MAX / 4, &path);
        assert!(matches!(result, Err(IconError::Encode(_))));
        assert!(!path.exists());
    }
}
