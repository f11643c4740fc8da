//! Nearest-neighbour upscaling of a rendered [`Canvas`] to an RGBA8 buffer.
//!
//! Always available (no feature gate) so callers that hand pixels to another
//! image library share the conversion used by the `png` snapshot path.

use icon_machine_core::canvas::{Canvas, PixelSink};

/// Returns the canvas as RGBA8 bytes with every pixel repeated into a
/// `scale × scale` block. A scale of 0 is treated as 1.
///
/// The buffer length is `width · scale · height · scale · 4`.
pub fn canvas_to_rgba(canvas: &Canvas, scale: usize) -> Vec<u8> {
    let scale = scale.max(1);
    if scale == 1 {
        return canvas.data().to_vec();
    }
    let width = canvas.width();
    let row_bytes = width * 4;
    let mut out = Vec::with_capacity(canvas.data().len() * scale * scale);
    for row in canvas.data().chunks_exact(row_bytes) {
        let mut scaled_row = Vec::with_capacity(row_bytes * scale);
        for px in row.chunks_exact(4) {
            for _ in 0..scale {
                scaled_row.extend_from_slice(px);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&scaled_row);
        }
    }
    out
}
