//! Pixel sink abstraction and the in-memory RGBA canvas.
//!
//! [`PixelSink`] is the only surface the icon engine writes to. It mirrors the
//! handful of 2D-canvas primitives the shape renderers need: replace a pixel,
//! composite a (possibly fractional) rectangle, clear a region, and read
//! pixels back. [`Canvas`] is the straight-alpha RGBA8 implementation
//! used for PNG output and tests.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::IconError;

/// Compositing mode for [`PixelSink::blend_rect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over alpha compositing.
    #[default]
    Normal,
    /// W3C soft-light blend, then source-over.
    SoftLight,
}

/// Axis-aligned rectangle with f64 coordinates.
///
/// Fractional edges are honoured by the canvas as partial pixel coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A single pixel at `(x, y)`.
    pub fn pixel(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0, 1.0)
    }

    /// Flips negative widths/heights so that `w, h >= 0`.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }

    /// Translates the rectangle by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Intersection of two normalized rectangles, or `None` if they don't overlap.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();
        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = (a.x + a.w).min(b.x + b.w);
        let y1 = (a.y + a.h).min(b.y + b.h);
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// An addressable 2D RGBA surface.
///
/// Coordinates are in sink space. Writes outside the surface are ignored and
/// reads outside it return zero alpha.
pub trait PixelSink {
    /// Surface width in pixels.
    fn width(&self) -> usize;

    /// Surface height in pixels.
    fn height(&self) -> usize;

    /// Replaces the pixel at `(x, y)` without blending.
    fn set_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]);

    /// Composites `color` over `rect` using `mode`.
    fn blend_rect(&mut self, rect: Rect, color: Color, mode: BlendMode);

    /// Sets every pixel of the integer region to transparent black.
    fn clear_rect(&mut self, x: i64, y: i64, w: usize, h: usize);

    /// Returns the RGBA values of the integer region, row-major.
    /// Pixels outside the surface read as transparent black.
    fn read_rgba(&self, x: i64, y: i64, w: usize, h: usize) -> Vec<[u8; 4]>;

    /// Returns the alpha channel of the integer region, row-major.
    fn read_alpha(&self, x: i64, y: i64, w: usize, h: usize) -> Vec<u8> {
        self.read_rgba(x, y, w, h).iter().map(|px| px[3]).collect()
    }

    /// Source-over fill of `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.blend_rect(rect, color, BlendMode::Normal);
    }
}

/// Straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Canvas {
    /// Creates a transparent canvas.
    ///
    /// Returns `IconError::InvalidDimensions` if width or height is zero, or
    /// if the RGBA byte count would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, IconError> {
        if width == 0 || height == 0 {
            return Err(IconError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(IconError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the canvas and returns the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The RGBA value at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copies the `w × h` region at `(x, y)` into a new canvas.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Canvas, IconError> {
        let mut out = Canvas::new(w, h)?;
        for row in 0..h {
            for col in 0..w {
                if let Some(px) = self.pixel(x + col, y + row) {
                    out.set_pixel(col as i64, row as i64, px);
                }
            }
        }
        Ok(out)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 4)
    }

    /// Composites one pixel; `src_alpha` already includes coverage.
    fn composite(&mut self, idx: usize, src: [f64; 3], src_alpha: f64, mode: BlendMode) {
        let dst_alpha = f64::from(self.data[idx + 3]) / 255.0;
        let dst = [
            f64::from(self.data[idx]) / 255.0,
            f64::from(self.data[idx + 1]) / 255.0,
            f64::from(self.data[idx + 2]) / 255.0,
        ];

        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
        if out_alpha <= 0.0 {
            return;
        }

        for c in 0..3 {
            let cs = match mode {
                BlendMode::Normal => src[c],
                BlendMode::SoftLight => {
                    (1.0 - dst_alpha) * src[c] + dst_alpha * soft_light(dst[c], src[c])
                }
            };
            let co = (cs * src_alpha + dst[c] * dst_alpha * (1.0 - src_alpha)) / out_alpha;
            self.data[idx + c] = (co * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        self.data[idx + 3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

/// W3C soft-light blend of backdrop `cb` with source `cs`, both in [0, 1].
fn soft_light(cb: f64, cs: f64) -> f64 {
    if cs <= 0.5 {
        cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
    } else {
        let d = if cb <= 0.25 {
            ((16.0 * cb - 12.0) * cb + 4.0) * cb
        } else {
            cb.sqrt()
        };
        cb + (2.0 * cs - 1.0) * (d - cb)
    }
}

impl PixelSink for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&rgba);
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, mode: BlendMode) {
        let surface = Rect::new(0.0, 0.0, self.width as f64, self.height as f64);
        let Some(r) = rect.intersect(surface) else {
            return;
        };

        // Channels are floored before compositing, like a CSS color string.
        let [sr, sg, sb, _] = color.to_rgba8();
        let src = [
            f64::from(sr) / 255.0,
            f64::from(sg) / 255.0,
            f64::from(sb) / 255.0,
        ];
        let alpha = color.alpha().clamp(0.0, 1.0);

        let x0 = r.x.floor() as i64;
        let y0 = r.y.floor() as i64;
        let x1 = (r.x + r.w).ceil() as i64;
        let y1 = (r.y + r.h).ceil() as i64;
        for py in y0..y1 {
            let cov_y = ((py + 1) as f64).min(r.y + r.h) - (py as f64).max(r.y);
            for px in x0..x1 {
                let cov_x = ((px + 1) as f64).min(r.x + r.w) - (px as f64).max(r.x);
                let coverage = (cov_x * cov_y).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                if let Some(idx) = self.index(px, py) {
                    self.composite(idx, src, alpha * coverage, mode);
                }
            }
        }
    }

    fn clear_rect(&mut self, x: i64, y: i64, w: usize, h: usize) {
        for py in y..y + h as i64 {
            for px in x..x + w as i64 {
                self.set_pixel(px, py, [0, 0, 0, 0]);
            }
        }
    }

    fn read_rgba(&self, x: i64, y: i64, w: usize, h: usize) -> Vec<[u8; 4]> {
        let mut out = Vec::with_capacity(w * h);
        for py in y..y + h as i64 {
            for px in x..x + w as i64 {
                out.push(self.index(px, py).map_or([0; 4], |i| {
                    [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
                }));
            }
        }
        out
    }
}
