//! Per-tile render context.
//!
//! A [`RenderContext`] bundles everything a shape renderer may touch: the
//! pixel sink, the tile's origin and dimension, and the active random stream.
//! Renderers work in tile-local coordinates; the context translates every
//! write to the tile origin and clips it to the tile square, so tiles sharing
//! one sink never overlap.

use crate::canvas::{BlendMode, PixelSink, Rect};
use crate::color::Color;
use crate::geometry::Bounds;
use crate::prng::RandomStream;

/// Reference dimension all stylistic constants are tuned for.
pub const REFERENCE_DIMENSION: f64 = 32.0;

/// Drawing state for one tile.
pub struct RenderContext<'a> {
    sink: &'a mut dyn PixelSink,
    origin_x: i64,
    origin_y: i64,
    dimension: usize,
    /// The active stream. Replaced by [`checkpoint`](Self::checkpoint).
    pub rng: RandomStream,
}

impl<'a> RenderContext<'a> {
    /// Creates a context for the tile at `(origin_x, origin_y)`, seeding its
    /// stream from `seed`.
    pub fn new(
        sink: &'a mut dyn PixelSink,
        origin_x: i64,
        origin_y: i64,
        dimension: usize,
        seed: &str,
    ) -> Self {
        Self {
            sink,
            origin_x,
            origin_y,
            dimension,
            rng: RandomStream::from_seed(seed),
        }
    }

    /// Tile edge length in pixels.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scale of this tile relative to the 32-pixel reference.
    pub fn dscale(&self) -> f64 {
        self.dimension as f64 / REFERENCE_DIMENSION
    }

    /// Bounds of the whole tile in local coordinates.
    pub fn bounds(&self) -> Bounds {
        Bounds::tile(self.dimension)
    }

    /// Switches to the sub-stream for `purpose`.
    ///
    /// Called at the start of each major shape step so that changing how many
    /// values one step draws never shifts the randomness of the next one.
    pub fn checkpoint(&mut self, purpose: &str) {
        self.rng = self.rng.derive_sub_stream(purpose);
    }

    fn tile_rect(&self) -> Rect {
        let d = self.dimension as f64;
        Rect::new(self.origin_x as f64, self.origin_y as f64, d, d)
    }

    /// Clears the tile to transparent.
    pub fn clear(&mut self) {
        self.sink.clear_rect(
            self.origin_x,
            self.origin_y,
            self.dimension,
            self.dimension,
        );
    }

    /// Composites `color` over a tile-local rectangle.
    pub fn blend_rect(&mut self, rect: Rect, color: Color, mode: BlendMode) {
        let global = rect.offset(self.origin_x as f64, self.origin_y as f64);
        if let Some(clipped) = global.intersect(self.tile_rect()) {
            self.sink.blend_rect(clipped, color, mode);
        }
    }

    /// Source-over fill of a tile-local rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.blend_rect(rect, color, BlendMode::Normal);
    }

    /// Source-over fill of one pixel-sized square at a tile-local position.
    ///
    /// Fractional positions cover neighbouring pixels partially.
    pub fn draw_pixel(&mut self, x: f64, y: f64, color: Color) {
        self.fill_rect(Rect::pixel(x, y), color);
    }

    /// Replaces the pixel at a tile-local position.
    pub fn set_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        let d = self.dimension as i64;
        if x < 0 || y < 0 || x >= d || y >= d {
            return;
        }
        self.sink.set_pixel(self.origin_x + x, self.origin_y + y, rgba);
    }

    /// RGBA values of the whole tile, row-major.
    pub fn read_rgba(&self) -> Vec<[u8; 4]> {
        self.sink.read_rgba(
            self.origin_x,
            self.origin_y,
            self.dimension,
            self.dimension,
        )
    }
}
