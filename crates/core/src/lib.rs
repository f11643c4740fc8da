#![deny(unsafe_code)]
//! Core types and shape engines for the icon-machine procedural icon system.
//!
//! Provides the seeded [`RandomStream`], vector and color math, the
//! [`PixelSink`] abstraction with its in-memory [`Canvas`], the per-tile
//! [`RenderContext`], and the shape engines the icon classes are built from:
//! contour walks, traced paths, the distance-field rasterizer, diagonal rods,
//! shaded discs, the border pass and the shared weapon parts.

pub mod border;
pub mod canvas;
pub mod color;
pub mod context;
pub mod contour;
pub mod error;
pub mod field;
pub mod generator;
pub mod geometry;
pub mod ornament;
pub mod params;
pub mod parts;
pub mod path;
pub mod prng;
pub mod rod;
pub mod seed;

pub use canvas::{BlendMode, Canvas, PixelSink, Rect};
pub use color::{Color, Hsv};
pub use context::RenderContext;
pub use error::IconError;
pub use generator::IconGenerator;
pub use geometry::{Bounds, Vector2};
pub use prng::RandomStream;
pub use seed::{IconClass, IconSpec};
