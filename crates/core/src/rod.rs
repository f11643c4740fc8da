//! Diagonal rods: grips, hafts and sockets.
//!
//! A rod runs from the bottom-left corner toward the top-right along the tile
//! diagonal, in half-diagonal steps. Each step draws a short run of pixels
//! perpendicular to the diagonal, darkening toward the far side, with a
//! periodic light/dark band along the length.

use std::f64::consts::PI;

use crate::color::Color;
use crate::context::RenderContext;

/// Rod parameters, in diagonal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodParams {
    pub start_diag: f64,
    pub length_diag: f64,
    pub radius: f64,
    /// Length of one light/dark band cycle.
    pub wavelength: f64,
    /// Extra radius at band peaks; 0 keeps the radius fixed.
    pub radius_wave: f64,
    pub light: Color,
    pub dark: Color,
}

/// Draws a rod into the tile.
pub fn draw_rod(ctx: &mut RenderContext<'_>, params: &RodParams) {
    let h = ctx.dimension() as f64;
    let mut l = 0.0_f64;
    while l < params.length_diag {
        let along = params.start_diag + l;
        let wave = (2.0 * PI * l / params.wavelength).cos().abs();
        let color = params.dark.lerp(params.light, wave);
        let radius = snap_half(params.radius + params.radius_wave * wave);

        let core_x = along.ceil();
        let core_y = (h - 1.0 - along).ceil();
        let (left, right) = offsets(radius, along.fract() != 0.0);
        for o in left..=right {
            let o = f64::from(o);
            let amount = if radius > 0.0 {
                (o + radius).max(0.0) / (radius * 4.0)
            } else {
                0.0
            };
            ctx.draw_pixel(core_x + o, core_y + o, color.darken(amount));
        }

        l += 0.5;
    }
}

/// Rounds to the nearest half pixel.
fn snap_half(r: f64) -> f64 {
    (r * 2.0).round() / 2.0
}

/// Perpendicular pixel offsets for one step.
///
/// Half steps sit between pixel diagonals and lose a pixel on the right
/// unless the radius is odd, so adjacent steps interlock without gaps.
fn offsets(radius: f64, half_step: bool) -> (i32, i32) {
    if half_step {
        let left = -(radius.ceil() as i32);
        let mut right = radius.floor() as i32;
        if radius % 2.0 == 0.0 {
            right -= 1;
        }
        (left, right)
    } else {
        (-(radius.floor() as i32), radius.floor() as i32)
    }
}
