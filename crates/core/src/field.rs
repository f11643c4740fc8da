//! Distance-field rasterizer for traced paths.
//!
//! Every pixel of the tile is matched against every [`CorePoint`] of every
//! arm; the winning point decides whether the pixel lies inside the shape and
//! how it is shaded. The search is brute force, O(w·h·n), which is cheap at
//! icon sizes.

use crate::color::Color;
use crate::context::RenderContext;
use crate::geometry::Vector2;
use crate::path::CorePoint;

/// How the nearest core point is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Minimise `distance / width_on_side`. A zero width never wins.
    WidthNormalized,
    /// Minimise plain Euclidean distance.
    Euclidean,
}

/// How a filled pixel is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Blade look: a base gradient along the path, the far half darkened and
    /// a lighter rim near the edge.
    Edged {
        /// Color at `normalized_dist = 0`.
        start: Color,
        /// Color at `normalized_dist = 1`.
        end: Color,
        edge_width: f64,
        /// Widths at or below this get no rim.
        edge_exclude_width: f64,
        edge_lighten: f64,
        far_darken: f64,
    },
    /// Crossguard look: a gradient from the top edge (light) to the bottom
    /// edge (dark) across the path.
    Banded { light: Color, dark: Color },
}

/// Rasterizer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub metric: Metric,
    /// Skip pixels behind the first point of the first arm.
    pub cull_behind_start: bool,
    /// Pixels within this distance of their core point are always filled.
    pub min_width: f64,
    pub shading: Shading,
}

impl FieldConfig {
    /// Width-normalized, culled, rimmed blade fill.
    pub fn edged(start: Color, end: Color) -> Self {
        Self {
            metric: Metric::WidthNormalized,
            cull_behind_start: true,
            min_width: 1.0,
            shading: Shading::Edged {
                start,
                end,
                edge_width: 1.0,
                edge_exclude_width: 1.0,
                edge_lighten: 0.5,
                far_darken: 0.5,
            },
        }
    }

    /// Euclidean two-tone crossguard fill.
    pub fn banded(light: Color, dark: Color) -> Self {
        Self {
            metric: Metric::Euclidean,
            cull_behind_start: false,
            min_width: 0.0,
            shading: Shading::Banded { light, dark },
        }
    }
}

/// Rasterizes `arms` into the tile held by `ctx`.
///
/// Returns the number of pixels written.
pub fn rasterize(ctx: &mut RenderContext<'_>, arms: &[&[CorePoint]], config: &FieldConfig) -> usize {
    let Some(first) = arms.iter().find_map(|arm| arm.first()).copied() else {
        return 0;
    };
    let d = ctx.dimension();
    let mut written = 0;

    for x in 0..d {
        for y in 0..d {
            let pixel = Vector2::new(x as f64, y as f64);
            if config.cull_behind_start && first.forward.dot(pixel - first.pos) < 0.0 {
                continue;
            }
            let Some(best) = nearest(arms, pixel, config.metric) else {
                continue;
            };

            let offset = pixel - best.pos;
            let dot = best.normal.dot(offset);
            let width = best.side_width(offset);
            let distance = offset.length();
            if !(distance <= width || distance <= config.min_width) {
                continue;
            }

            let color = match config.shading {
                Shading::Edged {
                    start,
                    end,
                    edge_width,
                    edge_exclude_width,
                    edge_lighten,
                    far_darken,
                } => {
                    let base = start.lerp(end, best.normalized_dist);
                    if best.pos == pixel || width <= edge_exclude_width {
                        base
                    } else {
                        let non_edge = if dot > 0.0 { base.darken(far_darken) } else { base };
                        let amount = (distance - (width - edge_width)) / edge_width;
                        let amount = 1.0 - (1.0 - amount) * (1.0 - amount);
                        non_edge.lerp(base.lighten(edge_lighten), amount)
                    }
                }
                Shading::Banded { light, dark } => {
                    let total = best.width_l + best.width_r;
                    if total <= 0.0 {
                        continue;
                    }
                    let from_top = if dot < 0.0 {
                        best.width_r + distance
                    } else {
                        best.width_r - distance
                    };
                    light.lerp(dark, from_top / total)
                }
            };

            ctx.draw_pixel(pixel.x, pixel.y, color);
            written += 1;
        }
    }

    written
}

fn nearest(arms: &[&[CorePoint]], pixel: Vector2, metric: Metric) -> Option<CorePoint> {
    let mut best: Option<CorePoint> = None;
    let mut best_score = f64::INFINITY;
    for point in arms.iter().flat_map(|arm| arm.iter()) {
        let offset = pixel - point.pos;
        let score = match metric {
            Metric::WidthNormalized => {
                let width = point.side_width(offset);
                if width > 0.0 {
                    offset.length() / width
                } else {
                    f64::INFINITY
                }
            }
            Metric::Euclidean => offset.length_squared(),
        };
        if score < best_score {
            best_score = score;
            best = Some(*point);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn point(x: f64, y: f64, width: f64, nd: f64) -> CorePoint {
        CorePoint {
            pos: Vector2::new(x, y),
            width_l: width,
            width_r: width,
            normal: Vector2::new(0.0, -1.0),
            forward: Vector2::X,
            dist: nd,
            normalized_dist: nd,
        }
    }

    fn horizontal(width: f64) -> Vec<CorePoint> {
        (2..14).map(|x| point(f64::from(x), 8.0, width, f64::from(x - 2) / 12.0)).collect()
    }

    fn gray() -> Color {
        Color::rgb(100.0, 100.0, 100.0)
    }

    #[test]
    fn empty_arms_draw_nothing() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
        assert_eq!(rasterize(&mut ctx, &[], &FieldConfig::edged(gray(), gray())), 0);
        assert_eq!(rasterize(&mut ctx, &[&[]], &FieldConfig::edged(gray(), gray())), 0);
    }

    #[test]
    fn edged_fill_covers_band_around_the_core() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let arm = horizontal(2.0);
            rasterize(&mut ctx, &[&arm], &FieldConfig::edged(gray(), gray()));
        }
        for y in 6..=10 {
            assert_eq!(canvas.pixel(8, y).unwrap()[3], 255, "row {y}");
        }
        assert_eq!(canvas.pixel(8, 5).unwrap()[3], 0);
        assert_eq!(canvas.pixel(8, 11).unwrap()[3], 0);
    }

    #[test]
    fn culling_skips_pixels_behind_the_start() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let arm = horizontal(2.0);
            rasterize(&mut ctx, &[&arm], &FieldConfig::edged(gray(), gray()));
        }
        assert_eq!(canvas.pixel(1, 8).unwrap()[3], 0);
        assert_eq!(canvas.pixel(2, 8).unwrap()[3], 255);
    }

    #[test]
    fn core_pixels_keep_the_base_gradient() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let start = Color::rgb(0.0, 0.0, 0.0);
        let end = Color::rgb(240.0, 240.0, 240.0);
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let arm = horizontal(3.0);
            rasterize(&mut ctx, &[&arm], &FieldConfig::edged(start, end));
        }
        // x = 8 is point 6 of 12: normalized_dist = 0.5.
        assert_eq!(canvas.pixel(8, 8), Some([120, 120, 120, 255]));
    }

    #[test]
    fn far_side_is_darker_than_near_side() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let arm = horizontal(3.0);
            rasterize(&mut ctx, &[&arm], &FieldConfig::edged(gray(), gray()));
        }
        // normal points up (-y): above the core is the far side.
        let far = canvas.pixel(8, 7).unwrap();
        let near = canvas.pixel(8, 9).unwrap();
        assert_eq!(far, [50, 50, 50, 255]);
        assert_eq!(near, [100, 100, 100, 255]);
    }

    #[test]
    fn zero_width_points_never_win_the_normalized_search() {
        let mut arm = horizontal(2.0);
        arm.push(point(8.0, 12.0, 0.0, 1.0));
        let best = nearest(&[&arm], Vector2::new(8.0, 12.0), Metric::WidthNormalized).unwrap();
        assert_ne!(best.pos, Vector2::new(8.0, 12.0));
    }

    #[test]
    fn banded_fill_runs_light_to_dark_across() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let light = Color::rgb(200.0, 200.0, 200.0);
        let dark = Color::rgb(0.0, 0.0, 0.0);
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let arm = horizontal(2.0);
            rasterize(&mut ctx, &[&arm], &FieldConfig::banded(light, dark));
        }
        // normal points up, so the top row is the light side.
        let top = canvas.pixel(8, 6).unwrap();
        let mid = canvas.pixel(8, 8).unwrap();
        let bottom = canvas.pixel(8, 10).unwrap();
        assert_eq!(top, [200, 200, 200, 255]);
        assert_eq!(mid, [100, 100, 100, 255]);
        assert_eq!(bottom, [0, 0, 0, 255]);
    }

    #[test]
    fn banded_skips_points_with_no_width() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        let written = {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 8, "t");
            let arm = [point(3.0, 3.0, 0.0, 0.0)];
            rasterize(&mut ctx, &[&arm], &FieldConfig::banded(gray(), gray()))
        };
        assert_eq!(written, 0);
    }

    #[test]
    fn two_arms_are_searched_together() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            let a = [point(3.0, 3.0, 1.0, 0.0)];
            let b = [point(12.0, 12.0, 1.0, 0.0)];
            rasterize(&mut ctx, &[&a, &b], &FieldConfig::banded(gray(), gray()));
        }
        assert_eq!(canvas.pixel(3, 3).unwrap()[3], 255);
        assert_eq!(canvas.pixel(12, 12).unwrap()[3], 255);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn thin_paths_still_fill_their_core_pixels(
                width in 0.05_f64..1.0,
                y in 2_u32..14,
            ) {
                let mut canvas = Canvas::new(16, 16).unwrap();
                {
                    let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "p");
                    let arm: Vec<CorePoint> = (2..14)
                        .map(|x| point(f64::from(x), f64::from(y), width, 0.0))
                        .collect();
                    rasterize(&mut ctx, &[&arm], &FieldConfig::edged(gray(), gray()));
                }
                for x in 2..14 {
                    prop_assert_eq!(canvas.pixel(x, y as usize).unwrap()[3], 255);
                }
            }
        }
    }
}
