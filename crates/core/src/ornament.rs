//! Shaded discs for pommels and butt caps.

use crate::color::Color;
use crate::context::RenderContext;
use crate::geometry::{normalize, Vector2};

/// A disc with a soft shadow toward the bottom-right and a highlight toward
/// the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscParams {
    pub center: Vector2,
    pub radius: f64,
    pub light: Color,
    pub dark: Color,
}

/// Draws a shaded disc. Non-positive radii draw nothing.
///
/// Rows are visited at `center.y - radius + k`, so a fractional centre or
/// radius lands on fractional rows that partially cover two pixel rows.
pub fn draw_disc(ctx: &mut RenderContext<'_>, params: &DiscParams) {
    let r = params.radius;
    if r <= 0.0 || !r.is_finite() {
        return;
    }
    let c = params.center;
    let shadow = c + normalize(Vector2::new(0.5, 1.0)) * r;
    let highlight = c + normalize(Vector2::new(-1.0, -1.0)) * (r * 0.7);

    let x_start = (c.x - r).floor().max(0.0) as i64;
    let x_end = (c.x + r).floor() as i64;
    for x in x_start..=x_end {
        let mut y = c.y - r;
        while y <= c.y + r {
            let p = Vector2::new(x as f64, y);
            if p.distance(c) <= r {
                let dark_amount = 1.0 - (0.8 * p.distance(shadow) / r).min(1.0);
                let light_amount = 1.0 - (p.distance(highlight) / r).min(1.0);
                let color = params
                    .light
                    .lerp(params.dark, dark_amount)
                    .lighten(light_amount);
                ctx.draw_pixel(p.x, p.y, color);
            }
            y += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn disc(center: Vector2, radius: f64) -> DiscParams {
        DiscParams {
            center,
            radius,
            light: Color::rgb(200.0, 200.0, 120.0),
            dark: Color::rgb(80.0, 80.0, 48.0),
        }
    }

    fn render(params: &DiscParams) -> Canvas {
        let mut canvas = Canvas::new(16, 16).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, 16, "t");
            draw_disc(&mut ctx, params);
        }
        canvas
    }

    #[test]
    fn zero_radius_draws_nothing() {
        let canvas = render(&disc(Vector2::new(8.0, 8.0), 0.0));
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn integer_disc_fills_its_pixels_opaquely() {
        let canvas = render(&disc(Vector2::new(8.0, 8.0), 3.0));
        assert_eq!(canvas.pixel(8, 8).unwrap()[3], 255);
        assert_eq!(canvas.pixel(5, 8).unwrap()[3], 255);
        assert_eq!(canvas.pixel(8, 11).unwrap()[3], 255);
        assert_eq!(canvas.pixel(11, 11).unwrap()[3], 0);
        assert_eq!(canvas.pixel(4, 8).unwrap()[3], 0);
    }

    #[test]
    fn highlight_side_is_brighter_than_shadow_side() {
        let canvas = render(&disc(Vector2::new(8.0, 8.0), 4.0));
        let top_left = canvas.pixel(6, 6).unwrap();
        let bottom_right = canvas.pixel(10, 10).unwrap();
        assert!(top_left[0] > bottom_right[0], "{top_left:?} vs {bottom_right:?}");
    }

    #[test]
    fn fractional_rows_give_partial_coverage() {
        let canvas = render(&disc(Vector2::new(4.0, 8.25), 0.5));
        // rows visited at 7.75 and 8.75, each straddling two pixel rows.
        let upper = canvas.pixel(4, 7).unwrap()[3];
        let lower = canvas.pixel(4, 9).unwrap()[3];
        assert!(upper > 0 && upper < 255, "upper alpha {upper}");
        assert!(lower > 0 && lower < 255, "lower alpha {lower}");
    }
}
