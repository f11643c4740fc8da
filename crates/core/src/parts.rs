//! Weapon parts shared by the blade and spear assemblers.
//!
//! Each part switches the context to its own sub-stream, derives its
//! stylistic parameters from fresh draws, draws itself, and reports what the
//! next part needs to line up with it. Every part runs along (or across) the
//! tile diagonal from the bottom-left corner to the top-right.

use std::f64::consts::{PI, SQRT_2};

use crate::color::{Color, Hsv};
use crate::context::RenderContext;
use crate::field::{rasterize, FieldConfig};
use crate::geometry::{lerp_f64, Bounds, Vector2};
use crate::ornament::{draw_disc, DiscParams};
use crate::path::{
    crossguard_max_omega, trace_blade, trace_crossguard, BladePathParams, CrossguardPathParams,
};
use crate::rod::{draw_rod, RodParams};

/// Which way the tip taper length is skewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaperSkew {
    /// Mostly short tapers: sword points.
    Low,
    /// Mostly long tapers: leaf-shaped spear heads.
    High,
}

/// Blade (or spear head) options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeParams {
    /// Distance from the bottom-left corner to the base, in diagonal pixels.
    pub start_diag: f64,
    /// Base radius range at 32px, upper bound exclusive.
    pub start_radius: (i32, i32),
    pub taper: TaperSkew,
    pub jog_chance: f64,
    pub omega_chance: f64,
    /// HSV value range of the tip color.
    pub tip_value: (f64, f64),
}

impl BladeParams {
    /// Sword blade starting `start_diag` diagonal pixels from the corner.
    pub fn sword(start_diag: f64) -> Self {
        Self {
            start_diag,
            start_radius: (2, 4),
            taper: TaperSkew::Low,
            jog_chance: 0.04,
            omega_chance: 0.02,
            tip_value: (0.75, 1.0),
        }
    }

    /// Short, straight, leaf-tapered spear head.
    pub fn spear_head(start_diag: f64) -> Self {
        Self {
            start_diag,
            start_radius: (1, 3),
            taper: TaperSkew::High,
            jog_chance: 0.0,
            omega_chance: 0.01,
            tip_value: (0.6, 0.95),
        }
    }
}

/// Where a drawn blade begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeResult {
    pub start_diag: f64,
    /// Distance of the base from the left and bottom tile edges.
    pub start_ortho: f64,
    pub start_radius: f64,
}

/// Draws a blade from its base toward the top-right until it leaves the
/// tile interior.
pub fn draw_blade(ctx: &mut RenderContext<'_>, params: &BladeParams) -> BladeResult {
    ctx.checkpoint("blade");
    let dscale = ctx.dscale();
    let h = ctx.dimension() as f64;
    let interior = Bounds::tile(ctx.dimension()).inset(1.0);
    let rng = &mut ctx.rng;

    let taper_factor = match params.taper {
        TaperSkew::Low => rng.skew_low(),
        TaperSkew::High => rng.skew_high(),
    };
    let start_radius =
        (f64::from(rng.range(params.start_radius.0, params.start_radius.1)) * dscale).ceil();
    let cosine_amp = ((rng.skew_low() * 1.2 - 0.2).max(0.0) * 2.0 * dscale).ceil();
    let cosine_wavelength =
        (f64::from(rng.range(3 * cosine_amp.max(1.0) as i32, 12)) * dscale).ceil();
    let cosine_offset = rng.range_f64(0.0, 2.0 * PI);
    let wiggle_amp = (rng.next_f64() * 8.0 - 7.0).max(0.0) * PI / 4.0 * dscale;
    let wiggle_wavelength = (rng.range_f64(6.0, 18.0) * dscale).ceil();

    let start_ortho = (params.start_diag / SQRT_2).floor();
    let path = BladePathParams {
        start: Vector2::new(start_ortho, h - 1.0 - start_ortho),
        width_l: start_radius,
        width_r: start_radius + f64::from(rng.range(-1, 2)),
        width_cosine_amp: cosine_amp,
        width_cosine_wavelength: cosine_wavelength,
        width_cosine_offset: cosine_offset,
        wiggle_amp,
        wiggle_wavelength,
        jog_chance: params.jog_chance,
        jog_lead_in: (12.0 * dscale).ceil(),
        omega_chance: params.omega_chance,
        taper_factor,
        ..BladePathParams::default()
    };
    log::trace!(
        "blade: start_ortho {start_ortho} radius {start_radius} taper {taper_factor:.3} cosine {cosine_amp}/{cosine_wavelength}"
    );
    let points = trace_blade(&path, interior, rng);

    let hue = rng.range_f64(0.0, 360.0);
    let saturation = if rng.next_f64() < 0.3 {
        rng.skew_extreme() * 0.6
    } else {
        0.0
    };
    let value = rng.range_f64(params.tip_value.0, params.tip_value.1);
    let tip = Hsv::new(hue, saturation, value).to_rgb();
    let hilt = tip.darken(0.7).randomize(16, rng);

    rasterize(ctx, &[&points], &FieldConfig::edged(hilt, tip));

    BladeResult {
        start_diag: params.start_diag,
        start_ortho,
        start_radius,
    }
}

/// Crossguard (or spear lug) options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossguardParams {
    /// Distance from the bottom-left corner to the guard's centre, per axis.
    pub position_diag: f64,
    pub half_length: f64,
    /// Thickness range, skewed toward the upper bound.
    pub thickness: (f64, f64),
}

/// Colors of a drawn crossguard, reused for the pommel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossguardResult {
    pub light: Color,
    pub dark: Color,
}

/// Omega changes per arm are at least this many steps apart.
const CROSSGUARD_COOLDOWN_STEPS: usize = 2;

/// Draws a two-armed guard across the tile diagonal.
pub fn draw_crossguard(ctx: &mut RenderContext<'_>, params: &CrossguardParams) -> CrossguardResult {
    ctx.checkpoint("crossguard");
    let dimension = ctx.dimension();
    let rng = &mut ctx.rng;

    let hue = f64::from(rng.range(0, 360));
    let saturation = rng.skew_low() * 0.5;
    let light = Hsv::new(hue, saturation, rng.range_f64(0.7, 1.0)).to_rgb();
    let dark = light.darken(0.6);
    let symmetry = if rng.next_f64() < 0.3 { 0.0 } else { 1.0 };
    let thickness = rng.range_high_f64(params.thickness.0, params.thickness.1);
    let bottom_taper = rng.next_f64();
    let top_taper = lerp_f64(rng.next_f64(), bottom_taper, rng.skew_extreme());

    let path = CrossguardPathParams {
        origin: Vector2::new(
            params.position_diag,
            dimension as f64 - 1.0 - params.position_diag,
        ),
        half_length: params.half_length,
        thickness,
        top_taper,
        bottom_taper,
        omega_chance: 0.3,
        omega_amount: PI / 8.0,
        max_omega: crossguard_max_omega(thickness),
        cooldown_steps: CROSSGUARD_COOLDOWN_STEPS,
        symmetry,
        dimension,
    };
    log::trace!(
        "crossguard: half_length {:.2} thickness {thickness:.2} symmetry {symmetry}",
        params.half_length
    );
    let [a, b] = trace_crossguard(&path, rng);
    rasterize(ctx, &[&a, &b], &FieldConfig::banded(light, dark));

    CrossguardResult { light, dark }
}

/// Grip options, in diagonal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GripParams {
    pub start_diag: f64,
    pub length_diag: f64,
    /// Upper bound for the drawn radius.
    pub max_radius: Option<f64>,
}

/// Draws a banded grip along the diagonal.
pub fn draw_grip(ctx: &mut RenderContext<'_>, params: &GripParams) {
    ctx.checkpoint("grip");
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;

    let mut radius = 0.5 * (f64::from(rng.range(0, 2)) * dscale).ceil();
    if let Some(max) = params.max_radius {
        radius = radius.min(max);
    }
    let wavelength = (f64::from(rng.range(3, 6)) * dscale).ceil().max(2.0);
    let light = Hsv::new(
        f64::from(rng.range(0, 360)),
        rng.next_f64(),
        rng.range_f64(0.7, 1.0),
    )
    .to_rgb();
    let dark = light.darken(1.0);

    log::trace!("grip: radius {radius} wavelength {wavelength}");
    draw_rod(
        ctx,
        &RodParams {
            start_diag: params.start_diag,
            length_diag: params.length_diag,
            radius,
            wavelength,
            radius_wave: 0.0,
            light,
            dark,
        },
    );
}

/// Pommel options. Missing colors are drawn fresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PommelParams {
    pub center: Vector2,
    pub radius: f64,
    pub light: Option<Color>,
    pub dark: Option<Color>,
}

/// Draws a round pommel.
pub fn draw_pommel(ctx: &mut RenderContext<'_>, params: &PommelParams) {
    ctx.checkpoint("pommel");
    let rng = &mut ctx.rng;
    let light = match params.light {
        Some(c) => c,
        None => {
            let hue = f64::from(rng.range(0, 360));
            let saturation = rng.skew_low() * 0.5;
            Hsv::new(hue, saturation, rng.range_f64(0.7, 1.0)).to_rgb()
        }
    };
    let dark = params.dark.unwrap_or_else(|| light.darken(0.6));
    draw_disc(
        ctx,
        &DiscParams {
            center: params.center,
            radius: params.radius,
            light,
            dark,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelSink};

    fn opaque_count(canvas: &Canvas) -> usize {
        canvas.read_alpha(0, 0, canvas.width(), canvas.height()).iter().filter(|&&a| a > 0).count()
    }

    fn with_ctx<T>(dimension: usize, seed: &str, f: impl FnOnce(&mut RenderContext<'_>) -> T) -> (Canvas, T) {
        let mut canvas = Canvas::new(dimension, dimension).unwrap();
        let out = {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, dimension, seed);
            f(&mut ctx)
        };
        (canvas, out)
    }

    #[test]
    fn blade_reports_its_base() {
        let (canvas, result) = with_ctx(32, "blade", |ctx| draw_blade(ctx, &BladeParams::sword(12.0)));
        assert_eq!(result.start_diag, 12.0);
        assert_eq!(result.start_ortho, 8.0);
        assert!((2.0..=3.0).contains(&result.start_radius));
        assert!(opaque_count(&canvas) > 20);
    }

    #[test]
    fn blade_radius_scales_with_dimension() {
        let (_, result) = with_ctx(64, "blade-64", |ctx| draw_blade(ctx, &BladeParams::sword(24.0)));
        assert!((4.0..=6.0).contains(&result.start_radius));
    }

    #[test]
    fn blade_is_independent_of_earlier_draws() {
        let (a, _) = with_ctx(32, "indep", |ctx| draw_blade(ctx, &BladeParams::sword(10.0)));
        let (b, _) = with_ctx(32, "indep", |ctx| {
            for _ in 0..7 {
                ctx.rng.next_f64();
            }
            draw_blade(ctx, &BladeParams::sword(10.0))
        });
        assert_eq!(a, b);
    }

    #[test]
    fn spear_head_is_drawn() {
        let (canvas, result) = with_ctx(32, "spear", |ctx| draw_blade(ctx, &BladeParams::spear_head(30.0)));
        assert!((1.0..=2.0).contains(&result.start_radius));
        assert!(opaque_count(&canvas) > 0);
    }

    #[test]
    fn crossguard_draws_around_its_origin() {
        let (canvas, colors) = with_ctx(32, "guard", |ctx| {
            draw_crossguard(
                ctx,
                &CrossguardParams {
                    position_diag: 10.0,
                    half_length: 5.0,
                    thickness: (1.0, 2.5),
                },
            )
        });
        assert_eq!(canvas.pixel(10, 21).map(|px| px[3]), Some(255));
        assert_eq!(colors.dark, colors.light.darken(0.6));
    }

    #[test]
    fn grip_respects_max_radius() {
        let (canvas, _) = with_ctx(32, "grip", |ctx| {
            draw_grip(
                ctx,
                &GripParams {
                    start_diag: 2.0,
                    length_diag: 8.0,
                    max_radius: Some(0.0),
                },
            )
        });
        // zero radius: one pixel per whole diagonal step.
        assert_eq!(opaque_count(&canvas), 8);
    }

    #[test]
    fn pommel_uses_given_colors() {
        let light = Color::rgb(250.0, 0.0, 0.0);
        let (canvas, _) = with_ctx(32, "pommel", |ctx| {
            draw_pommel(
                ctx,
                &PommelParams {
                    center: Vector2::new(4.0, 27.0),
                    radius: 2.0,
                    light: Some(light),
                    dark: Some(light),
                },
            )
        });
        let px = canvas.pixel(4, 27).unwrap();
        assert_eq!(px[3], 255);
        assert!(px[0] >= 250 && px[1] == px[2], "{px:?}");
    }

    #[test]
    fn pommel_without_colors_draws_fresh_ones() {
        let (canvas, _) = with_ctx(32, "pommel-fresh", |ctx| {
            draw_pommel(
                ctx,
                &PommelParams {
                    center: Vector2::new(5.0, 26.0),
                    radius: 3.0,
                    light: None,
                    dark: None,
                },
            )
        });
        assert!(opaque_count(&canvas) > 10);
    }
}
