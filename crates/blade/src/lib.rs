#![deny(unsafe_code)]
//! Sword icons.
//!
//! A sword lies along the tile diagonal with its pommel in the bottom-left
//! corner and its tip toward the top-right. Parts are drawn bottom-up so each
//! covers the joint of the one before: blade, grip, crossguard, pommel.

use std::f64::consts::SQRT_2;

use icon_machine_core::border::add_border;
use icon_machine_core::context::RenderContext;
use icon_machine_core::geometry::Vector2;
use icon_machine_core::params::{param_bool, param_unit};
use icon_machine_core::parts::{
    draw_blade, draw_crossguard, draw_grip, draw_pommel, BladeParams, CrossguardParams,
    GripParams, PommelParams,
};
use icon_machine_core::IconGenerator;
use serde_json::{json, Value};

const DEFAULT_JOG_CHANCE: f64 = 0.04;
const DEFAULT_OMEGA_CHANCE: f64 = 0.02;

/// Crossguard thickness range; draws are skewed toward the upper bound.
const GUARD_THICKNESS: (f64, f64) = (1.0, 2.5);

/// Tunable sword options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeStyle {
    /// Per-step chance of a sharp kink in the blade.
    pub jog_chance: f64,
    /// Per-step chance of the blade starting to curve.
    pub omega_chance: f64,
    /// Draw the pommel disc.
    pub pommel: bool,
    /// Paint the pommel in the crossguard colors instead of its own.
    pub matching_pommel: bool,
}

impl Default for BladeStyle {
    fn default() -> Self {
        Self {
            jog_chance: DEFAULT_JOG_CHANCE,
            omega_chance: DEFAULT_OMEGA_CHANCE,
            pommel: true,
            matching_pommel: true,
        }
    }
}

impl BladeStyle {
    /// Extracts a style from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            jog_chance: param_unit(params, "jog_chance", DEFAULT_JOG_CHANCE),
            omega_chance: param_unit(params, "omega_chance", DEFAULT_OMEGA_CHANCE),
            pommel: param_bool(params, "pommel", true),
            matching_pommel: param_bool(params, "matching_pommel", true),
        }
    }
}

/// Sizes of the sword parts, in pixels per axis unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    pommel_length: f64,
    hilt_length: f64,
    guard_width: f64,
    /// Skew-low draw that widens the crossguard beyond the blade.
    guard_spread: f64,
}

impl Layout {
    /// Diagonal distance from the corner to the blade base.
    fn blade_start_diag(&self) -> f64 {
        self.pommel_length + self.hilt_length + self.guard_width
    }
}

/// Sword icon generator.
#[derive(Debug, Clone, Default)]
pub struct Blade {
    style: BladeStyle,
}

impl Blade {
    pub fn new(style: BladeStyle) -> Self {
        Self { style }
    }

    /// Creates a sword generator from a JSON style object.
    pub fn from_json(params: &Value) -> Self {
        Self::new(BladeStyle::from_json(params))
    }

    pub fn style(&self) -> &BladeStyle {
        &self.style
    }
}

fn layout(ctx: &mut RenderContext<'_>) -> Layout {
    ctx.checkpoint("layout");
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;
    let layout = Layout {
        pommel_length: (rng.skew_low() * 2.0 * dscale).ceil(),
        hilt_length: (f64::from(rng.range(6, 11)) * dscale).ceil(),
        guard_width: (f64::from(rng.range(1, 4)) * dscale).ceil(),
        guard_spread: rng.skew_low(),
    };
    log::trace!("blade layout: {layout:?}");
    layout
}

impl IconGenerator for Blade {
    fn name(&self) -> &'static str {
        "blade"
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        ctx.clear();
        let l = layout(ctx);
        let h = ctx.dimension() as f64;

        let blade = draw_blade(
            ctx,
            &BladeParams {
                jog_chance: self.style.jog_chance,
                omega_chance: self.style.omega_chance,
                ..BladeParams::sword(l.blade_start_diag())
            },
        );

        let grip_start = (l.pommel_length * SQRT_2).floor();
        draw_grip(
            ctx,
            &GripParams {
                start_diag: grip_start,
                length_diag: (blade.start_ortho - grip_start).floor(),
                max_radius: Some(blade.start_radius),
            },
        );

        let guard = draw_crossguard(
            ctx,
            &CrossguardParams {
                position_diag: blade.start_ortho,
                half_length: blade.start_radius * (1.0 + 2.0 * l.guard_spread) + 1.0,
                thickness: GUARD_THICKNESS,
            },
        );

        if self.style.pommel {
            let radius = l.pommel_length * SQRT_2 / 2.0;
            let (light, dark) = if self.style.matching_pommel {
                (Some(guard.light), Some(guard.dark))
            } else {
                (None, None)
            };
            draw_pommel(
                ctx,
                &PommelParams {
                    center: Vector2::new((radius + 1.0).floor(), (h - radius - 2.0).ceil()),
                    radius,
                    light,
                    dark,
                },
            );
        }

        add_border(ctx);
    }

    fn params(&self) -> Value {
        json!({
            "jog_chance": self.style.jog_chance,
            "omega_chance": self.style.omega_chance,
            "pommel": self.style.pommel,
            "matching_pommel": self.style.matching_pommel,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "jog_chance": {
                "type": "number",
                "default": DEFAULT_JOG_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-step chance of a sharp kink in the blade"
            },
            "omega_chance": {
                "type": "number",
                "default": DEFAULT_OMEGA_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-step chance of the blade starting to curve"
            },
            "pommel": {
                "type": "boolean",
                "default": true,
                "description": "Draw the pommel"
            },
            "matching_pommel": {
                "type": "boolean",
                "default": true,
                "description": "Paint the pommel in the crossguard colors"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_machine_core::canvas::{Canvas, PixelSink};

    fn render(seed: &str, dimension: usize, blade: &Blade) -> Canvas {
        let mut canvas = Canvas::new(dimension, dimension).unwrap();
        {
            let mut ctx = RenderContext::new(&mut canvas, 0, 0, dimension, seed);
            blade.draw(&mut ctx);
        }
        canvas
    }

    fn opaque(canvas: &Canvas) -> usize {
        canvas
            .read_alpha(0, 0, canvas.width(), canvas.height())
            .iter()
            .filter(|&&a| a > 0)
            .count()
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        assert_eq!(BladeStyle::from_json(&json!({})), BladeStyle::default());
    }

    #[test]
    fn from_json_extracts_and_clamps() {
        let s = BladeStyle::from_json(&json!({"jog_chance": 2.0, "pommel": false}));
        assert_eq!(s.jog_chance, 1.0);
        assert!(!s.pommel);
        assert!(s.matching_pommel);
    }

    #[test]
    fn param_schema_describes_every_param() {
        let blade = Blade::default();
        let schema = blade.param_schema();
        for key in blade.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
            assert!(schema[key].get("type").is_some(), "{key} missing 'type'");
        }
    }

    #[test]
    fn layout_is_scaled() {
        let mut canvas = Canvas::new(32, 32).unwrap();
        let mut ctx = RenderContext::new(&mut canvas, 0, 0, 32, "layout");
        let l = layout(&mut ctx);
        assert!((0.0..=2.0).contains(&l.pommel_length));
        assert!((6.0..=10.0).contains(&l.hilt_length));
        assert!((1.0..=3.0).contains(&l.guard_width));
        assert_eq!(
            l.blade_start_diag(),
            l.pommel_length + l.hilt_length + l.guard_width
        );
    }

    #[test]
    fn sword_is_deterministic() {
        assert_eq!(
            render("test-seed-1", 32, &Blade::default()),
            render("test-seed-1", 32, &Blade::default())
        );
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(
            render("one", 32, &Blade::default()),
            render("two", 32, &Blade::default())
        );
    }

    #[test]
    fn sword_runs_along_the_diagonal() {
        let canvas = render("diagonal", 32, &Blade::default());
        assert!(opaque(&canvas) > 50);
        // the top-left and bottom-right corners stay clear.
        assert_eq!(canvas.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(canvas.pixel(31, 31).unwrap()[3], 0);
    }

    #[test]
    fn disabling_the_pommel_changes_only_the_hilt_end() {
        let with = render("pommel", 32, &Blade::default());
        let without = render(
            "pommel",
            32,
            &Blade::new(BladeStyle {
                pommel: false,
                ..BladeStyle::default()
            }),
        );
        // the tip quadrant is untouched by the pommel.
        for y in 0..12 {
            for x in 20..32 {
                assert_eq!(with.pixel(x, y), without.pixel(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn every_supported_size_renders() {
        for dimension in [8, 16, 24, 64] {
            let canvas = render("sizes", dimension, &Blade::default());
            assert!(opaque(&canvas) > 0, "{dimension}px sword is empty");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn any_seed_is_outlined(seed in "[a-z0-9]{1,12}") {
                let canvas = render(&seed, 32, &Blade::default());
                prop_assert!(canvas.data().chunks(4).any(|px| px == [0, 0, 0, 255]));
                prop_assert_eq!(canvas.pixel(0, 0).map(|px| px[3]), Some(0));
            }
        }
    }
}
