#![deny(unsafe_code)]
//! Spear icons.
//!
//! A long wooden haft runs from the bottom-left corner up the diagonal to a
//! metal socket, which holds a leaf-shaped head. Some spears grow a pair of
//! short lugs below the socket, and some carry a cap on the butt end.

use std::f64::consts::SQRT_2;

use icon_machine_core::border::add_border;
use icon_machine_core::color::{Color, Hsv};
use icon_machine_core::context::RenderContext;
use icon_machine_core::geometry::Vector2;
use icon_machine_core::params::{param_bool, param_unit};
use icon_machine_core::parts::{
    draw_blade, draw_crossguard, draw_pommel, BladeParams, CrossguardParams, PommelParams,
};
use icon_machine_core::rod::{draw_rod, RodParams};
use icon_machine_core::IconGenerator;
use serde_json::{json, Value};

const DEFAULT_LUG_CHANCE: f64 = 0.4;
const DEFAULT_BUTT_CAP_CHANCE: f64 = 0.5;
const DEFAULT_OMEGA_CHANCE: f64 = 0.01;

/// Lugs are thinner than sword crossguards.
const LUG_THICKNESS: (f64, f64) = (1.0, 1.5);

/// Tunable spear options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpearStyle {
    pub lug_chance: f64,
    pub butt_cap_chance: f64,
    /// Per-step chance of the head starting to curve.
    pub omega_chance: f64,
    /// Wrap the socket in bands of a contrasting binding color.
    pub binding: bool,
}

impl Default for SpearStyle {
    fn default() -> Self {
        Self {
            lug_chance: DEFAULT_LUG_CHANCE,
            butt_cap_chance: DEFAULT_BUTT_CAP_CHANCE,
            omega_chance: DEFAULT_OMEGA_CHANCE,
            binding: true,
        }
    }
}

impl SpearStyle {
    /// Extracts a style from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            lug_chance: param_unit(params, "lug_chance", DEFAULT_LUG_CHANCE),
            butt_cap_chance: param_unit(params, "butt_cap_chance", DEFAULT_BUTT_CAP_CHANCE),
            omega_chance: param_unit(params, "omega_chance", DEFAULT_OMEGA_CHANCE),
            binding: param_bool(params, "binding", true),
        }
    }
}

/// Positions along the diagonal, in pixels per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    haft_start: f64,
    /// Where the head's base sits.
    head_ortho: f64,
    socket_length: f64,
    lugs: bool,
    lug_spread: f64,
    butt_cap: bool,
}

impl Layout {
    fn socket_start(&self) -> f64 {
        self.head_ortho - self.socket_length
    }
}

fn layout(ctx: &mut RenderContext<'_>, style: &SpearStyle) -> Layout {
    ctx.checkpoint("layout");
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;
    let layout = Layout {
        haft_start: 1.0 + (rng.skew_low() * 2.0 * dscale).floor(),
        head_ortho: (f64::from(rng.range(14, 19)) * dscale).floor(),
        socket_length: (f64::from(rng.range(2, 5)) * dscale).ceil(),
        lugs: rng.chance(style.lug_chance),
        lug_spread: rng.skew_low() * 2.0 * dscale,
        butt_cap: rng.chance(style.butt_cap_chance),
    };
    log::trace!("spear layout: {layout:?}");
    layout
}

/// Spear icon generator.
#[derive(Debug, Clone, Default)]
pub struct Spear {
    style: SpearStyle,
}

impl Spear {
    pub fn new(style: SpearStyle) -> Self {
        Self { style }
    }

    /// Creates a spear generator from a JSON style object.
    pub fn from_json(params: &Value) -> Self {
        Self::new(SpearStyle::from_json(params))
    }

    pub fn style(&self) -> &SpearStyle {
        &self.style
    }
}

/// Draws the wooden haft and returns its radius.
fn draw_haft(ctx: &mut RenderContext<'_>, l: &Layout) -> f64 {
    ctx.checkpoint("haft");
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;
    let radius = 0.5 * (rng.range_f64(1.0, 3.0) * dscale).ceil();
    let wavelength = (f64::from(rng.range(6, 12)) * dscale).ceil().max(2.0);
    let light = Hsv::new(
        rng.range_f64(20.0, 45.0),
        rng.range_f64(0.4, 0.7),
        rng.range_f64(0.55, 0.8),
    )
    .to_rgb();
    let dark = light.darken(0.5);
    draw_rod(
        ctx,
        &RodParams {
            start_diag: l.haft_start,
            length_diag: l.socket_start() - l.haft_start,
            radius,
            wavelength,
            radius_wave: 0.0,
            light,
            dark,
        },
    );
    radius
}

/// Metal colors of the socket, reused for the butt cap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Metal {
    light: Color,
    dark: Color,
}

fn draw_socket(ctx: &mut RenderContext<'_>, l: &Layout, head_radius: f64, binding: bool) -> Metal {
    ctx.checkpoint("socket");
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;
    let light = Hsv::new(
        f64::from(rng.range(0, 360)),
        rng.skew_low() * 0.3,
        rng.range_f64(0.6, 0.9),
    )
    .to_rgb();
    let dark = light.darken(0.6);
    let band = if binding {
        light.invert_randomize(128, rng).darken(0.3)
    } else {
        dark
    };
    let radius = (head_radius * 0.5).ceil().max(0.5);
    let wavelength = (l.socket_length / 2.0).ceil().max(2.0);
    log::trace!("socket: radius {radius} wavelength {wavelength}");
    draw_rod(
        ctx,
        &RodParams {
            start_diag: l.socket_start(),
            length_diag: l.socket_length + 1.0,
            radius,
            wavelength,
            radius_wave: 0.5 * dscale.max(1.0),
            light,
            dark: band,
        },
    );
    Metal { light, dark }
}

impl IconGenerator for Spear {
    fn name(&self) -> &'static str {
        "spear"
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        ctx.clear();
        let l = layout(ctx, &self.style);
        let h = ctx.dimension() as f64;

        let haft_radius = draw_haft(ctx, &l);

        // the head's base ortho is floor(start_diag / √2); the half pixel keeps
        // it on `head_ortho` despite rounding.
        let head = draw_blade(
            ctx,
            &BladeParams {
                omega_chance: self.style.omega_chance,
                ..BladeParams::spear_head((l.head_ortho + 0.5) * SQRT_2)
            },
        );

        let metal = draw_socket(ctx, &l, head.start_radius, self.style.binding);

        if l.lugs {
            draw_crossguard(
                ctx,
                &CrossguardParams {
                    position_diag: l.socket_start(),
                    half_length: head.start_radius + 1.0 + l.lug_spread,
                    thickness: LUG_THICKNESS,
                },
            );
        }

        if l.butt_cap {
            let radius = haft_radius + 0.5;
            draw_pommel(
                ctx,
                &PommelParams {
                    center: Vector2::new(l.haft_start + radius, h - 1.0 - l.haft_start - radius),
                    radius,
                    light: Some(metal.light),
                    dark: Some(metal.dark),
                },
            );
        }

        add_border(ctx);
    }

    fn params(&self) -> Value {
        json!({
            "lug_chance": self.style.lug_chance,
            "butt_cap_chance": self.style.butt_cap_chance,
            "omega_chance": self.style.omega_chance,
            "binding": self.style.binding,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "lug_chance": {
                "type": "number",
                "default": DEFAULT_LUG_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Chance of a pair of lugs below the socket"
            },
            "butt_cap_chance": {
                "type": "number",
                "default": DEFAULT_BUTT_CAP_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Chance of a metal cap on the butt end"
            },
            "omega_chance": {
                "type": "number",
                "default": DEFAULT_OMEGA_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-step chance of the head starting to curve"
            },
            "binding": {
                "type": "boolean",
                "default": true,
                "description": "Band the socket with a contrasting binding color"
            }
        })
    }
}
