#![deny(unsafe_code)]
//! Potion bottle icons.
//!
//! A potion is a stoppered glass bottle seen from the front: a wooden stopper
//! poking out of a glass lip, a neck, and a body whose silhouette comes from a
//! random-walk contour. The lower part of the body holds a two-tone fluid;
//! the empty part shows translucent glass. Inner border pixels trace the
//! silhouette, a soft-light streak marks the top-left shoulders, and the
//! border pass outlines the whole bottle.

use icon_machine_core::border::add_border;
use icon_machine_core::canvas::{BlendMode, Rect};
use icon_machine_core::color::Color;
use icon_machine_core::context::RenderContext;
use icon_machine_core::contour::{synthesize, Contour, ContourParams};
use icon_machine_core::params::{color_json, param_bool, param_color, param_unit};
use icon_machine_core::IconGenerator;
use serde_json::{json, Value};

const DEFAULT_STOPPER_LIGHT: Color = Color::rgb(222.0, 152.0, 100.0);
const DEFAULT_STOPPER_DARK: Color = Color::rgb(118.0, 49.0, 0.0);
const DEFAULT_INNER_LIGHT: Color = Color::rgb(213.0, 226.0, 239.0);
const DEFAULT_INNER_DARK: Color = Color::rgb(181.0, 196.0, 197.0);
const DEFAULT_GLASS_LIGHT: Color = Color::rgb(227.0, 244.0, 248.0);
const DEFAULT_GLASS_DARK: Color = Color::rgb(163.0, 187.0, 199.0);
/// Opacity of the empty glass.
const DEFAULT_GLASS_ALPHA: f64 = 165.0 / 255.0;
/// Per-pixel random shift of the fluid's light/dark split.
const DEFAULT_FLUID_JITTER: f64 = 0.1;

/// Fixed colors and switches of the potion look.
///
/// Use [`Default`] for the classic palette: a tan stopper, pale blue glass
/// and light steel inner borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotionStyle {
    pub stopper_light: Color,
    pub stopper_dark: Color,
    pub inner_light: Color,
    pub inner_dark: Color,
    /// Opaque glass colors; `glass_alpha` is applied on top.
    pub glass_light: Color,
    pub glass_dark: Color,
    pub glass_alpha: f64,
    pub fluid_jitter: f64,
    /// Whether to draw the soft-light shoulder reflections.
    pub reflection: bool,
}

impl Default for PotionStyle {
    fn default() -> Self {
        Self {
            stopper_light: DEFAULT_STOPPER_LIGHT,
            stopper_dark: DEFAULT_STOPPER_DARK,
            inner_light: DEFAULT_INNER_LIGHT,
            inner_dark: DEFAULT_INNER_DARK,
            glass_light: DEFAULT_GLASS_LIGHT,
            glass_dark: DEFAULT_GLASS_DARK,
            glass_alpha: DEFAULT_GLASS_ALPHA,
            fluid_jitter: DEFAULT_FLUID_JITTER,
            reflection: true,
        }
    }
}

impl PotionStyle {
    /// Extracts a style from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            stopper_light: param_color(params, "stopper_light", DEFAULT_STOPPER_LIGHT),
            stopper_dark: param_color(params, "stopper_dark", DEFAULT_STOPPER_DARK),
            inner_light: param_color(params, "inner_light", DEFAULT_INNER_LIGHT),
            inner_dark: param_color(params, "inner_dark", DEFAULT_INNER_DARK),
            glass_light: param_color(params, "glass_light", DEFAULT_GLASS_LIGHT),
            glass_dark: param_color(params, "glass_dark", DEFAULT_GLASS_DARK),
            glass_alpha: param_unit(params, "glass_alpha", DEFAULT_GLASS_ALPHA),
            fluid_jitter: param_unit(params, "fluid_jitter", DEFAULT_FLUID_JITTER),
            reflection: param_bool(params, "reflection", true),
        }
    }

    fn glass(&self, color: Color) -> Color {
        Color::rgba(color.r, color.g, color.b, self.glass_alpha)
    }
}

/// Row and column measurements of one bottle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    center_xl: f64,
    stopper_top: f64,
    stopper_top_height: f64,
    stopper_top_width: f64,
    stopper_width: f64,
    stopper_depth: f64,
    lip_top: f64,
    lip_height: f64,
    lip_width: f64,
    neck_top: usize,
    neck_width: f64,
    bottle_bottom: usize,
    fluid_top: usize,
    contour_interval: usize,
}

/// Potion icon generator.
#[derive(Debug, Clone, Default)]
pub struct Potion {
    style: PotionStyle,
}

impl Potion {
    pub fn new(style: PotionStyle) -> Self {
        Self { style }
    }

    /// Creates a potion generator from a JSON style object.
    pub fn from_json(params: &Value) -> Self {
        Self::new(PotionStyle::from_json(params))
    }

    pub fn style(&self) -> &PotionStyle {
        &self.style
    }
}

impl IconGenerator for Potion {
    fn name(&self) -> &'static str {
        "potion"
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        ctx.clear();
        let layout = layout(ctx);

        ctx.checkpoint("contour");
        let contour = synthesize(
            &ContourParams {
                top: layout.neck_top,
                bottom: layout.bottle_bottom,
                top_half_width: layout.neck_width / 2.0,
                min_half_width: layout.neck_width / 2.0,
                max_half_width: ctx.dimension() as f64 / 2.0 - 2.0,
                interval: layout.contour_interval,
            },
            &mut ctx.rng,
        );

        self.draw_outer_stopper(ctx, &layout);
        self.draw_body(ctx, &layout, &contour);
        if self.style.reflection {
            draw_reflections(ctx, &layout, &contour);
        }
        self.draw_inner_stopper(ctx, &layout);
        self.draw_lip(ctx, &layout);
        self.draw_bottom(ctx, &layout, &contour);

        add_border(ctx);
    }

    fn params(&self) -> Value {
        let s = &self.style;
        json!({
            "stopper_light": color_json(s.stopper_light),
            "stopper_dark": color_json(s.stopper_dark),
            "inner_light": color_json(s.inner_light),
            "inner_dark": color_json(s.inner_dark),
            "glass_light": color_json(s.glass_light),
            "glass_dark": color_json(s.glass_dark),
            "glass_alpha": s.glass_alpha,
            "fluid_jitter": s.fluid_jitter,
            "reflection": s.reflection,
        })
    }

    fn param_schema(&self) -> Value {
        let color = |default: Color, description: &str| {
            json!({
                "type": "color",
                "default": color_json(default),
                "description": description
            })
        };
        json!({
            "stopper_light": color(DEFAULT_STOPPER_LIGHT, "Lit side of the stopper"),
            "stopper_dark": color(DEFAULT_STOPPER_DARK, "Shaded side of the stopper"),
            "inner_light": color(DEFAULT_INNER_LIGHT, "Left inner border and lip edge"),
            "inner_dark": color(DEFAULT_INNER_DARK, "Right inner border and lip edge"),
            "glass_light": color(DEFAULT_GLASS_LIGHT, "Lit side of the empty glass"),
            "glass_dark": color(DEFAULT_GLASS_DARK, "Shaded side of the empty glass"),
            "glass_alpha": {
                "type": "number",
                "default": DEFAULT_GLASS_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Opacity of the empty glass"
            },
            "fluid_jitter": {
                "type": "number",
                "default": DEFAULT_FLUID_JITTER,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-pixel random shift of the fluid shading"
            },
            "reflection": {
                "type": "boolean",
                "default": true,
                "description": "Soft-light streaks on the top-left shoulders"
            }
        })
    }
}

/// Rounds half-way cases toward positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Draws the bottle's measurements from the layout sub-stream.
fn layout(ctx: &mut RenderContext<'_>) -> Layout {
    ctx.checkpoint("layout");
    let dimension = ctx.dimension();
    let d = dimension as f64;
    let dscale = ctx.dscale();
    let rng = &mut ctx.rng;

    let lip_height = (f64::from(rng.range(2, 5)) * dscale).ceil();
    let stopper_top_height = (f64::from(rng.range(2, 5)) * dscale).ceil();
    let stopper_depth = f64::from(rng.range(
        lip_height as i32 + 1,
        lip_height as i32 + round_half_up(4.0 * dscale) as i32,
    ));
    let stopper_width = (f64::from(rng.range(2, 6)) * dscale).ceil() * 2.0;
    let neck_width = stopper_width + 2.0;
    let lip_width = neck_width + (f64::from(rng.range(2, 4)) * dscale).ceil() * 2.0;
    let stopper_top_width = (stopper_width + 2.0).min(lip_width - 2.0);

    let stopper_top = 2.0;
    let lip_top = stopper_top + stopper_top_height;
    let neck_top = (lip_top + lip_height) as usize;
    let bottle_bottom = dimension.saturating_sub(2).max(neck_top);
    let body = (bottle_bottom - neck_top) as f64;
    let fluid_top = neck_top + rng.range_f64(d / 8.0, body * 0.6).floor().max(0.0) as usize;

    let layout = Layout {
        center_xl: d / 2.0 - 1.0,
        stopper_top,
        stopper_top_height,
        stopper_top_width,
        stopper_width,
        stopper_depth,
        lip_top,
        lip_height,
        lip_width,
        neck_top,
        neck_width,
        bottle_bottom,
        fluid_top,
        contour_interval: round_half_up(4.0 * dscale).max(1.0) as usize,
    };
    log::trace!("potion layout: {layout:?}");
    layout
}

/// `x / (count - 1) - 0.5`, the centred gradient position used across
/// stopper and lip columns.
fn centred(x: f64, count: f64) -> f64 {
    x / (count - 1.0) - 0.5
}

impl Potion {
    fn draw_outer_stopper(&self, ctx: &mut RenderContext<'_>, l: &Layout) {
        let left = l.center_xl - l.stopper_top_width / 2.0 + 1.0;
        let mut x = 0.0;
        while x < l.stopper_top_width {
            let color = self
                .style
                .stopper_light
                .lerp(self.style.stopper_dark, centred(x, l.stopper_top_width));
            ctx.fill_rect(Rect::new(left + x, l.stopper_top, 1.0, l.stopper_top_height), color);
            x += 1.0;
        }
    }

    fn draw_body(&self, ctx: &mut RenderContext<'_>, l: &Layout, contour: &Contour) {
        let s = &self.style;
        ctx.checkpoint("fluid");
        let fluid = Color::random(&mut ctx.rng);
        let fluid2 = fluid.randomize(300, &mut ctx.rng);
        let fluid_span = l.bottle_bottom.saturating_sub(l.fluid_top) as f64;

        let mut previous = l.lip_width;
        for (row, half_width) in contour.rows() {
            let y = row as f64;
            let width = half_width * 2.0;
            let left = l.center_xl - width / 2.0;

            if row >= l.fluid_top {
                let vn = if fluid_span > 0.0 {
                    (row - l.fluid_top) as f64 / fluid_span
                } else {
                    0.0
                };
                let light = fluid.lerp(fluid2, vn);
                let dark = fluid.darken(1.0).lerp(fluid2.darken(1.0), vn);
                let mut x = 1.0;
                while x < width {
                    let split = 0.5 + ctx.rng.next_f64() * s.fluid_jitter;
                    ctx.draw_pixel(left + x, y, light.lerp(dark, x / (width - 1.0) - split));
                    x += 1.0;
                }
            }

            if row <= l.fluid_top {
                let glass_light = s.glass(s.glass_light);
                let glass_dark = s.glass(s.glass_dark);
                let mut x = 1.0;
                while x < width {
                    ctx.draw_pixel(left + x, y, glass_light.lerp(glass_dark, x / (width - 1.0)));
                    x += 1.0;
                }
            }

            if width != previous {
                let inner_row = if previous < width { y } else { y - 1.0 };
                let narrower = width.min(previous);
                let step = (previous - width).abs() / 2.0;
                ctx.fill_rect(
                    Rect::new(l.center_xl - narrower / 2.0 - step + 1.0, inner_row, step, 1.0),
                    s.inner_light,
                );
                ctx.fill_rect(
                    Rect::new(l.center_xl + narrower / 2.0 + 1.0, inner_row, step, 1.0),
                    s.inner_dark,
                );
            }
            ctx.draw_pixel(l.center_xl - width / 2.0 + 1.0, y, s.inner_light);
            ctx.draw_pixel(l.center_xl + width / 2.0, y, s.inner_dark);

            previous = width;
        }
    }

    fn draw_inner_stopper(&self, ctx: &mut RenderContext<'_>, l: &Layout) {
        let left = l.center_xl - l.stopper_width / 2.0 + 1.0;
        let mut x = 0.0;
        while x < l.stopper_width {
            let color = self
                .style
                .stopper_light
                .lerp(self.style.stopper_dark, centred(x, l.stopper_width));
            ctx.fill_rect(Rect::new(left + x, l.lip_top, 1.0, l.stopper_depth), color);
            x += 1.0;
        }
    }

    fn draw_lip(&self, ctx: &mut RenderContext<'_>, l: &Layout) {
        let s = &self.style;
        let left = l.center_xl - l.lip_width / 2.0 + 1.0;
        ctx.fill_rect(Rect::new(left, l.lip_top, 1.0, l.lip_height), s.inner_light);
        ctx.fill_rect(
            Rect::new(left + l.lip_width - 1.0, l.lip_top, 1.0, l.lip_height),
            s.inner_dark,
        );
        let glass_light = s.glass(s.glass_light);
        let glass_dark = s.glass(s.glass_dark);
        let mut x = 1.0;
        while x < l.lip_width - 1.0 {
            let color = glass_light.lerp(glass_dark, centred(x - 1.0, l.lip_width - 2.0));
            ctx.fill_rect(Rect::new(left + x, l.lip_top, 1.0, l.lip_height), color);
            x += 1.0;
        }
    }

    fn draw_bottom(&self, ctx: &mut RenderContext<'_>, l: &Layout, contour: &Contour) {
        let Some(half_width) = contour.get(l.bottle_bottom) else {
            return;
        };
        let left = l.center_xl - half_width + 1.0;
        let width = half_width * 2.0;
        let y = l.bottle_bottom as f64;
        let mut x = 0.0;
        while x < width {
            let color = self
                .style
                .inner_light
                .lerp(self.style.inner_dark, centred(x, width));
            ctx.draw_pixel(left + x, y, color);
            x += 1.0;
        }
    }
}

/// Soft-light streaks two rows below every row where the body widens,
/// pulled toward the middle on wide bottles.
fn draw_reflections(ctx: &mut RenderContext<'_>, l: &Layout, contour: &Contour) {
    let d = ctx.dimension() as f64;
    let mut previous = l.lip_width;
    for (row, half_width) in contour.rows() {
        let width = half_width * 2.0;
        if previous < width {
            let reflect_width = (width - previous).max(1.0);
            let crunch = 1.0 - 0.3 * width / d;
            let offset = round_half_up((2.0 - width / 2.0) * crunch);
            ctx.blend_rect(
                Rect::new(l.center_xl + offset, row as f64 + 2.0, reflect_width * crunch, 1.0),
                Color::WHITE,
                BlendMode::SoftLight,
            );
        }
        previous = width;
    }
}
