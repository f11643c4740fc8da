#![deny(unsafe_code)]
//! Icon registry and tile composer: maps icon classes to generators and lays
//! a sheet of independent tiles out on one pixel sink.
//!
//! This crate sits between `icon-machine-core` (which defines the
//! `IconGenerator` trait) and the individual generator crates
//! (`icon-machine-potion`, etc.). The CLI depends on this crate so that class
//! dispatch and seed derivation live in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use icon_machine_core::canvas::{Canvas, PixelSink};
use icon_machine_core::context::RenderContext;
use icon_machine_core::error::IconError;
use icon_machine_core::prng::RandomStream;
use icon_machine_core::{IconClass, IconGenerator, IconSpec};
use icon_machine_blade::Blade;
use icon_machine_potion::Potion;
use icon_machine_spear::Spear;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All available generator names.
const GENERATOR_NAMES: &[&str] = &["potion", "blade", "spear"];

/// Characters tile seeds are drawn from.
const TILE_SEED_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a derived tile seed.
pub const TILE_SEED_LEN: usize = 8;

/// Enumeration of all icon generators.
///
/// Wraps each generator and delegates `IconGenerator` trait methods.
/// Use [`IconKind::from_class`] for concrete classes and
/// [`IconKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum IconKind {
    Potion(Potion),
    Blade(Blade),
    Spear(Spear),
}

impl IconKind {
    /// Constructs the generator of a concrete class with the given style
    /// overrides.
    ///
    /// Returns `IconError::UnknownIconClass` for wildcard classes, which must
    /// be resolved per tile first.
    pub fn from_class(class: IconClass, params: &Value) -> Result<Self, IconError> {
        match class {
            IconClass::Potions => Ok(IconKind::Potion(Potion::from_json(params))),
            IconClass::Blades => Ok(IconKind::Blade(Blade::from_json(params))),
            IconClass::Spears => Ok(IconKind::Spear(Spear::from_json(params))),
            IconClass::Any | IconClass::AnyWeapon => {
                Err(IconError::UnknownIconClass(format!("{class} is not a concrete class")))
            }
        }
    }

    /// Constructs a generator by name.
    ///
    /// Returns `IconError::UnknownIconClass` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, IconError> {
        match name {
            "potion" => Ok(IconKind::Potion(Potion::from_json(params))),
            "blade" => Ok(IconKind::Blade(Blade::from_json(params))),
            "spear" => Ok(IconKind::Spear(Spear::from_json(params))),
            _ => Err(IconError::UnknownIconClass(name.to_string())),
        }
    }

    /// Returns a slice of all recognized generator names.
    pub fn list_generators() -> &'static [&'static str] {
        GENERATOR_NAMES
    }
}

impl IconGenerator for IconKind {
    fn name(&self) -> &'static str {
        match self {
            IconKind::Potion(g) => g.name(),
            IconKind::Blade(g) => g.name(),
            IconKind::Spear(g) => g.name(),
        }
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        match self {
            IconKind::Potion(g) => g.draw(ctx),
            IconKind::Blade(g) => g.draw(ctx),
            IconKind::Spear(g) => g.draw(ctx),
        }
    }

    fn params(&self) -> Value {
        match self {
            IconKind::Potion(g) => g.params(),
            IconKind::Blade(g) => g.params(),
            IconKind::Spear(g) => g.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            IconKind::Potion(g) => g.param_schema(),
            IconKind::Blade(g) => g.param_schema(),
            IconKind::Spear(g) => g.param_schema(),
        }
    }
}

/// Seed and class of one tile of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlan {
    pub column: usize,
    pub row: usize,
    /// Position in drawing order: columns outer, rows inner.
    pub index: usize,
    pub seed: String,
    /// Always a concrete class.
    pub class: IconClass,
}

/// Derives the seed and class of every tile.
///
/// A 1×1 sheet uses the master seed verbatim, so a single icon can be
/// reproduced from its own seed. Larger sheets draw an 8-character seed per
/// tile from a stream seeded with the master seed. Wildcard classes pick each
/// tile's class from the same stream, after its seed.
pub fn plan_tiles(spec: &IconSpec) -> Vec<TilePlan> {
    let n = spec.tile_dimension;
    let pool = spec.icon_class.pool();
    let mut meta = RandomStream::from_seed(&spec.seed);
    let mut plans = Vec::with_capacity(n * n);

    for column in 0..n {
        for row in 0..n {
            let seed = if n == 1 {
                spec.seed.clone()
            } else {
                draw_tile_seed(&mut meta)
            };
            let class = if pool.len() > 1 {
                pool[meta.range(0, pool.len() as i32) as usize]
            } else {
                pool[0]
            };
            plans.push(TilePlan {
                column,
                row,
                index: plans.len(),
                seed,
                class,
            });
        }
    }
    plans
}

fn draw_tile_seed(meta: &mut RandomStream) -> String {
    (0..TILE_SEED_LEN)
        .map(|_| char::from(TILE_SEED_ALPHABET[meta.range(0, 36) as usize]))
        .collect()
}

/// Renders one tile into `sink` at its grid position.
///
/// Tiles are independent: they may be rendered in any order, or alone.
pub fn render_tile(
    plan: &TilePlan,
    dimension: usize,
    params: &Value,
    sink: &mut dyn PixelSink,
) -> Result<(), IconError> {
    let generator = IconKind::from_class(plan.class, params)?;
    let origin_x = i64::try_from(plan.column * dimension).map_err(|_| IconError::InvalidDimensions)?;
    let origin_y = i64::try_from(plan.row * dimension).map_err(|_| IconError::InvalidDimensions)?;
    log::debug!(
        "tile {} ({}, {}): {} seed {:?}",
        plan.index,
        plan.column,
        plan.row,
        plan.class,
        plan.seed
    );
    let mut ctx = RenderContext::new(sink, origin_x, origin_y, dimension, &plan.seed);
    generator.draw(&mut ctx);
    Ok(())
}

/// Renders every tile of `spec` into `sink`.
pub fn render_into(spec: &IconSpec, sink: &mut dyn PixelSink) -> Result<(), IconError> {
    spec.validate()?;
    for plan in plan_tiles(spec) {
        render_tile(&plan, spec.dimension, &spec.params, sink)?;
    }
    Ok(())
}

/// Renders `spec` into a new canvas of `dimension · tile_dimension` pixels
/// per side.
pub fn render(spec: &IconSpec) -> Result<Canvas, IconError> {
    spec.validate()?;
    let side = spec.canvas_size()?;
    let mut canvas = Canvas::new(side, side)?;
    render_into(spec, &mut canvas)?;
    Ok(canvas)
}
