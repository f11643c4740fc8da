//! The `IconGenerator` trait that every icon class implements.
//!
//! The trait is object-safe so generators can be used as `dyn IconGenerator`
//! when the class is picked at runtime.

use serde_json::Value;

use crate::context::RenderContext;

/// Draws one icon into a tile.
///
/// Implementations take every random decision from `ctx.rng` (or sub-streams
/// derived from it) and write only through `ctx`, so the same seed always
/// yields the same pixels. A generator clears its tile before drawing and
/// finishes with the border pass.
///
/// This trait is **object-safe**: you can use `Box<dyn IconGenerator>` or
/// `&dyn IconGenerator` for runtime polymorphism.
pub trait IconGenerator {
    /// Short lowercase name, e.g. `"potion"`.
    fn name(&self) -> &'static str;

    /// Draws a complete icon into the tile held by `ctx`.
    fn draw(&self, ctx: &mut RenderContext<'_>);

    /// Current style values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every style value, its type, range and default.
    fn param_schema(&self) -> Value;
}
