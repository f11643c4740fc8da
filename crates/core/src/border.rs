//! One-pixel black outline around everything drawn in a tile.

use crate::context::RenderContext;

const OUTLINE: [u8; 4] = [0, 0, 0, 255];

/// Outlines the tile's drawing.
///
/// Works from a snapshot of the tile taken before any change: a pixel becomes
/// opaque black if it is transparent or on the tile edge and at least one
/// 4-neighbour inside the tile is drawn. Outline pixels themselves never
/// count as drawn, so a second pass over the result changes nothing.
///
/// "Drawn" means nonzero alpha and not exactly `[0, 0, 0, 255]`. A part that
/// paints opaque pure black (a grip darkened all the way) is therefore not
/// outlined on its own; it already reads as outline.
pub fn add_border(ctx: &mut RenderContext<'_>) {
    let d = ctx.dimension();
    let pixels = ctx.read_rgba();
    let drawn = |x: usize, y: usize| {
        let px = pixels[y * d + x];
        px[3] > 0 && px != OUTLINE
    };
    let transparent = |x: usize, y: usize| pixels[y * d + x][3] == 0;

    let mut outlined = 0usize;
    for x in 0..d {
        for y in 0..d {
            let edge = x == 0 || y == 0 || x == d - 1 || y == d - 1;
            if !edge && !transparent(x, y) {
                continue;
            }
            let touches = (x > 0 && drawn(x - 1, y))
                || (x + 1 < d && drawn(x + 1, y))
                || (y > 0 && drawn(x, y - 1))
                || (y + 1 < d && drawn(x, y + 1));
            if touches {
                ctx.set_pixel(x as i64, y as i64, OUTLINE);
                outlined += 1;
            }
        }
    }
    log::trace!("border pass outlined {outlined} pixels");
}
