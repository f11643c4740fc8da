//! Bounded random-walk contour for bottle silhouettes.
//!
//! Walks down the rows of a body, carrying an integer-floored velocity and a
//! periodically re-steered acceleration. Every row's half-width is clamped to
//! `[min_half_width, max_half_width]`, so the walk can bulge into shoulders
//! and waists but never run away.

use crate::prng::RandomStream;

/// Parameters of one contour walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourParams {
    /// First row; its half-width is `top_half_width`.
    pub top: usize,
    /// Last row (inclusive).
    pub bottom: usize,
    /// Half-width of the top row (the neck).
    pub top_half_width: f64,
    /// Lower clamp for every following row.
    pub min_half_width: f64,
    /// Upper clamp for every following row.
    pub max_half_width: f64,
    /// Rows whose index is a multiple of this may re-steer the walk.
    pub interval: usize,
}

/// Per-row half-widths from `top` to `bottom` inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    top: usize,
    widths: Vec<f64>,
}

impl Contour {
    /// First row with a width.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Last row with a width.
    pub fn bottom(&self) -> usize {
        self.top + self.widths.len() - 1
    }

    /// Half-width at `row`, or `None` outside `top..=bottom`.
    pub fn get(&self, row: usize) -> Option<f64> {
        row.checked_sub(self.top)
            .and_then(|i| self.widths.get(i))
            .copied()
    }

    /// `(row, half_width)` pairs from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.widths
            .iter()
            .enumerate()
            .map(move |(i, &w)| (self.top + i, w))
    }
}

/// Runs the walk.
///
/// State starts at velocity 0, acceleration 0, direction +1. For each row
/// after the top the width moves by `floor(velocity)` and is clamped, then
/// velocity accumulates acceleration. On every `interval`-th row, with
/// probability 0.5, acceleration is resampled as
/// `direction * range(0, 5) / 2` and the direction flips.
pub fn synthesize(params: &ContourParams, rng: &mut RandomStream) -> Contour {
    let bottom = params.bottom.max(params.top);
    let interval = params.interval.max(1);
    let mut widths = Vec::with_capacity(bottom - params.top + 1);
    widths.push(params.top_half_width);

    let mut velocity = 0.0_f64;
    let mut acceleration = 0.0_f64;
    let mut direction = 1.0_f64;
    let mut previous = params.top_half_width;

    for row in params.top + 1..=bottom {
        let step = velocity.floor();
        velocity += acceleration;
        let width = (previous + step)
            .min(params.max_half_width)
            .max(params.min_half_width);
        widths.push(width);
        previous = width;

        if row % interval == 0 && rng.next_f64() <= 0.5 {
            acceleration = direction * f64::from(rng.range(0, 5)) / 2.0;
            direction = -direction;
        }
    }

    log::trace!(
        "contour rows {}..={} widths {:?}",
        params.top,
        bottom,
        widths
    );

    Contour {
        top: params.top,
        widths,
    }
}
