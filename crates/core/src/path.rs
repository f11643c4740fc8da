//! Stochastic path tracing for blades, spear tips and crossguard arms.
//!
//! A path is an ordered list of [`CorePoint`]s, each carrying a position,
//! per-side widths and an orientation. Paths are traced with an angle and an
//! angular velocity (omega) that both receive small random kicks, then frozen
//! by a post-pass that normalizes arc length to [0, 1] and applies a taper.
//! The field rasterizer turns the frozen points into pixels.

use std::f64::consts::{FRAC_PI_4, PI, SQRT_2};

use crate::geometry::{from_angle, perp_left, Bounds, Vector2};
use crate::prng::RandomStream;

/// Distance between consecutive samples (one pixel diagonal).
pub const SAMPLE_STEP: f64 = SQRT_2;

/// Hard cap on samples per path; a path that curls in place stops here.
pub const MAX_PATH_STEPS: usize = 4096;

/// One sample along a traced path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorePoint {
    pub pos: Vector2,
    /// Width on the side where `normal · offset < 0` (bottom for crossguards).
    pub width_l: f64,
    /// Width on the side where `normal · offset >= 0` (top for crossguards).
    pub width_r: f64,
    pub normal: Vector2,
    pub forward: Vector2,
    /// Arc length from the path start.
    pub dist: f64,
    /// Arc length rescaled to [0, 1].
    pub normalized_dist: f64,
}

impl CorePoint {
    /// Width on the side of the point that `offset` falls on.
    pub fn side_width(&self, offset: Vector2) -> f64 {
        if self.normal.dot(offset) < 0.0 {
            self.width_l
        } else {
            self.width_r
        }
    }
}

/// Parameters for a single-arm path (blade or spear tip).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladePathParams {
    pub start: Vector2,
    /// Initial heading in radians (screen space, y down).
    pub start_angle: f64,
    pub width_l: f64,
    pub width_r: f64,
    pub width_cosine_amp: f64,
    pub width_cosine_wavelength: f64,
    pub width_cosine_offset: f64,
    pub wiggle_amp: f64,
    pub wiggle_wavelength: f64,
    /// Per-step chance of a heading jog once past the lead-in.
    pub jog_chance: f64,
    /// Distance over which the jog chance ramps up from zero.
    pub jog_lead_in: f64,
    pub jog_amount: f64,
    pub omega_chance: f64,
    pub omega_amount: f64,
    pub max_omega: f64,
    /// Fraction of the path (from the terminus) that tapers to zero width.
    pub taper_factor: f64,
}

impl Default for BladePathParams {
    fn default() -> Self {
        Self {
            start: Vector2::ZERO,
            start_angle: -FRAC_PI_4,
            width_l: 2.0,
            width_r: 2.0,
            width_cosine_amp: 0.0,
            width_cosine_wavelength: 12.0,
            width_cosine_offset: 0.0,
            wiggle_amp: 0.0,
            wiggle_wavelength: 12.0,
            jog_chance: 0.04,
            jog_lead_in: 12.0,
            jog_amount: PI / 4.0,
            omega_chance: 0.02,
            omega_amount: PI / 32.0,
            max_omega: PI / 32.0,
            taper_factor: 0.2,
        }
    }
}

/// Traces a single arm until it leaves `bounds`.
///
/// At least one point is always produced. Widths are floored at 1 during
/// tracing; the taper post-pass then shrinks the last `taper_factor` of the
/// path linearly to zero.
pub fn trace_blade(params: &BladePathParams, bounds: Bounds, rng: &mut RandomStream) -> Vec<CorePoint> {
    let mut points = Vec::new();
    let mut current = params.start;
    let mut dist = 0.0_f64;
    let mut angle = params.start_angle;
    let mut omega = 0.0_f64;

    loop {
        let cosine = params.width_cosine_amp
            * (params.width_cosine_offset + dist / params.width_cosine_wavelength).cos();
        let heading = angle
            + params.wiggle_amp * (2.0 * PI * dist / params.wiggle_wavelength).sin();
        let velocity = from_angle(heading);

        points.push(CorePoint {
            pos: current,
            width_l: (params.width_l + cosine).max(1.0),
            width_r: (params.width_r + cosine).max(1.0),
            normal: perp_left(velocity).normalize_or_zero(),
            forward: velocity,
            dist,
            normalized_dist: 0.0,
        });

        let ramp = if params.jog_lead_in > 0.0 {
            (dist / params.jog_lead_in).min(1.0)
        } else {
            1.0
        };
        if rng.next_f64() <= params.jog_chance * ramp {
            angle += rng.range_f64(-params.jog_amount, params.jog_amount);
        }
        if rng.next_f64() <= params.omega_chance {
            omega += rng.range_f64(-params.omega_amount, params.omega_amount);
            omega = omega.max(-params.max_omega).min(params.max_omega);
        }

        current += velocity * SAMPLE_STEP;
        dist += SAMPLE_STEP;
        angle += omega * SAMPLE_STEP;

        if !bounds.contains(current) {
            break;
        }
        if points.len() >= MAX_PATH_STEPS {
            log::warn!("blade path hit the {MAX_PATH_STEPS}-step cap; truncating");
            break;
        }
    }

    let taper_start = 1.0 - params.taper_factor;
    for p in &mut points {
        p.normalized_dist = p.dist / dist;
        let taper = if p.normalized_dist <= taper_start {
            1.0
        } else {
            (1.0 - p.normalized_dist) / params.taper_factor
        };
        p.width_l *= taper;
        p.width_r *= taper;
    }

    log::trace!("blade path: {} points, length {dist:.2}", points.len());
    points
}

/// Parameters for a two-arm crossguard path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossguardPathParams {
    /// Shared origin of both arms.
    pub origin: Vector2,
    pub half_length: f64,
    pub thickness: f64,
    pub top_taper: f64,
    pub bottom_taper: f64,
    pub omega_chance: f64,
    pub omega_amount: f64,
    pub max_omega: f64,
    /// Steps an arm must wait after an omega change before the next one.
    pub cooldown_steps: usize,
    /// 0 = independent arms, 1 = second arm mirrors the first.
    pub symmetry: f64,
    /// Tile dimension, used to reflect across the anti-diagonal.
    pub dimension: usize,
}

/// Traces both crossguard arms.
///
/// Arms start at headings `-3π/4` and `π/4`. Each progress step first records
/// a point on each arm (the second arm lerped toward the anti-diagonal
/// reflection of the first by `symmetry`), then lets each arm whose cooldown
/// has expired roll for an omega change, then advances both arms.
pub fn trace_crossguard(params: &CrossguardPathParams, rng: &mut RandomStream) -> [Vec<CorePoint>; 2] {
    let d = params.dimension as f64;
    let mut current = [params.origin, params.origin];
    let mut angle = [-3.0 * FRAC_PI_4, FRAC_PI_4];
    let mut omega = [0.0_f64; 2];
    let mut cooldown = [0_usize; 2];
    let mut arms: [Vec<CorePoint>; 2] = [Vec::new(), Vec::new()];

    let mut progress = 0.0_f64;
    while progress <= params.half_length && arms[0].len() < MAX_PATH_STEPS {
        for side in 0..2 {
            let velocity = from_angle(angle[side]);
            let mut pos = current[side];
            if side == 1 {
                let mirrored = Vector2::new(d - 1.0 - current[0].y, d - 1.0 - current[0].x);
                pos = pos.lerp(mirrored, params.symmetry);
            }
            let facing = if side == 0 { 1.0 } else { -1.0 };
            arms[side].push(CorePoint {
                pos,
                width_l: params.thickness / 2.0,
                width_r: params.thickness / 2.0,
                normal: perp_left(velocity) * facing,
                forward: velocity,
                dist: progress,
                normalized_dist: 0.0,
            });
        }

        for side in 0..2 {
            let velocity = from_angle(angle[side]);
            if cooldown[side] > 0 {
                cooldown[side] -= 1;
            } else if rng.next_f64() < params.omega_chance {
                omega[side] += rng.range_f64(-params.omega_amount, params.omega_amount);
                omega[side] = omega[side].max(-params.max_omega).min(params.max_omega);
                cooldown[side] = params.cooldown_steps;
            }
            current[side] += velocity * SAMPLE_STEP;
            angle[side] += omega[side];
        }

        progress += SAMPLE_STEP;
    }

    for arm in &mut arms {
        for p in arm.iter_mut() {
            p.normalized_dist = if params.half_length > 0.0 {
                p.dist / params.half_length
            } else {
                1.0
            };
            p.width_r *= taper_scale(p.normalized_dist, params.top_taper);
            p.width_l *= taper_scale(p.normalized_dist, params.bottom_taper);
        }
    }

    arms
}

/// `min(1, (1 - n) / taper)`, with a zero taper meaning no taper at all.
fn taper_scale(normalized_dist: f64, taper: f64) -> f64 {
    if taper <= 0.0 {
        1.0
    } else {
        ((1.0 - normalized_dist) / taper).min(1.0)
    }
}

/// Curvature cap for crossguard arms: `trunc(thickness - 1) XOR trunc(2π/7)`.
///
/// That is `0` for thickness below 2 and `1` from 2 up to 3.
pub fn crossguard_max_omega(thickness: f64) -> f64 {
    let lhs = (thickness - 1.0).trunc() as i32;
    let rhs = (2.0 * PI / 7.0).trunc() as i32;
    f64::from(lhs ^ rhs)
}
