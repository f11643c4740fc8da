//! Deterministic string-seeded PRNG.
//!
//! A text seed is folded into a 32-bit multiply/rotate hash ([`SeedHasher`]),
//! whose next four outputs seed a four-word add-rotate-xor generator
//! ([`RandomStream`]). All arithmetic is wrapping 32-bit integer math, so the
//! same seed produces the same float sequence on every platform.
//!
//! Every higher-level draw (`range`, `skew_low`, ...) is expressed through
//! [`RandomStream::next_f64`] so that replaying a seed replays the pixels.

use serde::{Deserialize, Serialize};

/// Multiply/rotate string hash that yields a stream of 32-bit outputs.
///
/// Characters are consumed as UTF-16 code units, and the initial state is
/// mixed with the seed length, so the empty string is a valid seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedHasher {
    state: u32,
}

impl SeedHasher {
    const INITIAL: u32 = 1_779_033_703;
    const ABSORB_MUL: u32 = 3_432_918_353;
    const MIX_MUL_A: u32 = 2_246_822_507;
    const MIX_MUL_B: u32 = 3_266_489_909;

    /// Creates a hasher that has consumed `seed`.
    pub fn new(seed: &str) -> Self {
        let len = seed.encode_utf16().count() as u32;
        let mut hasher = Self {
            state: Self::INITIAL ^ len,
        };
        hasher.absorb(seed);
        hasher
    }

    /// Mixes every UTF-16 unit of `text` into the state.
    pub fn absorb(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.state = (self.state ^ u32::from(unit)).wrapping_mul(Self::ABSORB_MUL);
            self.state = self.state.rotate_left(13);
        }
    }

    /// Advances the hash and returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.state;
        h = (h ^ (h >> 16)).wrapping_mul(Self::MIX_MUL_A);
        h = (h ^ (h >> 13)).wrapping_mul(Self::MIX_MUL_B);
        h ^= h >> 16;
        self.state = h;
        h
    }
}

/// Four-word mix-and-rotate generator producing floats in [0, 1).
///
/// Carries the hasher state of the seed it came from so that
/// [`derive_sub_stream`](Self::derive_sub_stream) can build child streams
/// that depend only on the seed and a purpose tag, never on how many values
/// have already been drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomStream {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
    origin: SeedHasher,
}

impl RandomStream {
    /// Seeds a stream from a text seed.
    pub fn from_seed(seed: &str) -> Self {
        Self::from_hasher(SeedHasher::new(seed))
    }

    /// Seeds a stream from the next four outputs of `origin`.
    ///
    /// The hasher is remembered (in its pre-output state) as the origin for
    /// derived sub-streams.
    pub fn from_hasher(origin: SeedHasher) -> Self {
        let mut h = origin.clone();
        let a = h.next_u32();
        let b = h.next_u32();
        let c = h.next_u32();
        let d = h.next_u32();
        Self { a, b, c, d, origin }
    }

    /// Returns an independent child stream for one logical shape.
    ///
    /// The child is derived from this stream's seed origin plus `purpose`, so
    /// two calls with the same purpose always agree, whatever was drawn in
    /// between. Children share the origin of their parent: deriving from a
    /// child is the same as deriving from the root.
    pub fn derive_sub_stream(&self, purpose: &str) -> Self {
        let mut hasher = self.origin.clone();
        hasher.absorb(purpose);
        let mut child = Self::from_hasher(hasher);
        child.origin = self.origin.clone();
        child
    }

    /// Advances the state and returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        let t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Returns `floor(next * (max - min) + min)`: an integer in [min, max).
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        self.range_f64(f64::from(min), f64::from(max)).floor() as i32
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Returns an f64 in [min, max), skewed toward `max`.
    pub fn range_high_f64(&mut self, min: f64, max: f64) -> f64 {
        self.skew_high() * (max - min) + min
    }

    /// Returns a float in [0, 1) weighted toward 0 (`next²`).
    pub fn skew_low(&mut self) -> f64 {
        let v = self.next_f64();
        v * v
    }

    /// Returns a float in (0, 1] weighted toward 1 (`1 - skew_low`).
    pub fn skew_high(&mut self) -> f64 {
        1.0 - self.skew_low()
    }

    /// Returns a float in [0, 1] weighted toward both extremes.
    pub fn skew_extreme(&mut self) -> f64 {
        let v = self.next_f64() * 2.0 - 1.0;
        v * v
    }

    /// Returns `-1.0` or `1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.next_f64() < 0.5 {
            -1.0
        } else {
            1.0
        }
    }

    /// Returns `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
