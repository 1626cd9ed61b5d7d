//! RNG module - deterministic randomness for the autopilot
//!
//! The autopilot draws a fresh precision bias after every drop attempt. A small
//! LCG keeps the demo reproducible for a given seed (handy in tests and benches).

use crate::types::AUTOPILOT_BIAS_HALF_RANGE;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in `[0, 1)`.
    ///
    /// Uses the top 24 bits so every result is exactly representable as `f32`.
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Draw an autopilot precision bias, uniform in `[-0.5, 0.5)`.
    pub fn next_bias(&mut self) -> f32 {
        self.next_unit() * (2.0 * AUTOPILOT_BIAS_HALF_RANGE) - AUTOPILOT_BIAS_HALF_RANGE
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_bias_range_is_symmetric() {
        let mut rng = SimpleRng::new(99);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..1_000 {
            let b = rng.next_bias();
            assert!((-0.5..0.5).contains(&b), "out of range: {}", b);
            saw_negative |= b < 0.0;
            saw_positive |= b > 0.0;
        }
        assert!(saw_negative && saw_positive);
    }
}
