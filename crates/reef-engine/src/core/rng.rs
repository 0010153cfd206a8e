//! Uniform randomness for orbit generation.
//! Production code uses the xorshift64 `Rng`; tests and replay hosts inject a `FixedSequence`.

/// Source of independent uniform samples in [0, 1).
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1) built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

impl UniformSource for Rng {
    fn next_unit(&mut self) -> f32 {
        self.next_f32()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
/// Values are clamped into [0, 1) so a careless list cannot escape a band.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A sequence that always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl UniformSource for FixedSequence {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
