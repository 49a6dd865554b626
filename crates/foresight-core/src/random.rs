//! Injected source of uniform randomness.
//!
//! The sampler and engine never reach for ambient global randomness; callers
//! pass a generator, and choose whether it is seeded.

/// Supplies independent uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in `(0, 1]`, safe to feed into `ln`.
    fn next_open_unit(&mut self) -> f64 {
        1.0 - self.next_f64()
    }
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Exposes a borrowed [`RandomSource`] as a [`rand::RngCore`], so `rand_distr`
/// samplers consume the same injected stream.
pub(crate) struct SourceRng<'a, R: ?Sized>(&'a mut R);

impl<'a, R: RandomSource + ?Sized> SourceRng<'a, R> {
    pub(crate) fn new(source: &'a mut R) -> Self {
        Self(source)
    }
}

impl<R: RandomSource + ?Sized> rand::RngCore for SourceRng<'_, R> {
    fn next_u32(&mut self) -> u32 {
        (self.0.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|value| value.clamp(0.0, 1.0 - f64::EPSILON))
            .collect::<Vec<_>>();
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
