//! Candidate generation for the rejection-sampling loop.
//!
//! Strategies propose one 2D candidate at a time inside the square sampling
//! area; the scatter runner resolves each candidate onto the surface and
//! accepts or rejects it.
use mint::Vector2;
use rand::RngCore;

/// Trait for drawing candidate positions in `[-half_extent, half_extent]²`.
pub trait CandidateSampling: Send + Sync {
    fn next(&self, half_extent: f32, rng: &mut dyn RngCore) -> Vector2<f32>;
}

/// Uniform i.i.d. candidates over the square sampling area.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSquareSampling;

impl CandidateSampling for UniformSquareSampling {
    fn next(&self, half_extent: f32, rng: &mut dyn RngCore) -> Vector2<f32> {
        Vector2 {
            x: (rand01(rng) * 2.0 - 1.0) * half_extent,
            y: (rand01(rng) * 2.0 - 1.0) * half_extent,
        }
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
