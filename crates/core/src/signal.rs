// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synthetic benchmark input.

use rand::Rng;

/// Amplitude of the uniform perturbation added to every sample.
pub const NOISE_AMPLITUDE: f64 = 0.1;

/// A slow sine wave plus small uniform noise: `sin(i / 10) + U[0, 0.1)`.
pub fn test_signal<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|i| (i as f64 / 10.0).sin() + rng.gen::<f64>() * NOISE_AMPLITUDE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_signal_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = test_signal(500, &mut rng);
        assert_eq!(data.len(), 500);
        for (i, x) in data.iter().enumerate() {
            let base = (i as f64 / 10.0).sin();
            assert!(*x >= base && *x <= base + NOISE_AMPLITUDE);
        }
    }

    #[test]
    fn test_seeded_signal_is_reproducible() {
        let a = test_signal(64, &mut StdRng::seed_from_u64(42));
        let b = test_signal(64, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
