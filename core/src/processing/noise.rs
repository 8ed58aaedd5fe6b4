use crate::math::stats::StatsHelper;
use crate::prelude::{RealMatrix, SkipReason};
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;

/// Adds Gaussian noise carrying `percent`% of the signal energy.
///
/// The absolute value is taken of the noisy sum itself, so a strongly negative
/// excursion is reflected rather than zeroed.
pub fn inject_noise<R: Rng>(
    source: &RealMatrix,
    percent: f64,
    rng: &mut R,
) -> Result<RealMatrix, SkipReason> {
    if source.is_empty() {
        return Err(SkipReason::EmptyInput);
    }
    if !percent.is_finite() || percent < 0.0 {
        return Err(SkipReason::InvalidParameter);
    }

    let noise: RealMatrix = Array2::from_shape_simple_fn(source.raw_dim(), || {
        rng.sample::<f64, _>(StandardNormal)
    });

    let signal_energy = StatsHelper::energy(source.view());
    let noise_energy = StatsHelper::energy(noise.view());
    let scale = noise_scale(percent, signal_energy, noise_energy);

    let mut noisy = source.clone();
    noisy.zip_mut_with(&noise, |value, &n| *value = (*value + scale * n).abs());
    Ok(noisy)
}

fn noise_scale(percent: f64, signal_energy: f64, noise_energy: f64) -> f64 {
    if noise_energy <= 0.0 {
        return 0.0;
    }
    ((percent / 100.0) * signal_energy / noise_energy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn empty_source_is_skipped() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty = RealMatrix::zeros((0, 0));
        assert_eq!(inject_noise(&empty, 10.0, &mut rng), Err(SkipReason::EmptyInput));
    }

    #[test]
    fn negative_percent_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let source = array![[1.0]];
        assert_eq!(
            inject_noise(&source, -5.0, &mut rng),
            Err(SkipReason::InvalidParameter)
        );
    }

    #[test]
    fn zero_percent_passes_non_negative_source_through() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = array![[0.0, 1.5], [200.0, 7.0]];
        assert_eq!(inject_noise(&source, 0.0, &mut rng).unwrap(), source);
    }

    #[test]
    fn output_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(9);
        let source = Array2::from_elem((16, 16), 1.0);
        let noisy = inject_noise(&source, 400.0, &mut rng).unwrap();
        assert!(noisy.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn realized_energy_ratio_tracks_percent() {
        // Bright signal and a small percent keep reflection at zero out of play.
        let mut rng = StdRng::seed_from_u64(2024);
        let source = Array2::from_shape_fn((256, 256), |(j, i)| 100.0 + ((i + j) % 7) as f64);
        let percent = 1.0;
        let noisy = inject_noise(&source, percent, &mut rng).unwrap();

        let added: f64 = noisy
            .iter()
            .zip(source.iter())
            .map(|(n, s)| (n - s).powi(2))
            .sum();
        let ratio = added / StatsHelper::energy(source.view());
        assert!((ratio - percent / 100.0).abs() < 0.01 * percent / 100.0 + 1e-6);
    }

    #[test]
    fn same_seed_reproduces_noise() {
        let source = array![[5.0, 6.0], [7.0, 8.0]];
        let first = inject_noise(&source, 20.0, &mut StdRng::seed_from_u64(77)).unwrap();
        let second = inject_noise(&source, 20.0, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(first, second);
    }
}
