use ndarray::ArrayView2;

pub struct StatsHelper;

impl StatsHelper {
    /// Sum of squared values.
    pub fn energy(samples: ArrayView2<f64>) -> f64 {
        samples.iter().map(|&v| v * v).sum()
    }

    pub fn rms(samples: ArrayView2<f64>) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        (Self::energy(samples) / samples.len() as f64).sqrt()
    }

    /// Smallest and largest value, or `None` for an empty matrix.
    pub fn min_max(samples: ArrayView2<f64>) -> Option<(f64, f64)> {
        samples.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
