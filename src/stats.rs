//! Sample statistics for threshold estimates.
//!
//! Every reducer returns `None` instead of a meaningless number when the
//! input is too short or contains NaN/Inf.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent of n.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation `x̄ ± z·s/√n`.

/// Two-sided 95% quantile of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Arithmetic mean of `data`.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// let v = [0.5, 0.6, 0.7];
/// assert!((mean(&v).unwrap() - 0.6).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (Bessel's correction, denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Endpoints `mean ∓ z · std_dev / √n` of a normal-approximation
/// confidence interval.
///
/// NaN in either statistic yields NaN endpoints.
///
/// # Examples
/// ```
/// use percolation::stats::{confidence_interval, Z_95};
/// let (lo, hi) = confidence_interval(0.59, 0.01, 100, Z_95);
/// assert!((lo - 0.58804).abs() < 1e-12);
/// assert!((hi - 0.59196).abs() < 1e-12);
/// ```
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Neumaier compensated summation.
///
/// Improves on plain Kahan summation when an addend is larger in magnitude
/// than the running sum.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let (sum, compensation) = data.iter().fold((0.0_f64, 0.0_f64), |(sum, c), &x| {
        let t = sum + x;
        let c = if sum.abs() >= x.abs() {
            c + ((sum - t) + x)
        } else {
            c + ((x - t) + sum)
        };
        (t, c)
    });
    sum + compensation
}

/// Streaming count, mean and second central moment.
///
/// # Examples
/// ```
/// use percolation::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// `None` until two samples have been seen.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_edge_cases() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[f64::NAN, 1.0]), None);
        assert_eq!(mean(&[f64::INFINITY]), None);
        assert_eq!(mean(&[0.25]), Some(0.25));
    }

    #[test]
    fn test_mean_keeps_negative_placeholders() {
        let m = mean(&[0.6, -1.0, 0.6, 0.6]).unwrap();
        assert!((m - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_variance_edge_cases() {
        assert_eq!(variance(&[]), None);
        assert_eq!(variance(&[0.5]), None);
        assert_eq!(variance(&[0.5, f64::NAN]), None);
        assert_eq!(variance(&[0.5, 0.5, 0.5]), Some(0.0));
    }

    #[test]
    fn test_std_dev_known_value() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&v).unwrap();
        assert!((sd - 2.138089935299395).abs() < 1e-10);
    }

    #[test]
    fn test_variance_large_offset() {
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        let var = variance(&data).unwrap();
        assert!((var - 2.5).abs() < 1e-5, "got {var}");
    }

    #[test]
    fn test_kahan_sum_recovers_small_terms() {
        let data = [1.0, 1e100, 1.0, -1e100];
        assert_eq!(kahan_sum(&data), 2.0);
    }

    #[test]
    fn test_confidence_interval_nan_propagates() {
        let (lo, hi) = confidence_interval(0.5, f64::NAN, 1, Z_95);
        assert!(lo.is_nan());
        assert!(hi.is_nan());
    }

    #[test]
    fn test_confidence_interval_zero_spread() {
        let (lo, hi) = confidence_interval(0.5, 0.0, 10, Z_95);
        assert_eq!(lo, 0.5);
        assert_eq!(hi, 0.5);
    }

    #[test]
    fn test_welford_empty_and_single() {
        let mut acc = WelfordAccumulator::new();
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
        acc.update(3.0);
        assert_eq!(acc.count(), 1);
        assert_eq!(acc.mean(), Some(3.0));
        assert_eq!(acc.sample_std_dev(), None);
    }
}
