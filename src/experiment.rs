//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random sites of a fresh [`PercolationGrid`]
//! until it percolates and records the open fraction at that moment. The
//! samples of all trials are reduced to a mean, a sample standard deviation
//! and a 95% confidence interval.
//!
//! A trial that hits an invalid coordinate is not dropped: it contributes
//! [`FAILED_TRIAL_SAMPLE`] to the mean and forces the standard deviation to
//! NaN, flagging the whole estimate as unreliable.

use tracing::{debug, info, warn};

use crate::error::{PercolationError, Result};
use crate::grid::PercolationGrid;
use crate::random::{create_rng, entropy_rng, RandomSites, SiteSource};
use crate::stats;

/// Sample recorded for a trial that failed to reach percolation.
pub const FAILED_TRIAL_SAMPLE: f64 = -1.0;

/// Parameters of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Grid side length n.
    pub size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Seed for reproducible draws; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    pub fn new(size: usize, trials: usize) -> Self {
        Self {
            size,
            trials,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    /// `InvalidArgument` if `size` or `trials` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(PercolationError::invalid_argument(
                "grid size must be positive, got 0",
            ));
        }
        if self.trials == 0 {
            return Err(PercolationError::invalid_argument(
                "trial count must be positive, got 0",
            ));
        }
        Ok(())
    }
}

/// Aggregated outcome of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    pub trials: usize,
    pub mean: f64,
    /// NaN when `trials == 1` or any trial failed.
    pub stddev: f64,
    pub failed_trials: usize,
    /// One sample per trial, in run order.
    pub samples: Vec<f64>,
}

impl ExperimentResult {
    fn from_samples(samples: Vec<f64>, failed_trials: usize) -> Self {
        let trials = samples.len();
        let mean = stats::mean(&samples).unwrap_or(f64::NAN);
        let stddev = if trials == 1 || failed_trials > 0 {
            f64::NAN
        } else {
            stats::std_dev(&samples).unwrap_or(f64::NAN)
        };
        Self {
            trials,
            mean,
            stddev,
            failed_trials,
            samples,
        }
    }

    pub fn confidence_lo(&self) -> f64 {
        self.confidence_interval().0
    }

    pub fn confidence_hi(&self) -> f64 {
        self.confidence_interval().1
    }

    fn confidence_interval(&self) -> (f64, f64) {
        stats::confidence_interval(self.mean, self.stddev, self.trials, stats::Z_95)
    }
}

/// A completed batch of percolation trials on n×n grids.
///
/// # Examples
/// ```
/// use percolation::{ExperimentConfig, PercolationExperiment};
///
/// let config = ExperimentConfig::new(10, 20).with_seed(42);
/// let experiment = PercolationExperiment::with_config(&config).unwrap();
/// assert!(experiment.mean() > 0.0 && experiment.mean() <= 1.0);
/// assert!(experiment.confidence_lo() <= experiment.mean());
/// assert!(experiment.mean() <= experiment.confidence_hi());
/// ```
#[derive(Debug, Clone)]
pub struct PercolationExperiment {
    size: usize,
    result: ExperimentResult,
}

impl PercolationExperiment {
    /// Runs `trials` trials on `size`×`size` grids with OS-seeded draws.
    ///
    /// # Errors
    /// `InvalidArgument` if `size` or `trials` is zero.
    pub fn new(size: usize, trials: usize) -> Result<Self> {
        Self::with_config(&ExperimentConfig::new(size, trials))
    }

    /// Runs the experiment described by `config`.
    pub fn with_config(config: &ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        };
        Self::with_source(config.size, config.trials, RandomSites::new(rng))
    }

    /// Runs the experiment drawing coordinates from `source`.
    pub fn with_source<S: SiteSource>(size: usize, trials: usize, mut source: S) -> Result<Self> {
        ExperimentConfig::new(size, trials).validate()?;

        let mut samples = Vec::with_capacity(trials);
        let mut failed_trials = 0;
        for trial in 0..trials {
            match run_trial(size, &mut source) {
                Ok(sample) => {
                    debug!(trial, sample, "trial percolated");
                    samples.push(sample);
                }
                Err(cause) => {
                    let err = PercolationError::TrialFailure {
                        trial,
                        source: Box::new(cause),
                    };
                    warn!(error = %err, "trial did not reach percolation");
                    failed_trials += 1;
                    samples.push(FAILED_TRIAL_SAMPLE);
                }
            }
        }

        let result = ExperimentResult::from_samples(samples, failed_trials);
        info!(
            size,
            trials,
            failed_trials,
            mean = result.mean,
            stddev = result.stddev,
            "experiment complete"
        );
        Ok(Self { size, result })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trials(&self) -> usize {
        self.result.trials
    }

    pub fn mean(&self) -> f64 {
        self.result.mean
    }

    pub fn stddev(&self) -> f64 {
        self.result.stddev
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.result.confidence_lo()
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.result.confidence_hi()
    }

    pub fn failed_trials(&self) -> usize {
        self.result.failed_trials
    }

    pub fn samples(&self) -> &[f64] {
        &self.result.samples
    }

    pub fn result(&self) -> &ExperimentResult {
        &self.result
    }

    pub fn into_result(self) -> ExperimentResult {
        self.result
    }
}

/// Opens random sites of a fresh grid until it percolates and returns the
/// open fraction at that point.
///
/// Already-open draws are skipped and redrawn.
///
/// # Errors
/// Any error the grid raises for a drawn coordinate.
pub fn run_trial<S: SiteSource + ?Sized>(size: usize, source: &mut S) -> Result<f64> {
    let mut grid = PercolationGrid::new(size)?;
    while !grid.percolates() {
        let row = source.uniform(size) + 1;
        let col = source.uniform(size) + 1;
        if !grid.is_open(row, col)? {
            grid.open(row, col)?;
        }
    }
    Ok(grid.open_fraction())
}
