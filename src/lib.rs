//! # percolation
//!
//! Site percolation on n×n grids and Monte Carlo estimation of the
//! percolation threshold.
//!
//! ## Modules
//!
//! - [`grid`] — the percolation system: open sites, full/open/blocked
//!   classification, percolation detection
//! - [`experiment`] — repeated independent trials and their statistics
//! - [`collections`] — the union-find forest tracking open clusters
//! - [`stats`] — mean, sample standard deviation, confidence intervals
//! - [`random`] — uniform coordinate sources
//!
//! ## Design Philosophy
//!
//! - **Incremental**: each `open` does amortized near-constant union-find
//!   work, and every site is flooded full at most once per grid
//! - **Numerical stability**: compensated summation for means, Welford's
//!   algorithm for variance
//! - **Property-based testing**: fullness is checked against a from-scratch
//!   flood fill via proptest

pub mod collections;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod random;
pub mod stats;

pub use error::{PercolationError, Result};
pub use experiment::{ExperimentConfig, ExperimentResult, PercolationExperiment};
pub use grid::{PercolationGrid, SiteState};
