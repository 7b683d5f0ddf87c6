//! Site percolation on an n×n grid.
//!
//! Sites start [`SiteState::Blocked`] and are opened one at a time. An open
//! site becomes [`SiteState::Full`] once a chain of open neighbours links it
//! to the top row, and the grid percolates the moment a bottom-row site
//! turns full.
//!
//! # Algorithm
//!
//! Open-adjacency is tracked in a [`UnionFind`] over the n² cells. Fullness
//! is propagated explicitly: whenever a cell turns full, a breadth-first
//! worklist walks outward through open neighbours and promotes each of them.
//! Every cell is promoted at most once, so the total flood-fill work over a
//! grid's lifetime is O(n²) and `percolates()` is a flag read.
//!
//! Coordinates are 1-indexed: `row, col ∈ [1, n]`.

use std::collections::VecDeque;

use tracing::trace;

use crate::collections::UnionFind;
use crate::error::{PercolationError, Result};

/// State of one site. Only ever advances `Blocked → Open → Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiteState {
    #[default]
    Blocked,
    Open,
    Full,
}

impl SiteState {
    /// `true` for both `Open` and `Full`.
    pub fn is_open(self) -> bool {
        !matches!(self, SiteState::Blocked)
    }

    pub fn is_full(self) -> bool {
        matches!(self, SiteState::Full)
    }
}

/// An n×n percolation system.
///
/// # Examples
/// ```
/// use percolation::PercolationGrid;
///
/// let mut grid = PercolationGrid::new(3).unwrap();
/// grid.open(3, 2).unwrap();
/// grid.open(2, 2).unwrap();
/// assert!(!grid.is_full(3, 2).unwrap());
///
/// grid.open(1, 2).unwrap();
/// assert!(grid.is_full(3, 2).unwrap());
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PercolationGrid {
    size: usize,
    sites: Vec<SiteState>,
    open_sites: usize,
    percolated: bool,
    connectivity: UnionFind,
}

impl PercolationGrid {
    /// Creates an n×n grid with every site blocked.
    ///
    /// # Errors
    /// `InvalidArgument` if `size == 0`.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(PercolationError::invalid_argument(
                "grid size must be positive, got 0",
            ));
        }
        let cells = size.checked_mul(size).ok_or_else(|| {
            PercolationError::invalid_argument(format!("grid size {size} is too large"))
        })?;
        Ok(Self {
            size,
            sites: vec![SiteState::Blocked; cells],
            open_sites: 0,
            percolated: false,
            connectivity: UnionFind::new(cells),
        })
    }

    /// Side length n.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Opens site `(row, col)`; a no-op if it is already open.
    ///
    /// Top-row sites open straight into `Full`. Any other site turns full
    /// as soon as it touches a full neighbour, and its fullness then floods
    /// through every open site it is linked to.
    ///
    /// # Errors
    /// `OutOfBounds` if `row` or `col` lies outside `[1, n]`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let id = self.index(row, col)?;
        if self.sites[id].is_open() {
            return Ok(());
        }

        self.sites[id] = if row == 1 {
            SiteState::Full
        } else {
            SiteState::Open
        };
        self.open_sites += 1;

        let mut touches_full = false;
        for neighbour in neighbours(self.size, id) {
            let state = self.sites[neighbour];
            if state.is_open() {
                self.connectivity.union(id, neighbour);
                touches_full |= state.is_full();
            }
        }

        if touches_full || self.sites[id].is_full() {
            self.flood_from(id);
        }
        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        self.state(row, col).map(SiteState::is_open)
    }

    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        self.state(row, col).map(SiteState::is_full)
    }

    /// Current state of `(row, col)`.
    pub fn state(&self, row: usize, col: usize) -> Result<SiteState> {
        let id = self.index(row, col)?;
        Ok(self.sites[id])
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    /// Fraction of the n² sites that are open.
    pub fn open_fraction(&self) -> f64 {
        self.open_sites as f64 / self.sites.len() as f64
    }

    pub fn percolates(&self) -> bool {
        self.percolated
    }

    /// Whether two open sites are joined by a chain of open neighbours.
    ///
    /// A blocked site is connected to nothing.
    pub fn is_connected(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<bool> {
        let first = self.index(a.0, a.1)?;
        let second = self.index(b.0, b.1)?;
        if !self.sites[first].is_open() || !self.sites[second].is_open() {
            return Ok(false);
        }
        Ok(self.connectivity.connected(first, second))
    }

    /// Number of open sites in the cluster containing `(row, col)`, or 0
    /// for a blocked site.
    pub fn cluster_size(&mut self, row: usize, col: usize) -> Result<usize> {
        let id = self.index(row, col)?;
        if !self.sites[id].is_open() {
            return Ok(0);
        }
        Ok(self.connectivity.component_size(id))
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row == 0 || col == 0 || row > self.size || col > self.size {
            return Err(PercolationError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok((row - 1) * self.size + (col - 1))
    }

    /// Marks `start` full and promotes every open site reachable from it.
    fn flood_from(&mut self, start: usize) {
        self.promote(start);
        let mut worklist = VecDeque::from([start]);
        while let Some(cell) = worklist.pop_front() {
            for neighbour in neighbours(self.size, cell) {
                if self.sites[neighbour] == SiteState::Open {
                    self.promote(neighbour);
                    worklist.push_back(neighbour);
                }
            }
        }
    }

    fn promote(&mut self, id: usize) {
        self.sites[id] = SiteState::Full;
        if !self.percolated && id / self.size == self.size - 1 {
            self.percolated = true;
            trace!(
                size = self.size,
                open_sites = self.open_sites,
                "grid percolates"
            );
        }
    }
}

/// In-bounds neighbours of cell `id`, in up, left, right, down order.
fn neighbours(size: usize, id: usize) -> impl Iterator<Item = usize> {
    let (row, col) = (id / size, id % size);
    [
        (row > 0).then(|| id - size),
        (col > 0).then(|| id - 1),
        (col + 1 < size).then(|| id + 1),
        (row + 1 < size).then(|| id + size),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_all(grid: &mut PercolationGrid, sites: &[(usize, usize)]) {
        for &(row, col) in sites {
            grid.open(row, col).unwrap();
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = PercolationGrid::new(0).unwrap_err();
        assert!(matches!(err, PercolationError::InvalidArgument { .. }));
    }

    #[test]
    fn test_neighbours_order_and_bounds() {
        // 3×3, centre cell 4.
        assert_eq!(neighbours(3, 4).collect::<Vec<_>>(), vec![1, 3, 5, 7]);
        // Top-left corner.
        assert_eq!(neighbours(3, 0).collect::<Vec<_>>(), vec![1, 3]);
        // Bottom-right corner.
        assert_eq!(neighbours(3, 8).collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(neighbours(1, 0).count(), 0);
    }

    #[test]
    fn test_single_cell_grid_percolates_on_open() {
        let mut grid = PercolationGrid::new(1).unwrap();
        assert!(!grid.percolates());
        grid.open(1, 1).unwrap();
        assert!(grid.is_full(1, 1).unwrap());
        assert!(grid.percolates());
        assert_eq!(grid.open_fraction(), 1.0);
    }

    #[test]
    fn test_open_site_without_full_neighbour_stays_open() {
        let mut grid = PercolationGrid::new(4).unwrap();
        grid.open(3, 3).unwrap();
        assert_eq!(grid.state(3, 3).unwrap(), SiteState::Open);
        assert_eq!(grid.state(2, 3).unwrap(), SiteState::Blocked);
    }

    #[test]
    fn test_bridge_fills_landlocked_region() {
        // An open U-shaped pocket below row 2, reachable only through (2,1).
        let mut grid = PercolationGrid::new(5).unwrap();
        open_all(
            &mut grid,
            &[(3, 1), (4, 1), (4, 2), (4, 3), (3, 3), (3, 4), (5, 4), (4, 4)],
        );
        grid.open(1, 1).unwrap();
        assert!(!grid.is_full(3, 1).unwrap());
        assert!(!grid.percolates());

        grid.open(2, 1).unwrap();
        for (row, col) in [(3, 1), (4, 1), (4, 2), (4, 3), (3, 3), (3, 4), (4, 4), (5, 4)] {
            assert!(grid.is_full(row, col).unwrap(), "({row}, {col}) should be full");
        }
        assert!(grid.percolates());
    }

    #[test]
    fn test_flood_travels_upward_and_sideways() {
        // Full path reaches the pocket from below and must climb back up.
        let mut grid = PercolationGrid::new(4).unwrap();
        open_all(&mut grid, &[(2, 4), (3, 4), (4, 4), (4, 3), (4, 2), (3, 2), (2, 2)]);
        assert!(!grid.is_full(2, 2).unwrap());
        grid.open(1, 4).unwrap();
        assert!(grid.is_full(2, 2).unwrap());
        assert!(grid.is_full(3, 2).unwrap());
        assert!(grid.percolates());
    }

    #[test]
    fn test_is_connected_and_cluster_size() {
        let mut grid = PercolationGrid::new(3).unwrap();
        open_all(&mut grid, &[(2, 1), (2, 2), (3, 3)]);
        assert!(grid.is_connected((2, 1), (2, 2)).unwrap());
        assert!(!grid.is_connected((2, 2), (3, 3)).unwrap());
        assert!(!grid.is_connected((1, 1), (1, 1)).unwrap());
        assert_eq!(grid.cluster_size(2, 1).unwrap(), 2);
        assert_eq!(grid.cluster_size(3, 3).unwrap(), 1);
        assert_eq!(grid.cluster_size(1, 3).unwrap(), 0);

        grid.open(2, 3).unwrap();
        assert!(grid.is_connected((2, 1), (3, 3)).unwrap());
        assert_eq!(grid.cluster_size(3, 3).unwrap(), 4);
        assert!(grid.is_connected((0, 1), (1, 1)).is_err());
    }

    #[test]
    fn test_connectivity_without_fullness() {
        // Connected to the bottom but not the top: open, not full, no percolation.
        let mut grid = PercolationGrid::new(3).unwrap();
        open_all(&mut grid, &[(2, 2), (3, 2)]);
        assert!(grid.is_connected((2, 2), (3, 2)).unwrap());
        assert!(!grid.is_full(3, 2).unwrap());
        assert!(!grid.percolates());
    }

    #[test]
    fn test_percolation_stays_latched() {
        let mut grid = PercolationGrid::new(2).unwrap();
        open_all(&mut grid, &[(1, 1), (2, 1)]);
        assert!(grid.percolates());
        open_all(&mut grid, &[(1, 2), (2, 2)]);
        assert!(grid.percolates());
        assert_eq!(grid.number_of_open_sites(), 4);
    }
}
