//! Free-parameter grid discretization.
//!
//! When a query does not pin the free parameters, the engine sweeps each
//! one over `[0, 1]` in increments of the configured step and evaluates the
//! analytic equations at every grid cell. Cell order is lexicographic over
//! the free-parameter index vector (first parameter most significant) and
//! is the documented tie-break for "first passing candidate" semantics, so
//! both the iterator and the flat-index decoder here must agree on it.

use reach_core::config::EngineConfig;

/// Per-axis sample values: `0, step, 2·step, …` strictly below `1`, then
/// `1` exactly once. A step that does not evenly divide `1` still ends on
/// the exact endpoint. Steps outside `(0, 1]` (or non-finite) fall back to
/// the coarsest sweep so the loop below always terminates.
fn axis_values(step: f32) -> Vec<f32> {
    const EPS: f32 = 1e-6;
    let step = if step.is_finite() && step > 0.0 {
        step.min(1.0)
    } else {
        1.0
    };

    let mut values = Vec::new();
    let mut i = 0u32;
    loop {
        let v = i as f32 * step;
        if v >= 1.0 - EPS {
            break;
        }
        values.push(v);
        i += 1;
    }
    values.push(1.0);
    values
}

/// The ordered grid of free-parameter fraction vectors for one sweep.
///
/// With zero free parameters the grid has exactly one (empty) cell, so a
/// sweep always evaluates the analytic function at least once.
#[derive(Debug, Clone)]
pub struct FreeParameterGrid {
    axis: Vec<f32>,
    dims: usize,
}

impl FreeParameterGrid {
    /// Build a grid. Steps outside `(0, 1]` fall back to the coarsest sweep
    /// (endpoints only); engine paths validate the step before reaching
    /// here.
    pub fn new(num_free: usize, step: f32) -> Self {
        Self {
            axis: axis_values(step),
            dims: num_free,
        }
    }

    pub fn from_config(num_free: usize, config: &EngineConfig) -> Self {
        Self::new(num_free, config.discretization_step)
    }

    /// Samples along one axis (all axes share the same values).
    pub fn axis(&self) -> &[f32] {
        &self.axis
    }

    /// Number of free parameters.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Total number of grid cells: `axis_len ^ dims`.
    pub fn len(&self) -> usize {
        self.axis.len().pow(self.dims as u32)
    }

    pub fn is_empty(&self) -> bool {
        false // a grid always has at least the empty cell
    }

    /// Decode a flat cell index into its fraction vector.
    ///
    /// Mixed-radix, first parameter most significant, so ascending flat
    /// indices enumerate cells in lexicographic sweep order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn cell(&self, index: usize) -> Vec<f32> {
        assert!(index < self.len());
        let radix = self.axis.len();
        let mut remaining = index;
        let mut fractions = vec![0.0; self.dims];
        for d in (0..self.dims).rev() {
            fractions[d] = self.axis[remaining % radix];
            remaining /= radix;
        }
        fractions
    }

    /// Iterate cells in lexicographic sweep order.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            grid: self,
            next: 0,
        }
    }
}

/// Iterator over grid cells in sweep order.
pub struct Cells<'a> {
    grid: &'a FreeParameterGrid,
    next: usize,
}

impl Iterator for Cells<'_> {
    type Item = Vec<f32>;

    fn next(&mut self) -> Option<Vec<f32>> {
        if self.next >= self.grid.len() {
            return None;
        }
        let cell = self.grid.cell(self.next);
        self.next += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coarsest_step_gives_both_endpoints() {
        let grid = FreeParameterGrid::new(1, 1.0);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![vec![0.0], vec![1.0]]);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn degenerate_steps_fall_back_to_endpoints() {
        for step in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            let grid = FreeParameterGrid::new(1, step);
            let cells: Vec<_> = grid.cells().collect();
            assert_eq!(cells, vec![vec![0.0], vec![1.0]], "step {step}");
        }
    }

    #[test]
    fn step_dividing_one_includes_endpoint_once() {
        let grid = FreeParameterGrid::new(1, 0.1);
        assert_eq!(grid.axis().len(), 11);
        assert_relative_eq!(grid.axis()[0], 0.0);
        assert_relative_eq!(grid.axis()[10], 1.0);
        // No duplicated endpoint
        assert!(grid.axis()[9] < 1.0 - 1e-4);
    }

    #[test]
    fn non_dividing_step_still_ends_exactly_on_one() {
        let grid = FreeParameterGrid::new(1, 0.3);
        let axis = grid.axis();
        assert_eq!(axis.len(), 5);
        assert_relative_eq!(axis[3], 0.9, epsilon = 1e-6);
        assert_relative_eq!(axis[4], 1.0);
    }

    #[test]
    fn zero_free_parameters_is_a_single_empty_cell() {
        let grid = FreeParameterGrid::new(0, 0.1);
        assert_eq!(grid.len(), 1);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![Vec::<f32>::new()]);
    }

    #[test]
    fn two_parameters_sweep_lexicographically() {
        let grid = FreeParameterGrid::new(2, 1.0);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ]
        );
    }

    #[test]
    fn flat_index_decoding_matches_iteration() {
        let grid = FreeParameterGrid::new(2, 0.5);
        for (i, cell) in grid.cells().enumerate() {
            assert_eq!(grid.cell(i), cell);
        }
        assert_eq!(grid.len(), 9);
    }

    #[test]
    fn grid_size_grows_as_power_of_dims() {
        let grid = FreeParameterGrid::new(3, 0.5);
        assert_eq!(grid.axis().len(), 3); // 0, 0.5, 1
        assert_eq!(grid.len(), 27);
    }

    #[test]
    fn cells_reports_exact_size() {
        let grid = FreeParameterGrid::new(2, 0.5);
        let mut cells = grid.cells();
        assert_eq!(cells.len(), 9);
        cells.next();
        assert_eq!(cells.len(), 8);
    }
}
