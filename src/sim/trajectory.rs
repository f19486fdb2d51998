use nalgebra::DMatrix;

use crate::state::StateVector;

// ---------------------------------------------------------------------------
// Trajectory: node x (steps + 1) table, column i is the state at grid point i
// ---------------------------------------------------------------------------

/// Computed history of the state vector.
///
/// Stored column-major: equation `k` at sample `i` lives at `(k, i)`. Only the
/// integrator writes to it; callers get read-only, bounds-checked access.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    data: DMatrix<f64>,
}

impl Trajectory {
    /// Table with one row per component of `initial` and `samples` columns; column 0 is `initial`.
    pub(crate) fn with_initial(initial: &StateVector, samples: usize) -> Self {
        let mut data = DMatrix::zeros(initial.len(), samples);
        data.set_column(0, initial);
        Self { data }
    }

    pub(crate) fn set_sample(&mut self, i: usize, state: &StateVector) {
        self.data.set_column(i, state);
    }

    /// Number of equations.
    pub fn node(&self) -> usize {
        self.data.nrows()
    }

    /// Number of grid samples (`steps + 1`).
    pub fn samples(&self) -> usize {
        self.data.ncols()
    }

    /// Value of equation `k` at sample `i`.
    pub fn get(&self, k: usize, i: usize) -> Option<f64> {
        self.data.get((k, i)).copied()
    }

    /// Full state at sample `i`.
    pub fn state(&self, i: usize) -> Option<StateVector> {
        (i < self.samples()).then(|| self.data.column(i).into_owned())
    }

    /// State at the last sample.
    pub fn final_state(&self) -> StateVector {
        self.data.column(self.samples() - 1).into_owned()
    }

    /// History of equation `k` across all samples.
    pub fn component(&self, k: usize) -> Option<Vec<f64>> {
        (k < self.node()).then(|| self.data.row(k).iter().copied().collect())
    }

    /// Iterate over the state at each sample, as slices.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // column-major storage: each chunk of `node` values is one sample
        self.data.as_slice().chunks_exact(self.node().max(1))
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        let mut t = Trajectory::with_initial(&StateVector::from_vec(vec![1.0, 2.0]), 3);
        t.set_sample(1, &StateVector::from_vec(vec![3.0, 4.0]));
        t.set_sample(2, &StateVector::from_vec(vec![5.0, 6.0]));
        t
    }

    #[test]
    fn shape_and_access() {
        let t = sample();
        assert_eq!(t.node(), 2);
        assert_eq!(t.samples(), 3);
        assert_eq!(t.get(0, 0), Some(1.0));
        assert_eq!(t.get(1, 2), Some(6.0));
        assert_eq!(t.get(2, 0), None);
        assert_eq!(t.get(0, 3), None);
    }

    #[test]
    fn rows_and_columns() {
        let t = sample();
        assert_eq!(t.component(0), Some(vec![1.0, 3.0, 5.0]));
        assert_eq!(t.component(2), None);
        assert_eq!(t.state(1).unwrap().as_slice(), &[3.0, 4.0]);
        assert!(t.state(3).is_none());
        assert_eq!(t.final_state().as_slice(), &[5.0, 6.0]);
    }

    #[test]
    fn iterates_samples_in_order() {
        let t = sample();
        let rows: Vec<Vec<f64>> = t.iter().map(|s| s.to_vec()).collect();
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
    }
}
