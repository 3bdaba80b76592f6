//! Trajectory: The Result of One Simulation Run
//!
//! A time-ordered matrix of population samples, one row per time point and
//! one column per species, plus the divergence flag the analyzer consumes.
//! Owned by the caller after the run; nothing in the crate mutates it.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Populations over time for every species in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    species: Vec<String>,
    times: Vec<f64>,
    /// Row per sample, column per species
    populations: Array2<f64>,
    diverged: bool,
}

impl Trajectory {
    pub(crate) fn new(
        species: Vec<String>,
        times: Vec<f64>,
        populations: Array2<f64>,
        diverged: bool,
    ) -> Self {
        debug_assert_eq!(times.len(), populations.nrows());
        debug_assert_eq!(species.len(), populations.ncols());
        Self {
            species,
            times,
            populations,
            diverged,
        }
    }

    /// Number of time samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Species labels, column-aligned with the population matrix
    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    /// Strictly increasing sample times
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn time(&self, sample: usize) -> f64 {
        self.times[sample]
    }

    /// All populations at one time point
    pub fn sample(&self, sample: usize) -> ArrayView1<'_, f64> {
        self.populations.row(sample)
    }

    /// One species' full time series
    pub fn series(&self, species: usize) -> ArrayView1<'_, f64> {
        self.populations.column(species)
    }

    /// Time series looked up by species id
    pub fn series_by_id(&self, id: &str) -> Option<ArrayView1<'_, f64>> {
        self.species
            .iter()
            .position(|s| s == id)
            .map(|index| self.series(index))
    }

    /// Population of one species at one time point
    pub fn population(&self, sample: usize, species: usize) -> f64 {
        self.populations[[sample, species]]
    }

    /// Populations at the last sample
    pub fn final_sample(&self) -> ArrayView1<'_, f64> {
        self.populations.row(self.times.len() - 1)
    }

    /// Did the run blow past the numeric bound (or go non-finite)?
    pub fn diverged(&self) -> bool {
        self.diverged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn trajectory() -> Trajectory {
        Trajectory::new(
            vec!["prey".into(), "predator".into()],
            vec![0.0, 0.5, 1.0],
            array![[10.0, 5.0], [12.0, 6.0], [11.0, 7.0]],
            false,
        )
    }

    #[test]
    fn test_accessors() {
        let traj = trajectory();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.n_species(), 2);
        assert_eq!(traj.population(1, 0), 12.0);
        assert_eq!(traj.series(1).to_vec(), vec![5.0, 6.0, 7.0]);
        assert_eq!(traj.final_sample().to_vec(), vec![11.0, 7.0]);
    }

    #[test]
    fn test_series_by_id() {
        let traj = trajectory();
        assert_eq!(
            traj.series_by_id("prey").map(|s| s.to_vec()),
            Some(vec![10.0, 12.0, 11.0])
        );
        assert!(traj.series_by_id("wolf").is_none());
    }
}
