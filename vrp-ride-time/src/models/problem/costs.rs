#[cfg(test)]
#[path = "../../../tests/unit/models/problem/costs_test.rs"]
mod costs_test;

use crate::models::common::*;
use crate::utils::GenericResult;
use std::sync::Arc;

/// Provides travel durations and distances between locations.
pub trait TransportCost {
    /// Returns travel duration for the profile regardless of time.
    fn duration_approx(&self, profile: &Profile, from: Location, to: Location) -> Duration;

    /// Returns travel distance for the profile regardless of time.
    fn distance_approx(&self, profile: &Profile, from: Location, to: Location) -> Distance;
}

/// Square routing matrices of one profile stored row by row: an entry for `from -> to` is at
/// `from * size + to`.
pub struct MatrixData {
    /// A profile index.
    pub index: usize,
    /// Travel durations.
    pub durations: Vec<Duration>,
    /// Travel distances.
    pub distances: Vec<Distance>,
}

impl MatrixData {
    /// Creates `MatrixData` instance.
    pub fn new(index: usize, durations: Vec<Duration>, distances: Vec<Distance>) -> Self {
        Self { index, durations, distances }
    }
}

/// Creates time independent routing from matrices, one per profile.
pub fn create_matrix_transport_cost(costs: Vec<MatrixData>) -> GenericResult<Arc<dyn TransportCost + Send + Sync>> {
    let size = costs
        .first()
        .map(|matrix| (matrix.durations.len() as f64).sqrt().round() as usize)
        .ok_or("no matrix data found")?;

    if size == 0 {
        return Err("empty matrix data".into());
    }

    if costs.iter().any(|matrix| matrix.distances.len() != matrix.durations.len()) {
        return Err("distance and duration collections have different length".into());
    }

    if costs.iter().any(|matrix| matrix.durations.len() != size * size) {
        return Err(format!("matrix data is expected to be square with size {size}").into());
    }

    Ok(Arc::new(MatrixTransportCost::new(costs, size)?))
}

struct MatrixTransportCost {
    matrices: Vec<MatrixData>,
    size: usize,
}

impl MatrixTransportCost {
    fn new(mut matrices: Vec<MatrixData>, size: usize) -> GenericResult<Self> {
        matrices.sort_by_key(|matrix| matrix.index);

        if matrices.iter().enumerate().any(|(idx, matrix)| matrix.index != idx) {
            return Err("profile indices must be unique and start from zero".into());
        }

        Ok(Self { matrices, size })
    }

    fn entry(&self, from: Location, to: Location) -> usize {
        from * self.size + to
    }
}

impl TransportCost for MatrixTransportCost {
    fn duration_approx(&self, profile: &Profile, from: Location, to: Location) -> Duration {
        self.matrices[profile.index].durations[self.entry(from, to)] * profile.scale
    }

    fn distance_approx(&self, profile: &Profile, from: Location, to: Location) -> Distance {
        self.matrices[profile.index].distances[self.entry(from, to)]
    }
}
