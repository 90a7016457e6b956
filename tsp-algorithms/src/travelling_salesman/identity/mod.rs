use anyhow::Result;
use tsp_challenges::{DistanceMatrix, Tour};

/// Visits cities in index order.
pub fn solve_challenge(matrix: &DistanceMatrix) -> Result<Option<Tour>> {
    Ok(Some((0..matrix.num_cities()).collect()))
}
