use anyhow::Result;
use tsp_challenges::{DistanceMatrix, Tour};

pub mod identity;
pub mod improved_tsp_approximation;
pub mod nearest_neighbour;

/// Returns `Ok(None)` when no tour was produced.
pub type Algorithm = fn(&DistanceMatrix) -> Result<Option<Tour>>;

pub const ALGORITHMS: [&str; 3] = [
    "identity",
    "improved_tsp_approximation",
    "nearest_neighbour",
];

pub fn get_algorithm(name: &str) -> Option<Algorithm> {
    match name {
        "identity" => Some(identity::solve_challenge),
        "improved_tsp_approximation" => Some(improved_tsp_approximation::solve_challenge),
        "nearest_neighbour" => Some(nearest_neighbour::solve_challenge),
        _ => None,
    }
}
