pub const BUILD_TIME_PATH: &str = env!("CARGO_MANIFEST_DIR");

mod error;
pub use error::*;
pub mod independent_set;
pub mod test_cases;
pub mod travelling_salesman;

pub use independent_set::{find_conflict, is_independent_set, AdjacencyList};
pub use test_cases::{Category, TestCases, DEFAULT_CASES_PATH};
pub use travelling_salesman::{
    tour_cost, validate_tour, validate_tour_basic, verify_tour, Difficulty, DistanceMatrix, Tour,
    INVALID_TOUR_COST,
};
