#[derive(Debug, Clone, PartialEq)]
pub enum TourError {
    CityOutOfRange {
        city: usize,
        num_cities: usize,
    },
    InfiniteEdge {
        from: usize,
        to: usize,
    },
    NonSquareMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
    NotAPermutation {
        missing: Vec<usize>,
        repeated: Vec<usize>,
        out_of_range: Vec<usize>,
    },
    WrongLength {
        expected: usize,
        actual: usize,
    },
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourError::CityOutOfRange { city, num_cities } => write!(
                f,
                "City '{}' is out of range. Matrix has '{}' cities",
                city, num_cities
            ),
            TourError::InfiniteEdge { from, to } => {
                write!(f, "Tour uses forbidden edge '{}' -> '{}'", from, to)
            }
            TourError::NonSquareMatrix {
                row,
                expected,
                actual,
            } => write!(
                f,
                "Distance matrix is not square. Row '{}' has '{}' entries, Expected: '{}'",
                row, actual, expected
            ),
            TourError::NotAPermutation {
                missing,
                repeated,
                out_of_range,
            } => write!(
                f,
                "Tour is not a permutation of all cities. Missing: '{:?}', Repeated: '{:?}', Out of range: '{:?}'",
                missing, repeated, out_of_range
            ),
            TourError::WrongLength { expected, actual } => write!(
                f,
                "Tour visits the wrong number of cities. Expected: '{}', Actual: '{}'",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for TourError {}
