use crate::TourError;
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashSet, fmt};

/// Returned by [`validate_tour`] when a tour cannot be costed.
pub const INVALID_TOUR_COST: f64 = -1.0;

pub type Tour = Vec<usize>;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Difficulty {
    pub size: usize,
    #[serde(default)]
    pub forbidden_edges_percent: u32,
}

/// Square table of travel costs. `f64::INFINITY` marks a forbidden transition.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, TourError> {
        let expected = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TourError::NonSquareMatrix {
                row,
                expected,
                actual: r.len(),
            });
        }
        Ok(Self { rows })
    }

    pub fn num_cities(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &Vec<Vec<f64>> {
        &self.rows
    }

    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn is_forbidden(&self, from: usize, to: usize) -> bool {
        self.get(from, to).map_or(true, |d| d == f64::INFINITY)
    }

    /// Builds a distance matrix from a seeded random instance.
    ///
    /// Cities are distinct points on a 1001x1001 grid with Euclidean distances.
    /// A hidden random cycle is kept finite, every other edge is forbidden
    /// (in both directions) with probability `forbidden_edges_percent / 100`,
    /// so each instance admits at least one valid tour.
    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        if difficulty.size < 3 {
            return Err(anyhow!("Size must be at least 3"));
        }
        if difficulty.forbidden_edges_percent > 100 {
            return Err(anyhow!(
                "Forbidden edges percent ({}) must be at most 100",
                difficulty.forbidden_edges_percent
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());
        let num_nodes = difficulty.size;

        let mut node_positions: Vec<(i32, i32)> = Vec::with_capacity(num_nodes);
        let mut node_positions_set: HashSet<(i32, i32)> = HashSet::with_capacity(num_nodes);
        while node_positions.len() < num_nodes {
            let pos = (rng.gen_range(0..=1000), rng.gen_range(0..=1000));
            if node_positions_set.contains(&pos) {
                continue;
            }
            node_positions.push(pos);
            node_positions_set.insert(pos);
        }

        let mut rows: Vec<Vec<f64>> = node_positions
            .iter()
            .map(|&from| {
                node_positions
                    .iter()
                    .map(|&to| {
                        let dx = (from.0 - to.0) as f64;
                        let dy = (from.1 - to.1) as f64;
                        dx.hypot(dy)
                    })
                    .collect()
            })
            .collect();

        if difficulty.forbidden_edges_percent > 0 {
            let mut hidden_tour: Vec<usize> = (0..num_nodes).collect();
            hidden_tour.shuffle(&mut rng);
            let kept: HashSet<(usize, usize)> = (0..num_nodes)
                .map(|i| {
                    let a = hidden_tour[i];
                    let b = hidden_tour[(i + 1) % num_nodes];
                    (a.min(b), a.max(b))
                })
                .collect();
            for i in 0..num_nodes {
                for j in (i + 1)..num_nodes {
                    if kept.contains(&(i, j)) {
                        continue;
                    }
                    if rng.gen_ratio(difficulty.forbidden_edges_percent, 100) {
                        rows[i][j] = f64::INFINITY;
                        rows[j][i] = f64::INFINITY;
                    }
                }
            }
        }

        Ok(Self::new(rows)?)
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = TourError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

/// A single matrix entry on the wire. JSON has no infinity, so forbidden
/// transitions are written as `null` and also accepted as `"inf"`.
struct Distance(f64);

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0 == f64::INFINITY {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DistanceVisitor;

        impl<'de> de::Visitor<'de> for DistanceVisitor {
            type Value = Distance;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number, null, or \"inf\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Distance(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Distance(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Distance(v as f64))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Distance(f64::INFINITY))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Distance(f64::INFINITY))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v.to_ascii_lowercase().as_str() {
                    "inf" | "+inf" | "infinity" => Ok(Distance(f64::INFINITY)),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(DistanceVisitor)
    }
}

impl Serialize for DistanceMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            self.rows
                .iter()
                .map(|row| row.iter().map(|&d| Distance(d)).collect::<Vec<_>>()),
        )
    }
}

impl<'de> Deserialize<'de> for DistanceMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<Distance>>::deserialize(deserializer)?
            .into_iter()
            .map(|row| row.into_iter().map(|d| d.0).collect())
            .collect();
        DistanceMatrix::new(rows).map_err(de::Error::custom)
    }
}

/// Cyclic cost of `tour`, starting with the edge from the last city back to
/// the first. Does not check that `tour` is a permutation.
pub fn tour_cost(tour: &[usize], matrix: &DistanceMatrix) -> Result<f64, TourError> {
    let n = tour.len();
    let mut cost = 0.0;
    for i in 0..n {
        let from = tour[(i + n - 1) % n];
        let to = tour[i];
        let distance = matrix
            .get(from, to)
            .ok_or(TourError::CityOutOfRange {
                city: if from >= matrix.num_cities() { from } else { to },
                num_cities: matrix.num_cities(),
            })?;
        if distance == f64::INFINITY {
            return Err(TourError::InfiniteEdge { from, to });
        }
        cost += distance;
    }
    Ok(cost)
}

/// Returns the length of the tour if it is valid, [`INVALID_TOUR_COST`]
/// otherwise.
pub fn validate_tour(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    tour_cost(tour, matrix).unwrap_or(INVALID_TOUR_COST)
}

/// Checks that `tour` visits every city of `matrix` exactly once.
pub fn validate_tour_basic(matrix: &DistanceMatrix, tour: &[usize]) -> Result<(), TourError> {
    let n = matrix.num_cities();
    if tour.len() != n {
        return Err(TourError::WrongLength {
            expected: n,
            actual: tour.len(),
        });
    }
    let mut sorted = tour.to_vec();
    sorted.sort_unstable();
    if sorted.iter().copied().eq(0..n) {
        return Ok(());
    }

    let mut counts = vec![0usize; n];
    let mut out_of_range = Vec::new();
    for &city in sorted.iter() {
        match counts.get_mut(city) {
            Some(count) => *count += 1,
            None => out_of_range.push(city),
        }
    }
    out_of_range.dedup();
    Err(TourError::NotAPermutation {
        missing: (0..n).filter(|&c| counts[c] == 0).collect(),
        repeated: (0..n).filter(|&c| counts[c] > 1).collect(),
        out_of_range,
    })
}

/// Permutation check followed by costing.
pub fn verify_tour(matrix: &DistanceMatrix, tour: &[usize]) -> Result<f64, TourError> {
    validate_tour_basic(matrix, tour)?;
    tour_cost(tour, matrix)
}
