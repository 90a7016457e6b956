use crate::travelling_salesman::{Difficulty, DistanceMatrix};
use anyhow::{Context, Result};
use logging_timer::time;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

pub const DEFAULT_CASES_PATH: &str = "tsp_cases.json";

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Files,
    Generated,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Files => write!(f, "files"),
            Category::Generated => write!(f, "generated"),
        }
    }
}

/// Fixed instances under `files`, synthetic ones under `generated`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TestCases {
    pub files: Vec<DistanceMatrix>,
    pub generated: Vec<DistanceMatrix>,
}

impl TestCases {
    #[time]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cases: TestCases = tsp_utils::load_json_file(path)
            .with_context(|| format!("Failed to load test cases from {}", path.display()))?;
        log::debug!(
            "loaded {} file cases and {} generated cases from {}",
            cases.files.len(),
            cases.generated.len(),
            path.display()
        );
        Ok(cases)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        tsp_utils::save_json_file(self, path)
    }

    /// Fills the `generated` category with `num_generated` seeded instances.
    #[time]
    pub fn generate(
        seed: &[u8; 32],
        files: Vec<DistanceMatrix>,
        num_generated: usize,
        difficulty: &Difficulty,
    ) -> Result<Self> {
        let mut rng = StdRng::from_seed(seed.clone());
        let mut generated = Vec::with_capacity(num_generated);
        for _ in 0..num_generated {
            generated.push(DistanceMatrix::generate_instance(&rng.gen(), difficulty)?);
        }
        Ok(Self { files, generated })
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every case with its running index, `files` first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Category, &DistanceMatrix)> + '_ {
        self.files
            .iter()
            .map(|case| (Category::Files, case))
            .chain(self.generated.iter().map(|case| (Category::Generated, case)))
            .enumerate()
            .map(|(index, (category, case))| (index, category, case))
    }
}
