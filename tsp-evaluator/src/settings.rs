use crate::{evaluate_tsp, Evaluation, FailurePolicy};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{io::Write, path::PathBuf};
use tsp_algorithms::{get_algorithm, Algorithm, ALGORITHMS};
use tsp_challenges::{DistanceMatrix, TestCases, Tour, DEFAULT_CASES_PATH};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvaluationSettings {
    pub cases_path: PathBuf,
    pub algorithm: String,
    pub policy: FailurePolicy,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            cases_path: PathBuf::from(DEFAULT_CASES_PATH),
            algorithm: "improved_tsp_approximation".to_string(),
            policy: FailurePolicy::Abort,
        }
    }
}

impl EvaluationSettings {
    /// Parses settings from a json string, a `.json` path, or `-` for stdin.
    /// Missing fields take their defaults.
    pub fn load(arg: &str) -> Result<Self> {
        tsp_utils::load_json_arg(arg)
    }

    pub fn resolve_algorithm(&self) -> Result<Algorithm> {
        get_algorithm(&self.algorithm).ok_or_else(|| {
            anyhow!(
                "Unknown algorithm '{}'. Expected one of: {}",
                self.algorithm,
                ALGORITHMS.join(", ")
            )
        })
    }
}

/// Loads the cases named by `settings` and evaluates them.
pub fn load_and_evaluate<F, W>(
    settings: &EvaluationSettings,
    approximation: F,
    out: &mut W,
) -> Result<Evaluation>
where
    F: Fn(&DistanceMatrix) -> Result<Option<Tour>> + Sync,
    W: Write,
{
    let cases = TestCases::load(&settings.cases_path)?;
    evaluate_tsp(&cases, approximation, settings.policy, out)
}
