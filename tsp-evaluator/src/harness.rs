use anyhow::{anyhow, Context, Result};
use logging_timer::time;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tsp_challenges::{verify_tour, Category, DistanceMatrix, TestCases, Tour};

/// What to do when a case produces an invalid tour.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run at the first invalid case.
    #[default]
    Abort,
    /// Record the case as skipped and leave it out of the total.
    Skip,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseOutcome {
    Scored {
        index: usize,
        category: Category,
        cost: f64,
    },
    Skipped {
        index: usize,
        category: Category,
        reason: String,
    },
}

impl CaseOutcome {
    pub fn index(&self) -> usize {
        match self {
            CaseOutcome::Scored { index, .. } | CaseOutcome::Skipped { index, .. } => *index,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            CaseOutcome::Scored { cost, .. } => Some(*cost),
            CaseOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub cases: Vec<CaseOutcome>,
    pub total_cost: f64,
}

impl Evaluation {
    pub fn num_skipped(&self) -> usize {
        self.cases.iter().filter(|c| c.cost().is_none()).count()
    }
}

/// Runs `approximation` on a single matrix, checks the tour is a permutation
/// and returns its cost.
pub fn evaluate_case<F>(matrix: &DistanceMatrix, approximation: &F) -> Result<f64>
where
    F: Fn(&DistanceMatrix) -> Result<Option<Tour>>,
{
    let tour = approximation(matrix)
        .context("Approximation failed")?
        .ok_or_else(|| anyhow!("No tour was returned"))?;
    Ok(verify_tour(matrix, &tour)?)
}

#[cfg(not(feature = "parallel"))]
fn run_cases<'a, F>(
    cases: &'a TestCases,
    approximation: &'a F,
) -> impl Iterator<Item = Result<f64>> + 'a
where
    F: Fn(&DistanceMatrix) -> Result<Option<Tour>> + Sync,
{
    cases
        .iter()
        .map(move |(_, _, matrix)| evaluate_case(matrix, approximation))
}

#[cfg(feature = "parallel")]
fn run_cases<'a, F>(
    cases: &'a TestCases,
    approximation: &'a F,
) -> impl Iterator<Item = Result<f64>> + 'a
where
    F: Fn(&DistanceMatrix) -> Result<Option<Tour>> + Sync,
{
    use rayon::prelude::*;
    let matrices: Vec<&DistanceMatrix> = cases.iter().map(|(_, _, matrix)| matrix).collect();
    matrices
        .into_par_iter()
        .map(|matrix| evaluate_case(matrix, approximation))
        .collect::<Vec<_>>()
        .into_iter()
}

/// Evaluates `approximation` on every case, `files` first, writing one
/// `Case {index}: {cost}` line per case and a final `Total cost: {total}`
/// line to `out`.
///
/// With [`FailurePolicy::Abort`] the first invalid case ends the run with an
/// error and no total is written.
#[time]
pub fn evaluate_tsp<F, W>(
    cases: &TestCases,
    approximation: F,
    policy: FailurePolicy,
    out: &mut W,
) -> Result<Evaluation>
where
    F: Fn(&DistanceMatrix) -> Result<Option<Tour>> + Sync,
    W: Write,
{
    let mut outcomes = Vec::with_capacity(cases.len());
    let mut total_cost = 0.0;
    for ((index, category, _), result) in cases.iter().zip(run_cases(cases, &approximation)) {
        match result {
            Ok(cost) => {
                writeln!(out, "Case {}: {}", index, cost)?;
                total_cost += cost;
                outcomes.push(CaseOutcome::Scored {
                    index,
                    category,
                    cost,
                });
            }
            Err(e) if policy == FailurePolicy::Abort => {
                return Err(e.context(format!("Case {} ({}) is invalid", index, category)));
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                log::warn!("skipping case {} ({}): {}", index, category, reason);
                writeln!(out, "Case {}: skipped ({})", index, reason)?;
                outcomes.push(CaseOutcome::Skipped {
                    index,
                    category,
                    reason,
                });
            }
        }
    }
    writeln!(out, "Total cost: {}", total_cost)?;
    let evaluation = Evaluation {
        cases: outcomes,
        total_cost,
    };
    log::debug!(
        "evaluated {} cases, {} skipped",
        evaluation.cases.len(),
        evaluation.num_skipped()
    );
    Ok(evaluation)
}
