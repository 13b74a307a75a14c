use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use svh_core::Points;
use svh_core::Seed;

/// One line of `calibration_results.jsonl`: the per-seed metrics from
/// stages A and B plus the final tier assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationRow {
    pub seed: Seed,
    pub stage_a_score: Points,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_b_ev_mean: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_b_ev_std: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_b_success_rate: Option<f32>,
    pub tier: String,
}

/// One line of `trace_pass.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracePassRow {
    pub seed: Seed,
    pub tier: String,
    pub steps: usize,
    /// Gameplay score of the trace's realized ordered-deck path.
    pub realized_score: Points,
}

/// One line of `trace_fail.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFailRow {
    pub seed: Seed,
    pub reason: String,
}

/// Run metadata persisted as `summary.json`. Everything a later reader
/// needs to reproduce or audit the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub run_id: String,
    pub engine_version: String,
    pub prng: String,
    pub seed_source: String,
    pub candidates_k: usize,
    pub rollouts_r: usize,
    pub quantile_policy: String,
    pub target_policy: String,
    pub cutoffs: [f32; 2],
    pub tiers: BTreeMap<String, usize>,
    pub targets: BTreeMap<String, Points>,
    pub refined: usize,
    pub passed: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_omit_absent_refinement_fields() {
        let row = CalibrationRow {
            seed: 7,
            stage_a_score: 420,
            stage_b_ev_mean: None,
            stage_b_ev_std: None,
            stage_b_success_rate: None,
            tier: "medium".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("stage_b_ev_mean"));
        assert!(json.contains("\"stage_a_score\":420"));
    }
}
