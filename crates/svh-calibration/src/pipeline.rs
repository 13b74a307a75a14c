use super::artifacts::Artifacts;
use super::progress;
use super::records::CalibrationRow;
use super::records::Summary;
use super::records::TraceFailRow;
use super::records::TracePassRow;
use super::rollout::Rollout;
use anyhow::Result;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;
use svh_cards::Scoring;
use svh_core::ENGINE_VERSION;
use svh_core::PRNG_VERSION;
use svh_core::Points;
use svh_core::Seed;
use svh_dto::SeedManifest;
use svh_dto::TraceArtifact;
use svh_gameplay::Action;
use svh_gameplay::Event;
use svh_gameplay::Game;
use svh_gameplay::Tier;
use svh_policy::Heuristic;
use svh_policy::Trace;

/// One calibration run over a batch of seeds.
///
/// Stage A scores every seed with a blinded heuristic game. Stage B sends
/// the seeds near provisional tier cutoffs through the rollout evaluator.
/// Stage C gates every seed through the order-unknown trace before it may
/// enter a runtime pool. Per-seed work is parallel; stages are sequential
/// because B needs A's cutoffs and C needs the final tiers.
pub struct Pipeline {
    pub run_id: String,
    pub seeds: Vec<Seed>,
    pub samples: usize,
    pub candidates: usize,
    pub band: f32,
    pub seed_source: String,
    pub out: PathBuf,
}

/// Stage-B aggregates for one seed.
struct Refinement {
    mean: f32,
    std: f32,
    success: f32,
}

/// Stage-C verdict for one seed.
enum Gate {
    Pass { steps: usize, realized: Points },
    Fail { reason: String },
}

impl Pipeline {
    pub fn run(&self) -> Result<Summary> {
        anyhow::ensure!(!self.seeds.is_empty(), "no seeds to calibrate");
        let n = self.seeds.len();

        log::info!("[pipeline] stage A: {} seeds", n);
        let bar = progress(n);
        let stage_a = self
            .seeds
            .par_iter()
            .map(|&seed| {
                let score = Self::stage_a(seed);
                bar.inc(1);
                score
            })
            .collect::<Vec<Points>>();
        bar.finish_and_clear();

        // provisional bucketing drives boundary selection and stage-B targets
        let coarse = stage_a.iter().map(|&s| s as f32).collect::<Vec<f32>>();
        let provisional = Self::cutoffs(&coarse);
        let provisional_tiers = coarse
            .iter()
            .map(|&m| Self::tier(m, provisional))
            .collect::<Vec<Tier>>();
        let provisional_targets = Self::targets(&coarse, &provisional_tiers);

        let spread = Self::spread(&coarse);
        let boundary = (0..n)
            .filter(|&i| {
                provisional
                    .iter()
                    .any(|&cut| (coarse[i] - cut).abs() <= self.band * spread)
            })
            .collect::<Vec<usize>>();
        log::info!("[pipeline] stage B: {} boundary seeds", boundary.len());
        let bar = progress(boundary.len());
        let refined = boundary
            .par_iter()
            .map(|&i| {
                let floor = provisional_targets[&provisional_tiers[i].to_string()];
                let refinement = self.stage_b(self.seeds[i], floor);
                bar.inc(1);
                (i, refinement)
            })
            .collect::<BTreeMap<usize, Refinement>>();
        bar.finish_and_clear();

        // final bucketing over the combined metric
        let combined = (0..n)
            .map(|i| refined.get(&i).map(|r| r.mean).unwrap_or(coarse[i]))
            .collect::<Vec<f32>>();
        let cutoffs = Self::cutoffs(&combined);
        let tiers = combined
            .iter()
            .map(|&m| Self::tier(m, cutoffs))
            .collect::<Vec<Tier>>();
        let targets = Self::targets(&combined, &tiers);

        log::info!("[pipeline] stage C: trace gate over {} seeds", n);
        let bar = progress(n);
        let gates = self
            .seeds
            .par_iter()
            .map(|&seed| {
                let gate = Self::stage_c(seed);
                bar.inc(1);
                gate
            })
            .collect::<Vec<Gate>>();
        bar.finish_and_clear();

        self.emit(&stage_a, &refined, &tiers, &targets, &gates, cutoffs)
    }

    /// One blinded-heuristic game: the policy sees projections only while
    /// the real ordered draws happen underneath. Model-scored.
    fn stage_a(seed: Seed) -> Points {
        let (mut game, _) = Game::start(seed, None);
        let mut total = 0;
        while !game.over() {
            match Heuristic::decide(&game.projection()) {
                Some(hint) => {
                    let events = game.apply(hint.action).expect("policy actions are legal");
                    total += Self::model_points(&events);
                }
                None => break,
            }
        }
        total
    }

    /// Rollout refinement at the initial decision: aggregates of the best
    /// candidate, plus its success rate against the provisional target.
    fn stage_b(&self, seed: Seed, floor: Points) -> Refinement {
        let rollout = Rollout::new(self.samples, self.candidates);
        let (game, _) = Game::start(seed, None);
        let aggregates = rollout.evaluate(&game);
        let best = &aggregates[0];
        let success = best.scores.iter().filter(|&&s| s >= floor).count() as f32
            / best.scores.len() as f32;
        Refinement { mean: best.mean, std: best.std, success }
    }

    /// The order-unknown trace gate: produce the artifact, then re-apply it
    /// against the real ordered deck and demand a clean terminal game.
    fn stage_c(seed: Seed) -> Gate {
        let (game, _) = Game::start(seed, None);
        let trace = Trace::from((seed, game.projection()));
        let artifact = TraceArtifact::from(&trace);
        if let Err(reason) = artifact.admit() {
            return Gate::Fail { reason };
        }
        if !trace.complete() {
            return Gate::Fail { reason: "trace_incomplete".to_string() };
        }
        let (mut replay, _) = Game::start(seed, None);
        for step in &artifact.steps {
            let action = match Action::try_from(&step.recommended_action) {
                Ok(action) => action,
                Err(error) => return Gate::Fail { reason: error.key().to_string() },
            };
            if let Err(error) = replay.apply(action) {
                return Gate::Fail { reason: error.key().to_string() };
            }
        }
        if !replay.over() {
            return Gate::Fail { reason: "trace_did_not_terminate".to_string() };
        }
        Gate::Pass { steps: artifact.steps.len(), realized: replay.score() }
    }

    /// Rows, pools, and run metadata to disk.
    fn emit(
        &self,
        stage_a: &[Points],
        refined: &BTreeMap<usize, Refinement>,
        tiers: &[Tier],
        targets: &BTreeMap<String, Points>,
        gates: &[Gate],
        cutoffs: [f32; 2],
    ) -> Result<Summary> {
        let mut rows = Vec::new();
        let mut passes = Vec::new();
        let mut fails = Vec::new();
        let mut manifest = SeedManifest::default();
        manifest.targets = targets.clone();
        for tier in Tier::all() {
            manifest.practice.insert(tier.to_string(), Vec::new());
            manifest.challenge.insert(tier.to_string(), Vec::new());
        }
        for (i, &seed) in self.seeds.iter().enumerate() {
            let label = tiers[i].to_string();
            rows.push(CalibrationRow {
                seed,
                stage_a_score: stage_a[i],
                stage_b_ev_mean: refined.get(&i).map(|r| r.mean),
                stage_b_ev_std: refined.get(&i).map(|r| r.std),
                stage_b_success_rate: refined.get(&i).map(|r| r.success),
                tier: label.clone(),
            });
            match &gates[i] {
                Gate::Pass { steps, realized } => {
                    passes.push(TracePassRow {
                        seed,
                        tier: label.clone(),
                        steps: *steps,
                        realized_score: *realized,
                    });
                    manifest.practice.get_mut(&label).expect("tier pool").push(seed);
                    if *realized >= targets[&label] {
                        manifest.challenge.get_mut(&label).expect("tier pool").push(seed);
                    } else {
                        fails.push(TraceFailRow {
                            seed,
                            reason: "below_target_floor".to_string(),
                        });
                    }
                }
                Gate::Fail { reason } => {
                    fails.push(TraceFailRow { seed, reason: reason.clone() });
                }
            }
        }

        let mut counts = BTreeMap::new();
        for tier in tiers {
            *counts.entry(tier.to_string()).or_insert(0usize) += 1;
        }
        let summary = Summary {
            run_id: self.run_id.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            prng: PRNG_VERSION.to_string(),
            seed_source: self.seed_source.clone(),
            candidates_k: self.candidates,
            rollouts_r: self.samples,
            quantile_policy: "equal-frequency-terciles".to_string(),
            target_policy: "tier-median".to_string(),
            cutoffs,
            tiers: counts,
            targets: targets.clone(),
            refined: refined.len(),
            passed: passes.len(),
            failed: fails.len(),
        };

        let artifacts = Artifacts::create(&self.out, &self.run_id)?;
        artifacts.jsonl("calibration_results.jsonl", &rows)?;
        artifacts.jsonl("trace_pass.jsonl", &passes)?;
        artifacts.jsonl("trace_fail.jsonl", &fails)?;
        artifacts.json("seed_manifest.json", &manifest)?;
        artifacts.json("summary.json", &summary)?;
        Ok(summary)
    }

    ///

    fn model_points(events: &[Event]) -> Points {
        events
            .iter()
            .map(|event| match event {
                Event::Scored { ranking, .. } => Scoring::Model.value(*ranking),
                _ => 0,
            })
            .sum()
    }

    /// Equal-frequency tercile cutoffs.
    fn cutoffs(metrics: &[f32]) -> [f32; 2] {
        let mut sorted = metrics.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let n = sorted.len();
        [sorted[n / 3], sorted[(2 * n) / 3]]
    }

    /// Low scores are hard seeds: the policy could not make them pay.
    fn tier(metric: f32, cutoffs: [f32; 2]) -> Tier {
        if metric >= cutoffs[1] {
            Tier::Easy
        } else if metric >= cutoffs[0] {
            Tier::Medium
        } else {
            Tier::Hard
        }
    }

    /// Per-tier challenge target: the tier's median combined metric.
    fn targets(metrics: &[f32], tiers: &[Tier]) -> BTreeMap<String, Points> {
        let mut targets = BTreeMap::new();
        for tier in Tier::all() {
            let mut members = metrics
                .iter()
                .zip(tiers)
                .filter(|(_, t)| **t == tier)
                .map(|(m, _)| *m)
                .collect::<Vec<f32>>();
            members.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            let median = if members.is_empty() { 0.0 } else { members[members.len() / 2] };
            targets.insert(tier.to_string(), median as Points);
        }
        targets
    }

    fn spread(metrics: &[f32]) -> f32 {
        let min = metrics.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = metrics.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        (max - min).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svh_core::Context;

    fn pipeline(out: PathBuf) -> Pipeline {
        svh_core::assume(Context::Calibration);
        Pipeline {
            run_id: "unit".to_string(),
            seeds: (0..12).collect(),
            samples: 4,
            candidates: 3,
            band: 0.15,
            seed_source: "sequential:0..12".to_string(),
            out,
        }
    }

    #[test]
    fn run_emits_every_artifact() {
        let out = std::env::temp_dir().join("svh-pipeline-test");
        std::fs::remove_dir_all(&out).ok();
        let summary = pipeline(out.clone()).run().unwrap();
        for name in [
            "calibration_results.jsonl",
            "trace_pass.jsonl",
            "trace_fail.jsonl",
            "seed_manifest.json",
            "summary.json",
        ] {
            assert!(out.join("unit").join(name).exists(), "missing {}", name);
        }
        assert_eq!(summary.tiers.values().sum::<usize>(), 12);
        assert_eq!(summary.prng, PRNG_VERSION);
        std::fs::remove_dir_all(out).ok();
    }

    #[test]
    fn challenge_pools_are_subsets_of_practice_pools() {
        let out = std::env::temp_dir().join("svh-pipeline-pools-test");
        std::fs::remove_dir_all(&out).ok();
        pipeline(out.clone()).run().unwrap();
        let manifest = SeedManifest::load(&out.join("unit").join("seed_manifest.json")).unwrap();
        for (tier, challenge) in &manifest.challenge {
            let practice = &manifest.practice[tier];
            assert!(challenge.iter().all(|seed| practice.contains(seed)));
        }
        std::fs::remove_dir_all(out).ok();
    }

    #[test]
    fn terciles_split_the_range() {
        let metrics = (0..9).map(|i| i as f32).collect::<Vec<f32>>();
        let cutoffs = Pipeline::cutoffs(&metrics);
        assert_eq!(cutoffs, [3.0, 6.0]);
        assert_eq!(Pipeline::tier(7.0, cutoffs), Tier::Easy);
        assert_eq!(Pipeline::tier(4.0, cutoffs), Tier::Medium);
        assert_eq!(Pipeline::tier(0.5, cutoffs), Tier::Hard);
    }

    #[test]
    fn targets_are_tier_medians() {
        let metrics = vec![10.0, 20.0, 30.0, 100.0];
        let tiers = vec![Tier::Hard, Tier::Hard, Tier::Hard, Tier::Easy];
        let targets = Pipeline::targets(&metrics, &tiers);
        assert_eq!(targets["hard"], 20);
        assert_eq!(targets["easy"], 100);
        assert_eq!(targets["medium"], 0);
    }
}
