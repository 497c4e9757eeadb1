//! Reconciliation of the remote map with its goal.
//!
//! A run goes through three strictly sequential steps:
//!
//! ```text
//! fetch (map + goal) ──► clear (delete every occupied map cell) ──► apply (create every goal cell)
//! ```
//!
//! Fetch failures abort the run before any mutation. Within clear and apply,
//! each mutation is an independent dispatcher task whose failure is recorded
//! as `false` and otherwise ignored. Apply starts only after clear has drained.

use log::{info, warn};
use thiserror::Error;

use crate::api::{MegaverseApi, Mutation};
use crate::dispatch::Dispatcher;
use crate::error::{ApiError, ModelError};
use crate::model::{Goal, Map, Phase};
use crate::wire::{decode_goal, decode_map};

/// Fatal reconciliation error.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The current map could not be read.
    #[error("Error getting the megaverse map: {0}")]
    FetchMap(#[source] ApiError),
    /// The goal could not be read.
    #[error("Error getting the megaverse goal: {0}")]
    FetchGoal(#[source] ApiError),
    /// The current map payload is invalid.
    #[error("Error parsing the megaverse map: {0}")]
    DecodeMap(#[source] ModelError),
    /// The goal payload is invalid.
    #[error("Error parsing the megaverse goal: {0}")]
    DecodeGoal(#[source] ModelError),
}

/// Mutation step of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Deleting the current entities.
    Clear,
    /// Creating the goal entities.
    Apply,
}

/// Mutations a run would issue, without issuing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// One delete per occupied map cell, row-major.
    pub deletes: Vec<Mutation>,
    /// One create per occupied goal cell, row-major.
    pub creates: Vec<Mutation>,
}

impl Plan {
    /// Plan the deletes for `map` and the creates for `goal`.
    #[must_use]
    pub fn new(map: &Map, goal: &Goal, candidate_id: &str) -> Self {
        Self {
            deletes: clear_mutations(map, candidate_id),
            creates: apply_mutations(goal, candidate_id),
        }
    }
}

fn clear_mutations(map: &Map, candidate_id: &str) -> Vec<Mutation> {
    map.grid()
        .flatten_occupied()
        .map(|entity| entity.delete_mutation(candidate_id))
        .collect()
}

fn apply_mutations(goal: &Goal, candidate_id: &str) -> Vec<Mutation> {
    goal.grid()
        .flatten_occupied()
        .map(|entity| entity.create_mutation(candidate_id))
        .collect()
}

/// Outcome of one mutation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    /// Which step ran.
    pub step: Step,
    /// One flag per mutation, in planning order.
    pub results: Vec<bool>,
}

impl PhaseReport {
    /// Number of mutations the service accepted.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|ok| **ok).count()
    }

    /// Number of mutations that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Whether every mutation succeeded (vacuously true when there were none).
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(|ok| *ok)
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Challenge phase of the map that was reconciled.
    pub phase: Phase,
    /// Clear step outcome.
    pub clear: PhaseReport,
    /// Apply step outcome.
    pub apply: PhaseReport,
}

impl RunReport {
    /// Every mutation flag of the run, clear step first.
    #[must_use]
    pub fn results(&self) -> Vec<bool> {
        self.clear
            .results
            .iter()
            .chain(&self.apply.results)
            .copied()
            .collect()
    }
}

/// Drives a reconciliation run against a remote service.
pub struct Reconciler<'a, A: MegaverseApi> {
    api: &'a A,
    dispatcher: &'a Dispatcher,
    progress: Option<&'a (dyn Fn(Step) + Sync)>,
}

impl<A: MegaverseApi> std::fmt::Debug for Reconciler<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("candidate_id", &self.api.candidate_id())
            .field("dispatcher", self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl<'a, A: MegaverseApi> Reconciler<'a, A> {
    /// Create a reconciler issuing calls through `dispatcher`.
    #[must_use]
    pub const fn new(api: &'a A, dispatcher: &'a Dispatcher) -> Self {
        Self {
            api,
            dispatcher,
            progress: None,
        }
    }

    /// Invoke `progress` once per finished mutation.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a (dyn Fn(Step) + Sync)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Read and decode the current map.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the payload is invalid.
    pub fn fetch_map(&self) -> Result<Map, ReconcileError> {
        let raw = self
            .dispatcher
            .call(|| self.api.fetch_map())
            .map_err(ReconcileError::FetchMap)?;
        decode_map(&raw).map_err(ReconcileError::DecodeMap)
    }

    /// Read and decode the goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the payload is invalid.
    pub fn fetch_goal(&self) -> Result<Goal, ReconcileError> {
        let raw = self
            .dispatcher
            .call(|| self.api.fetch_goal())
            .map_err(ReconcileError::FetchGoal)?;
        decode_goal(&raw).map_err(ReconcileError::DecodeGoal)
    }

    /// Read both the current map and the goal.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode error.
    pub fn fetch(&self) -> Result<(Map, Goal), ReconcileError> {
        info!("Collecting the Megaverse state");
        let map = self.fetch_map()?;
        info!("Retrieving and parsing the GOAL state");
        let goal = self.fetch_goal()?;
        Ok((map, goal))
    }

    /// Plan the mutations that would turn `map` into `goal`.
    #[must_use]
    pub fn plan(&self, map: &Map, goal: &Goal) -> Plan {
        Plan::new(map, goal, self.api.candidate_id())
    }

    /// Delete every entity on the current map.
    pub fn clear(&self, map: &Map) -> PhaseReport {
        let deletes = clear_mutations(map, self.api.candidate_id());
        info!("Clearing the Megaverse map ({} objects)", deletes.len());
        let report = self.execute(Step::Clear, &deletes);
        info!("Map cleared ({}/{} deleted)", report.succeeded(), deletes.len());
        report
    }

    /// Create every entity of the goal.
    pub fn apply(&self, goal: &Goal) -> PhaseReport {
        let creates = apply_mutations(goal, self.api.candidate_id());
        info!("Completing the challenge ({} objects)", creates.len());
        let report = self.execute(Step::Apply, &creates);
        info!("Challenge completed ({}/{} created)", report.succeeded(), creates.len());
        report
    }

    /// Fetch, clear, then apply.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch fails; no mutation is issued then.
    /// Individual mutation failures are reported, not returned as errors.
    pub fn run(&self) -> Result<RunReport, ReconcileError> {
        let (map, goal) = self.fetch()?;
        info!("Challenge phase {}", map.phase());
        let clear = self.clear(&map);
        let apply = self.apply(&goal);
        Ok(RunReport {
            phase: map.phase(),
            clear,
            apply,
        })
    }

    fn execute(&self, step: Step, mutations: &[Mutation]) -> PhaseReport {
        let results = self.dispatcher.dispatch(mutations, |mutation| {
            let ok = match self.api.send(mutation) {
                Ok(()) => true,
                Err(e) => {
                    warn!("{mutation} failed: {e}");
                    false
                }
            };
            if let Some(progress) = self.progress {
                progress(step);
            }
            ok
        });
        PhaseReport { step, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, Method};
    use crate::dispatch::RateLimiter;
    use crate::wire::{RawCell, RawGoalResponse, RawMap, RawMapResponse};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records every call; fails mutations at the listed rows.
    struct RecordingApi {
        map: RawMapResponse,
        goal: RawGoalResponse,
        failing_rows: Vec<u32>,
        fail_goal: bool,
        sent: Mutex<Vec<Mutation>>,
    }

    impl RecordingApi {
        fn new(map: RawMapResponse, goal: RawGoalResponse) -> Self {
            Self {
                map,
                goal,
                failing_rows: Vec::new(),
                fail_goal: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<Mutation> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl MegaverseApi for RecordingApi {
        fn candidate_id(&self) -> &str {
            "cand"
        }

        fn fetch_map(&self) -> Result<RawMapResponse, ApiError> {
            Ok(self.map.clone())
        }

        fn fetch_goal(&self) -> Result<RawGoalResponse, ApiError> {
            if self.fail_goal {
                return Err(ApiError::Status(500));
            }
            Ok(self.goal.clone())
        }

        fn send(&self, mutation: &Mutation) -> Result<(), ApiError> {
            self.sent.lock().unwrap().push(mutation.clone());
            if self.failing_rows.contains(&mutation.body.row) {
                Err(ApiError::Status(429))
            } else {
                Ok(())
            }
        }
    }

    fn polyanet_cell() -> Option<RawCell> {
        Some(RawCell {
            kind: 0,
            color: None,
            direction: None,
        })
    }

    fn raw_map(content: Vec<Vec<Option<RawCell>>>) -> RawMapResponse {
        RawMapResponse {
            map: RawMap { phase: 2, content },
        }
    }

    fn raw_goal(rows: &[&[&str]]) -> RawGoalResponse {
        RawGoalResponse {
            goal: rows
                .iter()
                .map(|row| row.iter().map(|t| (*t).to_string()).collect())
                .collect(),
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(RateLimiter::new(Duration::from_millis(1)), 4).unwrap()
    }

    #[test]
    fn test_run_clears_then_applies() {
        let api = RecordingApi::new(
            raw_map(vec![vec![polyanet_cell(), None], vec![None, polyanet_cell()]]),
            raw_goal(&[&["RED_SOLOON", "SPACE"], &["SPACE", "UP_COMETH"]]),
        );
        let dispatcher = dispatcher();
        let report = Reconciler::new(&api, &dispatcher).run().unwrap();

        assert_eq!(report.phase, Phase::Two);
        assert_eq!(report.clear.results, vec![true, true]);
        assert_eq!(report.apply.results, vec![true, true]);

        let sent = api.sent();
        assert_eq!(sent.len(), 4);
        assert!(sent[..2].iter().all(|m| m.method == Method::Delete));
        assert!(sent[2..].iter().all(|m| m.method == Method::Post));
        assert!(sent[2..].iter().any(|m| m.endpoint == Endpoint::Soloons));
        assert!(sent[2..].iter().any(|m| m.endpoint == Endpoint::Comeths));
    }

    #[test]
    fn test_failures_are_reported_not_fatal() {
        let mut api = RecordingApi::new(
            raw_map(vec![vec![polyanet_cell()], vec![polyanet_cell()]]),
            raw_goal(&[&["POLYANET"], &["POLYANET"]]),
        );
        api.failing_rows = vec![1];
        let dispatcher = dispatcher();
        let report = Reconciler::new(&api, &dispatcher).run().unwrap();

        assert_eq!(report.clear.results, vec![true, false]);
        assert_eq!(report.apply.results, vec![true, false]);
        assert_eq!(report.clear.failed(), 1);
        assert!(!report.apply.all_ok());
        assert_eq!(api.sent().len(), 4);
    }

    #[test]
    fn test_goal_fetch_failure_issues_no_mutations() {
        let mut api = RecordingApi::new(
            raw_map(vec![vec![polyanet_cell()]]),
            raw_goal(&[&["POLYANET"]]),
        );
        api.fail_goal = true;
        let dispatcher = dispatcher();
        let err = Reconciler::new(&api, &dispatcher).run().unwrap_err();

        assert!(matches!(err, ReconcileError::FetchGoal(ApiError::Status(500))));
        assert!(api.sent().is_empty());
    }

    #[test]
    fn test_plan_matches_occupied_cells() {
        let api = RecordingApi::new(
            raw_map(vec![vec![polyanet_cell(), None, polyanet_cell()]]),
            raw_goal(&[&["SPACE", "BLUE_SOLOON", "SPACE"]]),
        );
        let dispatcher = dispatcher();
        let reconciler = Reconciler::new(&api, &dispatcher);
        let (map, goal) = reconciler.fetch().unwrap();
        let plan = reconciler.plan(&map, &goal);

        assert_eq!(plan.deletes.len(), 2);
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].body.position(), (0, 1));
        assert!(api.sent().is_empty());
    }

    #[test]
    fn test_progress_called_per_mutation() {
        let api = RecordingApi::new(
            raw_map(vec![vec![polyanet_cell(), polyanet_cell(), polyanet_cell()]]),
            raw_goal(&[&["POLYANET", "SPACE", "SPACE"]]),
        );
        let dispatcher = dispatcher();
        let clears = AtomicUsize::new(0);
        let applies = AtomicUsize::new(0);
        let progress = |step: Step| {
            match step {
                Step::Clear => clears.fetch_add(1, Ordering::SeqCst),
                Step::Apply => applies.fetch_add(1, Ordering::SeqCst),
            };
        };
        Reconciler::new(&api, &dispatcher)
            .with_progress(&progress)
            .run()
            .unwrap();

        assert_eq!(clears.load(Ordering::SeqCst), 3);
        assert_eq!(applies.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_phase_report_counts() {
        let report = PhaseReport {
            step: Step::Clear,
            results: vec![true, false, true],
        };
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_ok());

        let empty = PhaseReport {
            step: Step::Apply,
            results: Vec::new(),
        };
        assert!(empty.all_ok());
    }
}
