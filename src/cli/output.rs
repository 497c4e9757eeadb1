//! Output formatting utilities for CLI.

use megaverse::api::MutationBody;
use megaverse::reconcile::{PhaseReport, Plan, RunReport};
use megaverse::Mutation;
use serde::Serialize;

/// JSON-serializable step outcome.
#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct JsonPhaseReport {
    /// Mutations issued.
    total: usize,
    /// Mutations accepted.
    succeeded: usize,
    /// Mutations rejected or lost.
    failed: usize,
}

impl JsonPhaseReport {
    fn from_report(report: &PhaseReport) -> Self {
        Self {
            total: report.results.len(),
            succeeded: report.succeeded(),
            failed: report.failed(),
        }
    }
}

/// JSON-serializable run outcome.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunReport {
    /// Challenge phase.
    phase: String,
    /// Clear step.
    clear: JsonPhaseReport,
    /// Apply step.
    apply: JsonPhaseReport,
}

impl JsonRunReport {
    /// Create from a RunReport.
    pub(super) fn from_run_report(report: &RunReport) -> Self {
        Self {
            phase: report.phase.to_string(),
            clear: JsonPhaseReport::from_report(&report.clear),
            apply: JsonPhaseReport::from_report(&report.apply),
        }
    }
}

/// JSON-serializable planned call.
#[derive(Debug, Serialize)]
pub(super) struct JsonMutation<'a> {
    /// HTTP method.
    method: &'static str,
    /// Endpoint path.
    path: &'static str,
    /// Request body.
    body: &'a MutationBody,
}

impl<'a> JsonMutation<'a> {
    fn from_mutation(mutation: &'a Mutation) -> Self {
        Self {
            method: mutation.method.as_str(),
            path: mutation.endpoint.path(),
            body: &mutation.body,
        }
    }
}

/// JSON-serializable plan.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlan<'a> {
    /// Planned deletes.
    deletes: Vec<JsonMutation<'a>>,
    /// Planned creates.
    creates: Vec<JsonMutation<'a>>,
}

impl<'a> JsonPlan<'a> {
    /// Create from a Plan.
    pub(super) fn from_plan(plan: &'a Plan) -> Self {
        Self {
            deletes: plan.deletes.iter().map(JsonMutation::from_mutation).collect(),
            creates: plan.creates.iter().map(JsonMutation::from_mutation).collect(),
        }
    }
}

/// Format a run outcome as human-readable text.
pub(super) fn format_run_text(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Challenge phase {}\n", report.phase));
    output.push_str(&format_phase_line("Cleared", &report.clear));
    output.push_str(&format_phase_line("Created", &report.apply));

    let failed = report.clear.failed() + report.apply.failed();
    if failed > 0 {
        output.push_str(&format!("\n{failed} call(s) failed; re-run to converge\n"));
    }

    output
}

fn format_phase_line(label: &str, report: &PhaseReport) -> String {
    let mut line = format!("  {label}: {}/{}", report.succeeded(), report.results.len());
    if report.failed() > 0 {
        line.push_str(&format!(" ({} failed)", report.failed()));
    }
    line.push('\n');
    line
}

/// Format a plan as human-readable text.
pub(super) fn format_plan_text(plan: &Plan) -> String {
    let mut output = String::new();

    output.push_str(&format!("Deletes ({}):\n", plan.deletes.len()));
    for mutation in &plan.deletes {
        output.push_str(&format!("  {mutation}\n"));
    }
    output.push_str(&format!("Creates ({}):\n", plan.creates.len()));
    for mutation in &plan.creates {
        output.push_str(&format!("  {mutation}\n"));
    }

    output
}
