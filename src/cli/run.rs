//! Run command implementation.

use super::output::{format_run_text, JsonRunReport};
use super::{to_json, CliError, OutputFormat, ServiceArgs};
use indicatif::{ProgressBar, ProgressStyle};
use megaverse::reconcile::{RunReport, Step};
use megaverse::Reconciler;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or either fetch fails.
/// Failed mutations are reported in the summary instead.
pub(crate) fn execute(service: &ServiceArgs, format: OutputFormat, progress: bool) -> Result<(), CliError> {
    let (api, dispatcher) = service.connect()?;

    let bar = if progress {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {msg:8} [{bar:40.cyan/blue}] {pos}/{len} calls")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };
    let on_progress = |_: Step| bar.inc(1);
    let reconciler = Reconciler::new(&api, &dispatcher).with_progress(&on_progress);

    let (map, goal) = reconciler.fetch()?;
    let total = map.grid().occupied_count() + goal.grid().occupied_count();
    bar.set_length(u64::try_from(total).unwrap_or(u64::MAX));

    bar.set_message("clearing");
    let clear = reconciler.clear(&map);
    bar.set_message("applying");
    let apply = reconciler.apply(&goal);
    bar.finish_with_message("done");

    let report = RunReport {
        phase: map.phase(),
        clear,
        apply,
    };

    match format {
        OutputFormat::Text => {
            print!("{}", format_run_text(&report));
        }
        OutputFormat::Json => {
            println!("{}", to_json(&JsonRunReport::from_run_report(&report))?);
        }
    }

    Ok(())
}
