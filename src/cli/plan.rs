//! Plan command implementation.

use super::output::{format_plan_text, JsonPlan};
use super::{to_json, CliError, OutputFormat, ServiceArgs};
use megaverse::Reconciler;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or either fetch fails.
pub(crate) fn execute(service: &ServiceArgs, format: OutputFormat) -> Result<(), CliError> {
    let (api, dispatcher) = service.connect()?;
    let reconciler = Reconciler::new(&api, &dispatcher);

    let (map, goal) = reconciler.fetch()?;
    let plan = reconciler.plan(&map, &goal);

    match format {
        OutputFormat::Text => {
            println!("Challenge phase {}", map.phase());
            print!("{}", format_plan_text(&plan));
        }
        OutputFormat::Json => {
            println!("{}", to_json(&JsonPlan::from_plan(&plan))?);
        }
    }

    Ok(())
}
