//! Show command implementation.

use super::{CliError, ServiceArgs, ShowTarget};
use megaverse::{Grid, Reconciler};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the fetch fails.
pub(crate) fn execute(service: &ServiceArgs, target: ShowTarget) -> Result<(), CliError> {
    let (api, dispatcher) = service.connect()?;
    let reconciler = Reconciler::new(&api, &dispatcher);

    match target {
        ShowTarget::Map => {
            let map = reconciler.fetch_map()?;
            println!("Challenge phase {}", map.phase());
            print_grid(map.grid());
        }
        ShowTarget::Goal => {
            let goal = reconciler.fetch_goal()?;
            print_grid(goal.grid());
        }
    }

    Ok(())
}

fn print_grid(grid: &Grid) {
    println!(
        "{} x {} ({} objects)",
        grid.row_count(),
        grid.column_count(),
        grid.occupied_count()
    );
    println!();
    print!("{grid}");
    println!();
    println!("Legend: . space  P polyanet  r/b/p/w soloon  </>/^/v cometh");
}
