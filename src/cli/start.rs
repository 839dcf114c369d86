use super::{commands, dispatch};
use crate::telemetry;
use anyhow::Result;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments (with environment fallbacks)
/// 2. Extract Verbosity: Convert flag count to logging level
/// 3. Initialize Telemetry: Set up structured logging
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub async fn start() -> Result<()> {
    let matches = commands::new().get_matches();

    let verbosity = dispatch::extract_verbosity(&matches);

    telemetry::init(verbosity)?;

    let action = dispatch::dispatch(&matches)?;

    action.execute().await?;

    Ok(())
}
