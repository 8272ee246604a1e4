//! Check command: validate a configuration without reading data.

use anyhow::Result;
use tracing::info_span;

use crate::cli::CheckArgs;
use crate::config;
use crate::convert;

/// Parse and validate the configuration, then print a one-line summary.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let config = config::load(&args.config)?;
    let plan = convert::build_plan(&config)?;

    println!(
        "{}: ok ({} sites, {} quantities, {} days from {} to {})",
        args.config.display(),
        plan.sites.len(),
        plan.quantities.len(),
        plan.axis.len(),
        plan.axis.start(),
        plan.axis.end(),
    );
    Ok(())
}
