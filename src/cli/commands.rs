use crate::app::{AppContext, Result};
use crate::cli::Cli;
use crate::config::Config;
use crate::modes::{run_mode, ModeOutput};
use crate::output::control_output;

pub async fn run(cli: &Cli, config: Config) -> Result<()> {
    let ctx = AppContext::new(config)?;

    if cli.clear_cache {
        let removed = ctx.clear_cache()?;
        match &ctx.cache {
            Some(cache) => tracing::info!(dir = %cache.dir().display(), removed, "Response cache cleared"),
            None => tracing::info!("Response cache is disabled, nothing to clear"),
        }
    }

    match run_mode(&ctx, cli.mode).await? {
        ModeOutput::Table(table) => {
            control_output(&table, cli.output, cli.mode, &ctx.config.paths.results_dir())?;
        }
        ModeOutput::Downloaded(report) => {
            if cli.output.is_some() {
                tracing::debug!("Output format has no effect on download");
            }
            println!("{}", report.path.display());
        }
    }

    Ok(())
}
