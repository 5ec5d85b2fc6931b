//! `appctl diff` - compare the local app configuration against a deployed export

use anyhow::{Context as AnyhowContext, Result};
use log::debug;

use crate::Context;
use crate::app;
use crate::cli::DiffArgs;
use crate::local;
use crate::ui;

pub fn run(ctx: &Context, args: &DiffArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let local_app = local::get_app(&cwd, args.local_config.as_deref())
        .context("could not load local app config")?;
    debug!("loaded local app {}", local_app.name);

    let deployed = local::load_app(&args.deployed)
        .with_context(|| format!("could not load deployed export {}", args.deployed.display()))?;
    debug!("loaded deployed app {}", deployed.name);

    let report = app::diff::diff(&deployed, &local_app);
    if report.is_empty() {
        if !ctx.quiet {
            ui::success("local app matches the deployed configuration");
        }
        return Ok(());
    }

    println!("{report}");
    Ok(())
}
