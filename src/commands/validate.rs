//! `appctl validate` - parse the local app configuration and summarize it

use anyhow::{Context as AnyhowContext, Result};

use crate::Context;
use crate::cli::ValidateArgs;
use crate::local;
use crate::ui;

pub fn run(ctx: &Context, args: &ValidateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let app = local::get_app(&cwd, args.local_config.as_deref())
        .context("could not load local app config")?;

    ui::success(&format!("app config for \"{}\" is valid", app.name));
    if ctx.quiet {
        return Ok(());
    }

    if !app.client_id.is_empty() {
        ui::kv("client app id", &app.client_id);
    }
    ui::kv("services", &app.services.len().to_string());
    ui::kv("pipelines", &app.pipelines.len().to_string());
    ui::kv("values", &app.values.len().to_string());
    ui::kv("auth providers", &app.auth_providers.len().to_string());

    let drafted = app
        .services
        .iter()
        .filter(|svc| svc.id.is_empty())
        .count();
    if drafted > 0 {
        ui::warn(&format!("{drafted} service(s) have not been deployed yet"));
    }
    Ok(())
}
