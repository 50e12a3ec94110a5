//! Command dispatch: bridges CLI args -> catalog context -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod lines;
pub mod prefs;

use uidb_core::CatalogContext;

use crate::cli::Command;
use crate::config::{CliPreferences, Config};
use crate::error::CliError;
use crate::output::OutputOpts;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    ctx: &mut CatalogContext,
    prefs: &mut CliPreferences,
    cfg: &Config,
    out: &OutputOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(ctx, args, prefs, cfg, out).await,
        Command::Lines(args) => lines::handle(ctx, &args, out),
        Command::Prefs(args) => prefs::handle(args, prefs, out),
        Command::Config(args) => config_cmd::handle(args, out),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
