mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uidb_core::{Catalog, CatalogContext, Loader};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;
use crate::output::OutputOpts;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = &cli.global;

    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "uidb", &mut std::io::stdout());
            Ok(())
        }

        // Config and preference commands don't need the catalog
        Command::Config(args) => {
            let cfg = config::load_config_or_default();
            let out = config::output_opts(global, &cfg);
            commands::config_cmd::handle(args, &out)
        }

        Command::Prefs(args) => {
            let cfg = config::load_config()?;
            let out = config::output_opts(global, &cfg);
            let mut prefs = config::preferences(global);
            commands::prefs::handle(args, &mut prefs, &out)
        }

        // Everything else runs against a loaded catalog
        cmd => {
            let cfg = config::load_config()?;
            let out = config::output_opts(global, &cfg);
            let mut prefs = config::preferences(global);
            let mut ctx = load_catalog(global, &cfg, &out).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut ctx, &mut prefs, &cfg, &out).await
        }
    }
}

/// Fetch (or fall back) and index the catalog once for this invocation.
async fn load_catalog(
    global: &GlobalOpts,
    cfg: &config::Config,
    out: &OutputOpts,
) -> Result<CatalogContext, CliError> {
    let catalog_config = config::catalog_config(global, cfg)?;
    let loader = Loader::from_config(&catalog_config)?;

    let spinner = output::spinner("Loading device catalog...", out.quiet);
    let outcome = loader.load().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome?;

    if outcome.using_fallback {
        output::notice(
            &out.palette.warn(&format!(
                "Using offline catalog data (version {})",
                outcome.version
            )),
            out.quiet,
        );
    }

    Ok(CatalogContext::ready(Catalog::from_outcome(outcome)))
}
