//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::{self, OutputOpts};

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

pub fn handle(args: ConfigArgs, out: &OutputOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), out.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered =
                output::render_single(out.format, &cfg, format_config, |c| c.feed_url.clone())?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let written = config::save_config(&Config::default())?;
            output::notice(
                &format!("✓ Configuration written to {}", written.display()),
                out.quiet,
            );
            Ok(())
        }
    }
}
