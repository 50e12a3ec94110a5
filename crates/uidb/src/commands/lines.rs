//! Product line command handlers.

use serde::Serialize;
use tabled::Tabled;

use uidb_core::CatalogContext;

use crate::cli::{LinesArgs, LinesCommand};
use crate::error::CliError;
use crate::output::{self, OutputOpts};

#[derive(Clone, Serialize, Tabled)]
struct LineSummary {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Devices")]
    devices: usize,
}

pub fn handle(ctx: &CatalogContext, args: &LinesArgs, out: &OutputOpts) -> Result<(), CliError> {
    let catalog = ctx
        .catalog()
        .ok_or_else(|| CliError::Internal("catalog not loaded".into()))?;

    match args.command {
        LinesCommand::List => {
            let summaries: Vec<LineSummary> = catalog
                .product_lines()
                .into_iter()
                .map(|line| LineSummary {
                    devices: catalog
                        .devices()
                        .iter()
                        .filter(|d| d.line.id == line.id)
                        .count(),
                    id: line.id,
                    name: line.name,
                })
                .collect();

            let rendered = output::render_list(
                out.format,
                summaries.as_slice(),
                LineSummary::clone,
                |l| l.id.clone(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }
    }
}
