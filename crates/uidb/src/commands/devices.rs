//! Device command handlers.

use std::collections::BTreeSet;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use uidb_core::{
    Catalog, CatalogContext, DetailView, Device, Neighbors, SearchSession, product_names,
};

use crate::cli::{DevicesArgs, DevicesCommand, FilterArgs, OutputFormat, ViewArg};
use crate::config::{CliPreferences, Config};
use crate::error::CliError;
use crate::output::{self, OutputOpts, Palette};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Abbrev")]
    abbrev: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Short Names")]
    shortnames: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "SysID")]
    sysid: String,
}

impl From<&Arc<Device>> for DeviceRow {
    fn from(d: &Arc<Device>) -> Self {
        Self {
            id: d.id.clone(),
            name: d.product.name.clone(),
            abbrev: d.product.abbrev.clone(),
            line: d.line.name.clone(),
            shortnames: d.shortnames.join(", "),
            sku: or_dash(d.sku()),
            sysid: or_dash(d.sysid()),
        }
    }
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// JSON/YAML shape of `devices get`.
#[derive(Serialize)]
struct DeviceDetail<'a> {
    device: &'a Device,
    previous: Option<&'a str>,
    next: Option<&'a str>,
    image_url: Option<String>,
}

// ── Text renderers ──────────────────────────────────────────────────

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".into())
}

fn neighbor_label(d: Option<&Arc<Device>>) -> String {
    d.map_or_else(
        || "-".into(),
        |d| format!("{} ({})", d.product.name, d.id),
    )
}

fn detail(d: &Device, neighbors: &Neighbors, palette: Palette, image_size: u32) -> String {
    let mut lines = vec![
        palette.title(&d.product.name),
        format!("{} {}", palette.label("ID:        "), d.id),
        format!("{} {}", palette.label("Abbrev:    "), d.product.abbrev),
        format!("{} {}", palette.label("SKU:       "), or_dash(d.sku())),
        format!("{} {} ({})", palette.label("Line:      "), d.line.name, d.line.id),
        format!("{} {}", palette.label("Shortnames:"), d.shortnames.join(", ")),
    ];
    if let Some(net) = d.network() {
        if let Some(ports) = net.number_of_ports {
            lines.push(format!("{} {ports}", palette.label("Ports:     ")));
        }
        if let Some(speed) = net.ethernet_max_speed_megabits_per_second {
            lines.push(format!("{} {speed} Mbps", palette.label("Max speed: ")));
        }
        if let Some(watts) = net.power.as_ref().and_then(|p| p.capacity) {
            lines.push(format!("{} {watts} W", palette.label("PoE budget:")));
        }
    }
    lines.push(format!(
        "{} {}",
        palette.label("Image:     "),
        d.image_url(image_size)
            .unwrap_or_else(|| palette.dim("(no image)"))
    ));
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        palette.label("Previous:  "),
        neighbor_label(neighbors.previous.as_ref())
    ));
    lines.push(format!(
        "{} {}",
        palette.label("Next:      "),
        neighbor_label(neighbors.next.as_ref())
    ));
    lines.join("\n")
}

fn card(d: &Device, palette: Palette, image_size: u32) -> String {
    [
        format!(
            "{}  {}",
            palette.title(&d.product.name),
            palette.dim(&d.product.abbrev)
        ),
        format!("  {} {}", palette.label("Line: "), d.line.name),
        format!("  {} {}", palette.label("SKU:  "), or_dash(d.sku())),
        format!(
            "  {} {}",
            palette.label("Image:"),
            d.image_url(image_size)
                .unwrap_or_else(|| palette.dim("(no image)"))
        ),
        format!("  {} {}", palette.label("ID:   "), d.id),
    ]
    .join("\n")
}

// ── Filtering ───────────────────────────────────────────────────────

fn apply_filter(ctx: &mut CatalogContext, filter: FilterArgs) {
    let lines: BTreeSet<String> = filter.lines.into_iter().collect();
    ctx.set_selected_lines(lines);
    ctx.set_search_term(filter.search.unwrap_or_default());
}

fn summary_text(catalog: &Catalog, shown: usize) -> String {
    let source = if catalog.using_fallback() {
        " (offline snapshot)"
    } else {
        ""
    };
    format!(
        "{shown} of {} devices · catalog {}{source} · loaded {}",
        catalog.len(),
        catalog.version(),
        catalog.loaded_at().format("%Y-%m-%d %H:%M UTC")
    )
}

fn summary(ctx: &CatalogContext, shown: usize, palette: Palette) -> String {
    ctx.catalog()
        .map(|catalog| palette.dim(&summary_text(catalog, shown)))
        .unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    ctx: &mut CatalogContext,
    args: DevicesArgs,
    prefs: &mut CliPreferences,
    cfg: &Config,
    out: &OutputOpts,
) -> Result<(), CliError> {
    let image_size = cfg.defaults.image_size;

    match args.command {
        DevicesCommand::List { filter, view } => {
            apply_filter(ctx, filter);
            let results = ctx.results();

            let card_view = match view {
                Some(ViewArg::Card) => true,
                Some(ViewArg::Table) => false,
                None => prefs.view_mode() == uidb_core::ViewMode::Card,
            };

            let rendered = if out.format == OutputFormat::Table && card_view {
                results
                    .iter()
                    .map(|d| card(d, out.palette, image_size))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            } else {
                output::render_list(
                    out.format,
                    results.as_slice(),
                    |d| DeviceRow::from(d),
                    |d| d.id.clone(),
                )?
            };
            output::print_output(&rendered, out.quiet);
            if out.format == OutputFormat::Table {
                output::notice(&summary(ctx, results.len(), out.palette), out.quiet);
            }
            Ok(())
        }

        DevicesCommand::Get { device } => match ctx.detail(&device) {
            DetailView::Found { device, neighbors } => {
                let view = DeviceDetail {
                    device: &device,
                    previous: neighbors.previous.as_ref().map(|d| d.id.as_str()),
                    next: neighbors.next.as_ref().map(|d| d.id.as_str()),
                    image_url: device.image_url(image_size),
                };
                let rendered = output::render_single(
                    out.format,
                    &view,
                    |v| detail(v.device, &neighbors, out.palette, image_size),
                    |v| v.device.id.clone(),
                )?;
                output::print_output(&rendered, out.quiet);

                if out.format == OutputFormat::Table && !prefs.keyboard_tip_dismissed() {
                    output::notice(
                        &out.palette.dim(&format!(
                            "\nTip: step through the catalog with `uidb devices browse {}`. \
                             Hide this with `uidb prefs dismiss-tip`.",
                            device.id
                        )),
                        out.quiet,
                    );
                }
                Ok(())
            }
            DetailView::NotFound => Err(CliError::device_not_found(device)),
            DetailView::Failed(reason) => Err(CliError::NoData { reason }),
            DetailView::Loading => Err(CliError::Internal("catalog not loaded".into())),
        },

        DevicesCommand::Browse { device } => browse(ctx, device, out, image_size).await,

        DevicesCommand::Names { filter } => {
            let term = filter.search.clone().unwrap_or_default();
            apply_filter(ctx, filter);
            let names = product_names(&ctx.results());

            let rendered = match out.format {
                OutputFormat::Table => output::render_table(
                    &names
                        .iter()
                        .map(|d| NameRow {
                            name: out.palette.highlight(&d.product.name, &term),
                            line: d.line.name.clone(),
                            id: d.id.clone(),
                        })
                        .collect::<Vec<_>>(),
                ),
                OutputFormat::Plain => names
                    .iter()
                    .map(|d| out.palette.highlight(&d.product.name, &term))
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => output::render_list(
                    out.format,
                    names.as_slice(),
                    |d| NameRow {
                        name: d.product.name.clone(),
                        line: d.line.name.clone(),
                        id: d.id.clone(),
                    },
                    |d| d.product.name.clone(),
                )?,
            };
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        DevicesCommand::Image { device, size } => {
            let catalog = ctx
                .catalog()
                .ok_or_else(|| CliError::Internal("catalog not loaded".into()))?;
            let found = catalog.require(&device)?;
            match found.image_url(size.unwrap_or(image_size)) {
                Some(url) => output::print_output(&url, out.quiet),
                None => output::notice(
                    &format!("{} has no product image", found.product.name),
                    out.quiet,
                ),
            }
            Ok(())
        }
    }
}

// ── Interactive browse ──────────────────────────────────────────────

enum Action {
    Go(Arc<Device>),
    Search,
    Quit,
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Io(io::Error::other(e.to_string()))
}

async fn browse(
    ctx: &CatalogContext,
    start: Option<String>,
    out: &OutputOpts,
    image_size: u32,
) -> Result<(), CliError> {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Err(CliError::NotInteractive {
            command: "devices browse".into(),
        });
    }

    let catalog = ctx
        .catalog()
        .ok_or_else(|| CliError::Internal("catalog not loaded".into()))?;
    let mut current = match start {
        Some(id) => catalog.require(&id)?,
        None => catalog
            .devices()
            .first()
            .cloned()
            .ok_or_else(|| CliError::device_not_found("(first)"))?,
    };
    let mut session = SearchSession::new(ctx.clone());

    loop {
        let neighbors = catalog.neighbors(&current.id);
        eprintln!("\n{}\n", detail(&current, &neighbors, out.palette, image_size));

        let mut actions = Vec::new();
        let mut labels = Vec::new();
        if let Some(prev) = neighbors.previous {
            labels.push(format!("← Previous: {}", prev.product.name));
            actions.push(Action::Go(prev));
        }
        if let Some(next) = neighbors.next {
            labels.push(format!("→ Next: {}", next.product.name));
            actions.push(Action::Go(next));
        }
        labels.push("Search…".into());
        actions.push(Action::Search);
        labels.push("Quit".into());
        actions.push(Action::Quit);

        let choice = Select::new()
            .with_prompt("Navigate")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?;

        match choice.and_then(|i| actions.into_iter().nth(i)) {
            Some(Action::Go(device)) => current = device,
            Some(Action::Search) => {
                let term: String = Input::new()
                    .with_prompt("Search")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                session.type_search_term(term);
                session.settle().await;

                let results = session.context().results();
                if results.is_empty() {
                    eprintln!("{}", out.palette.warn("No matching devices"));
                    continue;
                }
                let names: Vec<String> = results
                    .iter()
                    .map(|d| format!("{} ({})", d.product.name, d.line.name))
                    .collect();
                let picked = Select::new()
                    .with_prompt("Jump to")
                    .items(&names)
                    .default(0)
                    .max_length(15)
                    .interact_opt()
                    .map_err(prompt_err)?;
                if let Some(device) = picked.and_then(|i| results.get(i)) {
                    current = Arc::clone(device);
                }
            }
            Some(Action::Quit) | None => return Ok(()),
        }
    }
}
