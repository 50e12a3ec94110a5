//! Clap derive structures for the `uidb` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// uidb -- browse the UniFi device catalog
#[derive(Debug, Parser)]
#[command(
    name = "uidb",
    version,
    about = "Browse, search and filter the UniFi device catalog",
    long_about = "Look up UniFi hardware in Ubiquiti's public device database.\n\n\
        The catalog is fetched once per invocation; when the feed is\n\
        unreachable a bundled snapshot is used instead.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog feed URL (overrides config)
    #[arg(long, env = "UIDB_FEED_URL", global = true)]
    pub feed_url: Option<String>,

    /// Skip the network and use the fallback snapshot
    #[arg(long, env = "UIDB_OFFLINE", global = true)]
    pub offline: bool,

    /// Catalog JSON to use instead of the bundled snapshot
    #[arg(long, value_name = "FILE", global = true)]
    pub fallback_file: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "UIDB_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "UIDB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Keep preferences in memory only for this run
    #[arg(long, global = true)]
    pub no_persist: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Layout of the device list in table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// One row per device
    Table,
    /// One block per device with image link
    Card,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search, list and inspect catalog devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List product lines present in the catalog
    #[command(alias = "l")]
    Lines(LinesArgs),

    /// View and change saved UI preferences
    Prefs(PrefsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

/// Search and line-filter arguments shared by list commands.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Free-text search over product name, short names and line name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show devices in this product line (repeatable, by line ID)
    #[arg(long = "line", short = 'l', value_name = "LINE_ID")]
    pub lines: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, optionally searched and filtered
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Table or card layout (defaults to the saved preference)
        #[arg(long)]
        view: Option<ViewArg>,
    },

    /// Show one device with its previous/next neighbors
    Get {
        /// Device ID
        device: String,
    },

    /// Step through the catalog interactively, starting at a device
    Browse {
        /// Device ID to start from (defaults to the first device)
        device: Option<String>,
    },

    /// List distinct product names (one entry per name)
    Names {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the product image URL of a device
    Image {
        /// Device ID
        device: String,

        /// Image width in pixels (defaults to config)
        #[arg(long)]
        size: Option<u32>,
    },
}

// ── Lines ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LinesArgs {
    #[command(subcommand)]
    pub command: LinesCommand,
}

#[derive(Debug, Subcommand)]
pub enum LinesCommand {
    /// List product lines with device counts
    #[command(alias = "ls")]
    List,
}

// ── Preferences ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show all known preferences
    Show,

    /// Read a raw preference value
    Get {
        /// Preference key (without namespace prefix, e.g. viewMode)
        key: String,
    },

    /// Write a raw preference value
    Set {
        /// Preference key (without namespace prefix, e.g. viewMode)
        key: String,

        /// Value to store
        value: String,
    },

    /// Set the default device list layout
    View {
        /// Layout to save
        mode: ViewArg,
    },

    /// Stop showing the navigation tip on device details
    DismissTip,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
