use clap::{Parser, builder::styling};
use std::path::PathBuf;

use crate::{config::OutputFormat, events, productinfo};

const SHORT_DESCRIPTION: &str = "Find the completion target under a cursor in a shell script";

const LONG_DESCRIPTION: &str = r"
reef parses a fish-style shell script and reports what a completion at the cursor would
replace: the argument under the cursor and the command it belongs to.

The cursor is given with --index, or by a marker character inside the script (removed before
parsing). Without either, the cursor is at the end of the script.
";

/// The default cursor marker.
pub const DEFAULT_CURSOR_MARKER: char = '│';

/// Parsed command-line arguments for `reef`.
#[derive(Parser)]
#[clap(name = productinfo::PRODUCT_NAME,
       version = productinfo::PRODUCT_VERSION,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       author,
       styles = reef_help_styles())]
#[allow(clippy::module_name_repetitions)]
pub struct CommandLineArgs {
    /// Use the provided text as the script.
    #[arg(short = 'c', value_name = "SCRIPT_TEXT", conflicts_with = "script_path")]
    pub command: Option<String>,

    /// Byte offset of the cursor in the script.
    #[clap(short = 'i', long = "index", value_name = "OFFSET")]
    pub index: Option<usize>,

    /// Character marking the cursor in the script; ignored when `--index` is given.
    #[clap(long = "marker", value_name = "CHAR", default_value_t = DEFAULT_CURSOR_MARKER)]
    pub marker: char,

    /// Also print the syntax tree of the script.
    #[clap(long = "tree")]
    pub show_tree: bool,

    /// Output format.
    #[clap(long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// How many nested rounds of syntax error correction may run.
    #[clap(long = "max-correction-depth", value_name = "N")]
    pub max_correction_depth: Option<usize>,

    /// Path to a configuration file to use instead of the default one.
    #[clap(long = "config", value_name = "FILE", env = "REEF_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Don't load any configuration file.
    #[clap(long = "no-config")]
    pub no_config: bool,

    /// Enable debug logging for classes of tracing events.
    #[clap(long = "trace", alias = "debug", value_name = "EVENT")]
    pub enabled_trace_events: Vec<events::TraceEvent>,

    /// Path to the script to read; `-` or nothing reads standard input.
    #[clap(allow_hyphen_values = true)]
    pub script_path: Option<PathBuf>,
}

/// Returns clap styling to be used for command-line help.
#[doc(hidden)]
fn reef_help_styles() -> clap::builder::Styles {
    styling::Styles::styled()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::UNDERLINE,
        )
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}
