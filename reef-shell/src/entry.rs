//! Implements the command-line interface for `reef`.

use std::io::Write;

use clap::Parser;
use reef_complete::{CompletionTarget, FishParser, Range, Resolver, dump_tree};

use crate::args::CommandLineArgs;
use crate::config::{self, OutputFormat, Settings};
use crate::error::ShellError;
use crate::events;
use crate::input::{self, CursorInput};
use crate::productinfo;

/// Main entry point for `reef`.
pub fn run() {
    install_panic_handlers();

    let args = match CommandLineArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();

            // clap reports `--help` and `--version` as errors too.
            let exit_code = match e.kind() {
                clap::error::ErrorKind::DisplayVersion | clap::error::ErrorKind::DisplayHelp => 0,
                _ => 1,
            };

            std::process::exit(exit_code);
        }
    };

    let exit_code = match run_with_args(&args, &mut std::io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("error: {err:#}");
            1
        }
    };

    std::process::exit(exit_code);
}

/// Installs a panic handler that reports a human-readable message on release builds.
fn install_panic_handlers() {
    human_panic::setup_panic!(
        human_panic::Metadata::new(productinfo::PRODUCT_NAME, productinfo::PRODUCT_VERSION)
            .homepage(productinfo::PRODUCT_DISPLAY_URI)
            .support("please post a GitHub issue at https://github.com/reef-shell/reef/issues/new")
    );
}

/// Resolves the cursor selected by `args` and writes the results to `output`.
///
/// # Arguments
///
/// * `args` - The parsed command-line arguments.
/// * `output` - Where results are written.
pub fn run_with_args(args: &CommandLineArgs, output: &mut impl Write) -> Result<(), ShellError> {
    let event_config = events::TraceEventConfig::init(&args.enabled_trace_events);
    tracing::debug!(
        "{}; tracing {:?}",
        productinfo::get_product_display_str(),
        event_config.get_enabled_events()
    );

    let settings = load_settings(args)?;
    let text = input::read_script(args)?;
    let cursor = CursorInput::new(text, args.index, args.marker);

    let report = resolve(&cursor, &settings)?;
    write_report(&report, settings.format, output)
}

fn load_settings(args: &CommandLineArgs) -> Result<Settings, ShellError> {
    let loaded = config::load_config(args.no_config, args.config_file.as_deref());

    if let Some(error) = loaded.error {
        let path = loaded.path.unwrap_or_default();
        if loaded.explicit_path {
            return Err(ShellError::Config {
                path,
                source: error,
            });
        }

        tracing::warn!("ignoring config file {}: {error}", path.display());
    }

    Ok(loaded.config.to_settings(args))
}

/// What a run found out about the cursor.
#[derive(Debug, serde::Serialize)]
pub struct Report {
    /// Byte offset of the cursor in the script.
    pub index: usize,
    /// The completion target at the cursor.
    pub target: CompletionTarget,
    /// The script text a completion at the cursor replaces.
    pub replace: Range,
    /// Rendered syntax tree of the script, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

/// Resolves the completion target at the cursor.
///
/// # Arguments
///
/// * `cursor` - The script and cursor offset.
/// * `settings` - The settings in effect.
pub fn resolve(cursor: &CursorInput, settings: &Settings) -> Result<Report, ShellError> {
    let resolver = Resolver::builder()
        .parser(FishParser)
        .options(settings.resolver.clone())
        .build();

    let tree = resolver.parse(&cursor.source)?;
    let target = resolver.get_completion_targets(&tree, cursor.index)?;

    Ok(Report {
        index: cursor.index,
        target,
        replace: target.replacement_range(cursor.index),
        tree: settings.show_tree.then(|| dump_tree(&tree)),
    })
}

fn write_report(
    report: &Report,
    format: OutputFormat,
    output: &mut impl Write,
) -> Result<(), ShellError> {
    match format {
        OutputFormat::Text => {
            writeln!(output, "{}", report.target)?;
            if let Some(tree) = &report.tree {
                writeln!(output, "{tree}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *output, report)?;
            writeln!(output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use reef_complete::ResolverOptions;

    fn settings(format: OutputFormat, show_tree: bool) -> Settings {
        Settings {
            resolver: ResolverOptions::default(),
            format,
            show_tree,
        }
    }

    fn render(text: &str, settings: &Settings) -> Result<String> {
        let cursor = CursorInput::new(text.to_owned(), None, '│');
        let report = resolve(&cursor, settings)?;

        let mut output = vec![];
        write_report(&report, settings.format, &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn render_text() -> Result<()> {
        assert_eq!(
            render("echo fo│o", &settings(OutputFormat::Text, false))?,
            "inside command=[0,8) argument=[5,8)\n"
        );
        Ok(())
    }

    #[test]
    fn render_text_with_tree() -> Result<()> {
        let rendered = render("ls│", &settings(OutputFormat::Text, true))?;
        assert_eq!(
            rendered,
            "inside command=[0,2) argument=[0,2)\n(program[0-3]: ls\\n\n\t(command[0-2]: ls\n\t\tname: (word[0-2]: ls))\n\t(\\n[2-3]: \\n))\n"
        );
        Ok(())
    }

    #[test]
    fn render_json() -> Result<()> {
        assert_eq!(
            render("echo foo ;│", &settings(OutputFormat::Json, false))?,
            "{\"index\":10,\"target\":{\"type\":\"outside\"},\"replace\":{\"start\":10,\"end\":10}}\n"
        );
        assert_eq!(
            render("echo foo │;", &settings(OutputFormat::Json, false))?,
            "{\"index\":9,\"target\":{\"type\":\"beside\",\"command\":{\"start\":0,\"end\":8}},\"replace\":{\"start\":9,\"end\":9}}\n"
        );
        Ok(())
    }

    #[test]
    fn reject_cursor_past_end() {
        let cursor = CursorInput {
            source: "ls".to_owned(),
            index: 3,
        };
        assert!(matches!(
            resolve(&cursor, &settings(OutputFormat::Text, false)),
            Err(ShellError::Completion(_))
        ));
    }
}
