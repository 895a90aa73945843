//! Configuration file support for `reef`.
//!
//! Configuration is read from a TOML file:
//! - Forward-compatible: unknown fields are ignored
//! - Graceful degradation: a broken default file is reported but doesn't prevent resolution
//! - Layered configuration: defaults < config file < command-line arguments

use etcetera::BaseStrategy;
use reef_complete::ResolverOptions;
use std::path::{Path, PathBuf};

use crate::args::CommandLineArgs;

/// Format used to print results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line of text per result.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

/// Root configuration structure.
///
/// All fields are optional to support forward compatibility and partial configuration.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion target resolution options.
    pub resolver: ResolverConfig,

    /// Output options.
    pub output: OutputConfig,
}

/// Completion target resolution options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// How many nested rounds of syntax error correction may run.
    #[serde(rename = "max-correction-depth")]
    pub max_correction_depth: Option<usize>,
}

/// Output options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used to print results.
    pub format: Option<OutputFormat>,

    /// Print the syntax tree along with the completion target.
    #[serde(rename = "show-tree")]
    pub show_tree: Option<bool>,
}

/// Settings in effect for one run, after layering defaults, configuration and arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Options passed to the resolver.
    pub resolver: ResolverOptions,
    /// Format used to print results.
    pub format: OutputFormat,
    /// Whether the syntax tree is printed.
    pub show_tree: bool,
}

impl Config {
    /// Merges the configuration with command-line arguments.
    ///
    /// Arguments that were given win over configuration values, which win over defaults.
    #[must_use]
    pub fn to_settings(&self, args: &CommandLineArgs) -> Settings {
        let defaults = ResolverOptions::default();

        Settings {
            resolver: ResolverOptions {
                max_correction_depth: args
                    .max_correction_depth
                    .or(self.resolver.max_correction_depth)
                    .unwrap_or(defaults.max_correction_depth),
            },
            format: args.format.or(self.output.format).unwrap_or_default(),
            show_tree: merge_bool_setting(args.show_tree, false, self.output.show_tree),
        }
    }
}

/// Merges a boolean setting from CLI args, config file, and defaults.
///
/// A flag left at its default can't be told apart from one that was not given, so only a
/// non-default CLI value overrides the config file.
const fn merge_bool_setting(
    cli_value: bool,
    cli_default: bool,
    config_value: Option<bool>,
) -> bool {
    if cli_value != cli_default {
        cli_value
    } else if let Some(config) = config_value {
        config
    } else {
        cli_default
    }
}

/// Result of attempting to load a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration, or default if loading failed.
    pub config: Config,

    /// The path that was used (or attempted) for loading.
    pub path: Option<PathBuf>,

    /// Any error that occurred during loading.
    pub error: Option<ConfigLoadError>,

    /// Whether the path was explicitly provided by the user (via `--config`).
    /// If true and there's an error, the run fails rather than continuing.
    pub explicit_path: bool,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),

    /// Failed to parse the TOML content.
    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Returns the default configuration file path for the current platform.
///
/// Returns `None` if the platform's config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("reef").join("config.toml"))
}

/// Loads configuration from the specified path.
///
/// The result's `explicit_path` is always `false`; see [`load_config`].
pub fn load_from_path(path: &Path) -> ConfigLoadResult {
    let loaded = std::fs::read_to_string(path)
        .map_err(ConfigLoadError::Io)
        .and_then(|content| toml::from_str(&content).map_err(ConfigLoadError::Parse));

    let (config, error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
        error,
        explicit_path: false,
    }
}

/// Loads configuration based on the provided options.
///
/// # Arguments
///
/// * `disabled` - If true, skip loading and return defaults
/// * `explicit_path` - If provided, use this path instead of the default
pub fn load_config(disabled: bool, explicit_path: Option<&Path>) -> ConfigLoadResult {
    let defaults = |path| ConfigLoadResult {
        config: Config::default(),
        path,
        error: None,
        explicit_path: false,
    };

    if disabled {
        return defaults(None);
    }

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            // Can't determine config path; use defaults silently.
            None => return defaults(None),
        },
    };

    // A missing default file is not an error.
    if explicit_path.is_none() && !path.exists() {
        return defaults(Some(path));
    }

    let mut result = load_from_path(&path);
    result.explicit_path = explicit_path.is_some();
    result
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use anyhow::Result;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config() -> Result<()> {
        let config: Config = toml::from_str("")?;
        assert!(config.resolver.max_correction_depth.is_none());
        assert!(config.output.format.is_none());
        assert!(config.output.show_tree.is_none());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Result<()> {
        let toml = r#"
            [resolver]
            max-correction-depth = 4

            [output]
            format = "json"
            show-tree = true
        "#;

        let config: Config = toml::from_str(toml)?;
        assert_eq!(config.resolver.max_correction_depth, Some(4));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.show_tree, Some(true));
        Ok(())
    }

    #[test]
    fn test_unknown_fields_ignored() -> Result<()> {
        let toml = r#"
            [resolver]
            max-correction-depth = 1
            future-option = "should be ignored"

            [unknown-section]
            foo = "bar"
        "#;

        let config: Config = toml::from_str(toml)?;
        assert_eq!(config.resolver.max_correction_depth, Some(1));
        Ok(())
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"yaml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("reef/config.toml"));
        }
    }

    #[test]
    fn test_load_config_disabled() {
        let result = load_config(true, Some(Path::new("/nonexistent/config.toml")));
        assert!(result.path.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_load_config_nonexistent_explicit() {
        let result = load_config(false, Some(Path::new("/nonexistent/path/to/config.toml")));
        assert!(result.explicit_path);
        assert!(matches!(result.error, Some(ConfigLoadError::Io(_))));
    }

    #[test]
    fn test_load_config_broken_explicit() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[resolver")?;

        let result = load_config(false, Some(file.path()));
        assert!(result.explicit_path);
        assert!(matches!(result.error, Some(ConfigLoadError::Parse(_))));
        Ok(())
    }

    fn make_test_args(args: &[&str]) -> Result<CommandLineArgs> {
        Ok(CommandLineArgs::try_parse_from(
            std::iter::once("reef").chain(args.iter().copied()),
        )?)
    }

    #[test]
    fn test_settings_defaults_only() -> Result<()> {
        let settings = Config::default().to_settings(&make_test_args(&[])?);

        assert_eq!(
            settings,
            Settings {
                resolver: ResolverOptions::default(),
                format: OutputFormat::Text,
                show_tree: false,
            }
        );
        Ok(())
    }

    #[test]
    fn test_settings_config_overrides_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            "[resolver]\nmax-correction-depth = 5\n[output]\nformat = \"json\"\nshow-tree = true\n",
        )?;
        let settings = config.to_settings(&make_test_args(&[])?);

        assert_eq!(settings.resolver.max_correction_depth, 5);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.show_tree);
        Ok(())
    }

    #[test]
    fn test_settings_cli_overrides_config() -> Result<()> {
        let config: Config = toml::from_str(
            "[resolver]\nmax-correction-depth = 5\n[output]\nformat = \"json\"\n",
        )?;
        let args = make_test_args(&["--max-correction-depth", "0", "--format", "text", "--tree"])?;
        let settings = config.to_settings(&args);

        assert_eq!(settings.resolver.max_correction_depth, 0);
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.show_tree);
        Ok(())
    }
}
