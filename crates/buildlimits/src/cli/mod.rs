pub mod config;
pub mod generate;
pub mod select;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// buildlimits: pack tiered limit specs into an embeddable source file.
#[derive(Debug, Parser)]
#[command(name = "buildlimits", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pack a spec directory and write the generated source file.
    Generate {
        /// Directory of YAML limit specs.
        #[arg(long = "in")]
        input: Option<PathBuf>,
        /// Output path. "-" writes to stdout.
        #[arg(long)]
        out: Option<String>,
        /// License header for the generated file.
        #[arg(long)]
        license: Option<String>,
    },
    /// Show which tier applies to an agent count.
    Select {
        /// Directory of YAML limit specs.
        #[arg(long = "in")]
        input: Option<PathBuf>,
        /// Configured agent count (0 = no explicit limit).
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
        agents: Option<i64>,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `TL_CONFIG` (or
/// `buildlimits.toml` by default).  Returns the parsed [`Config`] and the
/// path that was used.
///
/// [`Config`]: tl_domain::config::Config
pub fn load_config() -> anyhow::Result<(tl_domain::config::Config, String)> {
    let config_path =
        std::env::var("TL_CONFIG").unwrap_or_else(|_| "buildlimits.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

/// Parse `config_path`, falling back to defaults when the file is absent.
pub fn load_config_from(config_path: &str) -> anyhow::Result<tl_domain::config::Config> {
    let config = if std::path::Path::new(config_path).exists() {
        let raw = std::fs::read_to_string(config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        tl_domain::config::Config::default()
    };

    Ok(config)
}

/// `--in` wins over `generator.input_dir`.
pub fn resolve_input(
    flag: Option<PathBuf>,
    config: &tl_domain::config::Config,
) -> anyhow::Result<PathBuf> {
    match flag.or_else(|| config.generator.input_dir.clone()) {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
        _ => anyhow::bail!("invalid input source: pass --in or set generator.input_dir"),
    }
}
