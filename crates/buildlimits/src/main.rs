use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_buildlimits::cli::generate::GenerateArgs;
use tl_buildlimits::cli::{Cli, Command, ConfigCommand};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    match cli.command {
        Command::Generate { input, out, license } => {
            let (config, _) = tl_buildlimits::cli::load_config()?;
            let args = GenerateArgs::resolve(input, out, license, &config)?;
            tl_buildlimits::cli::generate::run(&args)
        }
        Command::Select { input, agents } => {
            let (config, _) = tl_buildlimits::cli::load_config()?;
            let input = tl_buildlimits::cli::resolve_input(input, &config)?;
            tl_buildlimits::cli::select::run(&input, agents, &config.limits)
        }
        Command::Config(ConfigCommand::Validate) => {
            let (config, config_path) = tl_buildlimits::cli::load_config()?;
            let valid = tl_buildlimits::cli::config::validate(&config, &config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            let (config, _config_path) = tl_buildlimits::cli::load_config()?;
            tl_buildlimits::cli::config::show(&config)
        }
        Command::Version => {
            println!("buildlimits {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Initialize compact stderr-only tracing.
///
/// Defaults to `warn` level so diagnostic output does not pollute the
/// generated file when it is written to stdout.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
