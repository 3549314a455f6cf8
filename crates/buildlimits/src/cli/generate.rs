use std::path::{Path, PathBuf};

use anyhow::Context;
use tl_domain::config::{Config, ConfigSeverity};
use tl_domain::WordSize;

use crate::generate::{render, write_output};
use crate::license;

/// Resolved arguments for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub input: PathBuf,
    pub output: String,
    pub license: String,
}

impl GenerateArgs {
    /// Merge command-line flags over the `[generator]` config section.
    pub fn resolve(
        input: Option<PathBuf>,
        out: Option<String>,
        license: Option<String>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            input: super::resolve_input(input, config)?,
            output: out.unwrap_or_else(|| config.generator.output.clone()),
            license: license.unwrap_or_else(|| config.generator.license.clone()),
        })
    }
}

/// Pack the spec directory, check it builds a valid catalog, and render the
/// generated file. Nothing is written when any spec is malformed.
pub fn build(input: &Path, license_name: &str) -> anyhow::Result<String> {
    let header = license::find(license_name)?;

    let pack = tl_packer::pack_dir(input)
        .with_context(|| format!("packing {}", input.display()))?;

    let catalog = tl_packer::load_catalog(&pack.blob, WordSize::host())
        .with_context(|| format!("loading limit specs from {}", input.display()))?;

    let issues = catalog.validate();
    let mut errors = Vec::new();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!(issue = %issue, "limit spec warning"),
            ConfigSeverity::Error => errors.push(issue.to_string()),
        }
    }
    if !errors.is_empty() {
        anyhow::bail!("invalid limit specs:\n{}", errors.join("\n"));
    }

    tracing::info!(
        files = pack.files.len(),
        tiers = catalog.len(),
        "packed limit specs"
    );
    Ok(render(&pack, header))
}

pub fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    let data = build(&args.input, &args.license)?;
    write_output(&args.output, &data)
}
