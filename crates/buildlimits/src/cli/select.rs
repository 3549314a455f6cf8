use std::path::Path;

use anyhow::Context;
use tl_domain::config::LimitsConfig;
use tl_domain::Platform;

/// Resolve the tier for `agents` and describe it as JSON.
pub fn resolve(
    input: &Path,
    agents: i64,
    platform: &dyn Platform,
) -> anyhow::Result<serde_json::Value> {
    let pack = tl_packer::pack_dir(input)
        .with_context(|| format!("packing {}", input.display()))?;
    let catalog = tl_packer::load_catalog(&pack.blob, platform.word_size())
        .with_context(|| format!("loading limit specs from {}", input.display()))?;

    let selection = catalog.select(agents, platform);
    Ok(serde_json::json!({
        "agents": agents,
        "source": catalog.source_of(&selection),
        "ram_shortfall": selection.ram_shortfall,
        "profile": selection.profile,
    }))
}

pub fn run(input: &Path, agents: Option<i64>, limits: &LimitsConfig) -> anyhow::Result<()> {
    let agents = agents.unwrap_or(limits.max_agents);
    let platform = limits.platform();
    let out = resolve(input, agents, platform.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
