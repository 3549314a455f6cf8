use tl_domain::config::{Config, ConfigError, ConfigSeverity};

/// Print issues and a summary line. Returns true when there are no errors.
pub fn report(issues: &[ConfigError], source: &str) -> bool {
    if issues.is_empty() {
        println!("Config OK ({source})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in issues {
        println!("{issue}");
    }

    println!(
        "\n{} error(s), {} warning(s) in {source}",
        error_count, warning_count,
    );

    error_count == 0
}

/// Parse and validate the config, printing any issues.
///
/// Exits with code 0 when valid, code 1 when errors are found.
pub fn validate(config: &Config, config_path: &str) -> bool {
    report(&config.validate(), config_path)
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let output = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("failed to serialize config: {e}"))?;
    print!("{output}");
    Ok(())
}
