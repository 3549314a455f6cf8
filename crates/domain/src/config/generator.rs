use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Generator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Defaults for `buildlimits generate`. Command-line flags win over these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding one YAML limit spec per tier.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    /// Output path for the generated file; `-` writes to stdout.
    #[serde(default = "d_output")]
    pub output: String,
    /// License header placed at the top of the generated file.
    #[serde(default = "d_license")]
    pub license: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            output: d_output(),
            license: d_license(),
        }
    }
}

fn d_output() -> String {
    "-".into()
}
fn d_license() -> String {
    "Elastic".into()
}
