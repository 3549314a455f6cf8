//! Rendering and writing the generated limits file.
//!
//! The generated file only carries data. Hosts `include!` it and hand
//! `PACKED_LIMITS` to `tl_packer::load_catalog` once at startup.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context;
use tl_packer::Pack;

pub const GENERATED_MARKER: &str = "// Code generated by buildlimits - DO NOT EDIT.";

/// Render the generated source for `pack` under `license_header`.
pub fn render(pack: &Pack, license_header: &str) -> String {
    let mut out = String::new();

    if !license_header.is_empty() {
        out.push_str(license_header.trim_end());
        out.push_str("\n\n");
    }
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\n");

    out.push_str("// Packed files\n");
    for file in &pack.files {
        let _ = writeln!(out, "// {file}");
    }
    let _ = writeln!(out, "pub const PACKED_LIMITS: &str = \"{}\";", pack.blob);
    out.push('\n');

    out.push_str("pub const PACKED_FILES: &[&str] = &[\n");
    for file in &pack.files {
        let _ = writeln!(out, "    {file:?},");
    }
    out.push_str("];\n");

    out
}

/// Write `data` to `output`, or to stdout when `output` is `-`.
///
/// Files are created with mode 0640 on unix.
pub fn write_output(output: &str, data: &str) -> anyhow::Result<()> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data.as_bytes()).context("writing to stdout")?;
        return stdout.flush().context("flushing stdout");
    }

    let path = Path::new(output);
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o640);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("creating {}", path.display()))?;
    file.write_all(data.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "wrote generated limits");
    Ok(())
}

/// Pull the blob back out of a rendered file.
pub fn extract_blob(rendered: &str) -> Option<&str> {
    let line = rendered
        .lines()
        .find(|l| l.starts_with("pub const PACKED_LIMITS"))?;
    let start = line.find('"')? + 1;
    let end = line.rfind('"')?;
    (end > start).then(|| &line[start..end])
}
