//! Pack a directory of limit specs into a single embeddable string.
//!
//! Blob layout: a JSON object mapping file name to file contents,
//! zlib-compressed, then base64-encoded with the standard alphabet. Keys are
//! ordered by file name, which is also the order tiers are tried in.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use tl_domain::{Catalog, Error, Result, WordSize};

/// Upper bound on a single spec file.
const MAX_SPEC_BYTES: u64 = 1024 * 1024;

/// A packed spec directory.
#[derive(Debug, Clone)]
pub struct Pack {
    pub blob: String,
    /// Packed file names, in pack order.
    pub files: Vec<String>,
}

fn is_spec_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Read every `*.yml` / `*.yaml` file directly inside `dir` and pack them.
///
/// Subdirectories are not descended into. A directory without any spec
/// files is an error since there would be nothing to embed.
pub fn pack_dir(dir: &Path) -> Result<Pack> {
    let mut files = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !is_spec_file(&path) {
            continue;
        }

        let size = entry.metadata()?.len();
        if size > MAX_SPEC_BYTES {
            return Err(Error::Pack(format!(
                "{} is {size} bytes (max {MAX_SPEC_BYTES})",
                path.display()
            )));
        }

        let name = entry
            .file_name()
            .into_string()
            .map_err(|n| Error::Pack(format!("non UTF-8 file name: {n:?}")))?;
        let text = std::fs::read_to_string(&path)?;
        tracing::debug!(file = %name, bytes = size, "packing limit spec");
        files.insert(name, text);
    }

    if files.is_empty() {
        return Err(Error::Pack(format!(
            "no .yml or .yaml files in {}",
            dir.display()
        )));
    }

    let blob = pack(&files)?;
    Ok(Pack {
        blob,
        files: files.into_keys().collect(),
    })
}

/// Encode an in-memory set of files.
pub fn pack(files: &BTreeMap<String, String>) -> Result<String> {
    let json = serde_json::to_vec(files)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Decode a blob produced by [`pack`] into `(name, contents)` pairs in pack order.
pub fn unpack(blob: &str) -> Result<Vec<(String, String)>> {
    let compressed = STANDARD
        .decode(blob.trim())
        .map_err(|e| Error::Pack(format!("invalid base64: {e}")))?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| Error::Pack(format!("invalid zlib stream: {e}")))?;

    let files: BTreeMap<String, String> = serde_json::from_slice(&json)?;
    Ok(files.into_iter().collect())
}

/// Unpack an embedded blob and build the catalog from it.
///
/// This is what a host process calls once at startup with the constant
/// from the generated file. Any bad spec fails the whole load.
pub fn load_catalog(blob: &str, word_size: WordSize) -> Result<Catalog> {
    let specs = unpack(blob)?;
    let catalog = Catalog::from_specs(specs, word_size)?;
    tracing::debug!(tiers = catalog.len(), "limit catalog loaded");
    Ok(catalog)
}
