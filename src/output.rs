use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::types::AggregateResult;

pub fn output_path(dir: &Path, symbol: &str) -> PathBuf {
    dir.join(format!("{}.json", symbol))
}

/// Four-space indented JSON, non-ASCII text kept as is.
pub fn to_pretty_json(result: &AggregateResult) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes `<dir>/<SYMBOL>.json` and returns its path.
pub fn write_result(dir: &Path, symbol: &str, result: &AggregateResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = output_path(dir, symbol);
    let content = to_pretty_json(result)?;

    if let Err(e) = fs::write(&path, content) {
        log::error!("Failed to write output to file: {:?}. Error: {}", path, e);
        return Err(anyhow!("Failed to write {:?}: {}", path, e));
    }

    log::debug!("Saved output to {:?}", path);
    Ok(path)
}
