use crate::pipeline::PipelineOutput;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const RESULT_FILE: &str = "result.json";
pub const LATEST_FILE: &str = "latest.json";
pub const SUMMARY_FILE: &str = "summary.txt";

/// Folder name for a run started at `at`: `data-YYYYMMDD-HHMMSS` (UTC).
pub fn timestamp_folder_name(at: DateTime<Utc>) -> String {
    format!("data-{}", at.format("%Y%m%d-%H%M%S"))
}

/// Create `base/data-YYYYMMDD-HHMMSS`, including `base` if needed.
pub fn create_timestamp_folder<P: AsRef<Path>>(base: P) -> Result<PathBuf> {
    let dir = base.as_ref().join(timestamp_folder_name(Utc::now()));
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    info!("created output folder {}", dir.display());
    Ok(dir)
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    info!("saved {}", path.display());
    Ok(())
}

pub fn save_text<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(())
}

/// Write `result.json`, `latest.json` and `summary.txt` into `dir`.
pub fn write_outputs<P: AsRef<Path>>(dir: P, output: &PipelineOutput) -> Result<()> {
    let dir = dir.as_ref();
    save_json(&output.raw, dir.join(RESULT_FILE))?;
    save_json(&output.latest, dir.join(LATEST_FILE))?;
    save_text(&output.summary, dir.join(SUMMARY_FILE))?;
    Ok(())
}
