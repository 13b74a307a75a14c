use anyhow::Context as _;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Append-only artifact writer for one calibration run.
///
/// All outputs live under `<root>/<run_id>/` and are read-only after the
/// run: JSONL for per-seed rows, JSON for the manifest and summary.
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn create(root: &Path, run_id: &str) -> Result<Self> {
        let dir = root.join(run_id);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create artifact directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One serialized row per line.
    pub fn jsonl<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        for row in rows {
            serde_json::to_writer(&mut writer, row)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        log::info!("[artifacts] wrote {} ({} rows)", name, rows.len());
        Ok(path)
    }

    /// Pretty-printed single document.
    pub fn json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
        log::info!("[artifacts] wrote {}", name);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_row_per_line() {
        let root = std::env::temp_dir().join("svh-artifacts-test");
        let artifacts = Artifacts::create(&root, "unit").unwrap();
        let path = artifacts
            .jsonl("rows.jsonl", &[serde_json::json!({"a": 1}), serde_json::json!({"a": 2})])
            .unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
        std::fs::remove_dir_all(root).ok();
    }
}
