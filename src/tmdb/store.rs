//! On-disk metadata layout: `<root>/<movie|tv>/<id>/*.json`

use crate::error::Result;
use crate::tmdb::MediaKind;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes fetched records below the output directory
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    /// Store rooted at `root` (usually `<repo>/tmdb_config`)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one record
    pub fn record_dir(&self, kind: MediaKind, id: &str) -> PathBuf {
        self.root.join(kind.path()).join(id)
    }

    /// Whether a record directory is already present
    pub fn exists(&self, kind: MediaKind, id: &str) -> bool {
        self.record_dir(kind, id).is_dir()
    }

    /// Write every file of a record, removing the record directory again if
    /// any write fails
    pub fn save_record(&self, kind: MediaKind, id: &str, files: &[(&str, &Value)]) -> Result<()> {
        let dir = self.record_dir(kind, id);
        let written = files
            .iter()
            .try_for_each(|(name, value)| self.save_json(&dir.join(name), value));
        if let Err(err) = written {
            warn!("Discarding partial record {}: {err}", dir.display());
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                warn!("Could not remove {}: {cleanup}", dir.display());
            }
            return Err(err);
        }
        Ok(())
    }

    /// Write `value` as pretty JSON (two-space indent, trailing newline)
    pub fn save_json(&self, path: &Path, value: &Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');
        fs::write(path, text)?;
        debug!("Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_record_layout() {
        let store = MetadataStore::new("/repo/tmdb_config");
        assert_eq!(
            store.record_dir(MediaKind::Movie, "550"),
            PathBuf::from("/repo/tmdb_config/movie/550")
        );
        assert_eq!(
            store.record_dir(MediaKind::Tv, "1399"),
            PathBuf::from("/repo/tmdb_config/tv/1399")
        );
    }

    #[test]
    fn test_save_json_format() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let path = store.record_dir(MediaKind::Movie, "550").join("details.json");

        store
            .save_json(&path, &json!({"title": "搏击俱乐部", "url": "a<b>&c"}))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "{\n  \"title\": \"搏击俱乐部\",\n  \"url\": \"a<b>&c\"\n}\n"
        );
        assert!(store.exists(MediaKind::Movie, "550"));
    }

    #[test]
    fn test_failed_record_write_leaves_no_directory() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let value = json!({"id": 550});

        // Second path needs `details.json` to be a directory, which it is not
        let result = store.save_record(
            MediaKind::Movie,
            "550",
            &[("details.json", &value), ("details.json/nested.json", &value)],
        );

        assert!(result.is_err());
        assert!(!store.exists(MediaKind::Movie, "550"));
    }
}
