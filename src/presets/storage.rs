use super::types::PresetStore;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default presets file path (~/.config/terminal-score/presets.json)
pub fn get_presets_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("presets.json"))
}

/// Load presets from a JSON file
///
/// If the file doesn't exist, returns an empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_presets(path: &Path) -> Result<PresetStore> {
    if !path.exists() {
        return Ok(PresetStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open presets file at {}", path.display()))?;

    let store: PresetStore = serde_json::from_reader(file).context("Failed to load presets")?;

    if store.version != 1 {
        anyhow::bail!("Unsupported presets version: {}", store.version);
    }

    Ok(store)
}

/// Save presets to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_presets(path: &Path, store: &PresetStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize presets")?;

    file.commit().context("Failed to save presets")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::default_weights;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("terminal_score_test_presets_missing.json");
        let _ = fs::remove_file(&temp_path);

        let store = load_presets(&temp_path).unwrap();
        assert_eq!(store.version, 1);
        assert!(store.presets.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("terminal_score_test_presets_roundtrip.json");
        let _ = fs::remove_file(&temp_path);

        let mut store = PresetStore::new();
        store.save("equal".to_string(), default_weights());
        let mut value = default_weights();
        value.insert("PEG".to_string(), 100.0);
        store.save("value".to_string(), value);

        save_presets(&temp_path, &store).unwrap();
        let loaded = load_presets(&temp_path).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.presets.len(), 2);
        assert_eq!(loaded.get("value").unwrap().weights.get("PEG"), Some(&100.0));
        assert_eq!(loaded.get("equal"), store.get("equal"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version() {
        let temp_path = env::temp_dir().join("terminal_score_test_presets_version.json");
        fs::write(&temp_path, r#"{"version": 2, "presets": {}}"#).unwrap();

        let err = load_presets(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported presets version"));

        let _ = fs::remove_file(&temp_path);
    }
}
