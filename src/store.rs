use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;
use crate::model::Document;

const DATA_FILE_NAME: &str = "refine.json";

/// Load/save access to the persisted document.
pub trait DocumentStore {
    fn load(&self) -> Result<Document, AppError>;
    fn save(&self, document: &Document) -> Result<(), AppError>;
}

/// Default data file: `refine.json` next to the running executable.
pub fn resolve_data_path() -> Result<PathBuf, AppError> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| AppError::NotFound(format!("parent directory of {}", exe.display())))?;
    Ok(dir.join(DATA_FILE_NAME))
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document if the data file does not exist yet.
    pub fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        debug!(path = %self.path.display(), "creating empty data file");
        ensure_parent_dir(&self.path)?;
        self.save(&Document::default())
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "data file {}",
                    self.path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        let document: Document = serde_json::from_str(&contents).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "data file failed to parse");
            AppError::CorruptData {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;
        debug!(path = %self.path.display(), goals = document.goals.len(), "loaded data file");
        Ok(document)
    }

    fn save(&self, document: &Document) -> Result<(), AppError> {
        let mut buf = serde_json::to_string_pretty(document)?;
        buf.push('\n');
        fs::write(&self.path, buf)?;
        debug!(path = %self.path.display(), goals = document.goals.len(), "saved data file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Goal;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join(DATA_FILE_NAME))
    }

    #[test]
    fn save_then_load_preserves_order_and_unicode() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let document = Document {
            goals: vec![
                Goal {
                    title: "Apprendre la guitare 🎸".to_string(),
                    steps: vec![
                        "Acheter une guitare".to_string(),
                        "日本語の練習".to_string(),
                    ],
                },
                Goal::new("Run a marathon"),
                Goal {
                    title: "Read".to_string(),
                    steps: vec!["z".to_string(), "a".to_string(), "m".to_string()],
                },
            ],
        };

        store.save(&document).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, document);

        let raw = fs::read_to_string(store.path()).expect("read raw");
        assert!(raw.contains("日本語の練習"));
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn ensure_initialized_writes_empty_document_once() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        store.ensure_initialized().expect("first init");
        let first = fs::read_to_string(store.path()).expect("read after first init");
        store.ensure_initialized().expect("second init");
        let second = fs::read_to_string(store.path()).expect("read after second init");

        assert_eq!(first, second);
        assert_eq!(store.load().expect("load"), Document::default());
    }

    #[test]
    fn ensure_initialized_keeps_existing_goals() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let document = Document {
            goals: vec![Goal::new("Keep me")],
        };
        store.save(&document).expect("save");

        store.ensure_initialized().expect("init");
        assert_eq!(store.load().expect("load"), document);
    }

    #[test]
    fn ensure_initialized_creates_parent_dirs() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("data").join("refine.json");
        let store = JsonFileStore::new(path);

        store.ensure_initialized().expect("init");
        assert!(store.path().exists());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let err = store_in(&dir).load().expect_err("missing file");
        assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn load_malformed_file_is_corrupt_data() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"goals\": [").expect("write garbage");

        let err = store.load().expect_err("corrupt file");
        assert!(matches!(err, AppError::CorruptData { .. }), "got {err:?}");
    }

    #[test]
    fn load_wrong_shape_is_corrupt_data() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"goals": "not a list"}"#).expect("write wrong shape");

        let err = store.load().expect_err("wrong shape");
        assert!(matches!(err, AppError::CorruptData { .. }), "got {err:?}");
    }
}
