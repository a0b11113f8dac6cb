//! Crash-safe whole-file persistence for JSON and TOML documents.

use jot_core::error::{JotError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Pretty-printed JSON (two-space indent).
    Json,
    Toml,
}

impl FileFormat {
    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        Ok(match self {
            FileFormat::Json => serde_json::to_string_pretty(data)?,
            FileFormat::Toml => toml::to_string_pretty(data)?,
        })
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        Ok(match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        })
    }
}

/// A document stored in a single file, replaced atomically on every save.
///
/// Writes go to a hidden sibling tmp file which is fsynced and then renamed
/// over the target, so readers see either the old or the new document.
/// [`AtomicFile::save`] holds an exclusive `fs2` lock on a sibling `.lock`
/// file while it writes.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document. A missing or blank file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Replaces the document on disk under the file lock.
    pub fn save(&self, data: &T) -> Result<()> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write(data)
    }

    fn write(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| JotError::io(format!("{} has no file name", self.path.display())))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(match self.path.parent() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        })
    }
}

/// Exclusive lock on `<file>.lock`, released and removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| JotError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    fn counter(count: u32) -> Counter {
        Counter {
            name: "notes".to_string(),
            count,
        }
    }

    #[test]
    fn test_json_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("data.json"));

        file.save(&counter(3)).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter(3)));
        assert!(!temp_dir.path().join(".data.json.tmp").exists());
        assert!(!temp_dir.path().join("data.lock").exists());
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let file = AtomicFile::<Counter>::toml(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AtomicFile::<Counter>::json(path).load().unwrap_err();
        assert!(err.is_serialization());
    }
}
