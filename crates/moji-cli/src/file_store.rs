//! File-backed key-value store
//!
//! Each key is one `<key>.json` file under a data directory. Writes go to a
//! temporary file that is synced and renamed over the target.

use moji_core::{KeyValueStore, StoreError, StoreResult};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<local data dir>/moji`, or `./moji` when the platform has none
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moji")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Unavailable(format!("invalid key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::create_dir_all(&self.dir)?;

        if let Err(e) = write_replacing(&tmp_path, &path, value) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "File"
    }
}

fn write_replacing(tmp_path: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    fs::rename(tmp_path, path)
}
