use crate::{
    error::{Error, Result},
    metadata::MetadataRecord,
};
use serde_json::Value;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// The run's single persisted artifact, written once and read back for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    pub fn new(path: &Path) -> Self {
        RecordFile {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes a leftover file from an earlier run. Returns whether one was there.
    pub fn remove_stale(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = ?self.path, "Removed stale record");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Fails if the file already exists.
    pub fn write_new(&self, record: &MetadataRecord) -> Result<()> {
        let serialized = serde_json::to_string(&record.to_value())?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::RecordExists(self.path.clone()),
                _ => Error::Io(e),
            })?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn read(&self) -> Result<Value> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> MetadataRecord {
        let mut record = MetadataRecord::new();
        record.set("title", "봄 에디션");
        record.set("id", 4512);
        record
    }

    #[test]
    fn write_then_read_back() {
        let tmp_dir = TempDir::new().unwrap();
        let file = RecordFile::new(&tmp_dir.path().join("senddata.json"));
        file.write_new(&record()).unwrap();
        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("봄 에디션"));
        assert_eq!(file.read().unwrap(), record().to_value());
    }

    #[test]
    fn keys_are_written_in_insertion_order() {
        let tmp_dir = TempDir::new().unwrap();
        let file = RecordFile::new(&tmp_dir.path().join("senddata.json"));
        let mut record = record();
        record.set("fixedPrice", "{}");
        file.write_new(&record).unwrap();
        let raw = fs::read_to_string(file.path()).unwrap();
        let title = raw.find("\"title\"").unwrap();
        let id = raw.find("\"id\"").unwrap();
        let price = raw.find("\"fixedPrice\"").unwrap();
        assert!(title < id);
        assert!(id < price);
    }

    #[test]
    fn existing_file_blocks_write() {
        let tmp_dir = TempDir::new().unwrap();
        let file = RecordFile::new(&tmp_dir.path().join("senddata.json"));
        fs::write(file.path(), "{}").unwrap();
        let err = file.write_new(&record()).unwrap_err();
        assert!(matches!(err, Error::RecordExists(_)));
    }

    #[test]
    fn stale_file_is_removed_before_write() {
        let tmp_dir = TempDir::new().unwrap();
        let file = RecordFile::new(&tmp_dir.path().join("senddata.json"));
        fs::write(file.path(), r#"{"stale": true}"#).unwrap();
        assert!(file.remove_stale().unwrap());
        assert!(!file.remove_stale().unwrap());
        file.write_new(&record()).unwrap();
        assert!(file.read().unwrap().get("stale").is_none());
    }
}
