//! One JSON document per player on the local filesystem.
//!
//! Documents live at `<dir>/<uuid>.json`, pretty-printed with tab
//! indentation. Writes go to a unique temporary file in the same directory
//! and are renamed into place, so a reader never sees a half-written file and
//! concurrent writes for the same player never interleave.
//!
//! This is the only module that touches the filesystem.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use playervault_types::{PlayerId, PlayerRecord};
use serde::Serialize;
use tracing::debug;

use crate::error::StoreError;

/// File-backed player store.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    /// Suffix source for temporary file names.
    counter: AtomicU64,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The document path for a player.
    pub fn path_for(&self, id: PlayerId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn temp_path_for(&self, id: PlayerId) -> PathBuf {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(".{id}.json.{n}.tmp"))
    }

    /// Write a record, fully replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if the record cannot be serialized and
    /// [`StoreError::Io`] if the directory or file cannot be written.
    pub async fn write(&self, id: PlayerId, record: &PlayerRecord) -> Result<(), StoreError> {
        let bytes = encode(record).map_err(|source| StoreError::Encode { id, source })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(id);
        let temp = self.temp_path_for(id);
        if let Err(source) = tokio::fs::write(&temp, &bytes).await {
            return Err(StoreError::Io { path: temp, source });
        }
        if let Err(source) = tokio::fs::rename(&temp, &path).await {
            // Best effort; the rename error is the one worth reporting.
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Io { path, source });
        }

        debug!(%id, path = %path.display(), bytes = bytes.len(), "Wrote player data");
        Ok(())
    }

    /// Read a player's record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no document exists,
    /// [`StoreError::Decode`] if it is not a valid record, and
    /// [`StoreError::Io`] for any other read failure.
    pub async fn read(&self, id: PlayerId) -> Result<PlayerRecord, StoreError> {
        let path = self.path_for(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let record = decode(&bytes).map_err(|source| StoreError::Decode { id, source })?;
        debug!(%id, path = %path.display(), "Read player data");
        Ok(record)
    }
}

/// Serialize a record as tab-indented JSON.
///
/// # Errors
///
/// Returns the serializer error if the record cannot be encoded.
pub fn encode(record: &PlayerRecord) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    Ok(buf)
}

/// Parse a record from JSON bytes.
///
/// # Errors
///
/// Returns the parser error if the bytes are not a valid record.
pub fn decode(bytes: &[u8]) -> Result<PlayerRecord, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use playervault_types::Vec3;

    use super::*;

    fn record(id: PlayerId) -> PlayerRecord {
        PlayerRecord {
            position: Vec3::new(1.5, 70.0, -8.25),
            health: 18.5,
            max_health: 20.0,
            hunger: 17,
            experience: 42,
            ..PlayerRecord::new(id, "Steve")
        }
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("players"));
        let id = PlayerId::new();

        store.write(id, &record(id)).await.unwrap();
        assert!(store.path_for(id).exists());
        assert_eq!(store.read(id).await.unwrap(), record(id));
    }

    #[tokio::test]
    async fn repeated_writes_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();

        store.write(id, &record(id)).await.unwrap();
        let first = std::fs::read(store.path_for(id)).unwrap();
        store.write(id, &record(id)).await.unwrap();
        let second = std::fs::read(store.path_for(id)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        store.write(id, &record(id)).await.unwrap();
        store.write(id, &record(id)).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("{id}.json")]);
    }

    #[test]
    fn output_is_tab_indented() {
        let text = String::from_utf8(encode(&record(PlayerId::nil())).unwrap()).unwrap();
        assert!(text.starts_with("{\n\t\""));
        assert!(text.contains("\n\t\"Health\": 18.5"));
        assert!(!text.contains("Velocity"));
    }

    #[test]
    fn file_name_is_lowercase_hyphenated() {
        let store = FileStore::new("players");
        let id = PlayerId::from(uuid::Uuid::from_u128(0xABCD_EF01_2345_6789_ABCD_EF01_2345_6789));
        assert_eq!(
            store.path_for(id),
            Path::new("players").join("abcdef01-2345-6789-abcd-ef0123456789.json")
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        let err = store.read(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: missing } if missing == id));
    }

    #[tokio::test]
    async fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        std::fs::write(store.path_for(id), b"{ not json").unwrap();
        assert!(matches!(
            store.read(id).await.unwrap_err(),
            StoreError::Decode { .. }
        ));
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        std::fs::create_dir(store.path_for(id)).unwrap();
        assert!(matches!(
            store.read(id).await.unwrap_err(),
            StoreError::Io { .. }
        ));
    }

    #[tokio::test]
    async fn non_finite_floats_are_refused_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        let bad = PlayerRecord {
            velocity: Vec3::new(f64::NAN, 0.0, 0.0),
            ..record(id)
        };

        let err = store.write(id, &bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Encode { id: failed, .. } if failed == id));
        assert!(!store.path_for(id).exists());

        let infinite = PlayerRecord {
            health: f64::INFINITY,
            ..record(id)
        };
        assert!(encode(&infinite).is_err());
    }

    #[tokio::test]
    async fn integers_written_as_floats_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let id = PlayerId::new();
        let json = format!(
            r#"{{"UUID":"{id}","Username":"Alex","Hunger":19.0,"Experience":7,"FireTicks":2.0e1}}"#
        );
        std::fs::write(store.path_for(id), json).unwrap();

        let record = store.read(id).await.unwrap();
        assert_eq!(record.hunger, 19);
        assert_eq!(record.experience, 7);
        assert_eq!(record.fire_ticks, 20);
    }
}
