//! Snapshot persistence
//!
//! A session snapshot lives in a single namespaced entry, wrapped in a
//! versioned envelope: `{"state": {...}, "version": 0}`.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};
use crate::models::SessionSnapshot;

/// Envelope version written by this crate
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSnapshot {
    state: SessionSnapshot,
    version: u32,
}

/// Encode a snapshot as the persisted JSON envelope
pub fn encode_snapshot(snapshot: &SessionSnapshot) -> SessionResult<String> {
    let envelope = PersistedSnapshot {
        state: snapshot.clone(),
        version: SNAPSHOT_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode the persisted JSON envelope
pub fn decode_snapshot(raw: &str) -> SessionResult<SessionSnapshot> {
    let envelope: PersistedSnapshot = serde_json::from_str(raw)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SessionError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.state)
}

/// Storage for the one persisted session entry
pub trait SnapshotRepository: Send + Sync {
    /// Load the stored snapshot, `None` if nothing is stored
    fn load(&self) -> SessionResult<Option<SessionSnapshot>>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &SessionSnapshot) -> SessionResult<()>;

    /// Remove the stored entry; removing a missing entry succeeds
    fn clear(&self) -> SessionResult<()>;
}

/// File-based repository: one `<key>.json` file in a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a repository storing `key` under `dir`
    pub fn new<P: AsRef<Path>>(dir: P, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    /// Repository under the user's data directory (`<data dir>/manahr/`)
    pub fn with_defaults(key: &str) -> SessionResult<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            SessionError::ConfigError("Could not determine data directory".to_string())
        })?;
        Ok(Self::new(base.join("manahr"), key))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn load(&self) -> SessionResult<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot = decode_snapshot(&raw)?;
        debug!("Session snapshot loaded from {:?}", self.path);
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, encode_snapshot(snapshot)?)?;
        debug!("Session snapshot saved to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Session snapshot removed: {:?}", self.path);
        }
        Ok(())
    }
}

/// In-memory repository holding the encoded entry
#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    raw: RwLock<Option<String>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with an arbitrary stored value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(Some(raw.into())),
        }
    }

    /// The stored value exactly as written
    pub fn raw(&self) -> Option<String> {
        self.raw.read().clone()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn load(&self) -> SessionResult<Option<SessionSnapshot>> {
        match self.raw.read().as_deref() {
            Some(raw) => Ok(Some(decode_snapshot(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &SessionSnapshot) -> SessionResult<()> {
        *self.raw.write() = Some(encode_snapshot(snapshot)?);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.raw.write() = None;
        Ok(())
    }
}
