//! Flag persistence
//!
//! The core owns only the key/value shape of the persisted flag map
//! (flag name -> bool); encodings live behind the [`FlagStore`] trait.
//! Two implementations ship here: a versioned file format and the
//! in-memory fake used by deterministic tests.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use tracing::debug;

use crate::error::StoreError;

/// Flags file magic bytes
pub const FLAGS_MAGIC: &[u8; 4] = b"RNDO";

/// Flags file format version
pub const FLAGS_VERSION: u32 = 1;

/// External world-persistence collaborator for progression flags
pub trait FlagStore {
    /// Read the persisted flag map. An error here is recoverable: the
    /// world loads fail-open with no milestones reached.
    fn load_flags(&self) -> Result<HashMap<String, bool>, StoreError>;

    /// Persist the flag map, replacing any previous snapshot.
    fn save_flags(&mut self, flags: &HashMap<String, bool>) -> Result<(), StoreError>;
}

/// File-backed store: magic bytes, version, then a length-prefixed JSON
/// payload of the flag map.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl FlagStore for FileFlagStore {
    fn load_flags(&self) -> Result<HashMap<String, bool>, StoreError> {
        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != FLAGS_MAGIC {
            return Err(StoreError::InvalidMagic);
        }

        let mut version_bytes = [0u8; 4];
        reader.read_exact(&mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != FLAGS_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: FLAGS_VERSION,
                found: version,
            });
        }

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload)?;

        let flags: HashMap<String, bool> = serde_json::from_slice(&payload)
            .map_err(|e| StoreError::Corrupted(e.to_string()))?;
        debug!(path = %self.path.display(), count = flags.len(), "flags loaded");
        Ok(flags)
    }

    fn save_flags(&mut self, flags: &HashMap<String, bool>) -> Result<(), StoreError> {
        let payload =
            serde_json::to_vec(flags).map_err(|e| StoreError::Corrupted(e.to_string()))?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(FLAGS_MAGIC)?;
        writer.write_all(&FLAGS_VERSION.to_le_bytes())?;
        writer.write_all(&(payload.len() as u32).to_le_bytes())?;
        writer.write_all(&payload)?;
        writer.flush()?;
        debug!(path = %self.path.display(), "flags saved");
        Ok(())
    }
}

/// In-memory store, the deterministic test fake
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    map: HashMap<String, bool>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn load_flags(&self) -> Result<HashMap<String, bool>, StoreError> {
        Ok(self.map.clone())
    }

    fn save_flags(&mut self, flags: &HashMap<String, bool>) -> Result<(), StoreError> {
        self.map = flags.clone();
        Ok(())
    }
}
