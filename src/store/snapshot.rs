//! Single-file trie snapshots
//!
//! File format:
//! ```text
//! [HEADER: 12 bytes]
//!   - magic: 8 bytes ("PMTRIE01")
//!   - version: 4 bytes (u32 LE)
//!
//! [BODY: variable]
//!   - zstd-compressed bincode of { config, branches }
//! ```

use crate::config::TrieConfig;
use crate::store::{BranchStore, MemoryStore};
use crate::trie::PatriciaTrie;
use crate::error::display_path;
use crate::{Error, Result, MAGIC, VERSION};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const HEADER_SIZE: usize = 12;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    config: &'a TrieConfig,
    store: &'a MemoryStore,
}

#[derive(Deserialize)]
struct Snapshot {
    config: TrieConfig,
    store: MemoryStore,
}

impl PatriciaTrie<MemoryStore> {
    /// Write the whole trie to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let body = bincode::serialize(&SnapshotRef {
            config: self.config(),
            store: self.store(),
        })?;
        let compressed = zstd::encode_all(body.as_slice(), 3)?;

        let mut file = BufWriter::new(File::create(path.as_ref())?);
        file.write_all(MAGIC)?;
        file.write_all(&VERSION.to_le_bytes())?;
        file.write_all(&compressed)?;
        file.flush()?;

        tracing::debug!(
            path = %path.as_ref().display(),
            branches = self.store().len(),
            "saved snapshot"
        );
        Ok(())
    }

    /// Read a trie previously written by [`save`](Self::save)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut data = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut data)?;

        if data.len() < HEADER_SIZE {
            return Err(Error::InvalidFile("Truncated header".into()));
        }
        if &data[0..8] != MAGIC {
            return Err(Error::InvalidFile("Invalid magic bytes".into()));
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&data[8..12]);
        let version = u32::from_le_bytes(version);
        if version != VERSION {
            return Err(Error::VersionMismatch {
                expected: VERSION,
                found: version,
            });
        }

        let body = zstd::decode_all(&data[HEADER_SIZE..])?;
        let snapshot: Snapshot = bincode::deserialize(&body)?;

        snapshot.config.validate()?;
        if !snapshot.store.contains(&snapshot.config.root_path_key) {
            return Err(Error::InvalidFile("Missing root branch".into()));
        }
        let slots = snapshot.config.branching_factor;
        for (branch_path, branch) in snapshot.store.iter() {
            if !branch.fan_out_matches(slots) {
                return Err(Error::InvalidFile(format!(
                    "Branch at [{}] does not have {} slots",
                    display_path(branch_path),
                    slots
                )));
            }
        }

        tracing::debug!(path = %path.as_ref().display(), "loaded snapshot");
        PatriciaTrie::with_store(snapshot.config, snapshot.store)
    }

    /// Load `path` if it exists, otherwise start a fresh trie with `config`
    pub fn load_or_create(path: impl AsRef<Path>, config: TrieConfig) -> Result<Self> {
        if path.as_ref().exists() {
            PatriciaTrie::load(path)
        } else {
            PatriciaTrie::new(config)
        }
    }
}
