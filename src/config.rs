//! Trie configuration
//!
//! Settings that shape every branch in a trie. They are fixed for the life of
//! a trie and validated once when it is constructed or loaded.

use crate::model::Hash;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

/// Slots needed to index every byte value plus the termination slot
pub const MAX_BRANCHING_FACTOR: usize = 257;

/// Configuration threaded into a [`PatriciaTrie`](crate::PatriciaTrie)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Child slots per branch. The last slot is the termination slot, so keys
    /// may only use byte values below `branching_factor - 1`.
    #[serde(default = "default_branching_factor")]
    pub branching_factor: usize,

    /// Store path key of the root branch.
    ///
    /// The empty path never arises during traversal (every stored subtree
    /// sits at least one branching byte below the root), which makes it a
    /// safe sentinel.
    #[serde(default, with = "hex_bytes")]
    pub root_path_key: Vec<u8>,

    /// Digest reported for empty slots, written as 64 hex characters
    #[serde(default = "default_null_digest", with = "hex_digest")]
    pub null_digest: Hash,
}

fn default_branching_factor() -> usize {
    MAX_BRANCHING_FACTOR
}

fn default_null_digest() -> Hash {
    Hash::digest(b"HASH")
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            branching_factor: default_branching_factor(),
            root_path_key: Vec::new(),
            null_digest: default_null_digest(),
        }
    }
}

impl TrieConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TrieConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the branching factor
    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Set the root path key
    pub fn with_root_path_key(mut self, root_path_key: impl Into<Vec<u8>>) -> Self {
        self.root_path_key = root_path_key.into();
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.branching_factor < 2 {
            return Err(Error::Config(format!(
                "branching factor must be greater than 1, got {}",
                self.branching_factor
            )));
        }
        if self.branching_factor > MAX_BRANCHING_FACTOR {
            return Err(Error::Config(format!(
                "branching factor must be at most {}, got {}",
                MAX_BRANCHING_FACTOR, self.branching_factor
            )));
        }
        Ok(())
    }
}

mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(
        bytes: &[u8],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

mod hex_digest {
    use super::*;

    pub fn serialize<S: Serializer>(
        digest: &Hash,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&digest.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
