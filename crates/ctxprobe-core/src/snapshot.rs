//! Whole-document snapshots for before/after comparison.
//!
//! A snapshot is always read in full and written in full; partial updates
//! do not exist. Comparison is whole-content equality, not a structural
//! diff.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Full capture of the target document's content at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSnapshot {
    bytes: Vec<u8>,
}

impl DocSnapshot {
    /// Read the entire file into a snapshot.
    pub fn capture(path: &Path) -> Result<Self> {
        Ok(Self {
            bytes: std::fs::read(path)?,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hex-encoded SHA-256 of the content.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }

    /// Signed byte-length change from `self` to `after`.
    pub fn size_delta(&self, after: &DocSnapshot) -> i64 {
        after.bytes.len() as i64 - self.bytes.len() as i64
    }

    /// Whether content differs between `self` and `after`.
    pub fn changed(&self, after: &DocSnapshot) -> bool {
        self.bytes != after.bytes
    }
}
