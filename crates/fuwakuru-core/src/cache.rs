//! Cached network responses (videos, images) that a reset also wipes.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StoreError;

pub trait AssetCache {
    /// Drop every cached entry. Returns how many were removed.
    fn clear(&mut self) -> Result<usize, StoreError>;
}

/// Cache kept as files in one directory.
#[derive(Debug, Clone)]
pub struct DirCache {
    root: PathBuf,
}

impl DirCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl AssetCache for DirCache {
    fn clear(&mut self) -> Result<usize, StoreError> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            removed += 1;
        }
        Ok(removed)
    }
}

/// In-memory cache keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: Vec<u8>) {
        self.entries.insert(url.into(), body);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetCache for MemoryCache {
    fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }
}
