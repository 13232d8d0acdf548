//! The staging index: the ordered set of tracked paths.
//!
//! On disk the index is a text file with one path per line. In memory it is an
//! [`Index`], which owns the uniqueness invariant. [`IndexStore`] loads and
//! saves it at operation boundaries and always saves through an atomic
//! replace, so a crash mid-write leaves the previous index intact.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: Vec<String>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the persisted form. Line terminators are trimmed, blank lines
    /// skipped and repeated paths collapsed onto their first occurrence.
    pub fn parse(contents: &str) -> Self {
        let mut index = Self::new();
        for line in contents.lines() {
            let line = line.trim_end_matches('\r');
            if !line.is_empty() && !index.contains(line) {
                index.entries.push(line.to_string());
            }
        }
        index
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e == path)
    }

    /// Appends `path`, keeping every existing entry in place.
    pub fn insert(&mut self, path: &str) -> Result<()> {
        validate_path(path)?;
        if self.contains(path) {
            return Err(Error::AlreadyTracked(path.to_string()));
        }
        self.entries.push(path.to_string());
        Ok(())
    }

    /// Drops `path`; the remaining entries keep their relative order.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let position = self
            .entries
            .iter()
            .position(|e| e == path)
            .ok_or_else(|| Error::NotTracked(path.to_string()))?;
        self.entries.remove(position);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Index {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A path must fit on a single line of the index file.
fn validate_path(path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains(['\n', '\r']) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Index persisted at a fixed location.
pub struct IndexStore<'a, F> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> IndexStore<'a, F> {
    pub fn new(fs: &'a F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Index> {
        let contents = self.fs.read_string(&self.path)?;
        Ok(Index::parse(&contents))
    }

    pub fn save(&self, index: &Index) -> Result<()> {
        debug!("Writing {} index entries to {:?}", index.len(), self.path);
        self.fs.write_string_atomic(&self.path, &index.render())?;
        Ok(())
    }

    pub fn add(&self, path: &str) -> Result<()> {
        let mut index = self.load()?;
        index.insert(path)?;
        self.save(&index)?;
        info!("Tracking {}", path);
        Ok(())
    }

    pub fn remove(&self, path: &str) -> Result<()> {
        let mut index = self.load()?;
        index.remove(path)?;
        self.save(&index)?;
        info!("Stopped tracking {}", path);
        Ok(())
    }

    /// Tracked paths in persisted order. Each call re-reads the index file.
    pub fn list(&self) -> Result<std::vec::IntoIter<String>> {
        Ok(self.load()?.into_iter())
    }
}
