use crate::id::{CommitId, Head};
use serde::Serialize;

/// File names reserved inside the metadata directory and every commit
/// directory.
pub const INDEX_FILE: &str = ".index";
pub const PREV_FILE: &str = ".prev";
pub const MESSAGE_FILE: &str = ".msg";

/// A commit read back from its directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub id: CommitId,
    pub parent: Head,
    pub message: String,
    pub files: Vec<String>,
}

impl CommitInfo {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_root(&self) -> bool {
        self.parent == Head::Empty
    }
}

/// Whether `name` collides with one of the artifacts stored next to the
/// snapshot files in a commit directory.
pub fn is_reserved_name(name: &str) -> bool {
    matches!(name, INDEX_FILE | PREV_FILE | MESSAGE_FILE)
}
