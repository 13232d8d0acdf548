use crate::error::{Error, Result};
use crate::fs::{FileSystem, LocalFs};
use crate::id::{next_id, CommitId, Head, EMPTY_HEAD};
use crate::index::{Index, IndexStore};
use crate::models::{is_reserved_name, CommitInfo, INDEX_FILE, MESSAGE_FILE, PREV_FILE};
use crate::status::StatusReport;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the metadata directory inside the working directory.
pub const META_DIR: &str = ".gatorgit";

/// Literal a commit message has to contain.
pub const COMMIT_MARKER: &str = "GOLDEN GATOR!";

/// Handle on a working directory and its `.gatorgit` metadata.
///
/// Nothing here is locked. Two processes mutating the same repository at once
/// can interleave; only the index and head rewrites are atomic.
pub struct Repository<F = LocalFs> {
    workdir: PathBuf,
    meta_dir: PathBuf,
    fs: F,
}

impl Repository<LocalFs> {
    pub fn open<P: AsRef<Path>>(workdir: P) -> Self {
        Self::with_fs(workdir, LocalFs)
    }
}

impl<F: FileSystem> Repository<F> {
    pub fn with_fs<P: AsRef<Path>>(workdir: P, fs: F) -> Self {
        let workdir = workdir.as_ref().to_path_buf();
        let meta_dir = workdir.join(META_DIR);
        Self {
            workdir,
            meta_dir,
            fs,
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn meta_dir(&self) -> &Path {
        &self.meta_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.meta_dir.join(INDEX_FILE)
    }

    pub fn head_path(&self) -> PathBuf {
        self.meta_dir.join(PREV_FILE)
    }

    pub fn commit_dir(&self, id: &CommitId) -> PathBuf {
        self.meta_dir.join(id.to_string())
    }

    pub fn is_initialized(&self) -> bool {
        self.fs.is_file(&self.index_path()) && self.fs.is_file(&self.head_path())
    }

    /// Creates the metadata directory with an empty index and an empty head.
    pub fn init(&self) -> Result<()> {
        if self.fs.exists(&self.meta_dir) {
            return Err(Error::AlreadyInitialized(self.meta_dir.clone()));
        }

        self.fs.create_dir(&self.meta_dir)?;
        self.fs.write_string(&self.index_path(), "")?;
        self.fs.write_string(&self.head_path(), EMPTY_HEAD)?;

        info!("Initialized empty repository in {:?}", self.meta_dir);
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotARepository(self.workdir.clone()))
        }
    }

    fn index_store(&self) -> IndexStore<'_, F> {
        IndexStore::new(&self.fs, self.index_path())
    }

    // Index operations
    pub fn add(&self, path: &str) -> Result<()> {
        self.ensure_initialized()?;
        let normalized = normalize_tracked_path(path)?;
        self.index_store().add(&normalized)
    }

    pub fn remove(&self, path: &str) -> Result<()> {
        self.ensure_initialized()?;
        match normalize_tracked_path(path) {
            Ok(normalized) => self.index_store().remove(&normalized),
            // Entries written by hand may not normalize; match them verbatim.
            Err(_) => self.index_store().remove(path),
        }
    }

    pub fn list(&self) -> Result<impl Iterator<Item = String>> {
        self.ensure_initialized()?;
        self.index_store().list()
    }

    pub fn status(&self) -> Result<StatusReport> {
        Ok(StatusReport::new(self.list()?))
    }

    pub fn head(&self) -> Result<Head> {
        self.ensure_initialized()?;
        self.fs.read_string(&self.head_path())?.parse()
    }

    /// Snapshots every tracked file into a new commit and moves the head to it.
    ///
    /// The commit is assembled in a scratch directory and renamed into place
    /// once complete, so a directory named after a commit id is always a full
    /// snapshot. The head is rewritten last.
    pub fn commit(&self, message: &str) -> Result<CommitId> {
        self.ensure_initialized()?;

        if !message.contains(COMMIT_MARKER) {
            return Err(Error::InvalidMessage {
                marker: COMMIT_MARKER,
            });
        }

        let head = self.head()?;
        let id = next_id(&head)?;
        let index = self.index_store().load()?;

        for path in &index {
            if !self.fs.is_file(&self.workdir.join(path)) {
                return Err(Error::corrupt(format!(
                    "tracked file {} is missing from the working directory",
                    path
                )));
            }
        }

        let commit_dir = self.commit_dir(&id);
        if self.fs.exists(&commit_dir) {
            return Err(Error::corrupt(format!(
                "commit directory {} already exists",
                id
            )));
        }

        let staging = self
            .meta_dir
            .join(format!(".staging-{}", uuid::Uuid::new_v4()));
        debug!("Assembling commit {} in {:?}", id, staging);

        if let Err(e) = self.materialize(&staging, &index, message) {
            if let Err(cleanup) = self.fs.remove_dir_all(&staging) {
                warn!("Failed to remove {:?}: {}", staging, cleanup);
            }
            return Err(Error::corrupt(format!(
                "failed to write commit {}: {}",
                id, e
            )));
        }

        self.fs.move_file(&staging, &commit_dir)?;
        if let Err(e) = self
            .fs
            .write_string_atomic(&self.head_path(), &id.to_string())
        {
            warn!(
                "Commit {} was written but {:?} still points at {}",
                id,
                self.head_path(),
                head
            );
            return Err(Error::corrupt(format!(
                "commit {} is orphaned because the head could not be updated ({}); \
                 remove {:?} or write {} into {:?}",
                id,
                e,
                commit_dir,
                id,
                self.head_path()
            )));
        }

        info!(
            "Created commit {} with {} file(s), parent {}",
            id,
            index.len(),
            head
        );
        Ok(id)
    }

    fn materialize(&self, dir: &Path, index: &Index, message: &str) -> std::io::Result<()> {
        self.fs.create_dir(dir)?;
        self.fs.copy_file(&self.index_path(), &dir.join(INDEX_FILE))?;
        self.fs.copy_file(&self.head_path(), &dir.join(PREV_FILE))?;

        for path in index {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.copy_file(&self.workdir.join(path), &target)?;
        }

        self.fs.write_string(&dir.join(MESSAGE_FILE), message)
    }

    // Commit history
    pub fn read_commit(&self, id: &CommitId) -> Result<CommitInfo> {
        self.ensure_initialized()?;

        let dir = self.commit_dir(id);
        if !self.fs.exists(&dir) {
            return Err(Error::CommitNotFound(id.to_string()));
        }

        let read = |name: &str| {
            self.fs.read_string(&dir.join(name)).map_err(|e| {
                Error::corrupt(format!("commit {} is missing {}: {}", id, name, e))
            })
        };

        let parent: Head = read(PREV_FILE)?.parse()?;
        let message = read(MESSAGE_FILE)?;
        let files = Index::parse(&read(INDEX_FILE)?).into_iter().collect();

        Ok(CommitInfo {
            id: *id,
            parent,
            message,
            files,
        })
    }

    /// Commits reachable from the head, newest first.
    pub fn history(&self) -> Result<History<'_, F>> {
        Ok(History {
            repo: self,
            next: self.head()?.commit(),
        })
    }
}

/// Iterator over the commit chain, following each commit's frozen parent
/// pointer until the first commit.
pub struct History<'a, F> {
    repo: &'a Repository<F>,
    next: Option<CommitId>,
}

impl<F: FileSystem> Iterator for History<'_, F> {
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;

        let info = match self.repo.read_commit(&id) {
            Ok(info) => info,
            Err(Error::CommitNotFound(_)) => {
                return Some(Err(Error::corrupt(format!(
                    "commit {} is referenced but missing",
                    id
                ))))
            }
            Err(e) => return Some(Err(e)),
        };

        if let Head::Commit(parent) = info.parent {
            // Lineage only grows, so a parent at or above its child is a loop.
            if parent >= id {
                return Some(Err(Error::corrupt(format!(
                    "commit {} has out-of-order parent {}",
                    id, parent
                ))));
            }
            self.next = Some(parent);
        }

        Some(Ok(info))
    }
}

/// Canonical index form of `path`: `.` segments dropped, separators
/// collapsed to `/`. Rejects paths that would escape the working directory or
/// land on top of metadata when copied into a commit.
fn normalize_tracked_path(path: &str) -> Result<String> {
    let invalid = || Error::InvalidPath(path.to_string());

    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
            _ => return Err(invalid()),
        }
    }

    match parts.first() {
        None => return Err(invalid()),
        Some(first) if *first == META_DIR => return Err(invalid()),
        Some(_) => {}
    }

    let normalized = parts.join("/");
    if is_reserved_name(&normalized) {
        return Err(invalid());
    }
    Ok(normalized)
}
