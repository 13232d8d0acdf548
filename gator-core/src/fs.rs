//! File-system capability consumed by the repository.
//!
//! The engine never touches `std::fs` directly; everything goes through a
//! [`FileSystem`] so tests can run against isolated temporary directories and
//! alternative backends can be swapped in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait FileSystem {
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;

    /// Creates `path` and any missing parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    fn remove_file(&self, path: &Path) -> std::io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Moves `from` to `to`, replacing `to` if it exists.
    fn move_file(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Copies `from` to `to`, replacing `to` if it exists.
    fn copy_file(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    fn read_string(&self, path: &Path) -> std::io::Result<String>;

    fn write_string(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Replaces `target` with `contents` so readers observe either the old or
    /// the new file, never a partial write.
    fn write_string_atomic(&self, target: &Path, contents: &str) -> std::io::Result<()> {
        let temp_path = temp_sibling(target);
        self.write_string(&temp_path, contents)?;
        if let Err(e) = self.move_file(&temp_path, target) {
            let _ = self.remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}

/// Unique scratch path next to `target`, on the same file system so the final
/// rename stays atomic.
pub fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(
        ".{}.{}.tmp",
        name.trim_start_matches('.'),
        uuid::Uuid::new_v4()
    ))
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        debug!("mkdir {:?}", path);
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        debug!("mkdir -p {:?}", path);
        fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        debug!("rm {:?}", path);
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
        debug!("rm -r {:?}", path);
        fs::remove_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        debug!("mv {:?} -> {:?}", from, to);
        fs::rename(from, to)?;

        // Fsync parent directory for durability
        if let Some(parent) = to.parent() {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        debug!("cp {:?} -> {:?}", from, to);
        fs::copy(from, to).map(|_| ())
    }

    fn read_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_string(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
