//! # gator-core
//!
//! Core library for gator - a minimal local snapshot store.
//!
//! A repository is a working directory plus a `.gatorgit` metadata directory
//! holding the staging index (`.index`), the head pointer (`.prev`) and one
//! directory per commit. Commits form a single linear chain and are never
//! modified after they are written.
//!
//! All operations are synchronous and assume a single actor at a time: there
//! is no locking beyond the atomic replacement of the index and head files.

pub mod error;
pub mod fs;
pub mod id;
pub mod index;
pub mod models;
pub mod repository;
pub mod status;

pub use error::{Error, Result};
pub use fs::{FileSystem, LocalFs};
pub use id::{next_id, CommitId, Head};
pub use index::{Index, IndexStore};
pub use models::CommitInfo;
pub use repository::{History, Repository, COMMIT_MARKER, META_DIR};
pub use status::StatusReport;
