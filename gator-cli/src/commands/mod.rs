pub mod add;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod status;

use gator_core::Repository;
use std::path::Path;

pub fn open_repository(dir: &Path) -> Repository {
    Repository::open(dir)
}
