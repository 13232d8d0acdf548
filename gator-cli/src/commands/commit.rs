use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Prints nothing on success; the new id is only logged.
pub fn run(dir: &Path, message: &str) -> Result<()> {
    let id = super::open_repository(dir).commit(message)?;

    info!("Committed {}", id);
    Ok(())
}
