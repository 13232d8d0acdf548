use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run(dir: &Path) -> Result<()> {
    let repo = super::open_repository(dir);
    repo.init()?;

    info!("Repository ready at {:?}", repo.meta_dir());
    Ok(())
}
