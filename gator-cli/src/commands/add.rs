use anyhow::Result;
use std::path::Path;

pub fn run(dir: &Path, file: &str) -> Result<()> {
    super::open_repository(dir).add(file)?;
    Ok(())
}
