use anyhow::Result;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    let report = super::open_repository(dir).status()?;

    print!("{}", report);
    Ok(())
}
