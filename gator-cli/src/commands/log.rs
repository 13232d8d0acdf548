use anyhow::{Context, Result};
use colored::Colorize;
use gator_core::CommitInfo;
use std::path::Path;

pub fn run(dir: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let repo = super::open_repository(dir);
    let commits = repo
        .history()?
        .take(limit.unwrap_or(usize::MAX))
        .collect::<gator_core::Result<Vec<CommitInfo>>>()?;

    if json {
        let out = serde_json::to_string_pretty(&commits).context("Failed to encode history")?;
        println!("{}", out);
        return Ok(());
    }

    if commits.is_empty() {
        println!("{}", "No commits yet".yellow());
        return Ok(());
    }

    for info in &commits {
        println!(
            "{} {}",
            "commit".yellow().bold(),
            info.id.to_string().yellow()
        );
        if !info.is_root() {
            println!("{}: {}", "Parent".bold(), info.parent);
        }
        println!();
        for line in info.message.lines() {
            println!("    {}", line);
        }
        println!();
        println!(
            "    {} file(s) tracked",
            info.file_count().to_string().cyan()
        );

        for path in info.files.iter().take(5) {
            println!("      • {}", path.dimmed());
        }
        if info.files.len() > 5 {
            println!(
                "      {} and {} more...",
                "...".dimmed(),
                (info.files.len() - 5).to_string().dimmed()
            );
        }

        println!();
    }

    Ok(())
}
