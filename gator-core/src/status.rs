use std::fmt;

/// Snapshot of the tracked files, rendered for the user by `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub files: Vec<String>,
}

impl StatusReport {
    pub fn new(files: impl IntoIterator<Item = String>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn summary(&self) -> String {
        match self.count() {
            1 => "1 file total".to_string(),
            n => format!("{} files total", n),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tracked files:")?;
        writeln!(f)?;
        for file in &self.files {
            writeln!(f, "  {}", file)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.summary())
    }
}
