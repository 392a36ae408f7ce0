use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a text document from a file, or from stdin when `path` is `-`
pub fn read_input(path: &Path, what: &str) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} from {}", what, path.display()))
    }
}
