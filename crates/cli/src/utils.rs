use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::defaults;

/// Text to interpret and a label for diagnostics.
#[derive(Debug)]
pub struct Input {
    pub source: String,
    pub text: String,
}

/// Read a file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<Input> {
    match path {
        Some(path) if path != Path::new(defaults::STDIN) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Input {
                source: path.display().to_string(),
                text,
            })
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            Ok(Input {
                source: defaults::STDIN_SOURCE.to_string(),
                text,
            })
        }
    }
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, so readers never see a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents)
        .and_then(|()| file.flush())
        .context("Failed to write temporary file")?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
