use crate::domain::errors::RelayError;
use crate::domain::models::InstructionDocument;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn looks_like_markdown(name: &str) -> bool {
    name.to_ascii_lowercase().contains(".md")
}

pub fn load_scan_results(path: &Path) -> Result<Value, RelayError> {
    let fail = |reason: String| RelayError::ScanResultsRead {
        path: path.to_path_buf(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| fail(e.to_string()))
}

/// Picks the instruction file. For a directory, entry names are sorted by
/// byte order and the first one containing `.md` (any case) wins.
pub fn resolve_instruction_path(path: &Path) -> Result<PathBuf, RelayError> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }
    let lookup = |source: std::io::Error| RelayError::InstructionLookup {
        path: path.to_path_buf(),
        source,
    };
    let mut names = std::fs::read_dir(path)
        .map_err(lookup)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(lookup)?;
    names.sort();
    names
        .into_iter()
        .find(|name| looks_like_markdown(&name.to_string_lossy()))
        .map(|name| path.join(name))
        .ok_or_else(|| RelayError::NoInstructionFile {
            dir: path.to_path_buf(),
        })
}

pub fn load_instruction_document(resolved: &Path) -> Result<InstructionDocument, RelayError> {
    let content =
        std::fs::read_to_string(resolved).map_err(|source| RelayError::InstructionRead {
            path: resolved.to_path_buf(),
            source,
        })?;
    let filename = resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(InstructionDocument {
        path: resolved.to_path_buf(),
        filename,
        content,
    })
}

pub fn write_instructions(path: &Path, content: &str) -> Result<(), RelayError> {
    std::fs::write(path, content).map_err(|source| RelayError::InstructionWrite {
        path: path.to_path_buf(),
        source,
    })
}
