//! Plain-text textbook ingestion
//!
//! Only `.txt` files are accepted. Content is trimmed before it is handed
//! to a session.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{QaError, Result};
use crate::events::Notification;

/// Text read from a file, ready for `QaSession::submit_corpus`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub source: PathBuf,
    pub content: String,
}

impl LoadedText {
    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Summary line shown after loading
    pub fn summary(&self) -> String {
        format!(
            "Content loaded: {} characters. Ready for processing.",
            self.char_count()
        )
    }
}

/// Check whether a path looks like a plain-text file
pub fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Read and trim a `.txt` file
pub fn load_text_file(path: &Path) -> Result<LoadedText> {
    if !is_plain_text(path) {
        warn!(path = %path.display(), "rejected non-text upload");
        return Err(QaError::UnsupportedFileType(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path)?;
    let content = raw.trim();
    if content.is_empty() {
        return Err(QaError::InvalidContent(format!(
            "{} contains no text",
            path.display()
        )));
    }

    debug!(path = %path.display(), bytes = content.len(), "loaded text file");
    Ok(LoadedText {
        source: path.to_path_buf(),
        content: content.to_string(),
    })
}

/// Trim pasted text, rejecting blank input
pub fn normalize_pasted(text: &str) -> Result<String> {
    let content = text.trim();
    if content.is_empty() {
        return Err(QaError::InvalidContent("pasted text is empty".to_string()));
    }
    Ok(content.to_string())
}

/// Notice describing an ingestion failure
pub fn failure_notice(err: &QaError) -> Notification {
    match err {
        QaError::UnsupportedFileType(_) => Notification::invalid_file_type(),
        QaError::InvalidContent(_) => Notification::no_content_provided(),
        other => Notification::new(
            "Could not read file",
            other.to_string(),
            crate::events::Severity::Error,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_plain_text() {
        assert!(is_plain_text(Path::new("chapter1.txt")));
        assert!(is_plain_text(Path::new("CHAPTER1.TXT")));
        assert!(!is_plain_text(Path::new("chapter1.pdf")));
        assert!(!is_plain_text(Path::new("chapter1")));
    }

    #[test]
    fn test_load_text_file_trims() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("algorithms.txt");
        fs::write(&path, "\n  Heapsort is an in-place comparison sort.  \n\n").unwrap();

        let loaded = load_text_file(&path).unwrap();
        assert_eq!(loaded.content, "Heapsort is an in-place comparison sort.");
        assert_eq!(loaded.char_count(), 40);
        assert_eq!(
            loaded.summary(),
            "Content loaded: 40 characters. Ready for processing."
        );
    }

    #[test]
    fn test_load_rejects_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("algorithms.pdf");
        fs::write(&path, "binary-ish").unwrap();

        let err = load_text_file(&path).unwrap_err();
        assert!(matches!(err, QaError::UnsupportedFileType(_)));
        assert_eq!(failure_notice(&err).title, "Invalid file type");
    }

    #[test]
    fn test_load_rejects_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "   \n").unwrap();

        let err = load_text_file(&path).unwrap_err();
        assert!(matches!(err, QaError::InvalidContent(_)));
        assert_eq!(failure_notice(&err).title, "No content provided");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_text_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, QaError::IoError(_)));
        assert_eq!(failure_notice(&err).title, "Could not read file");
    }

    #[test]
    fn test_normalize_pasted() {
        assert_eq!(normalize_pasted("  text  ").unwrap(), "text");
        assert!(normalize_pasted(" \n ").is_err());
    }
}
