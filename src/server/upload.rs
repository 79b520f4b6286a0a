use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const FALLBACK_NAME: &str = "upload";

/// Sanitize a client-supplied filename so it is safe to join onto the
/// upload directory: the path is reduced to its final component, anything
/// outside [A-Za-z0-9._-] becomes an underscore, and leading dots are
/// stripped so the result can never traverse upward or hide itself.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

/// Write the uploaded bytes, unmodified, into the upload directory under a
/// sanitized name. Identical names overwrite each other; there is no
/// per-request namespacing.
pub fn save_upload(upload_dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(upload_dir)?;

    let path = upload_dir.join(secure_filename(filename));
    fs::write(&path, data)?;

    tracing::info!(path = %path.display(), bytes = data.len(), "Saved upload");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(secure_filename("conversation.txt"), "conversation.txt");
        assert_eq!(secure_filename("call-2024_01.mp3"), "call-2024_01.mp3");
    }

    #[test]
    fn test_path_components_are_dropped() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("/tmp/audio.wav"), "audio.wav");
        assert_eq!(secure_filename(r"C:\temp\audio.wav"), "audio.wav");
    }

    #[test]
    fn test_unsafe_characters_become_underscores() {
        assert_eq!(secure_filename("my file (1).txt"), "my_file__1_.txt");
    }

    #[test]
    fn test_hidden_and_empty_names_get_fallback() {
        assert_eq!(secure_filename(".."), "upload");
        assert_eq!(secure_filename(""), "upload");
        assert_eq!(secure_filename(".bashrc"), "bashrc");
    }

    #[test]
    fn test_save_writes_bytes_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_upload(dir.path(), "hello.txt", b"hello world").unwrap();

        assert_eq!(path, dir.path().join("hello.txt"));
        assert_eq!(fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        save_upload(dir.path(), "a.txt", b"first").unwrap();
        let path = save_upload(dir.path(), "a.txt", b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
