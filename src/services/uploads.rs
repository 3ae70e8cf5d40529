//! Profile photo storage on the local filesystem.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a fresh `<uuid>-<name>` file name and return its
    /// public path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::write(self.root.join(&file_name), bytes).await?;
        tracing::debug!(%file_name, size = bytes.len(), "Stored upload");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }
}

/// Keep only the final path component and replace anything outside
/// `[A-Za-z0-9._-]`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
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
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned.to_string()
    }
}
