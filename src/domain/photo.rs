//! Profile photo files and the type/size rule applied to them.

use thiserror::Error;

/// Largest accepted photo, in bytes (2 MiB).
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

/// MIME types accepted for profile photos.
pub const ACCEPTED_PHOTO_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Message shown to the user when a selected file is rejected.
pub const PHOTO_REJECTED_ALERT: &str = "Only JPG/PNG files under 2MB are allowed";

/// A selected or uploaded image file.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// Keep multi-megabyte payloads out of debug logs.
impl std::fmt::Debug for PhotoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Handle to the local preview of a staged photo.
///
/// Each accepted selection gets a fresh handle; the handle of a superseded
/// selection must be released by whoever rendered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(pub u64);

/// A photo accepted by the wizard together with its preview handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPhoto {
    pub file: PhotoFile,
    pub preview: PreviewId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoRejection {
    #[error("unsupported image type '{0}'")]
    UnsupportedType(String),

    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// Check a photo against the accepted types and a size limit.
pub fn check_photo(content_type: &str, size: usize, limit: usize) -> Result<(), PhotoRejection> {
    if !ACCEPTED_PHOTO_TYPES.contains(&content_type) {
        return Err(PhotoRejection::UnsupportedType(content_type.to_string()));
    }
    if size > limit {
        return Err(PhotoRejection::TooLarge { size, limit });
    }
    Ok(())
}
