//! Reference image storage
//!
//! Uploaded pictures are written as individual files named
//! `<sanitized-base>_<unique-suffix><extension>` so that two customers
//! sending `cake.jpg` never overwrite each other.

use crate::core::error::UploadError;
use crate::core::order::ImageUpload;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Longest sanitized base name kept in a stored filename, in characters
pub const MAX_BASE_LEN: usize = 50;

/// Sink for reference images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image and return its server-relative path (leading `/`)
    async fn save(&self, upload: &ImageUpload) -> Result<String, UploadError>;

    /// Remove a previously saved image, given the path `save` returned
    async fn discard(&self, public_path: &str) -> Result<(), UploadError>;
}

/// Split a client filename into its base and extension (dot included).
///
/// Directory components are dropped. A leading dot does not start an
/// extension, so `.hidden` has no extension.
pub fn split_filename(original: &str) -> (&str, &str) {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Sanitize the base of a client filename: spaces become underscores and the
/// result is cut to [`MAX_BASE_LEN`] characters.
pub fn sanitize_base(base: &str) -> String {
    base.replace(' ', "_").chars().take(MAX_BASE_LEN).collect()
}

/// Build the stored filename for an upload
pub fn stored_filename(original: &str, suffix: &str) -> String {
    let (base, ext) = split_filename(original);
    format!("{}_{}{}", sanitize_base(base), suffix, ext)
}

/// Normalize a URL prefix to start with `/` and have no trailing slash.
///
/// The root prefix normalizes to the empty string.
pub fn normalize_public_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Fresh collision-resistant suffix
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Stores images on the local filesystem
#[derive(Clone, Debug)]
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// Create a store writing under `root` and reporting paths under `public_prefix`
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: normalize_public_prefix(public_prefix),
        }
    }

    /// Directory the files are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL path prefix the files are reported under
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    fn public_path(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix, filename)
    }

    fn file_path(&self, public_path: &str) -> Option<PathBuf> {
        let filename = public_path.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return None;
        }
        Some(self.root.join(filename))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.root.clone(),
                source,
            })?;

        let filename = stored_filename(&upload.filename, &unique_suffix());
        let path = self.root.join(&filename);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "stored reference image");

        Ok(self.public_path(&filename))
    }

    async fn discard(&self, public_path: &str) -> Result<(), UploadError> {
        let Some(path) = self.file_path(public_path) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadError::Write { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_filename() {
        assert_eq!(split_filename("cake.png"), ("cake", ".png"));
        assert_eq!(split_filename("birthday cake.final.jpeg"), ("birthday cake.final", ".jpeg"));
        assert_eq!(split_filename("noext"), ("noext", ""));
        assert_eq!(split_filename(".hidden"), (".hidden", ""));
        assert_eq!(split_filename("photos/cake.png"), ("cake", ".png"));
        assert_eq!(split_filename("C:\\photos\\cake.png"), ("cake", ".png"));
    }

    #[test]
    fn test_sanitize_base() {
        assert_eq!(sanitize_base("my cake photo"), "my_cake_photo");

        let long = "a".repeat(80);
        assert_eq!(sanitize_base(&long).len(), MAX_BASE_LEN);

        // counted in characters, not bytes
        let arabic = "كعكة".repeat(20);
        assert_eq!(sanitize_base(&arabic).chars().count(), MAX_BASE_LEN);
    }

    #[test]
    fn test_stored_filename_layout() {
        assert_eq!(
            stored_filename("wedding cake.png", "abc123"),
            "wedding_cake_abc123.png"
        );
        assert_eq!(stored_filename("sketch", "abc123"), "sketch_abc123");
    }

    #[test]
    fn test_unique_suffix_differs() {
        assert_ne!(unique_suffix(), unique_suffix());
        assert_eq!(unique_suffix().len(), 32);
    }

    #[test]
    fn test_public_prefix_is_normalized() {
        assert_eq!(LocalImageStore::new("x", "uploads/").public_prefix(), "/uploads");
        assert_eq!(LocalImageStore::new("x", "/media/cakes").public_prefix(), "/media/cakes");
        assert_eq!(LocalImageStore::new("x", "/").public_prefix(), "");
    }

    #[tokio::test]
    async fn test_save_writes_bytes_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"), "/uploads");

        let upload = ImageUpload::new("cake photo.png", b"\x89PNG fake".to_vec());
        let public = store.save(&upload).await.unwrap();

        assert!(public.starts_with("/uploads/cake_photo_"));
        assert!(public.ends_with(".png"));

        let filename = public.trim_start_matches("/uploads/");
        let written = std::fs::read(dir.path().join("uploads").join(filename)).unwrap();
        assert_eq!(written, b"\x89PNG fake");
    }

    #[tokio::test]
    async fn test_same_filename_never_collides() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");
        let upload = ImageUpload::new("cake.jpg", b"one".to_vec());

        let first = store.save(&upload).await.unwrap();
        let second = store.save(&upload).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");

        let public = store
            .save(&ImageUpload::new("cake.jpg", b"bytes".to_vec()))
            .await
            .unwrap();
        store.discard(&public).await.unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        // already gone
        store.discard(&public).await.unwrap();
    }

    #[tokio::test]
    async fn test_discard_ignores_foreign_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");

        store.discard("/etc/passwd").await.unwrap();
        store.discard("/uploads/../secret").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_fails_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("uploads");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = LocalImageStore::new(&blocker, "/uploads");
        let err = store
            .save(&ImageUpload::new("cake.jpg", b"bytes".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::CreateDir { .. }));
    }
}
