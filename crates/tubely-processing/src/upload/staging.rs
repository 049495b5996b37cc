//! Request-scoped temporary storage for an uploaded body.
//!
//! The staged original and the remuxed copy live in one private directory that
//! is removed when the `StagedUpload` is dropped, whichever step fails.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

const STAGING_DIR_PREFIX: &str = "tubely-upload-";
const STAGED_FILE_NAME: &str = "upload.mp4";

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Upload exceeds the maximum size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Failed to stage upload: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct StagedUpload {
    /// Removes the staged original and the remuxed copy on drop.
    _dir: TempDir,
    path: PathBuf,
    size: u64,
}

impl StagedUpload {
    /// Copy `reader` to a fresh file under `root`, reading at most `limit` bytes.
    ///
    /// A body longer than `limit` fails with `TooLarge` after `limit + 1` bytes
    /// have been read; nothing beyond that is consumed.
    pub async fn stage<R>(root: &Path, reader: R, limit: u64) -> Result<Self, StagingError>
    where
        R: AsyncRead + Unpin,
    {
        tokio::fs::create_dir_all(root).await?;
        let dir = tempfile::Builder::new()
            .prefix(STAGING_DIR_PREFIX)
            .tempdir_in(root)?;
        let path = dir.path().join(STAGED_FILE_NAME);

        let mut file = tokio::fs::File::create(&path).await?;
        let mut limited = reader.take(limit.saturating_add(1));
        let size = tokio::io::copy(&mut limited, &mut file).await?;

        if size > limit {
            return Err(StagingError::TooLarge { limit });
        }

        file.flush().await?;
        file.sync_all().await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = size,
            "Upload staged"
        );

        Ok(Self {
            _dir: dir,
            path,
            size,
        })
    }

    /// The staged original.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remux::remux_output_path;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_stage_copies_body() {
        let root = tempfile::tempdir().unwrap();
        let staged = StagedUpload::stage(root.path(), Cursor::new(b"hello".to_vec()), 16)
            .await
            .unwrap();

        assert_eq!(staged.size(), 5);
        assert!(staged.path().starts_with(root.path()));
        assert_eq!(tokio::fs::read(staged.path()).await.unwrap(), b"hello");
        assert_eq!(
            remux_output_path(staged.path()),
            staged.path().with_file_name("upload.mp4.processing")
        );
    }

    #[tokio::test]
    async fn test_body_at_limit_is_accepted() {
        let root = tempfile::tempdir().unwrap();
        let staged = StagedUpload::stage(root.path(), Cursor::new(vec![7u8; 16]), 16)
            .await
            .unwrap();
        assert_eq!(staged.size(), 16);
    }

    #[tokio::test]
    async fn test_body_over_limit_rejected_and_removed() {
        let root = tempfile::tempdir().unwrap();
        let result = StagedUpload::stage(root.path(), Cursor::new(vec![0u8; 17]), 16).await;

        assert!(matches!(result, Err(StagingError::TooLarge { limit: 16 })));
        let mut entries = std::fs::read_dir(root.path()).unwrap();
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn test_drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let staged = StagedUpload::stage(root.path(), Cursor::new(b"x".to_vec()), 16)
            .await
            .unwrap();
        let dir = staged.path().parent().unwrap().to_path_buf();
        assert_ne!(dir, root.path());
        tokio::fs::write(remux_output_path(staged.path()), b"remuxed")
            .await
            .unwrap();

        drop(staged);

        assert!(!dir.exists());
    }
}
