use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::backend::ObjectStorage;
use crate::errors::InternalError;

/// Filesystem object storage; each bucket is a directory under `root`
///
/// Objects are served by the HTTP layer under `{public_base_url}/storage/`.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, InternalError> {
        for part in [bucket, key] {
            let mut components = Path::new(part).components();
            let single_normal = matches!(components.next(), Some(Component::Normal(_)))
                && components.next().is_none();
            if !single_normal {
                return Err(InternalError::storage(
                    "resolve_object_path",
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("invalid object path segment: {}", part),
                    ),
                ));
            }
        }

        Ok(self.root.join(bucket).join(key))
    }
}

/// Write all of `bytes`; on failure the file at `path` is removed so no
/// truncated object is left behind
async fn write_object<W>(path: &Path, mut file: W, bytes: &[u8]) -> Result<(), InternalError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!("Failed to remove partial object {}: {}", path.display(), remove_err);
        }
        return Err(InternalError::storage("write_object", e));
    }

    Ok(())
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), InternalError> {
        let path = self.object_path(bucket, key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InternalError::storage("create_bucket_dir", e))?;
        }

        // create_new: keys are never overwritten
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| InternalError::storage("create_object", e))?;

        write_object(&path, file, &bytes).await?;

        tracing::debug!("Stored object {}/{} ({}, {} bytes)", bucket, key, content_type, bytes.len());

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/{}/{}", self.public_base_url, bucket, key)
    }
}
