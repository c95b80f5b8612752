use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument};
use wallman_error::{catalog::CatalogError, CatalogResult};
use wallman_models::enums::catalog::AssetKind;

/// Blob storage for application icons and archives.
///
/// `persist` returns an opaque reference that is stored on the application
/// row; callers never build paths themselves.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn persist(
        &self,
        application_id: i32,
        kind: AssetKind,
        bytes: &[u8],
    ) -> CatalogResult<String>;

    /// Drop every blob stored for the application
    async fn purge(&self, application_id: i32) -> CatalogResult<()>;
}

/// Stores blobs as `<root>/<application id>/<kind>`
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a reference returned by `persist` to its file
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    #[instrument(name = "persist-asset", skip(self, bytes), fields(len = bytes.len()))]
    async fn persist(
        &self,
        application_id: i32,
        kind: AssetKind,
        bytes: &[u8],
    ) -> CatalogResult<String> {
        let dir = self.root.join(application_id.to_string());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| CatalogError::Asset(format!("{}: {e}", dir.display())))?;

        let reference = format!("{application_id}/{kind}");
        let path = self.root.join(&reference);
        fs::write(&path, bytes)
            .await
            .map_err(|e| CatalogError::Asset(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "asset written");
        Ok(reference)
    }

    async fn purge(&self, application_id: i32) -> CatalogResult<()> {
        let dir = self.root.join(application_id.to_string());
        match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::Asset(format!("{}: {e}", dir.display()))),
        }
    }
}
