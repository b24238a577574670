//! Cloud file-store facade.
//!
//! Thin pass-through to the remote file-storage service. Listing downloads
//! the content of every entry eagerly, which is a deliberate simplification
//! acceptable only for small file counts and sizes; callers with large
//! folders should fetch metadata-free listings through their own client
//! instead of inheriting this behavior silently.

use crate::auth::{DiscoveryContext, Session, SilentTokenSource};
use crate::clients::{AsyncFilesClient, FilesApi, FilesClient, RemoteFile};
use crate::config::Config;
use crate::error::{ApiResult, GroupwareApiError};
use crate::facades::join_error;
use crate::models::FileItem;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Per-session client for the user's cloud file store.
pub struct FilesFacade {
    api: Arc<dyn FilesApi>,
    session: Session,
}

impl FilesFacade {
    /// Sign in and construct a facade for the resulting session.
    ///
    /// Resolves the file-storage service via its named capability, captures
    /// the authenticated user identifier, and builds a client whose outgoing
    /// calls lazily acquire bearer tokens via silent acquisition.
    pub async fn sign_in(config: &Config, discovery: Arc<DiscoveryContext>) -> ApiResult<Self> {
        let capability = config.files_capability.clone();
        let dcr = {
            let discovery = discovery.clone();
            tokio::task::spawn_blocking(move || discovery.discover_capability(&capability))
                .await
                .map_err(join_error)??
        };

        tracing::info!(user = %dcr.user_id, "Signed in to file-storage service");

        let session = Session::new(discovery.clone(), dcr.user_id.clone());
        let tokens = Arc::new(SilentTokenSource::new(
            discovery,
            dcr.service_resource_id,
            dcr.user_id,
        ));
        let client = FilesClient::new(
            dcr.service_endpoint_uri,
            tokens,
            Duration::from_secs(config.request_timeout),
        );

        Ok(Self {
            api: Arc::new(AsyncFilesClient::new(client)),
            session,
        })
    }

    /// Construct a facade over an arbitrary service implementation (useful for testing).
    #[doc(hidden)]
    pub fn with_api(api: Arc<dyn FilesApi>, session: Session) -> Self {
        Self { api, session }
    }

    /// Identifier of the signed-in user.
    pub fn user_id(&self) -> &str {
        self.session.user_id()
    }

    /// List the files at the root of the store, content included.
    ///
    /// Content is downloaded eagerly for every entry. Suitable for small
    /// folders only.
    pub async fn list(&self) -> ApiResult<Vec<FileItem>> {
        let remote = self.api.list_files().await?;
        self.hydrate(remote).await
    }

    /// List the files inside a named folder, content included.
    ///
    /// A folder name the service does not know surfaces as
    /// [`GroupwareApiError::NotFound`].
    pub async fn list_folder(&self, folder_name: &str) -> ApiResult<Vec<FileItem>> {
        let remote = self.api.list_folder(folder_name).await?;
        self.hydrate(remote).await
    }

    async fn hydrate(&self, remote: Vec<RemoteFile>) -> ApiResult<Vec<FileItem>> {
        tracing::debug!("downloading content for {} files", remote.len());
        let mut files = Vec::with_capacity(remote.len());

        for entry in remote {
            let content = self.api.download(&entry.id).await?;
            files.push(FileItem {
                id: Some(entry.id),
                name: entry.name,
                content,
            });
        }

        Ok(files)
    }

    /// Fetch a file's content as a stream rewound to the start.
    pub async fn content(&self, file_id: &str) -> ApiResult<Cursor<Vec<u8>>> {
        let content = self.api.download(file_id).await?;
        Ok(Cursor::new(content))
    }

    /// Create a file, returning the record with its service-assigned
    /// identifier. An existing file of the same name is overwritten.
    pub async fn create(&self, name: &str, content: Vec<u8>) -> ApiResult<FileItem> {
        let created = self.api.create_file(name, true, &content).await?;

        Ok(FileItem {
            id: Some(created.id),
            name: created.name,
            content,
        })
    }

    /// Rename a file to the record's current name.
    pub async fn update_metadata(&self, file: &FileItem) -> ApiResult<()> {
        let id = file.id.as_deref().ok_or_else(|| {
            GroupwareApiError::InvalidRequest("file record has no remote identifier".to_string())
        })?;

        // fetch first, as the remote update applies to the current revision
        let remote = self.api.get_file(id).await?;
        self.api.update_metadata(&remote.id, &file.name).await
    }

    /// Overwrite a file's content.
    pub async fn update_content(&self, file_id: &str, content: &[u8]) -> ApiResult<()> {
        self.api.update_content(file_id, content).await
    }

    /// Delete a file.
    pub async fn delete(&self, file_id: &str) -> ApiResult<()> {
        self.api.delete_file(file_id).await
    }

    /// Invalidate the server-side session for the signed-in user.
    pub async fn sign_out(&self) -> ApiResult<()> {
        let session = self.session.clone();

        tokio::task::spawn_blocking(move || session.sign_out())
            .await
            .map_err(join_error)??;
        Ok(())
    }
}
