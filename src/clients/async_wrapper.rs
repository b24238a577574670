//! Async wrappers around the synchronous service clients.
//!
//! These traits are the seams the facades depend on, enabling substitute
//! (mock) implementations in tests. The HTTP-backed implementations run the
//! synchronous `ureq` calls under `tokio::task::spawn_blocking` so the async
//! runtime is never blocked.

use crate::clients::contacts::{ContactChanges, ContactsClient, NewContact, RemoteAttachment, RemoteContact};
use crate::clients::files::{FilesClient, RemoteFile};
use crate::error::{ApiResult, GroupwareApiError};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote contacts service contract.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// List contacts ordered by display name (first page, service default size).
    async fn list_contacts(&self) -> ApiResult<Vec<RemoteContact>>;

    /// Look a contact up by identifier via a filtered list query.
    async fn get_contact_by_filter(&self, contact_id: &str) -> ApiResult<Option<RemoteContact>>;

    /// Create a contact.
    async fn create_contact(&self, contact: &NewContact) -> ApiResult<RemoteContact>;

    /// Update the mutable fields of an existing contact.
    async fn update_contact(&self, contact_id: &str, changes: &ContactChanges) -> ApiResult<()>;

    /// Delete a contact.
    async fn delete_contact(&self, contact_id: &str) -> ApiResult<()>;

    /// Add an attachment to a contact.
    async fn add_attachment(
        &self,
        contact_id: &str,
        attachment: &RemoteAttachment,
    ) -> ApiResult<()>;

    /// List the attachments of a contact.
    async fn list_attachments(&self, contact_id: &str) -> ApiResult<Vec<RemoteAttachment>>;
}

/// Remote file-storage service contract.
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// List files at the root of the user's store.
    async fn list_files(&self) -> ApiResult<Vec<RemoteFile>>;

    /// List files inside a named folder.
    async fn list_folder(&self, folder_name: &str) -> ApiResult<Vec<RemoteFile>>;

    /// Fetch a file's metadata by identifier.
    async fn get_file(&self, file_id: &str) -> ApiResult<RemoteFile>;

    /// Create a file with the given name and content.
    async fn create_file(&self, name: &str, overwrite: bool, content: &[u8])
        -> ApiResult<RemoteFile>;

    /// Rename a file.
    async fn update_metadata(&self, file_id: &str, name: &str) -> ApiResult<()>;

    /// Overwrite a file's content.
    async fn update_content(&self, file_id: &str, content: &[u8]) -> ApiResult<()>;

    /// Delete a file.
    async fn delete_file(&self, file_id: &str) -> ApiResult<()>;

    /// Download a file's content.
    async fn download(&self, file_id: &str) -> ApiResult<Vec<u8>>;
}

fn join_error(e: tokio::task::JoinError) -> GroupwareApiError {
    GroupwareApiError::HttpError(format!("Task join error: {}", e))
}

/// Async wrapper around the synchronous [`ContactsClient`].
#[derive(Clone)]
pub struct AsyncContactsClient {
    client: Arc<ContactsClient>,
}

impl AsyncContactsClient {
    pub fn new(client: ContactsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl ContactsApi for AsyncContactsClient {
    async fn list_contacts(&self) -> ApiResult<Vec<RemoteContact>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_contacts())
            .await
            .map_err(join_error)?
    }

    async fn get_contact_by_filter(&self, contact_id: &str) -> ApiResult<Option<RemoteContact>> {
        let client = self.client.clone();
        let contact_id = contact_id.to_string();

        tokio::task::spawn_blocking(move || client.get_contact_by_filter(&contact_id))
            .await
            .map_err(join_error)?
    }

    async fn create_contact(&self, contact: &NewContact) -> ApiResult<RemoteContact> {
        let client = self.client.clone();
        let contact = contact.clone();

        tokio::task::spawn_blocking(move || client.create_contact(&contact))
            .await
            .map_err(join_error)?
    }

    async fn update_contact(&self, contact_id: &str, changes: &ContactChanges) -> ApiResult<()> {
        let client = self.client.clone();
        let contact_id = contact_id.to_string();
        let changes = changes.clone();

        tokio::task::spawn_blocking(move || client.update_contact(&contact_id, &changes))
            .await
            .map_err(join_error)?
    }

    async fn delete_contact(&self, contact_id: &str) -> ApiResult<()> {
        let client = self.client.clone();
        let contact_id = contact_id.to_string();

        tokio::task::spawn_blocking(move || client.delete_contact(&contact_id))
            .await
            .map_err(join_error)?
    }

    async fn add_attachment(
        &self,
        contact_id: &str,
        attachment: &RemoteAttachment,
    ) -> ApiResult<()> {
        let client = self.client.clone();
        let contact_id = contact_id.to_string();
        let attachment = attachment.clone();

        tokio::task::spawn_blocking(move || client.add_attachment(&contact_id, &attachment))
            .await
            .map_err(join_error)?
    }

    async fn list_attachments(&self, contact_id: &str) -> ApiResult<Vec<RemoteAttachment>> {
        let client = self.client.clone();
        let contact_id = contact_id.to_string();

        tokio::task::spawn_blocking(move || client.list_attachments(&contact_id))
            .await
            .map_err(join_error)?
    }
}

/// Async wrapper around the synchronous [`FilesClient`].
#[derive(Clone)]
pub struct AsyncFilesClient {
    client: Arc<FilesClient>,
}

impl AsyncFilesClient {
    pub fn new(client: FilesClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl FilesApi for AsyncFilesClient {
    async fn list_files(&self) -> ApiResult<Vec<RemoteFile>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_files())
            .await
            .map_err(join_error)?
    }

    async fn list_folder(&self, folder_name: &str) -> ApiResult<Vec<RemoteFile>> {
        let client = self.client.clone();
        let folder_name = folder_name.to_string();

        tokio::task::spawn_blocking(move || client.list_folder(&folder_name))
            .await
            .map_err(join_error)?
    }

    async fn get_file(&self, file_id: &str) -> ApiResult<RemoteFile> {
        let client = self.client.clone();
        let file_id = file_id.to_string();

        tokio::task::spawn_blocking(move || client.get_file(&file_id))
            .await
            .map_err(join_error)?
    }

    async fn create_file(
        &self,
        name: &str,
        overwrite: bool,
        content: &[u8],
    ) -> ApiResult<RemoteFile> {
        let client = self.client.clone();
        let name = name.to_string();
        let content = content.to_vec();

        tokio::task::spawn_blocking(move || client.create_file(&name, overwrite, &content))
            .await
            .map_err(join_error)?
    }

    async fn update_metadata(&self, file_id: &str, name: &str) -> ApiResult<()> {
        let client = self.client.clone();
        let file_id = file_id.to_string();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || client.update_metadata(&file_id, &name))
            .await
            .map_err(join_error)?
    }

    async fn update_content(&self, file_id: &str, content: &[u8]) -> ApiResult<()> {
        let client = self.client.clone();
        let file_id = file_id.to_string();
        let content = content.to_vec();

        tokio::task::spawn_blocking(move || client.update_content(&file_id, &content))
            .await
            .map_err(join_error)?
    }

    async fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        let client = self.client.clone();
        let file_id = file_id.to_string();

        tokio::task::spawn_blocking(move || client.delete_file(&file_id))
            .await
            .map_err(join_error)?
    }

    async fn download(&self, file_id: &str) -> ApiResult<Vec<u8>> {
        let client = self.client.clone();
        let file_id = file_id.to_string();

        tokio::task::spawn_blocking(move || client.download(&file_id))
            .await
            .map_err(join_error)?
    }
}
