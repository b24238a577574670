//! Synchronous HTTP client for the remote file-storage service.
//!
//! Speaks the file-storage service's contract: listing (root or by folder
//! path), get-by-identifier, create with an overwrite flag, metadata and
//! content updates, delete, and download.

use crate::auth::TokenSource;
use crate::clients::{map_error, Page};
use crate::error::{ApiResult, GroupwareApiError};
use serde::Deserialize;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// A file as represented by the remote service. Content is fetched through
/// a separate download call, never inline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteFile {
    /// Service-assigned identifier
    pub id: String,

    #[serde(default)]
    pub name: String,
}

/// Synchronous client for the file-storage service.
#[derive(Clone)]
pub struct FilesClient {
    endpoint_uri: String,
    tokens: Arc<dyn TokenSource>,
    agent: Arc<ureq::Agent>,
}

impl FilesClient {
    /// Create a client against a resolved service endpoint.
    pub fn new(endpoint_uri: String, tokens: Arc<dyn TokenSource>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            endpoint_uri,
            tokens,
            agent: Arc::new(agent),
        }
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.endpoint_uri.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);
        let token = self.tokens.access_token()?;
        tracing::debug!("GET {}", url);

        self.agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", token))
            .call()
            .map_err(map_error)
    }

    fn send_bytes(&self, method: &str, path: &str, content: &[u8]) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);
        let token = self.tokens.access_token()?;
        tracing::debug!("{} {} ({} bytes)", method, url, content.len());

        self.agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", token))
            .set("Content-Type", "application/octet-stream")
            .send_bytes(content)
            .map_err(map_error)
    }

    fn patch(&self, path: &str, body: &serde_json::Value) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);
        let token = self.tokens.access_token()?;
        tracing::debug!("PATCH {}", url);

        self.agent
            .request("PATCH", &url)
            .set("Authorization", &format!("Bearer {}", token))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_error)
    }

    fn delete(&self, path: &str) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);
        let token = self.tokens.access_token()?;
        tracing::debug!("DELETE {}", url);

        self.agent
            .delete(&url)
            .set("Authorization", &format!("Bearer {}", token))
            .call()
            .map_err(map_error)
    }

    /// List the files at the root of the user's store.
    pub fn list_files(&self) -> ApiResult<Vec<RemoteFile>> {
        let response = self.get("/me/files")?;
        let page: Page<RemoteFile> = response.into_json().map_err(read_error)?;
        Ok(page.value)
    }

    /// List the files inside a named folder.
    ///
    /// A folder name the service does not know propagates as
    /// [`GroupwareApiError::NotFound`].
    pub fn list_folder(&self, folder_name: &str) -> ApiResult<Vec<RemoteFile>> {
        let path = format!("/me/files/{}/children", urlencoding::encode(folder_name));
        let response = self.get(&path)?;
        let page: Page<RemoteFile> = response.into_json().map_err(read_error)?;
        Ok(page.value)
    }

    /// Fetch a file's metadata by identifier.
    pub fn get_file(&self, file_id: &str) -> ApiResult<RemoteFile> {
        let path = format!("/me/files/{}", urlencoding::encode(file_id));
        let response = self.get(&path)?;
        response.into_json::<RemoteFile>().map_err(read_error)
    }

    /// Create a file with the given name and content.
    ///
    /// The overwrite flag asks the service to replace an existing file of the
    /// same name instead of failing.
    pub fn create_file(
        &self,
        name: &str,
        overwrite: bool,
        content: &[u8],
    ) -> ApiResult<RemoteFile> {
        let path = format!(
            "/me/files?name={}&overwrite={}",
            urlencoding::encode(name),
            overwrite
        );
        let response = self.send_bytes("POST", &path, content)?;
        response.into_json::<RemoteFile>().map_err(read_error)
    }

    /// Rename a file.
    pub fn update_metadata(&self, file_id: &str, name: &str) -> ApiResult<()> {
        let body = serde_json::json!({ "Name": name });
        let path = format!("/me/files/{}", urlencoding::encode(file_id));
        self.patch(&path, &body)?;
        Ok(())
    }

    /// Overwrite a file's content.
    pub fn update_content(&self, file_id: &str, content: &[u8]) -> ApiResult<()> {
        let path = format!("/me/files/{}/content", urlencoding::encode(file_id));
        self.send_bytes("PUT", &path, content)?;
        Ok(())
    }

    /// Delete a file.
    pub fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        let path = format!("/me/files/{}", urlencoding::encode(file_id));
        self.delete(&path)?;
        Ok(())
    }

    /// Download a file's content.
    pub fn download(&self, file_id: &str) -> ApiResult<Vec<u8>> {
        let path = format!("/me/files/{}/content", urlencoding::encode(file_id));
        let response = self.get(&path)?;

        let mut content = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut content)
            .map_err(read_error)?;
        Ok(content)
    }
}

fn read_error(e: std::io::Error) -> GroupwareApiError {
    GroupwareApiError::HttpError(e.to_string())
}
