//! Synchronous HTTP client for the remote contacts service.
//!
//! Speaks the contacts service's JSON contract: a paged, sorted listing, a
//! filtered lookup, CRUD on contacts, and add/list on the attachment
//! sub-resource. Lookup by identifier goes through a `$filter` query instead
//! of the direct by-id path, which is unreliable in the target service
//! version.

use crate::auth::TokenSource;
use crate::clients::{map_error, Page};
use crate::error::{ApiResult, GroupwareApiError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;

/// A contact as represented by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteContact {
    /// Service-assigned identifier
    pub id: String,

    #[serde(default)]
    pub given_name: String,

    #[serde(default)]
    pub surname: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub email_address1: String,

    #[serde(default)]
    pub job_title: String,
}

/// Payload for creating a contact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewContact {
    pub given_name: String,
    pub display_name: String,
    pub email_address1: String,
    pub job_title: String,
}

/// Payload for updating the mutable contact fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactChanges {
    pub email_address1: String,
    pub job_title: String,
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(bytes))
}

fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64.decode(&encoded).map_err(serde::de::Error::custom)
}

/// A file attachment on a contact. Content bytes travel base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Whether this attachment is flagged as the profile photo
    pub is_contact_photo: bool,

    #[serde(
        serialize_with = "serialize_base64",
        deserialize_with = "deserialize_base64"
    )]
    pub content_bytes: Vec<u8>,
}

/// Synchronous client for the contacts service.
///
/// Every outgoing call acquires a bearer token from the [`TokenSource`]
/// lazily, so renewal stays invisible to callers. Designed to be driven from
/// async contexts via `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ContactsClient {
    endpoint_uri: String,
    tokens: Arc<dyn TokenSource>,
    agent: Arc<ureq::Agent>,
}

impl ContactsClient {
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

    fn post(&self, path: &str, body: &serde_json::Value) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);
        let token = self.tokens.access_token()?;
        tracing::debug!("POST {}", url);

        self.agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", token))
            .set("Content-Type", "application/json")
            .send_json(body)
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

    /// List contacts ordered by display name.
    ///
    /// Returns the first page only; page size is the service default.
    pub fn list_contacts(&self) -> ApiResult<Vec<RemoteContact>> {
        let response = self.get("/me/contacts?$orderby=DisplayName")?;
        let page: Page<RemoteContact> = response.into_json().map_err(read_error)?;
        Ok(page.value)
    }

    /// Look a contact up by identifier via a filtered list query.
    ///
    /// Returns `None` when the identifier does not resolve.
    pub fn get_contact_by_filter(&self, contact_id: &str) -> ApiResult<Option<RemoteContact>> {
        let filter = format!("Id eq '{}'", contact_id);
        let path = format!("/me/contacts?$filter={}", urlencoding::encode(&filter));
        let response = self.get(&path)?;
        let page: Page<RemoteContact> = response.into_json().map_err(read_error)?;
        Ok(page.value.into_iter().next())
    }

    /// Create a contact, returning the service's representation with its
    /// assigned identifier.
    pub fn create_contact(&self, contact: &NewContact) -> ApiResult<RemoteContact> {
        let body = serde_json::to_value(contact).map_err(GroupwareApiError::JsonError)?;
        let response = self.post("/me/contacts", &body)?;
        response.into_json::<RemoteContact>().map_err(read_error)
    }

    /// Update the mutable fields of an existing contact.
    pub fn update_contact(&self, contact_id: &str, changes: &ContactChanges) -> ApiResult<()> {
        let body = serde_json::to_value(changes).map_err(GroupwareApiError::JsonError)?;
        let path = format!("/me/contacts/{}", urlencoding::encode(contact_id));
        self.patch(&path, &body)?;
        Ok(())
    }

    /// Delete a contact.
    pub fn delete_contact(&self, contact_id: &str) -> ApiResult<()> {
        let path = format!("/me/contacts/{}", urlencoding::encode(contact_id));
        self.delete(&path)?;
        Ok(())
    }

    /// Add an attachment to a contact.
    pub fn add_attachment(&self, contact_id: &str, attachment: &RemoteAttachment) -> ApiResult<()> {
        let body = serde_json::to_value(attachment).map_err(GroupwareApiError::JsonError)?;
        let path = format!("/me/contacts/{}/attachments", urlencoding::encode(contact_id));
        self.post(&path, &body)?;
        Ok(())
    }

    /// List the attachments of a contact.
    pub fn list_attachments(&self, contact_id: &str) -> ApiResult<Vec<RemoteAttachment>> {
        let path = format!("/me/contacts/{}/attachments", urlencoding::encode(contact_id));
        let response = self.get(&path)?;
        let page: Page<RemoteAttachment> = response.into_json().map_err(read_error)?;
        Ok(page.value)
    }
}

fn read_error(e: std::io::Error) -> GroupwareApiError {
    GroupwareApiError::HttpError(e.to_string())
}
