//! Address-book facade.
//!
//! Thin pass-through to the remote contacts service: no local validation, no
//! caching, no retries. Every operation maps a remote result shape onto the
//! local [`Contact`] record and propagates remote errors unrecovered.

use crate::auth::{DiscoveryContext, Session, SilentTokenSource};
use crate::clients::{
    AsyncContactsClient, ContactChanges, ContactsApi, ContactsClient, NewContact, RemoteAttachment,
};
use crate::config::Config;
use crate::error::ApiResult;
use crate::facades::join_error;
use crate::models::Contact;
use std::sync::Arc;
use std::time::Duration;

/// Name given to the profile-photo attachment on the remote service.
const PHOTO_ATTACHMENT_NAME: &str = "Picture";

/// Per-session client for the address book.
pub struct ContactsFacade {
    api: Arc<dyn ContactsApi>,
    session: Session,
}

impl ContactsFacade {
    /// Sign in and construct a facade for the resulting session.
    ///
    /// Resolves the contacts service resource via discovery, captures the
    /// authenticated user identifier, and builds a client whose outgoing
    /// calls lazily acquire bearer tokens via silent acquisition.
    pub async fn sign_in(config: &Config, discovery: Arc<DiscoveryContext>) -> ApiResult<Self> {
        let resource_id = config.contacts_resource_id.clone();
        let dcr = {
            let discovery = discovery.clone();
            tokio::task::spawn_blocking(move || discovery.discover_resource(&resource_id))
                .await
                .map_err(join_error)??
        };

        tracing::info!(user = %dcr.user_id, "Signed in to contacts service");

        let session = Session::new(discovery.clone(), dcr.user_id.clone());
        let tokens = Arc::new(SilentTokenSource::new(
            discovery,
            dcr.service_resource_id,
            dcr.user_id,
        ));
        let client = ContactsClient::new(
            dcr.service_endpoint_uri,
            tokens,
            Duration::from_secs(config.request_timeout),
        );

        Ok(Self {
            api: Arc::new(AsyncContactsClient::new(client)),
            session,
        })
    }

    /// Construct a facade over an arbitrary service implementation (useful for testing).
    #[doc(hidden)]
    pub fn with_api(api: Arc<dyn ContactsApi>, session: Session) -> Self {
        Self { api, session }
    }

    /// Identifier of the signed-in user.
    pub fn user_id(&self) -> &str {
        self.session.user_id()
    }

    /// Create a contact, then attach its photo (if any) and save.
    ///
    /// The steps run strictly in sequence because each depends on the
    /// identifier assigned by the previous one. There is no rollback: if the
    /// photo attachment fails after creation succeeded, the contact is left
    /// behind without a photo.
    pub async fn create(&self, contact: &Contact) -> ApiResult<()> {
        let payload = NewContact {
            given_name: contact.name.clone(),
            display_name: contact.name.clone(),
            email_address1: contact.email.clone(),
            job_title: contact.job_title.clone(),
        };

        let created = self.api.create_contact(&payload).await?;

        if let Some(photo) = &contact.photo {
            let attachment = RemoteAttachment {
                id: None,
                name: PHOTO_ATTACHMENT_NAME.to_string(),
                is_contact_photo: true,
                content_bytes: photo.clone(),
            };
            self.api.add_attachment(&created.id, &attachment).await?;

            // save after attaching, as the service requires
            let changes = ContactChanges {
                email_address1: contact.email.clone(),
                job_title: contact.job_title.clone(),
            };
            self.api.update_contact(&created.id, &changes).await?;
        }

        Ok(())
    }

    /// List contacts ordered by display name.
    ///
    /// Returns the first page only; page size is the service default. Photo
    /// bytes are fetched eagerly for every entry.
    pub async fn list(&self) -> ApiResult<Vec<Contact>> {
        let remote = self.api.list_contacts().await?;
        let mut contacts = Vec::with_capacity(remote.len());

        for entry in remote {
            let name = format!("{} {}", entry.given_name, entry.surname)
                .trim()
                .to_string();
            let photo = self.photo(&entry.id).await?;

            contacts.push(Contact {
                id: Some(entry.id),
                name,
                email: entry.email_address1,
                job_title: entry.job_title,
                photo: if photo.is_empty() { None } else { Some(photo) },
            });
        }

        Ok(contacts)
    }

    /// Fetch the profile photo of a contact.
    ///
    /// Returns an empty blob, never an error, when the contact does not
    /// resolve or carries no attachment flagged as the profile photo.
    pub async fn photo(&self, contact_id: &str) -> ApiResult<Vec<u8>> {
        let contact = match self.api.get_contact_by_filter(contact_id).await? {
            Some(contact) => contact,
            None => return Ok(Vec::new()),
        };

        let attachments = self.api.list_attachments(&contact.id).await?;
        let photo = attachments
            .into_iter()
            .find(|a| a.is_contact_photo)
            .map(|a| a.content_bytes)
            .unwrap_or_default();

        Ok(photo)
    }

    /// Update a contact's email address and job title.
    ///
    /// Returns `false` without touching the remote store when the record has
    /// no identifier or the identifier does not resolve.
    pub async fn update(&self, contact: &Contact) -> ApiResult<bool> {
        let id = match contact.id.as_deref() {
            Some(id) => id,
            None => return Ok(false),
        };

        if self.api.get_contact_by_filter(id).await?.is_none() {
            return Ok(false);
        }

        let changes = ContactChanges {
            email_address1: contact.email.clone(),
            job_title: contact.job_title.clone(),
        };
        self.api.update_contact(id, &changes).await?;
        Ok(true)
    }

    /// Delete a contact. Returns `false` when the identifier does not resolve.
    pub async fn delete(&self, contact_id: &str) -> ApiResult<bool> {
        if self.api.get_contact_by_filter(contact_id).await?.is_none() {
            return Ok(false);
        }

        self.api.delete_contact(contact_id).await?;
        Ok(true)
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
