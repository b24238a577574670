use async_trait::async_trait;
use groupware_client::clients::{
    ContactChanges, ContactsApi, NewContact, RemoteAttachment, RemoteContact,
};
use groupware_client::error::{ApiResult, GroupwareApiError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the remote contacts service.
///
/// Assigns identifiers the way the real service would, stores attachments as
/// a sub-resource per contact, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactsService {
    contacts: Arc<Mutex<HashMap<String, RemoteContact>>>,
    attachments: Arc<Mutex<HashMap<String, Vec<RemoteAttachment>>>>,
    next_id: Arc<Mutex<usize>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactsService {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(HashMap::new())),
            attachments: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Snapshot of the stored contacts, for change detection in tests.
    pub fn snapshot(&self) -> Vec<RemoteContact> {
        let contacts = self.contacts.lock().unwrap();
        let mut all: Vec<RemoteContact> = contacts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// The identifier of the most recently created contact.
    pub fn last_assigned_id(&self) -> String {
        let next = self.next_id.lock().unwrap();
        format!("contact-{}", *next - 1)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactsApi for MockContactsService {
    async fn list_contacts(&self) -> ApiResult<Vec<RemoteContact>> {
        self.track_call("list_contacts");

        let contacts = self.contacts.lock().unwrap();
        let mut all: Vec<RemoteContact> = contacts.values().cloned().collect();
        all.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(all)
    }

    async fn get_contact_by_filter(&self, contact_id: &str) -> ApiResult<Option<RemoteContact>> {
        self.track_call("get_contact_by_filter");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.get(contact_id).cloned())
    }

    async fn create_contact(&self, contact: &NewContact) -> ApiResult<RemoteContact> {
        self.track_call("create_contact");

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = format!("contact-{}", *next);
            *next += 1;
            id
        };

        let created = RemoteContact {
            id: id.clone(),
            given_name: contact.given_name.clone(),
            surname: String::new(),
            display_name: contact.display_name.clone(),
            email_address1: contact.email_address1.clone(),
            job_title: contact.job_title.clone(),
        };

        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_contact(&self, contact_id: &str, changes: &ContactChanges) -> ApiResult<()> {
        self.track_call("update_contact");

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts.get_mut(contact_id).ok_or_else(|| {
            GroupwareApiError::NotFound(format!("Contact {} not found", contact_id))
        })?;

        contact.email_address1 = changes.email_address1.clone();
        contact.job_title = changes.job_title.clone();
        Ok(())
    }

    async fn delete_contact(&self, contact_id: &str) -> ApiResult<()> {
        self.track_call("delete_contact");

        let mut contacts = self.contacts.lock().unwrap();
        if contacts.remove(contact_id).is_none() {
            return Err(GroupwareApiError::NotFound(format!(
                "Contact {} not found",
                contact_id
            )));
        }

        let mut attachments = self.attachments.lock().unwrap();
        attachments.remove(contact_id);
        Ok(())
    }

    async fn add_attachment(
        &self,
        contact_id: &str,
        attachment: &RemoteAttachment,
    ) -> ApiResult<()> {
        self.track_call("add_attachment");

        let contacts = self.contacts.lock().unwrap();
        if !contacts.contains_key(contact_id) {
            return Err(GroupwareApiError::NotFound(format!(
                "Contact {} not found",
                contact_id
            )));
        }
        drop(contacts);

        let mut stored = attachment.clone();
        stored.id = Some(format!("attachment-{}", contact_id));

        let mut attachments = self.attachments.lock().unwrap();
        attachments
            .entry(contact_id.to_string())
            .or_default()
            .push(stored);
        Ok(())
    }

    async fn list_attachments(&self, contact_id: &str) -> ApiResult<Vec<RemoteAttachment>> {
        self.track_call("list_attachments");

        let attachments = self.attachments.lock().unwrap();
        Ok(attachments.get(contact_id).cloned().unwrap_or_default())
    }
}
