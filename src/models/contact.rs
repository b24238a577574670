//! Contact model representing an address-book entry.

/// An address-book entry.
///
/// The identifier is assigned by the remote service: a freshly built record
/// carries `None` until a create call gives it a remote counterpart, and once
/// assigned the identifier is stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    /// Remote identifier, `None` for records not yet created remotely
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// Primary email address
    pub email: String,

    /// Job title
    pub job_title: String,

    /// Profile photo bytes, if any
    pub photo: Option<Vec<u8>>,
}

impl Contact {
    /// Build a new local contact with no remote counterpart yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            job_title: job_title.into(),
            photo: None,
        }
    }

    /// Attach photo bytes to the local record.
    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }
}
