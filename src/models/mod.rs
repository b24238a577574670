//! Local data models for groupware entities.
//!
//! These records are transient views of remote state: the remote service is
//! authoritative, identifiers are assigned remotely, and nothing is persisted
//! locally.

pub mod contact;
pub mod file;

pub use contact::Contact;
pub use file::FileItem;
