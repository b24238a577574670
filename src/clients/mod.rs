//! HTTP clients for the remote groupware services.
//!
//! This module provides synchronous HTTP clients that are driven from async
//! contexts via `tokio::task::spawn_blocking`. Each client holds a resolved
//! service endpoint and a token source; bearer tokens are acquired lazily on
//! every outgoing call.

pub mod contacts;
pub mod files;

mod async_wrapper;
pub use async_wrapper::{
    AsyncContactsClient, AsyncFilesClient, ContactsApi, FilesApi,
};
pub use contacts::{ContactChanges, ContactsClient, NewContact, RemoteAttachment, RemoteContact};
pub use files::{FilesClient, RemoteFile};

use crate::error::GroupwareApiError;
use serde::Deserialize;

/// A single page of results as returned by the remote services.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The entries on this page
    #[serde(default)]
    pub value: Vec<T>,
}

/// Map a ureq error to a GroupwareApiError.
pub(crate) fn map_error(error: ureq::Error) -> GroupwareApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 => GroupwareApiError::Unauthorized,
                404 => GroupwareApiError::NotFound(message),
                _ => GroupwareApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                GroupwareApiError::HttpError("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                GroupwareApiError::Timeout
            } else {
                GroupwareApiError::HttpError(transport.to_string())
            }
        }
    }
}
