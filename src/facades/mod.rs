//! Per-session facades over the remote services.
//!
//! Each facade is constructed by a `sign_in` call and holds exactly one
//! client handle plus one [`crate::auth::Session`]. The two facades run the
//! sign-in sequence independently of each other; what they do not share is
//! process-wide mutable state, so several sessions (and users) can coexist.

pub mod contacts;
pub mod files;

pub use contacts::ContactsFacade;
pub use files::FilesFacade;

use crate::error::GroupwareApiError;

pub(crate) fn join_error(e: tokio::task::JoinError) -> GroupwareApiError {
    GroupwareApiError::HttpError(format!("Task join error: {}", e))
}
