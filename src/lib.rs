//! Groupware Client - a Rust client for a hosted groupware platform's
//! contact-management and file-storage APIs.
//!
//! Two independent facades share an identical shape: sign in via discovery
//! and silent token acquisition, then issue thin pass-through calls to the
//! remote service and map the results onto local plain records.
//!
//! # Architecture
//!
//! - **models**: Local plain records for contacts and files
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **auth**: Discovery context, silent token acquisition, sessions
//! - **clients**: HTTP clients for the remote services, plus the async
//!   trait seams the facades depend on
//! - **facades**: Per-session contacts and files facades

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod facades;
pub mod models;

pub use auth::{DiscoveryContext, Session, SilentTokenSource, TokenSource};
pub use clients::{ContactsApi, ContactsClient, FilesApi, FilesClient};
pub use config::Config;
pub use error::{ApiResult, AuthError, ConfigError, GroupwareApiError};
pub use facades::{ContactsFacade, FilesFacade};
pub use models::{Contact, FileItem};
