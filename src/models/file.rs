//! File model representing an entry in the user's cloud file store.

use std::io::Cursor;

/// A file in the user's cloud store.
///
/// Same lifecycle as [`super::Contact`]: the identifier is assigned by the
/// remote service and the record is a transient view of remote state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileItem {
    /// Remote identifier, `None` for records not yet created remotely
    pub id: Option<String>,

    /// File name
    pub name: String,

    /// File content
    pub content: Vec<u8>,
}

impl FileItem {
    /// Build a new local file record with no remote counterpart yet.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            id: None,
            name: name.into(),
            content,
        }
    }

    /// The file content as a stream rewound to the start.
    pub fn content_stream(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.content.clone())
    }
}
