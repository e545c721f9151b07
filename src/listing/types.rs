// Listing data types
// Request parameters, entry records and the uniform error payload

use serde::Serialize;
use std::borrow::Cow;

/// Name of the query parameter carrying the relative path
pub const PATH_PARAM: &str = "path";

/// Parameters of a single listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Relative path under the public root, empty for the root itself
    pub path: String,
}

impl ListingRequest {
    /// Build a request from a raw (still percent-encoded) query string.
    ///
    /// The first `path` parameter wins. A missing query, a missing
    /// parameter and an empty value all mean "list the root".
    pub fn from_query(query: Option<&str>) -> Self {
        let path = query
            .and_then(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .find(|(key, _)| key == PATH_PARAM)
                    .map(|(_, value)| value)
            })
            .map(Cow::into_owned)
            .unwrap_or_default();

        Self { path }
    }
}

/// Classification of a directory child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Directory,
    File,
}

impl EntryType {
    /// Anything that is not a directory (symlinks, devices, sockets) is a file
    pub const fn from_is_dir(is_dir: bool) -> Self {
        if is_dir {
            Self::Directory
        } else {
            Self::File
        }
    }
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
