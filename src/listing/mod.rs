//! Directory listing module
//!
//! Everything needed to turn a caller-supplied relative path into a
//! point-in-time snapshot of a directory's immediate children:
//! - Path resolution against the public root
//! - Asynchronous directory reads
//! - Entry and error payload types serialized to JSON

mod error;
mod reader;
mod resolve;
mod types;

pub use error::ListingError;
pub use reader::PublicRoot;
pub use resolve::resolve;
pub use types::{ErrorPayload, ListingRequest};
