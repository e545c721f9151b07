//! Request handler module
//!
//! Responsible for request routing dispatch and the directory listing endpoint.

pub mod listing;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
