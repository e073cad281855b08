//! Request handler module
//!
//! Path resolution and file reading behind the single request handler.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::{resolve_path, ReadOutcome, ResolvedPath};
