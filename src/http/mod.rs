//! HTTP protocol layer module
//!
//! Response builders and content-type detection, decoupled from path
//! resolution.

pub mod mime;
pub mod response;

pub use response::{build_empty_response, build_file_response};
