//! Development static file server for a web-assembly front end.
//!
//! Serves files from a root directory over HTTP/1.1. `/` maps to the index
//! document and the compiled module (`/appWASM.wasm` by default) is read
//! from under `dist/`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::config::{AppState, Config};
pub use server::DevServer;
