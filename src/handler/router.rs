//! Request entry point
//!
//! Every request takes the same path: resolve, log the pathname, read,
//! answer. The method is not inspected.

use crate::config::AppState;
use crate::handler::static_files::{self, ReadOutcome};
use crate::http::{self, mime};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::USER_AGENT;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let config = &state.config;

    let resolved = static_files::resolve_path(req.uri().path(), config.root(), &config.routes);
    if config.logging.log_resolved_paths {
        logger::log_resolved_path(&resolved.pathname);
    }

    let outcome = static_files::read_resolved(&resolved, config.routes.confine_to_root).await;

    let status = outcome.status();
    let body_bytes = match &outcome {
        ReadOutcome::Found(data) => data.len(),
        _ => 0,
    };
    let response = match outcome {
        ReadOutcome::Found(data) => {
            let content_type = config
                .http
                .send_content_type
                .then(|| mime::content_type_for(&resolved.file));
            http::build_file_response(data, content_type, &config.http)
        }
        ReadOutcome::Failed(e) => {
            logger::log_warning(&format!(
                "Failed to read '{}': {e}",
                resolved.file.display()
            ));
            http::build_empty_response(status, &config.http)
        }
        ReadOutcome::Forbidden | ReadOutcome::NotAFile => {
            logger::log_debug(&format!("{status} for {}", resolved.pathname));
            http::build_empty_response(status, &config.http)
        }
        ReadOutcome::NotFound => http::build_empty_response(status, &config.http),
    };

    if config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.resolved = resolved.pathname;
        entry.http_version = http_version(req.version()).to_string();
        entry.status = status.as_u16();
        entry.body_bytes = body_bytes;
        entry.user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
