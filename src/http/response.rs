//! HTTP response building module
//!
//! Builders for the two shapes the server sends: file bytes, or an empty
//! body with a status chosen by the handler.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;

/// Build `200 OK` carrying the file's exact bytes
pub fn build_file_response(
    data: Bytes,
    content_type: Option<&'static str>,
    http: &HttpConfig,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    let mut response = builder.body(Full::new(data)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    });
    apply_server_header(&mut response, http);
    response
}

/// Build a response with an empty body
pub fn build_empty_response(status: StatusCode, http: &HttpConfig) -> Response<Full<Bytes>> {
    let mut response = Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        });
    apply_server_header(&mut response, http);
    response
}

fn apply_server_header(response: &mut Response<Full<Bytes>>, http: &HttpConfig) {
    let Some(name) = http.server_name.as_deref() else {
        return;
    };
    match HeaderValue::from_str(name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => log_build_error("Server header", &e),
    }
}

/// Log response build error
fn log_build_error(what: &str, error: &impl std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
}
