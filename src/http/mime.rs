//! MIME type detection module
//!
//! Maps a served file's extension to a Content-Type value.

use std::path::Path;

/// Content-Type for the file at `path`, by extension
///
/// # Examples
/// ```
/// use std::path::Path;
/// use wasm_devserver::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("dist/appWASM.wasm")), "application/wasm");
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        // Loader script and module
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("wasm") => "application/wasm",
        Some("json" | "map") => "application/json",

        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Shader sources and assets loaded over fetch
        Some("glsl" | "vert" | "frag") => "text/plain; charset=utf-8",
        Some("bin" | "data" | "mem") => "application/octet-stream",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",

        _ => "application/octet-stream",
    }
}
