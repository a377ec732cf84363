//! Serve page assets from a local `web/` directory when one exists, so the
//! embedded page can be overridden without rebuilding.

use std::fs;

use super::routes::HttpResponse;

/// Try to serve a static file from `web/`. Returns None when static serving
/// does not apply: non-GET methods, API paths, traversal attempts, missing
/// directory, or a path that is not a file there.
pub fn try_serve_static(method: &str, path: &str) -> Option<HttpResponse> {
    if method != "GET" || path.starts_with("/api") {
        return None;
    }

    let path = path.split('?').next().unwrap_or(path).trim_start_matches('/');
    if path.contains("..") {
        return None;
    }

    let web_dir = std::env::current_dir().ok()?.join("web").canonicalize().ok()?;

    let file_path = if path.is_empty() || path == "index.html" {
        web_dir.join("index.html")
    } else {
        let candidate = web_dir.join(path);
        if !candidate.starts_with(&web_dir) {
            return None;
        }
        candidate
    };
    if !file_path.is_file() {
        return None;
    }

    let content_type = content_type_for_path(path);
    if !is_text_content_type(content_type) {
        return None;
    }
    let body = fs::read_to_string(&file_path).ok()?;

    Some(HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type,
        body,
    })
}

fn content_type_for_path(path: &str) -> &'static str {
    if path.is_empty() || path.ends_with(".html") {
        "text/html; charset=utf-8"
    } else if path.ends_with(".js") {
        "application/javascript; charset=utf-8"
    } else if path.ends_with(".css") {
        "text/css; charset=utf-8"
    } else if path.ends_with(".json") {
        "application/json; charset=utf-8"
    } else if path.ends_with(".csv") {
        "text/csv; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn is_text_content_type(ct: &str) -> bool {
    ct.starts_with("text/")
        || ct.starts_with("application/javascript")
        || ct.starts_with("application/json")
}
