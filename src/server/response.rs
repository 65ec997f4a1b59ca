use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// `Response::header` wants a `'static` string; content types form a
/// closed set, so the full header line is picked by match instead of
/// leaked per request.
fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        "text/html" => "Content-Type: text/html",
        "text/css" => "Content-Type: text/css",
        "application/javascript" => "Content-Type: application/javascript",
        "application/json" => "Content-Type: application/json",
        "text/plain" => "Content-Type: text/plain",
        "image/svg+xml" => "Content-Type: image/svg+xml",
        "image/png" => "Content-Type: image/png",
        "image/jpeg" => "Content-Type: image/jpeg",
        "image/webp" => "Content-Type: image/webp",
        "image/x-icon" => "Content-Type: image/x-icon",
        "font/woff2" => "Content-Type: font/woff2",
        _ => "Content-Type: application/octet-stream",
    }
}

pub fn write_html(res: &mut Response, status: u16, html: String) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: text/html");
    res.body_vec(html.into_bytes());
}

pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

pub fn write_bytes(res: &mut Response, status: u16, content_type: &str, bytes: Vec<u8>) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type_header(content_type));
    res.body_vec(bytes);
}
