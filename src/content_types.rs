use std::path::Path;

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub(crate) fn explicit_content_type(path: &Path) -> Option<&'static str> {
    match lowercase_extension(path)?.as_str() {
        "js" => Some("application/javascript"),
        "css" => Some("text/css"),
        "svg" => Some("image/svg+xml"),
        "json" => Some("application/json"),
        _ => None,
    }
}

pub(crate) fn basic_content_type(path: &Path) -> &'static str {
    let Some(ext) = lowercase_extension(path) else {
        return OCTET_STREAM;
    };

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "gz" => "application/gzip",
        _ => OCTET_STREAM,
    }
}
