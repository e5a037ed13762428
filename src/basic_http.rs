use std::io;

use percent_encoding::percent_decode_str;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use url::Url;

const READ_CHUNK: usize = 8 * 1024;
const MAX_CHUNK_LINE: usize = 4 * 1024;

pub(crate) const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Methods",
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization",
    ),
];

#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLimits {
    pub(crate) head_bytes: usize,
    pub(crate) body_bytes: usize,
}

#[derive(Debug)]
pub(crate) struct HttpRequest {
    pub(crate) method: String,
    pub(crate) target: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

#[derive(Debug)]
pub(crate) enum ReadOutcome {
    Request(HttpRequest),
    TooLarge,
    Malformed(String),
    Closed,
}

enum BodyOutcome {
    Complete(Vec<u8>),
    TooLarge,
    Malformed(String),
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

async fn read_more<R>(reader: &mut R, buffer: &mut Vec<u8>) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0_u8; READ_CHUNK];
    let read = reader.read(&mut chunk).await?;
    buffer.extend_from_slice(&chunk[..read]);
    Ok(read)
}

type ParsedHead = (String, String, Vec<(String, String)>);

fn parse_head(head: &str) -> Result<ParsedHead, String> {
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("Invalid request line: {request_line:?}"));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(format!("Unsupported protocol version: {version}"));
    }

    let mut headers = Vec::new();
    for line in lines.filter(|line| !line.is_empty()) {
        let Some((name, value)) = line.split_once(':') else {
            return Err(format!("Invalid header line: {line:?}"));
        };
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    Ok((method.to_ascii_uppercase(), target.to_string(), headers))
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn is_chunked(headers: &[(String, String)]) -> bool {
    find_header(headers, "transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"))
}

fn content_length(headers: &[(String, String)]) -> Result<Option<usize>, String> {
    match find_header(headers, "content-length") {
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| format!("Invalid Content-Length: {value:?}")),
        None => Ok(None),
    }
}

async fn read_chunk_line<R>(reader: &mut R, pending: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    loop {
        if let Some(pos) = find_subsequence(pending, b"\r\n") {
            let line = String::from_utf8_lossy(&pending[..pos]).into_owned();
            pending.drain(..pos + 2);
            return Ok(Some(line));
        }
        if pending.len() > MAX_CHUNK_LINE || read_more(reader, pending).await? == 0 {
            return Ok(None);
        }
    }
}

async fn read_chunked_body<R>(
    reader: &mut R,
    mut pending: Vec<u8>,
    limit: usize,
) -> io::Result<BodyOutcome>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    loop {
        let Some(line) = read_chunk_line(reader, &mut pending).await? else {
            return Ok(BodyOutcome::Malformed("Truncated chunk size line".to_string()));
        };
        let size_field = line.split(';').next().unwrap_or_default().trim();
        let Ok(size) = usize::from_str_radix(size_field, 16) else {
            return Ok(BodyOutcome::Malformed(format!(
                "Invalid chunk size: {size_field:?}"
            )));
        };

        if size == 0 {
            while let Some(trailer) = read_chunk_line(reader, &mut pending).await? {
                if trailer.is_empty() {
                    break;
                }
            }
            return Ok(BodyOutcome::Complete(body));
        }

        if body.len().saturating_add(size) > limit {
            return Ok(BodyOutcome::TooLarge);
        }

        while pending.len() < size + 2 {
            if read_more(reader, &mut pending).await? == 0 {
                return Ok(BodyOutcome::Malformed("Truncated chunk data".to_string()));
            }
        }
        if &pending[size..size + 2] != b"\r\n" {
            return Ok(BodyOutcome::Malformed("Missing chunk terminator".to_string()));
        }
        body.extend_from_slice(&pending[..size]);
        pending.drain(..size + 2);
    }
}

async fn read_sized_body<R>(
    reader: &mut R,
    mut pending: Vec<u8>,
    length: usize,
) -> io::Result<BodyOutcome>
where
    R: AsyncRead + Unpin,
{
    while pending.len() < length {
        if read_more(reader, &mut pending).await? == 0 {
            return Ok(BodyOutcome::Malformed(format!(
                "Body ended after {} of {} bytes",
                pending.len(),
                length
            )));
        }
    }
    pending.truncate(length);
    Ok(BodyOutcome::Complete(pending))
}

// An oversized body yields `TooLarge` without consuming the rest of it.
pub(crate) async fn read_request<R>(reader: &mut R, limits: RequestLimits) -> io::Result<ReadOutcome>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let head_end = loop {
        if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
            break pos;
        }
        if buffer.len() > limits.head_bytes {
            return Ok(ReadOutcome::Malformed("Request head too large".to_string()));
        }
        if read_more(reader, &mut buffer).await? == 0 {
            return Ok(if buffer.is_empty() {
                ReadOutcome::Closed
            } else {
                ReadOutcome::Malformed("Connection closed mid-request".to_string())
            });
        }
    };

    let head = match std::str::from_utf8(&buffer[..head_end]) {
        Ok(head) => head,
        Err(_) => return Ok(ReadOutcome::Malformed("Request head is not UTF-8".to_string())),
    };
    let (method, target, headers) = match parse_head(head) {
        Ok(parsed) => parsed,
        Err(error) => return Ok(ReadOutcome::Malformed(error)),
    };
    let pending = buffer[head_end + 4..].to_vec();

    let body = if is_chunked(&headers) {
        read_chunked_body(reader, pending, limits.body_bytes).await?
    } else {
        match content_length(&headers) {
            Ok(Some(length)) if length > limits.body_bytes => BodyOutcome::TooLarge,
            Ok(Some(length)) => read_sized_body(reader, pending, length).await?,
            Ok(None) => BodyOutcome::Complete(Vec::new()),
            Err(error) => BodyOutcome::Malformed(error),
        }
    };

    Ok(match body {
        BodyOutcome::Complete(body) => ReadOutcome::Request(HttpRequest {
            method,
            target,
            headers,
            body,
        }),
        BodyOutcome::TooLarge => ReadOutcome::TooLarge,
        BodyOutcome::Malformed(error) => ReadOutcome::Malformed(error),
    })
}

pub(crate) fn decode_request_path(target: &str) -> Result<String, String> {
    let raw_path = if target.starts_with("http://") || target.starts_with("https://") {
        Url::parse(target)
            .map_err(|error| format!("Invalid request target {target:?}: {error}"))?
            .path()
            .to_string()
    } else {
        target
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string()
    };

    if !raw_path.starts_with('/') {
        return Err(format!("Request target must start with '/': {target:?}"));
    }

    percent_decode_str(&raw_path)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|error| format!("Invalid percent-encoding in {target:?}: {error}"))
}

pub(crate) fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        411 => "Length Required",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) content_type: Option<&'static str>,
    pub(crate) body: Vec<u8>,
}

impl HttpResponse {
    pub(crate) fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub(crate) fn text(status: u16, text: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8"),
            body: text.as_bytes().to_vec(),
        }
    }

    pub(crate) fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: value.to_string().into_bytes(),
        }
    }

    pub(crate) fn bytes(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            body,
        }
    }

    pub(crate) fn encode(&self, include_body: bool) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason_phrase(self.status));
        for (name, value) in CORS_HEADERS {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        if let Some(content_type) = self.content_type {
            head.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        head.push_str("Connection: close\r\n\r\n");

        let mut encoded = head.into_bytes();
        if include_body {
            encoded.extend_from_slice(&self.body);
        }
        encoded
    }
}
