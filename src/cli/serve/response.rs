//! HTTP response handlers.

use crate::utils::{html, mime::types};
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Characters left unescaped in listing hrefs.
const HREF_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path, content_type: &'static str) -> Result<()> {
    let file_size = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(200))
            .with_header(make_header("Content-Type", content_type))
            .with_header(make_header("Accept-Ranges", "bytes"))
            .with_header(owned_header("Content-Length", &file_size.to_string())?);
        request.respond(response)?;
        return Ok(());
    }

    // Range requests let the browser seek inside sounds
    if let Some(range) = get_range_header(&request) {
        return respond_range(request, path, content_type, &range, file_size);
    }

    let file =
        fs::File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_file(file)
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Accept-Ranges", "bytes"));
    request.respond(response)?;
    Ok(())
}

/// Handle a `Range: bytes=...` request with 206 Partial Content.
fn respond_range(
    request: Request,
    path: &Path,
    content_type: &'static str,
    range: &str,
    file_size: u64,
) -> Result<()> {
    use std::io::{Read, Seek, SeekFrom};

    let range = range.strip_prefix("bytes=").unwrap_or(range);
    let Some((start, end)) = parse_range(range, file_size) else {
        let response = Response::empty(StatusCode(416))
            .with_header(owned_header("Content-Range", &format!("bytes */{file_size}"))?);
        request.respond(response)?;
        return Ok(());
    };

    let length = end - start + 1;
    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let reader = file.take(length);

    let content_range = format!("bytes {start}-{end}/{file_size}");
    let response = Response::new(
        StatusCode(206),
        vec![
            make_header("Content-Type", content_type),
            make_header("Accept-Ranges", "bytes"),
            owned_header("Content-Range", &content_range)?,
        ],
        reader,
        usize::try_from(length).ok(),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Parse `start-end`, `start-` or `-suffix` into an inclusive byte range.
///
/// Returns `None` when the range cannot be satisfied.
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    if file_size == 0 {
        return None;
    }
    let last = file_size - 1;
    let (start, end) = range.trim().split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    let (start, end) = match (start.is_empty(), end.is_empty()) {
        (false, false) => (start.parse().ok()?, end.parse::<u64>().ok()?.min(last)),
        (false, true) => (start.parse().ok()?, last),
        (true, false) => {
            let suffix: u64 = end.parse().ok()?;
            if suffix == 0 {
                return None;
            }
            (file_size.saturating_sub(suffix), last)
        }
        (true, true) => return None,
    };

    (start <= end).then_some((start, end))
}

/// Extract the Range header from a request.
fn get_range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("range"))
        .map(|h| h.value.to_string())
}

/// Respond with an HTML listing of a directory.
pub fn respond_listing(request: Request, dir: &Path, url_path: &str) -> Result<()> {
    let body = render_listing(dir, url_path)?;
    send_body(request, 200, types::HTML, body.into_bytes())
}

/// Redirect a directory URL to its trailing-slash form.
pub fn respond_redirect_slash(request: Request, url_path: &str, query: &str) -> Result<()> {
    let location = format!("{url_path}/{query}");
    let response = Response::empty(StatusCode(301))
        .with_header(owned_header("Location", &location)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", types::PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    if is_head_request(&request) {
        let response = Response::empty(StatusCode(status))
            .with_header(make_header("Content-Type", content_type));
        request.respond(response)?;
        return Ok(());
    }

    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Build the listing page. Entries are sorted case-insensitively,
/// directories get a trailing slash.
fn render_listing(dir: &Path, url_path: &str) -> Result<String> {
    let mut entries: Vec<(String, bool)> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .flatten()
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.path().is_dir();
            (name, is_dir)
        })
        .collect();
    entries.sort_by_key(|(name, _)| name.to_lowercase());

    let title = html::escape(&percent_encoding::percent_decode_str(url_path).decode_utf8_lossy())
        .into_owned();

    let mut body = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {title}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n"
    );
    for (name, is_dir) in &entries {
        let slash = if *is_dir { "/" } else { "" };
        let href = utf8_percent_encode(name, HREF_SAFE);
        body.push_str(&format!(
            "<li><a href=\"{href}{slash}\">{}{slash}</a></li>\n",
            html::escape(name)
        ));
    }
    body.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(body)
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

fn owned_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid {key} header value: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_listing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.png"), b"").unwrap();
        fs::write(temp.path().join("A <x>.wav"), b"").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let body = render_listing(temp.path(), "/assets/").unwrap();

        assert!(body.contains("<title>Directory listing for /assets/</title>"));
        assert!(body.contains("<a href=\"b.png\">b.png</a>"));
        assert!(body.contains("<a href=\"sub/\">sub/</a>"));
        assert!(body.contains("<a href=\"A%20%3Cx%3E.wav\">A &lt;x&gt;.wav</a>"));

        let a = body.find("A &lt;x&gt;").unwrap();
        let b = body.find(">b.png<").unwrap();
        let sub = body.find(">sub/<").unwrap();
        assert!(a < b && b < sub);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0-499", 1000), Some((0, 499)));
        assert_eq!(parse_range("500-", 1000), Some((500, 999)));
        assert_eq!(parse_range("-100", 1000), Some((900, 999)));
        assert_eq!(parse_range("900-5000", 1000), Some((900, 999)));
    }

    #[test]
    fn test_parse_range_unsatisfiable() {
        assert_eq!(parse_range("0-10", 0), None);
        assert_eq!(parse_range("1000-", 1000), None);
        assert_eq!(parse_range("-0", 1000), None);
        assert_eq!(parse_range("abc", 1000), None);
        assert_eq!(parse_range("-", 1000), None);
    }
}
