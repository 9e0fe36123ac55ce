//! URL normalization and sanitization utilities.
//!
//! The normalized string is the deduplication key of the URL registry, so two
//! inputs that normalize identically are treated as the same resource.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedProtocol(String),

    #[error("URL must contain a host")]
    MissingHost,
}

/// Parses `input` and checks it is an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs,
/// [`UrlNormalizationError::UnsupportedProtocol`] for other schemes and
/// [`UrlNormalizationError::MissingHost`] when no host is present.
pub fn parse_web_url(input: &str) -> Result<Url, UrlNormalizationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlNormalizationError::UnsupportedProtocol(other.to_string())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}

/// Normalizes a URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Scheme and hostname**: Converted to lowercase
/// 3. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 4. **Dot segments**: Resolved (`/a/./b/../c` becomes `/a/c`)
/// 5. **Duplicate slashes**: Collapsed (`/a//b` becomes `/a/b`)
/// 6. **Trailing slash**: Removed, including the bare root path
/// 7. **Query parameters**: Sorted by key then value, empty pairs dropped,
///    an empty `?` removed
/// 8. **Userinfo and fragment**: Preserved
///
/// The host loses any trailing root dot (`github.com.` becomes `github.com`).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM:443/Path/?b=2&a=1").unwrap(),
///     "https://example.com/Path?a=1&b=2"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let url = parse_web_url(input)?;
    canonicalize(&url)
}

/// Renders an already parsed web URL in canonical form.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::MissingHost`] if the URL has no host.
pub fn canonicalize(url: &Url) -> Result<String, UrlNormalizationError> {
    let host = url
        .host_str()
        .map(|h| h.trim_end_matches('.'))
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?;
    let scheme = url.scheme().to_ascii_lowercase();

    let mut out = String::with_capacity(url.as_str().len());
    out.push_str(&scheme);
    out.push_str("://");

    if !url.username().is_empty() || url.password().is_some() {
        out.push_str(url.username());
        if let Some(password) = url.password() {
            out.push(':');
            out.push_str(password);
        }
        out.push('@');
    }

    out.push_str(&host.to_ascii_lowercase());

    if let Some(port) = url.port()
        && !is_default_port(&scheme, port)
    {
        out.push(':');
        out.push_str(&port.to_string());
    }

    out.push_str(&normalize_path(url.path()));

    if let Some(query) = url.query() {
        let query = normalize_query(query);
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }
    }

    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(fragment);
    }

    Ok(out)
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    matches!((scheme, port), ("http", 80) | ("https", 443))
}

/// Collapses repeated slashes and drops the trailing slash.
fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;

    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }

    while out.ends_with('/') {
        out.pop();
    }

    out
}

fn normalize_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|pair| !pair.is_empty()).collect();
    pairs.sort_by(|a, b| split_pair(a).cmp(&split_pair(b)));
    pairs.join("&")
}

fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}
