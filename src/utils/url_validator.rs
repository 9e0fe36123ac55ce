//! Validation of candidate URLs before they are shortened.
//!
//! Wraps [`crate::utils::url_normalizer`] with the service's policy: block
//! list, self-reference protection and optional `http` → `https` upgrade.

use crate::utils::url_normalizer::{UrlNormalizationError, canonicalize, parse_web_url};

/// Longest URL accepted for shortening, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a URL cannot be shortened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL scheme '{0}' is not allowed, use http or https")]
    SchemeNotAllowed(String),

    #[error("Cannot shorten URLs pointing to this service ({0})")]
    SelfReferential(String),

    #[error("Domain is blocked: {0}")]
    BlockedDomain(String),
}

impl From<UrlNormalizationError> for UrlValidationError {
    fn from(e: UrlNormalizationError) -> Self {
        match e {
            UrlNormalizationError::UnsupportedProtocol(scheme) => Self::SchemeNotAllowed(scheme),
            other => Self::InvalidFormat(other.to_string()),
        }
    }
}

/// A URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl {
    /// Canonical form, used as the deduplication key and redirect target.
    pub normalized_url: String,
    /// Host component, including subdomains and excluding the port.
    pub domain: String,
}

/// Policy-aware URL validator.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    blocked_domains: Vec<String>,
    self_domains: Vec<String>,
    upgrade_http: bool,
}

impl UrlValidator {
    pub fn new<B, S>(blocked_domains: B, self_domains: S, upgrade_http: bool) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            blocked_domains: clean_hosts(blocked_domains),
            self_domains: clean_hosts(self_domains),
            upgrade_http,
        }
    }

    /// Adds the host of `base_url` to the self-referential hosts.
    ///
    /// Unparsable base URLs are ignored; configuration validation reports them.
    pub fn with_service_url(mut self, base_url: &str) -> Self {
        if let Ok(url) = url::Url::parse(base_url)
            && let Some(host) = url.host_str()
        {
            let host = normalize_host(host);
            if !host.is_empty() && !self.self_domains.contains(&host) {
                self.self_domains.push(host);
            }
        }
        self
    }

    /// Validates and normalizes `raw`.
    ///
    /// Checks run in order: format, scheme, self-reference, block list.
    ///
    /// # Errors
    ///
    /// Returns the first [`UrlValidationError`] that applies.
    pub fn validate(&self, raw: &str) -> Result<ValidatedUrl, UrlValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(UrlValidationError::InvalidFormat(
                "URL cannot be empty".to_string(),
            ));
        }
        if raw.len() > MAX_URL_LENGTH {
            return Err(UrlValidationError::InvalidFormat(format!(
                "URL exceeds {} bytes",
                MAX_URL_LENGTH
            )));
        }

        let mut url = parse_web_url(raw)?;
        let domain = normalize_host(url.host_str().unwrap_or_default());

        if self.self_domains.iter().any(|own| *own == domain) {
            return Err(UrlValidationError::SelfReferential(domain));
        }

        if self
            .blocked_domains
            .iter()
            .any(|blocked| is_same_or_subdomain(&domain, blocked))
        {
            return Err(UrlValidationError::BlockedDomain(domain));
        }

        if self.upgrade_http && url.scheme() == "http" {
            url.set_scheme("https").map_err(|_| {
                UrlValidationError::InvalidFormat("failed to upgrade scheme".to_string())
            })?;
        }

        Ok(ValidatedUrl {
            normalized_url: canonicalize(&url)?,
            domain,
        })
    }

    pub fn blocked_domains(&self) -> &[String] {
        &self.blocked_domains
    }

    pub fn self_domains(&self) -> &[String] {
        &self.self_domains
    }
}

fn normalize_host(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

fn clean_hosts<I>(hosts: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    hosts
        .into_iter()
        .map(|h| normalize_host(h.as_ref().trim()))
        .filter(|h| !h.is_empty())
        .collect()
}

fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
