//! URL normalization and parsing
//!
//! Everything downstream (lexical analysis, probes) reads from a `ParsedUrl`
//! built exactly once per input. Parsing is total: an input the `url` crate
//! rejects still produces a `ParsedUrl`, just with no host components, and
//! the assembler treats that as "trust not establishable".

use std::net::IpAddr;

use url::Url;

use crate::constants::DEFAULT_SCHEME;

/// Parsed, read-only view of one URL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Input as received (trimmed)
    pub raw: String,
    /// Input with the default scheme prepended when none was present
    pub normalized: String,
    /// URL scheme of the normalized form
    pub scheme: String,
    /// Lowercased hostname, when one could be parsed
    pub host: Option<String>,
    /// Explicit port, when present and not the scheme default
    pub port: Option<u16>,
    /// Public-suffix-aware registered domain (e.g. `example.co.uk`)
    pub registered_domain: Option<String>,
    /// Host labels left of the registered domain, dot-joined
    pub subdomain: Option<String>,
}

impl ParsedUrl {
    /// Normalize and parse a raw URL string.
    pub fn from_input(input: &str) -> Self {
        let raw = input.trim().to_string();
        let normalized = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.clone()
        } else {
            format!("{}{}", DEFAULT_SCHEME, raw)
        };

        match Url::parse(&normalized) {
            Ok(parsed) => {
                let scheme = parsed.scheme().to_string();
                let host = parsed
                    .host_str()
                    .filter(|h| !h.is_empty())
                    .map(|h| h.to_ascii_lowercase());
                let (registered_domain, subdomain) = match host.as_deref() {
                    Some(h) => split_host(h),
                    None => (None, None),
                };

                Self {
                    raw,
                    normalized,
                    scheme,
                    host,
                    port: parsed.port(),
                    registered_domain,
                    subdomain,
                }
            }
            Err(e) => {
                log::debug!("unparseable url {:?}: {}", raw, e);
                Self {
                    raw,
                    scheme: DEFAULT_SCHEME.trim_end_matches("://").to_string(),
                    normalized,
                    host: None,
                    port: None,
                    registered_domain: None,
                    subdomain: None,
                }
            }
        }
    }

    /// Whether a probeable hostname was parsed.
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }
}

/// Split a hostname into (registered domain, subdomain) using the Public
/// Suffix List. IP literals have neither; a host the list cannot place
/// (e.g. `localhost`) counts as its own registered domain.
fn split_host(host: &str) -> (Option<String>, Option<String>) {
    if host.parse::<IpAddr>().is_ok() {
        return (None, None);
    }

    match psl::domain_str(host) {
        Some(root) if root.len() < host.len() => {
            let sub = host[..host.len() - root.len()].trim_end_matches('.');
            let sub = (!sub.is_empty()).then(|| sub.to_string());
            (Some(root.to_string()), sub)
        }
        Some(root) => (Some(root.to_string()), None),
        None => (Some(host.to_string()), None),
    }
}
