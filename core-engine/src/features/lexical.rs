//! Lexical feature extraction
//!
//! Pure and total: every feature is derived from the URL text and its parsed
//! components, with no I/O and no failure mode. Degenerate input (empty
//! host, unparseable URL) still evaluates — host-derived indicators simply
//! come out 0 because the strings they inspect are empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::url::ParsedUrl;

use super::vector::{FeatureExtractor, FeatureVector};

/// Dotted-quad pattern anywhere in the URL text.
static IP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}\.){3}\d{1,3}").unwrap());

/// Known URL-shortener providers, matched case-insensitively against the
/// full URL text.
static SHORTENER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)bit\.ly|goo\.gl|tinyurl|ow\.ly|t\.co|is\.gd|adf\.ly").unwrap()
});

/// All non-network features for one URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalFeatures {
    pub having_ip: f32,
    pub url_length: f32,
    pub shortening_service: f32,
    pub having_at_symbol: f32,
    pub double_slash_redirect: f32,
    pub prefix_suffix: f32,
    pub having_sub_domain: f32,
    pub https_token: f32,
    pub port: f32,
    pub ssl_final_state: f32,
}

impl LexicalFeatures {
    pub fn from_url(url: &ParsedUrl) -> Self {
        let text = &url.normalized;
        let host = url.host.as_deref().unwrap_or("");
        let domain = url.registered_domain.as_deref().unwrap_or("");

        Self {
            having_ip: flag(IP_RE.is_match(text)),
            url_length: text.chars().count() as f32,
            shortening_service: flag(SHORTENER_RE.is_match(text)),
            having_at_symbol: flag(text.contains('@')),
            double_slash_redirect: flag(embedded_double_slash(text)),
            prefix_suffix: flag(domain.contains('-')),
            having_sub_domain: subdomain_count(url.subdomain.as_deref()) as f32,
            https_token: flag(host.contains("https")),
            port: flag(matches!(url.port, Some(p) if p != 80 && p != 443)),
            ssl_final_state: flag(url.scheme != "https"),
        }
    }
}

impl FeatureExtractor for LexicalFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("having_ip", self.having_ip);
        vector.set_by_name("url_length", self.url_length);
        vector.set_by_name("shortening_service", self.shortening_service);
        vector.set_by_name("having_at_symbol", self.having_at_symbol);
        vector.set_by_name("double_slash_redirect", self.double_slash_redirect);
        vector.set_by_name("prefix_suffix", self.prefix_suffix);
        vector.set_by_name("having_sub_domain", self.having_sub_domain);
        vector.set_by_name("https_token", self.https_token);
        vector.set_by_name("port", self.port);
        vector.set_by_name("ssl_final_state", self.ssl_final_state);
    }
}

fn flag(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// A `//` past the scheme separator signals an embedded redirect target.
fn embedded_double_slash(text: &str) -> bool {
    let after_scheme = match text.find("://") {
        Some(i) => i + 3,
        None => 0,
    };
    text[after_scheme..].contains("//")
}

/// Non-empty subdomain labels, with a leading `www` not counted.
fn subdomain_count(subdomain: Option<&str>) -> usize {
    let mut labels = match subdomain {
        Some(s) => s.split('.').filter(|p| !p.is_empty()),
        None => return 0,
    };

    match labels.next() {
        Some("www") | None => labels.count(),
        Some(_) => labels.count() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexical(input: &str) -> LexicalFeatures {
        LexicalFeatures::from_url(&ParsedUrl::from_input(input))
    }

    #[test]
    fn test_having_ip() {
        assert_eq!(lexical("http://192.168.1.1/x").having_ip, 1.0);
        assert_eq!(lexical("http://example.com").having_ip, 0.0);
    }

    #[test]
    fn test_url_length_counts_normalized_text() {
        // "bit.ly/xyz" normalizes to the 17-character "http://bit.ly/xyz"
        assert_eq!(lexical("bit.ly/xyz").url_length, 17.0);
    }

    #[test]
    fn test_shortening_service() {
        assert_eq!(lexical("bit.ly/xyz").shortening_service, 1.0);
        assert_eq!(lexical("http://TinyURL.com/a").shortening_service, 1.0);
        assert_eq!(lexical("http://example.com").shortening_service, 0.0);
    }

    #[test]
    fn test_having_at_symbol() {
        assert_eq!(lexical("http://a@b.com").having_at_symbol, 1.0);
        assert_eq!(lexical("http://example.com").having_at_symbol, 0.0);
    }

    #[test]
    fn test_double_slash_redirect() {
        assert_eq!(lexical("http://example.com//http://evil.com").double_slash_redirect, 1.0);
        assert_eq!(lexical("http://example.com/a/b").double_slash_redirect, 0.0);
        // the scheme separator itself does not count
        assert_eq!(lexical("https://example.com").double_slash_redirect, 0.0);
    }

    #[test]
    fn test_prefix_suffix() {
        assert_eq!(lexical("http://secure-paypal.com").prefix_suffix, 1.0);
        assert_eq!(lexical("http://paypal.com").prefix_suffix, 0.0);
    }

    #[test]
    fn test_having_sub_domain() {
        assert_eq!(lexical("http://www.example.com").having_sub_domain, 0.0);
        assert_eq!(lexical("http://example.com").having_sub_domain, 0.0);
        assert_eq!(lexical("http://a.example.com").having_sub_domain, 1.0);
        assert_eq!(lexical("http://a.b.example.com").having_sub_domain, 2.0);
        assert_eq!(lexical("http://www.a.example.com").having_sub_domain, 1.0);
    }

    #[test]
    fn test_https_token() {
        assert_eq!(lexical("http://https-paypal.com").https_token, 1.0);
        // scheme must not pollute the check
        assert_eq!(lexical("https://example.com").https_token, 0.0);
        assert_eq!(lexical("bit.ly/xyz").https_token, 0.0);
    }

    #[test]
    fn test_port() {
        assert_eq!(lexical("http://example.com:8080").port, 1.0);
        assert_eq!(lexical("http://example.com:443").port, 0.0);
        assert_eq!(lexical("http://example.com").port, 0.0);
    }

    #[test]
    fn test_ssl_final_state_polarity() {
        // suspicion flag: 1 when not https
        assert_eq!(lexical("http://example.com").ssl_final_state, 1.0);
        assert_eq!(lexical("https://example.com").ssl_final_state, 0.0);
    }

    #[test]
    fn test_degenerate_input_is_total() {
        for input in ["", "   ", "http://", ":::"] {
            let features = lexical(input);
            assert_eq!(features.having_sub_domain, 0.0);
            assert_eq!(features.prefix_suffix, 0.0);
            assert_eq!(features.https_token, 0.0);
        }
    }
}
