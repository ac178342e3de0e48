//! Request fingerprinting for deterministic cassette matching

use sha2::{Digest, Sha256};

/// Separator between fingerprint components
const SEPARATOR: &[u8] = b":";

/// Compute the SHA-256 fingerprint of a request as lowercase hex
///
/// The fingerprint covers:
/// 1. Method
/// 2. Full URL including query
/// 3. Body (absent body hashes like an empty body)
///
/// Headers are deliberately excluded: header-based matching is brittle
/// across tool upgrades and auth-token churn.
#[must_use]
pub fn fingerprint(method: &str, url: &str, body: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(SEPARATOR);
    hasher.update(url.as_bytes());
    hasher.update(SEPARATOR);
    hasher.update(body.unwrap_or_default().as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether a URL is network-addressable and therefore interceptable
///
/// Non-network schemes (data:, blob:, about:) are never fingerprinted or
/// intercepted; they pass through untouched.
#[must_use]
pub fn is_network_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint("GET", "https://example.com/api?q=1", None);
        let b = fingerprint("GET", "https://example.com/api?q=1", None);

        assert_eq!(a, b, "Fingerprint must be deterministic");
    }

    #[test]
    fn test_fingerprint_different_methods() {
        let get = fingerprint("GET", "https://example.com/api", None);
        let post = fingerprint("POST", "https://example.com/api", None);

        assert_ne!(
            get, post,
            "Different methods should produce different fingerprints"
        );
    }

    #[test]
    fn test_fingerprint_different_urls() {
        let v1 = fingerprint("GET", "https://example.com/v1", None);
        let v2 = fingerprint("GET", "https://example.com/v2", None);

        assert_ne!(
            v1, v2,
            "Different URLs should produce different fingerprints"
        );
    }

    #[test]
    fn test_fingerprint_query_is_significant() {
        let bare = fingerprint("GET", "https://example.com/search", None);
        let query = fingerprint("GET", "https://example.com/search?q=rust", None);

        assert_ne!(bare, query, "Query string is part of the identity");
    }

    #[test]
    fn test_fingerprint_different_bodies() {
        let a = fingerprint("POST", "https://example.com/api", Some("{\"a\":1}"));
        let b = fingerprint("POST", "https://example.com/api", Some("{\"a\":2}"));

        assert_ne!(
            a, b,
            "Different bodies should produce different fingerprints"
        );
    }

    #[test]
    fn test_absent_body_equals_empty_body() {
        let absent = fingerprint("POST", "https://example.com/api", None);
        let empty = fingerprint("POST", "https://example.com/api", Some(""));

        assert_eq!(absent, empty, "Absent body hashes like an empty body");
    }

    #[test]
    fn test_fingerprint_is_lowercase_hex() {
        let fp = fingerprint("GET", "https://example.com/", None);

        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_is_network_url() {
        assert!(is_network_url("http://example.com/"));
        assert!(is_network_url("https://example.com/path?q=1"));

        assert!(!is_network_url("data:text/html,<p>hi</p>"));
        assert!(!is_network_url("blob:https://example.com/uuid"));
        assert!(!is_network_url("about:blank"));
        assert!(!is_network_url("file:///etc/hosts"));
    }

    proptest! {
        #[test]
        fn prop_fingerprint_pure(method in "[A-Z]{3,7}", url in "https://[a-z]{1,12}\\.com/[a-z0-9/]{0,20}", body in proptest::option::of(".{0,64}")) {
            let a = fingerprint(&method, &url, body.as_deref());
            let b = fingerprint(&method, &url, body.as_deref());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_distinct_urls_distinct_fingerprints(a in "https://[a-z]{1,12}\\.com/[a-z0-9]{1,20}", b in "https://[a-z]{1,12}\\.com/[a-z0-9]{1,20}") {
            prop_assume!(a != b);
            prop_assert_ne!(fingerprint("GET", &a, None), fingerprint("GET", &b, None));
        }
    }
}
