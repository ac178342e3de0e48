//! Cassette wire format types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fingerprint;

/// A named, ordered collection of recorded request/response pairs
///
/// Persisted as a single JSON file per scenario name. Entries are append
/// only and never edited in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cassette {
    /// Recorded entries, in capture order
    pub entries: Vec<Entry>,
}

impl Cassette {
    /// Create an empty cassette
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cassette has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Find the first entry whose request matches the given fingerprint
    ///
    /// First match wins; if multiple entries share a fingerprint only the
    /// first is ever reachable.
    #[must_use]
    pub fn find_first(&self, request_fingerprint: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.request.fingerprint() == request_fingerprint)
    }
}

/// One immutable recorded request/response pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// The request as intercepted
    pub request: RequestDescriptor,
    /// The real response captured for it
    pub response: ResponseDescriptor,
}

impl Entry {
    /// Create an entry from a request/response pair
    #[must_use]
    pub fn new(request: RequestDescriptor, response: ResponseDescriptor) -> Self {
        Self { request, response }
    }
}

/// A recorded request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Full URL including query
    pub url: String,
    /// HTTP method (e.g., "GET", "POST")
    pub method: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body, absent for bodiless requests
    #[serde(rename = "postData", skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
}

impl RequestDescriptor {
    /// Compute this request's fingerprint
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint::fingerprint(&self.method, &self.url, self.post_data.as_deref())
    }
}

/// A recorded response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_entry(url: &str, body: &str) -> Entry {
        Entry::new(
            RequestDescriptor {
                url: url.to_string(),
                method: "GET".to_string(),
                headers: HashMap::new(),
                post_data: None,
            },
            ResponseDescriptor {
                status: 200,
                headers: HashMap::new(),
                body: body.to_string(),
            },
        )
    }

    #[test]
    fn test_find_first_match_wins() {
        let mut cassette = Cassette::new();
        cassette.push(get_entry("https://example.com/a", "first"));
        cassette.push(get_entry("https://example.com/a", "second"));

        let fp = cassette.entries[0].request.fingerprint();
        let found = cassette.find_first(&fp).unwrap();

        assert_eq!(found.response.body, "first");
    }

    #[test]
    fn test_find_first_miss() {
        let mut cassette = Cassette::new();
        cassette.push(get_entry("https://example.com/a", "body"));

        assert!(cassette.find_first("deadbeef").is_none());
    }

    #[test]
    fn test_wire_format_field_names() {
        let entry = Entry::new(
            RequestDescriptor {
                url: "https://example.com/api".to_string(),
                method: "POST".to_string(),
                headers: HashMap::from([("accept".to_string(), "*/*".to_string())]),
                post_data: Some("{\"q\":1}".to_string()),
            },
            ResponseDescriptor {
                status: 201,
                headers: HashMap::new(),
                body: "ok".to_string(),
            },
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["request"]["postData"], "{\"q\":1}");
        assert_eq!(json["request"]["url"], "https://example.com/api");
        assert_eq!(json["response"]["status"], 201);
    }

    #[test]
    fn test_absent_body_omitted_from_wire_format() {
        let entry = get_entry("https://example.com/", "ok");

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["request"].get("postData").is_none());
    }

    #[test]
    fn test_parse_cassette_document() {
        let raw = r#"{ "entries": [
            { "request":  {"url": "https://example.com/", "method": "GET", "headers": {}},
              "response": {"status": 200, "headers": {"content-type": "text/html"}, "body": "<html></html>"} }
        ] }"#;

        let cassette: Cassette = serde_json::from_str(raw).unwrap();
        assert_eq!(cassette.len(), 1);
        assert_eq!(cassette.entries[0].response.status, 200);
        assert!(cassette.entries[0].request.post_data.is_none());
    }
}
