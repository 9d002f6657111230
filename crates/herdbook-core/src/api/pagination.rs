use serde::{Deserialize, Serialize};

/// DRF page envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// List endpoints return either a page envelope or, with pagination
/// disabled (`no_pagination=true`), a bare array. Some endpoints flip
/// between the two depending on server configuration, so parse both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybePaged<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> MaybePaged<T> {
    pub(crate) fn into_results(self) -> Vec<T> {
        match self {
            MaybePaged::Paged(page) => page.results,
            MaybePaged::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more() {
        let page: Page<i64> = Page {
            count: Some(30),
            next: Some("http://example.com/animals/?page=2".to_string()),
            previous: None,
            results: vec![1, 2, 3],
        };
        assert!(page.has_more());

        let last: Page<i64> = Page {
            count: Some(3),
            next: None,
            previous: Some("http://example.com/animals/?page=1".to_string()),
            results: vec![1, 2, 3],
        };
        assert!(!last.has_more());
    }

    #[test]
    fn test_maybe_paged_envelope() {
        let json = r#"{"count": 2, "next": null, "previous": null, "results": [1, 2]}"#;
        let parsed: MaybePaged<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_results(), vec![1, 2]);
    }

    #[test]
    fn test_maybe_paged_bare_array() {
        let json = r#"[1, 2, 3]"#;
        let parsed: MaybePaged<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_results(), vec![1, 2, 3]);
    }
}
