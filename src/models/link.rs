//! Link request and result types for one batch invocation

use serde::{Deserialize, Serialize};

/// One (path, query) page descriptor supplied by the caller
///
/// `path` may be empty (blank-path items are filtered out before any remote
/// call); `query` is opaque and never re-escaped by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequestItem {
    pub path: String,
    pub query: String,
}

impl LinkRequestItem {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        LinkRequestItem {
            path: path.into(),
            query: query.into(),
        }
    }
}

/// Outcome of one deep-link exchange call
///
/// Invariant: exactly one of `link` / `error_message` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    pub path: String,
    pub query: String,
    pub link: String,
    pub error_message: String,
}

impl LinkResult {
    /// Build a successful result echoing the request item
    pub fn success(item: &LinkRequestItem, link: String) -> Self {
        LinkResult {
            path: item.path.clone(),
            query: item.query.clone(),
            link,
            error_message: String::new(),
        }
    }

    /// Build a failed result echoing the request item
    pub fn failure(item: &LinkRequestItem, error_message: String) -> Self {
        LinkResult {
            path: item.path.clone(),
            query: item.query.clone(),
            link: String::new(),
            error_message,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.link.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_success_shape() {
        let item = LinkRequestItem::new("pages/index", "id=1");
        let result = LinkResult::success(&item, "https://wxaurl.cn/abc".to_string());

        assert!(result.is_success());
        assert_eq!(result.path, "pages/index");
        assert_eq!(result.query, "id=1");
        assert!(result.error_message.is_empty());
    }

    #[test]
    fn test_result_failure_shape() {
        let item = LinkRequestItem::new("pages/a", "");
        let result = LinkResult::failure(&item, "Transport error: timeout".to_string());

        assert!(!result.is_success());
        assert!(result.link.is_empty());
        assert!(!result.error_message.is_empty());
    }
}
