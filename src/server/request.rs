use crate::router::Query;
use may_minihttp::Request;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...).
    pub method: String,
    /// Path with query string and fragment stripped.
    pub path: String,
    /// Full request target as sent, query string included.
    pub raw_path: String,
    /// Decoded query pairs.
    pub query: Query,
}

/// Extract method, path, and query from a raw `may_minihttp::Request`.
pub fn parse_request(req: &Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or("/")
        .to_string();
    let query = match raw_path.split_once('?') {
        Some((_, search)) => Query::decode(search),
        None => Query::new(),
    };

    debug!(%method, %path, params = query.len(), "request parsed");
    ParsedRequest {
        method,
        path,
        raw_path,
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Request cannot be constructed outside may_minihttp, so the
    // splitting rules are covered through the same string logic.
    fn split(raw: &str) -> (String, Query) {
        let path = raw.split(['?', '#']).next().unwrap_or("/").to_string();
        let query = match raw.split_once('?') {
            Some((_, search)) => Query::decode(search),
            None => Query::new(),
        };
        (path, query)
    }

    #[test]
    fn test_path_and_query_split() {
        let (path, query) = split("/api/products?limit=3&sort=price_desc");
        assert_eq!(path, "/api/products");
        assert_eq!(query.get("limit"), Some("3"));
        assert_eq!(query.get("sort"), Some("price_desc"));
    }

    #[test]
    fn test_bare_path_has_empty_query() {
        let (path, query) = split("/product/42/");
        assert_eq!(path, "/product/42/");
        assert!(query.is_empty());
    }
}
