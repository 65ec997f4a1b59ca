//! Path pattern compiler - turns route templates into anchored matchers.
//!
//! A template is a literal path with `:name` placeholders, e.g.
//! `/product/:id/`. Each placeholder matches one or more characters
//! excluding `/` and is captured under its name. The special template `*`
//! is the catch-all and matches any path under the configured base path.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Storefront routes have at most one or two placeholders.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the matching hot path.
///
/// Param names are `Arc<str>` because they come from the static route
/// table (known at startup); `Arc::clone()` is O(1) versus an O(n) string
/// copy per match. Values stay `String` as they are per-lookup URL data.
pub type Params = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Look up a parameter by name.
///
/// Uses "last write wins" semantics: if duplicate parameter names exist at
/// different path depths, the last occurrence is returned.
#[inline]
#[must_use]
pub fn get_param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

/// A compiled route template: anchored regex plus ordered parameter names.
///
/// Owned by the route table entry that compiled it and never mutated after
/// registration.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

impl PathPattern {
    /// Compile a template against a base path prefix.
    ///
    /// Literal characters are escaped so they match themselves, each
    /// `:name` becomes a `([^/]+)` capturing group, and the whole pattern
    /// is anchored to the full pathname (`^base + template$`).
    #[must_use]
    pub fn compile(base_path: &str, template: &str) -> Self {
        let mut pattern = String::with_capacity(base_path.len() + template.len() + 8);
        pattern.push('^');
        pattern.push_str(&regex::escape(base_path));

        let mut param_names = Vec::new();
        if template == "*" {
            pattern.push_str(".*");
        } else {
            let mut rest = template;
            while let Some(idx) = rest.find(':') {
                let (literal, tail) = rest.split_at(idx);
                pattern.push_str(&regex::escape(literal));
                let tail = &tail[1..];
                let end = tail
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(tail.len());
                if end == 0 {
                    // A bare ':' with no identifier is a literal colon.
                    pattern.push_str(&regex::escape(":"));
                    rest = tail;
                    continue;
                }
                param_names.push(Arc::from(&tail[..end]));
                pattern.push_str("([^/]+)");
                rest = &tail[end..];
            }
            pattern.push_str(&regex::escape(rest));
        }
        pattern.push('$');

        // The pattern is built from escaped literals and fixed groups, so
        // compilation cannot fail for any template string.
        #[allow(clippy::expect_used)]
        let regex = Regex::new(&pattern).expect("failed to compile path regex");
        Self { regex, param_names }
    }

    /// Ordered parameter names declared by the template.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Match a pathname and extract parameters.
    ///
    /// Returns `None` when the path does not match. Captured values are the
    /// exact substrings from the path, in template placeholder order; no
    /// type coercion is performed.
    #[must_use]
    pub fn matches(&self, pathname: &str) -> Option<Params> {
        let caps = self.regex.captures(pathname)?;
        let mut params = Params::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                params.push((Arc::clone(name), m.as_str().to_string()));
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_template() {
        let p = PathPattern::compile("", "/");
        assert!(p.matches("/").is_some());
        assert!(p.matches("/about").is_none());
        assert!(p.param_names().is_empty());
    }

    #[test]
    fn test_parameterized_template() {
        let p = PathPattern::compile("", "/product/:id/");
        let params = p.matches("/product/42/").expect("should match");
        assert_eq!(get_param(&params, "id"), Some("42"));
        assert!(p.matches("/product/42").is_none());
        assert!(p.matches("/product/a/b/").is_none());
    }

    #[test]
    fn test_multiple_placeholders_in_order() {
        let p = PathPattern::compile("", "/c/:category1/:category2");
        let names: Vec<&str> = p.param_names().iter().map(|n| n.as_ref()).collect();
        assert_eq!(names, vec!["category1", "category2"]);
        let params = p.matches("/c/fashion/shoes").expect("should match");
        assert_eq!(params[0].1, "fashion");
        assert_eq!(params[1].1, "shoes");
    }

    #[test]
    fn test_base_path_prefix() {
        let p = PathPattern::compile("/shop", "/product/:id/");
        assert!(p.matches("/product/42/").is_none());
        let params = p.matches("/shop/product/42/").expect("should match");
        assert_eq!(get_param(&params, "id"), Some("42"));
    }

    #[test]
    fn test_catch_all() {
        let p = PathPattern::compile("/shop", "*");
        assert!(p.matches("/shop/anything/at/all").is_some());
        assert!(p.matches("/elsewhere").is_none());
    }

    #[test]
    fn test_captures_are_raw_strings() {
        let p = PathPattern::compile("", "/product/:id/");
        let params = p.matches("/product/008A/").expect("should match");
        assert_eq!(get_param(&params, "id"), Some("008A"));
    }
}
