//! Insertion-ordered route table with first-match-wins lookup.

use super::pattern::{Params, PathPattern};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A registered route: original template, compiled matcher, and target.
#[derive(Debug, Clone)]
pub struct RouteEntry<T> {
    template: Arc<str>,
    pattern: PathPattern,
    target: T,
}

impl<T> RouteEntry<T> {
    /// The template string this entry was registered with.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The compiled matcher.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The registered target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Result of a successful route lookup.
///
/// Created fresh on every lookup and never mutated; the next lookup
/// supersedes it wholesale. The target is cloned out of the table (targets
/// are `Arc`ed handlers in practice, so the clone is cheap).
#[derive(Debug, Clone)]
pub struct RouteMatch<T> {
    /// Template of the entry that matched.
    pub template: Arc<str>,
    /// Path parameters extracted from the URL, in placeholder order.
    pub params: Params,
    /// Target registered for the matched template.
    pub target: T,
}

/// Insertion-ordered mapping from route template to compiled route.
///
/// Registration order is part of the contract: overlapping templates are
/// resolved first-match-wins, so specific templates must be registered
/// before the `*` catch-all. The table is built once at startup and
/// read-only thereafter; share it via `Arc` across request coroutines.
#[derive(Debug, Clone, Default)]
pub struct RouteTable<T> {
    base_path: String,
    entries: Vec<RouteEntry<T>>,
}

impl<T: Clone> RouteTable<T> {
    /// Create an empty table. A trailing slash on the base path is dropped
    /// so `base + template` never produces `//`.
    #[must_use]
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            entries: Vec::new(),
        }
    }

    /// Base path prefix all routes are anchored under.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Compile and append a route.
    ///
    /// Re-registering an existing template overwrites the prior entry in
    /// place (its position in the scan order is kept); callers should treat
    /// that as a misuse, so it is logged.
    pub fn add_route(&mut self, template: &str, target: T) {
        let entry = RouteEntry {
            template: Arc::from(template),
            pattern: PathPattern::compile(&self.base_path, template),
            target,
        };
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.template.as_ref() == template)
        {
            warn!(template, position = pos, "route re-registered, overwriting prior entry");
            self.entries[pos] = entry;
        } else {
            debug!(
                template,
                base_path = %self.base_path,
                total_routes = self.entries.len() + 1,
                "route registered"
            );
            self.entries.push(entry);
        }
    }

    /// Find the first entry matching a URL's path component.
    ///
    /// The query string and fragment are discarded before matching.
    /// Malformed input never panics; anything that fails to parse simply
    /// yields no match.
    #[must_use]
    pub fn find_route(&self, url: &str) -> Option<RouteMatch<T>> {
        let pathname = url
            .split(['?', '#'])
            .next()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");
        for entry in &self.entries {
            if let Some(params) = entry.pattern.matches(pathname) {
                debug!(
                    pathname,
                    template = %entry.template,
                    params = ?params,
                    "route matched"
                );
                return Some(RouteMatch {
                    template: Arc::clone(&entry.template),
                    params,
                    target: entry.target.clone(),
                });
            }
        }
        debug!(pathname, routes = self.entries.len(), "no route matched");
        None
    }

    /// Read-only snapshot of all registered entries in insertion order.
    ///
    /// Used by the static-generation step to enumerate buildable pages.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry<T>] {
        &self.entries
    }

    /// Log the full routing table at startup.
    pub fn log_routes(&self) {
        info!(
            base_path = %self.base_path,
            routes_count = self.entries.len(),
            templates = ?self
                .entries
                .iter()
                .map(RouteEntry::template)
                .collect::<Vec<_>>(),
            "routing table loaded"
        );
    }
}
