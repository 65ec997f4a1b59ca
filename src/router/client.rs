//! Client router - the stateful, history-integrated binding.
//!
//! The browser surface is abstracted behind [`HistoryEnv`] so the binding
//! carries no ambient globals: an embedding supplies the current location
//! and receives history pushes, and wires its native back/forward event to
//! [`ClientRouter::handle_pop`]. [`MemoryHistory`] is the in-process
//! implementation used by tests and headless embeddings.

use super::core::{NavCore, RouteView, Subscription};
use super::query::{build_url, Query, QueryPatch};
use super::table::{RouteMatch, RouteTable};
use std::sync::Arc;
use tracing::debug;

/// Environment surface the client router navigates against.
///
/// Mirrors the subset of a browser location/history pair the router needs:
/// read the current URL, push a new entry. Back/forward restoration stays
/// with the embedder, which calls [`ClientRouter::handle_pop`] afterwards.
pub trait HistoryEnv {
    /// Current pathname, e.g. `/product/42/`.
    fn pathname(&self) -> String;

    /// Current raw query string; empty or with a leading `?`.
    fn search(&self) -> String;

    /// Push a new history entry for `url` (pathname + optional query).
    fn push(&mut self, url: &str);
}

/// In-process history: an entry stack plus a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// Start with a single entry for `initial_url`.
    #[must_use]
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![initial_url.to_string()],
            index: 0,
        }
    }

    /// The URL of the active entry.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the stack holds no entries (never, after construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the cursor back one entry. Returns the restored URL, or `None`
    /// at the beginning of the stack.
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Move the cursor forward one entry. Returns the restored URL, or
    /// `None` at the end of the stack.
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

impl HistoryEnv for MemoryHistory {
    fn pathname(&self) -> String {
        self.current()
            .split(['?', '#'])
            .next()
            .unwrap_or("/")
            .to_string()
    }

    fn search(&self) -> String {
        match self.current().find('?') {
            Some(pos) => self.current()[pos..].to_string(),
            None => String::new(),
        }
    }

    fn push(&mut self, url: &str) {
        // A push drops any forward entries, exactly like browser history.
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index += 1;
    }
}

/// Stateful router binding for an interactive embedding.
pub struct ClientRouter<T, E> {
    core: NavCore<T>,
    env: E,
}

impl<T: Clone, E: HistoryEnv> ClientRouter<T, E> {
    /// Bind a route table to an environment.
    #[must_use]
    pub fn new(table: Arc<RouteTable<T>>, env: E) -> Self {
        Self {
            core: NavCore::new(table),
            env,
        }
    }

    /// The bound environment (tests drive back/forward through this).
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment for the embedder's history moves.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    fn current_url(&self) -> String {
        format!("{}{}", self.env.pathname(), self.env.search())
    }

    /// Normalize a target URL against the configured base path.
    fn normalize(&self, url: &str) -> String {
        let base = self.core.table().base_path();
        if base.is_empty() || url.starts_with(base) {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }

    /// Re-derive query state from the environment, then route `url`.
    fn apply(&mut self, url: &str) {
        self.core.set_query(Query::decode(&self.env.search()));
        self.core.update_route(url);
    }

    /// Perform the initial route from the current location. The only
    /// method that may be called before any navigation has occurred.
    pub fn start(&mut self) {
        let url = self.current_url();
        self.apply(&url);
    }

    /// Navigate to `url`.
    ///
    /// Pushes a history entry only when the normalized URL differs from
    /// the current one, so repeated pushes of the same URL never create
    /// duplicate entries. The route update (and subscriber notification)
    /// still fires on every call.
    pub fn push(&mut self, url: &str) {
        let full = self.normalize(url);
        let previous = self.current_url();
        if previous != full {
            self.env.push(&full);
        } else {
            debug!(url = %full, "push to current url, history untouched");
        }
        self.apply(&full);
    }

    /// Re-route after the embedder restored a history entry (back/forward).
    /// Never pushes.
    pub fn handle_pop(&mut self) {
        let url = self.current_url();
        self.apply(&url);
    }

    /// Query-only navigation: merge `patch` over the current query and
    /// push the resulting URL.
    pub fn apply_query(&mut self, patch: &QueryPatch) {
        let url = build_url(
            self.core.table().base_path(),
            &self.env.pathname(),
            &self.env.search(),
            patch,
        );
        self.push(&url);
    }

    /// Register a listener fired after every route update.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        self.core.subscribe(listener)
    }

    /// Drop a listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.core.unsubscribe(subscription);
    }
}

impl<T: Clone, E: HistoryEnv> RouteView<T> for ClientRouter<T, E> {
    fn route(&self) -> Option<&RouteMatch<T>> {
        self.core.route()
    }

    fn query(&self) -> &Query {
        self.core.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(base: &str) -> Arc<RouteTable<&'static str>> {
        let mut t = RouteTable::new(base);
        t.add_route("/", "home");
        t.add_route("/product/:id/", "detail");
        t.add_route("*", "not_found");
        Arc::new(t)
    }

    #[test]
    fn test_start_routes_current_location() {
        let mut router = ClientRouter::new(table(""), MemoryHistory::new("/?search=socks"));
        router.start();
        assert_eq!(router.target(), Some("home"));
        assert_eq!(router.query().get("search"), Some("socks"));
    }

    #[test]
    fn test_push_normalizes_against_base_path() {
        let mut router = ClientRouter::new(table("/shop"), MemoryHistory::new("/shop/"));
        router.start();
        router.push("/product/42/");
        assert_eq!(router.env().current(), "/shop/product/42/");
        assert_eq!(router.param("id"), Some("42"));
    }

    #[test]
    fn test_repeated_push_is_idempotent_for_history() {
        let mut router = ClientRouter::new(table(""), MemoryHistory::new("/"));
        let fired = std::rc::Rc::new(std::cell::RefCell::new(0));
        let counter = std::rc::Rc::clone(&fired);
        router.subscribe(move || *counter.borrow_mut() += 1);

        router.start();
        router.push("/product/42/");
        router.push("/product/42/");

        // One history entry for the two identical pushes, but the route
        // re-evaluation still notifies on every call.
        assert_eq!(router.env().len(), 2);
        assert_eq!(*fired.borrow(), 3);
    }

    #[test]
    fn test_pop_restores_without_pushing() {
        let mut router = ClientRouter::new(table(""), MemoryHistory::new("/"));
        router.start();
        router.push("/product/42/");

        router.env_mut().back();
        router.handle_pop();
        assert_eq!(router.target(), Some("home"));
        assert_eq!(router.env().len(), 2);

        router.env_mut().forward();
        router.handle_pop();
        assert_eq!(router.param("id"), Some("42"));
    }

    #[test]
    fn test_apply_query_is_sugar_over_build_url_and_push() {
        let mut router = ClientRouter::new(table(""), MemoryHistory::new("/?page=2"));
        router.start();
        router.apply_query(&QueryPatch::new().delete("page").set("sort", "price_asc"));
        assert_eq!(router.env().current(), "/?sort=price_asc");
        assert_eq!(router.query().get("sort"), Some("price_asc"));
        assert_eq!(router.query().get("page"), None);
        // Still the home route; only the query changed.
        assert_eq!(router.target(), Some("home"));
    }
}
