//! Navigation core - the environment-agnostic state machine shared by the
//! client and server bindings.
//!
//! The core composes the route table and holds the one piece of mutable
//! routing state: the current match plus the current query. Both bindings
//! differ only in how the current URL is obtained and whether history side
//! effects occur; everything here is synchronous and never suspends.

use super::pattern::{get_param, Params};
use super::query::Query;
use super::table::{RouteMatch, RouteTable};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Contract violations raised by the router bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// `push` was called on a server router. Navigation has no meaning
    /// mid-request; construct a fresh router per request instead.
    PushUnsupported,
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::PushUnsupported => write!(
                f,
                "push() is not supported on a server router: a server render \
                 pass is one-shot, construct a new router per request"
            ),
        }
    }
}

impl std::error::Error for RouterError {}

/// Handle returned by [`Observers::subscribe`], usable to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(usize);

/// Ordered listener list with synchronous notification.
///
/// Listeners take no arguments; they read the new state back off the
/// router. Notification order is subscription order.
#[derive(Default)]
pub struct Observers {
    listeners: Vec<(usize, Box<dyn FnMut()>)>,
    next_id: usize,
}

impl Observers {
    /// Register a listener; it fires on every route update.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Drop a previously registered listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    /// Invoke all listeners in subscription order.
    pub fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Current routing state: matched route plus query.
///
/// Replaced atomically on every route update. An unmatched URL is the
/// `Routed`-with-`None` state, not an error; rendering "not found" is the
/// caller's concern.
#[derive(Debug, Clone, Default)]
pub struct RouterState<T> {
    /// Current match, or `None` before `start` / for unmatched URLs.
    pub route: Option<RouteMatch<T>>,
    /// Current query state.
    pub query: Query,
}

/// The shared navigation core both router bindings compose.
#[derive(Debug)]
pub struct NavCore<T> {
    table: Arc<RouteTable<T>>,
    state: RouterState<T>,
    observers: Observers,
}

impl<T: Clone> NavCore<T> {
    /// Build a core over a shared, read-only route table.
    #[must_use]
    pub fn new(table: Arc<RouteTable<T>>) -> Self {
        Self {
            table,
            state: RouterState {
                route: None,
                query: Query::new(),
            },
            observers: Observers::default(),
        }
    }

    /// The route table this core resolves against.
    #[must_use]
    pub fn table(&self) -> &Arc<RouteTable<T>> {
        &self.table
    }

    /// Current state (match + query).
    #[must_use]
    pub fn state(&self) -> &RouterState<T> {
        &self.state
    }

    /// Replace the query portion of the state without re-routing.
    pub fn set_query(&mut self, query: Query) {
        self.state.query = query;
    }

    /// Reset to the initial unrouted state. Listeners are kept.
    pub fn reset(&mut self) {
        self.state = RouterState {
            route: None,
            query: Query::new(),
        };
    }

    /// Look up `url`, atomically replace the state, then notify all
    /// subscribers in registration order. Lookup is synchronous and always
    /// completes before notification; there is no intermediate state.
    pub fn update_route(&mut self, url: &str) {
        let route = self.table.find_route(url);
        debug!(
            url,
            matched = route.as_ref().map(|m| m.template.as_ref().to_string()),
            "route updated"
        );
        self.state.route = route;
        self.observers.notify();
    }

    /// Register a listener fired after every [`update_route`](Self::update_route).
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        self.observers.subscribe(listener)
    }

    /// Drop a listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.observers.unsubscribe(subscription);
    }
}

/// The read surface both bindings expose to page-level code.
///
/// Page code written against this trait cannot tell a browser-shaped
/// embedding from a one-shot server render pass, which is the whole point.
pub trait RouteView<T: Clone> {
    /// Current matched route, if any.
    fn route(&self) -> Option<&RouteMatch<T>>;

    /// Current query state.
    fn query(&self) -> &Query;

    /// Parameters of the current match, or empty when unmatched.
    fn params<'a>(&'a self) -> &'a [(Arc<str>, String)]
    where
        T: 'a,
    {
        self.route().map(|m| m.params.as_slice()).unwrap_or(&[])
    }

    /// Look up a single parameter of the current match.
    fn param<'a>(&'a self, name: &str) -> Option<&'a str>
    where
        T: 'a,
    {
        self.route().and_then(|m| get_param(&m.params, name))
    }

    /// Target of the current match, cloned out.
    fn target(&self) -> Option<T> {
        self.route().map(|m| m.target.clone())
    }
}

impl<T: Clone> RouteView<T> for NavCore<T> {
    fn route(&self) -> Option<&RouteMatch<T>> {
        self.state.route.as_ref()
    }

    fn query(&self) -> &Query {
        &self.state.query
    }
}

/// Parameter storage type used across handler signatures.
pub type RouteParams = Params;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table() -> Arc<RouteTable<&'static str>> {
        let mut t = RouteTable::new("");
        t.add_route("/", "home");
        t.add_route("/product/:id/", "detail");
        Arc::new(t)
    }

    #[test]
    fn test_initial_state_is_unrouted() {
        let core = NavCore::new(table());
        assert!(core.route().is_none());
        assert!(core.params().is_empty());
        assert!(core.target().is_none());
    }

    #[test]
    fn test_update_route_replaces_state_and_notifies() {
        let mut core = NavCore::new(table());
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        core.subscribe(move || *counter.borrow_mut() += 1);

        core.update_route("/product/42/");
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(core.param("id"), Some("42"));
        assert_eq!(core.target(), Some("detail"));

        core.update_route("/");
        assert_eq!(*fired.borrow(), 2);
        assert!(core.param("id").is_none());
    }

    #[test]
    fn test_unmatched_url_is_routed_with_absent_match() {
        let mut core = NavCore::new(table());
        core.update_route("/nope");
        assert!(core.route().is_none());
        assert!(core.target().is_none());
    }

    #[test]
    fn test_notification_order_and_unsubscribe() {
        let mut core = NavCore::new(table());
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let a = core.subscribe(move || first.borrow_mut().push("a"));
        let second = Rc::clone(&order);
        core.subscribe(move || second.borrow_mut().push("b"));

        core.update_route("/");
        assert_eq!(*order.borrow(), vec!["a", "b"]);

        core.unsubscribe(a);
        core.update_route("/");
        assert_eq!(*order.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn test_reset_clears_state_but_keeps_listeners() {
        let mut core = NavCore::new(table());
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        core.subscribe(move || *counter.borrow_mut() += 1);
        core.set_query(Query::decode("a=1"));
        core.update_route("/");

        core.reset();
        assert!(core.route().is_none());
        assert!(core.query().is_empty());

        core.update_route("/");
        assert_eq!(*fired.borrow(), 2);
    }
}
