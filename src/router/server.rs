//! Server router - the stateless one-shot binding for SSR and SSG.
//!
//! A server router is handed an explicit URL/query pair exactly once per
//! request or generation step; it reads nothing ambient and performs no
//! history side effects. Instances hold request-scoped state and must be
//! rebuilt (or [`reset`](ServerRouter::reset)) between independent
//! requests - the render driver constructs one per call.

use super::core::{NavCore, RouteView, RouterError, Subscription};
use super::query::Query;
use super::table::{RouteMatch, RouteTable};
use std::sync::Arc;
use tracing::error;

/// One-shot router binding for a server render pass.
#[derive(Debug)]
pub struct ServerRouter<T> {
    core: NavCore<T>,
}

impl<T: Clone> ServerRouter<T> {
    /// Bind a shared route table. Cheap enough to do per request.
    #[must_use]
    pub fn new(table: Arc<RouteTable<T>>) -> Self {
        Self {
            core: NavCore::new(table),
        }
    }

    /// The single entry point per request: set the explicit query state,
    /// then resolve `url`. Must be called before reading the route.
    pub fn start(&mut self, url: &str, query: Query) {
        self.core.set_query(query);
        self.core.update_route(url);
    }

    /// Navigation is a contract violation on the server.
    ///
    /// Always fails and never mutates state; this exists to catch
    /// client-oriented page logic accidentally reused mid-request.
    pub fn push(&mut self, url: &str) -> Result<(), RouterError> {
        error!(url, "push() called on a server router");
        Err(RouterError::PushUnsupported)
    }

    /// Clear request-scoped state so the instance can serve another
    /// request. Subscribers are kept.
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Register a listener fired after `start`.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        self.core.subscribe(listener)
    }
}

impl<T: Clone> RouteView<T> for ServerRouter<T> {
    fn route(&self) -> Option<&RouteMatch<T>> {
        self.core.route()
    }

    fn query(&self) -> &Query {
        self.core.query()
    }
}
