//! # Router Module
//!
//! The dual-mode routing engine: one path-matching and navigation
//! abstraction that behaves identically inside a stateful,
//! history-integrated client embedding and inside a stateless one-shot
//! server render pass.
//!
//! ## Architecture
//!
//! Two pure leaves feed a shared core, and two thin environment bindings
//! compose that core:
//!
//! 1. **Compilation** ([`pattern`]): route templates such as
//!    `/product/:id/` are compiled once at startup into anchored regex
//!    matchers with ordered parameter names.
//! 2. **Lookup** ([`table`]): an insertion-ordered table scans entries
//!    first-match-wins; registration order is part of the contract, so the
//!    `*` catch-all goes last.
//! 3. **State** ([`core`]): the navigation core replaces
//!    `{match, query}` atomically per update and notifies subscribers
//!    synchronously in registration order.
//! 4. **Bindings** ([`client`], [`server`]): the client router sources its
//!    URL from a [`HistoryEnv`] and pushes history idempotently; the
//!    server router takes one explicit URL/query pair per request and
//!    refuses `push`.
//!
//! The [`query`] module is the shared codec both bindings use to derive
//! "next URL" for query-only navigation.

mod client;
mod core;
mod pattern;
mod query;
mod server;
mod table;

pub use client::{ClientRouter, HistoryEnv, MemoryHistory};
pub use core::{
    NavCore, Observers, RouteParams, RouteView, RouterError, RouterState, Subscription,
};
pub use pattern::{get_param, Params, PathPattern, MAX_INLINE_PARAMS};
pub use query::{build_url, Query, QueryPatch};
pub use server::ServerRouter;
pub use table::{RouteEntry, RouteMatch, RouteTable};
