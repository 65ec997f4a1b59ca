//! # Shopfront
//!
//! **Shopfront** is a dual-mode (SSR/SSG) storefront built around an
//! environment-agnostic routing core, served by the `may` coroutine
//! runtime through `may_minihttp`.
//!
//! ## Overview
//!
//! One route table, one matching algorithm, two bindings. The client
//! binding is a long-lived, history-integrated router that applications
//! subscribe to; the server binding is a one-shot router constructed per
//! request or per generated page. Because both bindings share the same
//! core, a URL renders identically whether it is served live, generated
//! ahead of time, or navigated to in a running client.
//!
//! ## Architecture
//!
//! - **[`router`]** - the core: path patterns, the ordered route table,
//!   the query codec, shared navigation state, and the client/server
//!   bindings
//! - **[`catalog`]** - product data, filtering/sorting/pagination, and
//!   the JSON API route table
//! - **[`pages`]** - page handlers (home, product detail, not-found)
//!   rendered through embedded `minijinja` templates
//! - **[`render`]** - the SSR driver: one-shot routing, handler
//!   execution, error containment, document shell assembly, hydration
//!   payload
//! - **[`ssg`]** - ahead-of-time generation of the routable page set
//! - **[`server`]** - HTTP boundary on `may_minihttp`: request parsing,
//!   response writing, the service, and the server lifecycle handle
//! - **[`static_files`]** - traversal-safe serving of generated output
//! - **[`storage`]** - key/value persistence used by client embeddings
//!   for the cart
//! - **[`runtime_config`]** - environment-driven coroutine tuning
//! - **[`cli`]** - the `serve` / `generate` / `routes` commands
//!
//! ## Quick Start
//!
//! ```rust
//! use shopfront::catalog::Catalog;
//! use shopfront::pages::register_routes;
//! use shopfront::render::{render, SHELL, to_document};
//! use shopfront::router::Query;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::builtin());
//! let table = Arc::new(register_routes(catalog, ""));
//! let page = render(&table, "/", Query::decode("sort=price_desc"));
//! let html = to_document(SHELL, &page);
//! assert!(html.contains("window.__INITIAL_DATA__"));
//! ```

pub mod catalog;
pub mod cli;
pub mod pages;
pub mod render;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod ssg;
pub mod static_files;
pub mod storage;

pub use render::{render, to_document, PageContext, PageHandler, RenderedPage};
pub use router::{
    build_url, ClientRouter, Query, QueryPatch, RouteTable, RouteView, RouterError, ServerRouter,
};
pub use static_files::StaticFiles;
