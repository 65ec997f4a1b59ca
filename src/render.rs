//! SSR/SSG render driver.
//!
//! The driver is the only server-side caller of "update route for URL X":
//! it constructs a fresh [`ServerRouter`] per request or generation step,
//! executes the matched handler, and assembles the final HTML document.
//! Handler failures are caught here - never inside the routing core - and
//! converted into a best-effort error page with a 500 status.

use crate::router::{Params, Query, RouteTable, RouteView, ServerRouter};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// The document shell every rendered page is injected into.
pub const SHELL: &str = include_str!("../templates/shell.html");

static ERROR_HTML: &str = include_str!("../templates/error.html");

/// What a page handler sees: the current match's parameters and the
/// current query state, read through the same contract on both bindings.
#[derive(Debug)]
pub struct PageContext<'a> {
    pub params: &'a Params,
    pub query: &'a Query,
}

/// Result of executing a page handler.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// HTTP status the page should be served with.
    pub status: u16,
    /// Markup for the document head (title etc.).
    pub head: String,
    /// Body markup injected into the shell.
    pub html: String,
    /// State serialized for client hydration.
    pub initial_data: Value,
}

impl RenderedPage {
    /// A 200 page.
    #[must_use]
    pub fn ok(head: String, html: String, initial_data: Value) -> Self {
        Self {
            status: 200,
            head,
            html,
            initial_data,
        }
    }

    /// Same page, different status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// A route target for the page router: synchronous render callback.
pub type PageHandler = Arc<dyn Fn(&PageContext) -> anyhow::Result<RenderedPage> + Send + Sync>;

/// Render one URL/query pair through a one-shot server router.
///
/// Every call builds its own router (explicit dependency injection, no
/// ambient singleton), so request state can never leak across calls.
#[must_use]
pub fn render(table: &Arc<RouteTable<PageHandler>>, url: &str, query: Query) -> RenderedPage {
    let mut router = ServerRouter::new(Arc::clone(table));
    router.start(url, query);

    let Some(handler) = router.target() else {
        // Reached only when no catch-all is registered.
        info!(url, "no route matched and no catch-all registered");
        return RenderedPage {
            status: 404,
            head: "<title>Not Found</title>".to_string(),
            html: "<h1>404</h1>".to_string(),
            initial_data: Value::Null,
        };
    };

    let route = router.route().map(|m| m.template.as_ref().to_string());
    let empty = Params::new();
    let context = PageContext {
        params: router.route().map(|m| &m.params).unwrap_or(&empty),
        query: router.query(),
    };
    match handler(&context) {
        Ok(page) => {
            info!(url, route = route.as_deref(), status = page.status, "page rendered");
            page
        }
        Err(err) => {
            error!(url, route = route.as_deref(), error = %err, "page handler failed");
            RenderedPage {
                status: 500,
                head: "<title>Error</title>".to_string(),
                html: ERROR_HTML.to_string(),
                initial_data: Value::Null,
            }
        }
    }
}

/// Serialize the hydration payload so it cannot break out of its script
/// tag: `<` is emitted as the JSON escape `\u003c`.
#[must_use]
pub fn hydration_script(initial_data: &Value) -> String {
    let json = serde_json::to_string(initial_data)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");
    format!("<script>window.__INITIAL_DATA__ = {json};</script>")
}

/// Inject a rendered page into the document shell.
///
/// The shell carries three markers: `<!--app-head-->`, `<!--app-html-->`,
/// and `<!--app-data-->`; each is replaced wholesale.
#[must_use]
pub fn to_document(shell: &str, page: &RenderedPage) -> String {
    shell
        .replace("<!--app-head-->", &page.head)
        .replace("<!--app-html-->", &page.html)
        .replace("<!--app-data-->", &hydration_script(&page.initial_data))
}
