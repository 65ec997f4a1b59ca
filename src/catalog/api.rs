//! JSON HTTP API for the catalog, built on the same generic route table
//! the page router uses.
//!
//! Endpoints (all GET):
//! - `/api/products`        - filtered, sorted, paginated listing
//! - `/api/products/:id`    - single product
//! - `/api/categories`      - category tree

use super::{Catalog, ProductQuery};
use crate::router::{get_param, Params, Query, RouteTable};
use serde_json::json;
use std::sync::Arc;

/// Status plus JSON body produced by an API handler.
pub type ApiResponse = (u16, serde_json::Value);

/// An API route target: pure function of params, query, and catalog.
pub type ApiHandler = Arc<dyn Fn(&Params, &Query) -> ApiResponse + Send + Sync>;

/// Build the API route table. Registered once at startup and shared
/// read-only across request coroutines.
#[must_use]
pub fn api_routes(catalog: Arc<Catalog>) -> RouteTable<ApiHandler> {
    let mut table = RouteTable::new("");

    let listing = Arc::clone(&catalog);
    table.add_route(
        "/api/products",
        Arc::new(move |_params: &Params, query: &Query| -> ApiResponse {
            let page = listing.products(&ProductQuery::from_query(query));
            (200, json!(page))
        }) as ApiHandler,
    );

    let single = Arc::clone(&catalog);
    table.add_route(
        "/api/products/:id",
        Arc::new(move |params: &Params, _query: &Query| -> ApiResponse {
            match get_param(params, "id").and_then(|id| single.product(id)) {
                Some(product) => (200, json!(product)),
                None => (404, json!({ "error": "Product not found" })),
            }
        }) as ApiHandler,
    );

    table.add_route(
        "/api/categories",
        Arc::new(move |_params: &Params, _query: &Query| -> ApiResponse {
            (200, json!(catalog.categories()))
        }) as ApiHandler,
    );

    table
}
