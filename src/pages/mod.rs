//! # Pages Module
//!
//! Page handlers for the storefront: home (listing with search, category
//! filters, sorting, pagination), product detail, and not-found. Handlers
//! are pure functions of [`PageContext`]; they carry no environment
//! assumptions, which is what lets the same handlers serve SSR, SSG, and
//! a hydrated client embedding.
//!
//! Markup goes through `minijinja` templates embedded at compile time.

use crate::catalog::{Catalog, ProductQuery};
use crate::render::{PageContext, PageHandler, RenderedPage};
use crate::router::{build_url, get_param, QueryPatch, RouteTable};
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::Arc;

/// Number of related products shown on a detail page.
const RELATED_LIMIT: usize = 4;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    #[allow(clippy::expect_used)]
    {
        env.add_template("home.html", include_str!("../../templates/home.html"))
            .expect("embedded home template is valid");
        env.add_template("product.html", include_str!("../../templates/product.html"))
            .expect("embedded product template is valid");
        env.add_template(
            "not_found.html",
            include_str!("../../templates/not_found.html"),
        )
        .expect("embedded not-found template is valid");
    }
    env
});

fn render_template(name: &str, ctx: minijinja::Value) -> anyhow::Result<String> {
    let template = TEMPLATES.get_template(name)?;
    Ok(template.render(ctx)?)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Home page: filtered product listing plus category tree.
fn home(catalog: &Catalog, base_path: &str, ctx: &PageContext) -> anyhow::Result<RenderedPage> {
    let product_query = ProductQuery::from_query(ctx.query);
    let page = catalog.products(&product_query);
    let categories = catalog.categories();

    let next_page_url = build_url(
        base_path,
        &format!("{base_path}/"),
        &ctx.query.encode(),
        &QueryPatch::new().set("page", &(product_query.page + 1).to_string()),
    );

    let initial_data = json!({
        "products": &page.products,
        "categories": &categories,
        "totalCount": page.pagination.total,
        "pagination": &page.pagination,
    });

    let html = render_template(
        "home.html",
        context! {
            base_path => base_path,
            products => page.products,
            categories => categories,
            total_count => page.pagination.total,
            has_next => page.pagination.has_next,
            next_page_url => next_page_url,
            search => product_query.search,
            sort => product_query.sort,
        },
    )?;

    Ok(RenderedPage::ok(
        "<title>Shopfront</title>".to_string(),
        html,
        initial_data,
    ))
}

/// Product detail page. An unknown id renders the not-found page with a
/// 404 status rather than failing the handler.
fn product_detail(
    catalog: &Catalog,
    base_path: &str,
    ctx: &PageContext,
) -> anyhow::Result<RenderedPage> {
    let id = get_param(ctx.params, "id").unwrap_or_default();
    let Some(product) = catalog.product(id) else {
        return not_found(base_path);
    };

    let related: Vec<_> = catalog
        .products(&ProductQuery {
            category2: product.category2.clone(),
            ..ProductQuery::default()
        })
        .products
        .into_iter()
        .filter(|p| p.product_id != product.product_id)
        .take(RELATED_LIMIT)
        .collect();

    let initial_data = json!({ "currentProduct": product, "relatedProducts": &related });

    let html = render_template(
        "product.html",
        context! {
            base_path => base_path,
            product => product,
            related => related,
        },
    )?;

    Ok(RenderedPage::ok(
        format!("<title>{} - Shopfront</title>", escape_html(&product.title)),
        html,
        initial_data,
    ))
}

/// Not-found page, served with a 404 status.
fn not_found(base_path: &str) -> anyhow::Result<RenderedPage> {
    let html = render_template("not_found.html", context! { base_path => base_path })?;
    Ok(RenderedPage::ok(
        "<title>Not Found - Shopfront</title>".to_string(),
        html,
        json!({}),
    )
    .with_status(404))
}

/// Build the storefront page route table.
///
/// Registration order is the lookup contract: specific templates first,
/// the catch-all last.
#[must_use]
pub fn register_routes(catalog: Arc<Catalog>, base_path: &str) -> RouteTable<PageHandler> {
    let mut table: RouteTable<PageHandler> = RouteTable::new(base_path);
    let base: Arc<str> = Arc::from(table.base_path());

    let home_catalog = Arc::clone(&catalog);
    let home_base = Arc::clone(&base);
    table.add_route(
        "/",
        Arc::new(move |ctx: &PageContext| home(&home_catalog, &home_base, ctx)),
    );

    let detail_base = Arc::clone(&base);
    table.add_route(
        "/product/:id/",
        Arc::new(move |ctx: &PageContext| product_detail(&catalog, &detail_base, ctx)),
    );

    table.add_route(
        "*",
        Arc::new(move |_ctx: &PageContext| not_found(&base)),
    );

    table.log_routes();
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::router::Query;

    fn routes() -> Arc<RouteTable<PageHandler>> {
        Arc::new(register_routes(Arc::new(Catalog::builtin()), ""))
    }

    #[test]
    fn test_home_page_renders_listing() {
        let page = render(&routes(), "/", Query::decode("search=socks"));
        assert_eq!(page.status, 200);
        assert!(page.html.contains("product-list"));
        assert!(page.initial_data["totalCount"].as_u64().unwrap_or(0) > 0);
    }

    #[test]
    fn test_product_page_renders_detail() {
        let page = render(&routes(), "/product/85067212996/", Query::new());
        assert_eq!(page.status, 200);
        assert!(page.head.contains("Thermal Crew Socks"));
        assert_eq!(page.initial_data["currentProduct"]["productId"], "85067212996");
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let page = render(&routes(), "/product/does-not-exist/", Query::new());
        assert_eq!(page.status, 404);
    }

    #[test]
    fn test_catch_all_serves_not_found() {
        let page = render(&routes(), "/totally/unknown", Query::new());
        assert_eq!(page.status, 404);
        assert!(page.html.contains("404"));
    }

    #[test]
    fn test_base_path_prefixes_links() {
        let table = Arc::new(register_routes(Arc::new(Catalog::builtin()), "/shop/"));
        let page = render(&table, "/shop/", Query::new());
        assert_eq!(page.status, 200);
        assert!(page.html.contains("href=\"/shop/\""));
    }
}
