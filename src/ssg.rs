//! Static site generation.
//!
//! Pre-renders every routable page to `index.html` files: the home page
//! at the output root, one directory per product detail page. Each page
//! goes through the exact one-shot `ServerRouter` + handler path SSR
//! uses, so SSG output and a live render can never drift.

use crate::catalog::Catalog;
use crate::render::{render, to_document, PageHandler};
use crate::router::{Query, RouteTable};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Default number of product detail pages generated.
pub const DEFAULT_PAGE_LIMIT: usize = 9;

/// Static generation settings.
#[derive(Debug, Clone)]
pub struct SsgConfig {
    /// Directory the site is written into (created if missing).
    pub out_dir: PathBuf,
    /// Base path pages are served under, e.g. `/shop`.
    pub base_path: String,
    /// Maximum number of product detail pages to generate.
    pub page_limit: usize,
}

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsgSummary {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Pages that rendered with a non-200 status (written anyway).
    pub errors: usize,
}

fn write_page(
    table: &Arc<RouteTable<PageHandler>>,
    shell: &str,
    url: &str,
    out_file: &Path,
) -> anyhow::Result<u16> {
    let page = render(table, url, Query::new());
    let document = to_document(shell, &page);
    if let Some(parent) = out_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(out_file, document)
        .with_context(|| format!("failed to write {}", out_file.display()))?;
    info!(url, out_file = %out_file.display(), status = page.status, "page generated");
    Ok(page.status)
}

/// Generate the static site.
///
/// The buildable URL set is the home page plus one URL per product id
/// from the catalog (capped by `page_limit`); the route table itself is
/// logged so a mis-ordered catch-all shows up in the build output.
pub fn generate(
    table: &Arc<RouteTable<PageHandler>>,
    catalog: &Catalog,
    shell: &str,
    config: &SsgConfig,
) -> anyhow::Result<SsgSummary> {
    table.log_routes();
    let base = config.base_path.trim_end_matches('/');
    let mut summary = SsgSummary {
        written: Vec::new(),
        errors: 0,
    };

    let home_out = config.out_dir.join("index.html");
    let status = write_page(table, shell, &format!("{base}/"), &home_out)?;
    if status != 200 {
        summary.errors += 1;
    }
    summary.written.push(home_out);

    for id in catalog.ids().take(config.page_limit) {
        let url = format!("{base}/product/{id}/");
        let out_file = config.out_dir.join("product").join(id).join("index.html");
        let status = write_page(table, shell, &url, &out_file)?;
        if status != 200 {
            warn!(%url, status, "generated page has non-200 status");
            summary.errors += 1;
        }
        summary.written.push(out_file);
    }

    info!(
        pages = summary.written.len(),
        errors = summary.errors,
        out_dir = %config.out_dir.display(),
        "static site generated"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::register_routes;
    use crate::render::SHELL;

    #[test]
    fn test_generate_writes_home_and_product_pages() {
        let catalog = Arc::new(Catalog::builtin());
        let table = Arc::new(register_routes(Arc::clone(&catalog), ""));
        let dir = tempfile::tempdir().expect("tempdir");

        let summary = generate(
            &table,
            &catalog,
            SHELL,
            &SsgConfig {
                out_dir: dir.path().to_path_buf(),
                base_path: String::new(),
                page_limit: 3,
            },
        )
        .expect("generation should succeed");

        assert_eq!(summary.written.len(), 4);
        assert_eq!(summary.errors, 0);
        assert!(dir.path().join("index.html").exists());

        let first_id = catalog.ids().next().expect("catalog not empty");
        let detail = dir.path().join("product").join(first_id).join("index.html");
        let html = std::fs::read_to_string(detail).expect("detail page written");
        assert!(html.contains("window.__INITIAL_DATA__"));
        assert!(html.contains("product-detail"));
    }

    #[test]
    fn test_generate_respects_base_path() {
        let catalog = Arc::new(Catalog::builtin());
        let table = Arc::new(register_routes(Arc::clone(&catalog), "/shop"));
        let dir = tempfile::tempdir().expect("tempdir");

        let summary = generate(
            &table,
            &catalog,
            SHELL,
            &SsgConfig {
                out_dir: dir.path().to_path_buf(),
                base_path: "/shop".to_string(),
                page_limit: 1,
            },
        )
        .expect("generation should succeed");
        assert_eq!(summary.errors, 0);

        let html = std::fs::read_to_string(dir.path().join("index.html")).expect("home written");
        assert!(html.contains("href=\"/shop/\""));
    }
}
