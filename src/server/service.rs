use super::request::{parse_request, ParsedRequest};
use super::response::{write_bytes, write_html, write_json};
use crate::catalog::ApiHandler;
use crate::render::{render, to_document, PageHandler};
use crate::router::{RouteTable, RouteView, ServerRouter};
use crate::static_files::StaticFiles;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::info;

/// The storefront HTTP service.
///
/// Holds only shared, immutable tables; everything request-scoped is
/// built inside `call`, one server router per request, so coroutines
/// never share navigation state.
#[derive(Clone)]
pub struct AppService {
    pub pages: Arc<RouteTable<PageHandler>>,
    pub api: Arc<RouteTable<ApiHandler>>,
    pub shell: Arc<str>,
    pub static_files: Option<Arc<StaticFiles>>,
}

impl AppService {
    #[must_use]
    pub fn new(
        pages: Arc<RouteTable<PageHandler>>,
        api: Arc<RouteTable<ApiHandler>>,
        shell: &str,
    ) -> Self {
        Self {
            pages,
            api,
            shell: Arc::from(shell),
            static_files: None,
        }
    }

    /// Serve files from a pre-generated site directory before falling
    /// back to live rendering.
    #[must_use]
    pub fn with_static_dir<P: Into<std::path::PathBuf>>(mut self, dir: P) -> Self {
        self.static_files = Some(Arc::new(StaticFiles::new(dir)));
        self
    }

    fn serve_api(&self, parsed: &ParsedRequest, res: &mut Response) {
        let mut router = ServerRouter::new(Arc::clone(&self.api));
        router.start(&parsed.raw_path, parsed.query.clone());
        match (router.target(), router.route()) {
            (Some(handler), Some(matched)) => {
                let (status, body) = handler(&matched.params, router.query());
                write_json(res, status, &body);
            }
            _ => {
                write_json(
                    res,
                    404,
                    &json!({ "error": "Not Found", "path": parsed.path }),
                );
            }
        }
    }
}

/// `{ "status": "ok" }` health probe.
fn health_endpoint(res: &mut Response) {
    write_json(res, 200, &json!({ "status": "ok" }));
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(&req);

        if parsed.method != "GET" {
            write_json(
                res,
                405,
                &json!({ "error": "Method Not Allowed", "method": parsed.method }),
            );
            return Ok(());
        }

        if parsed.path == "/health" {
            health_endpoint(res);
            return Ok(());
        }

        if parsed.path == "/api" || parsed.path.starts_with("/api/") {
            self.serve_api(&parsed, res);
            return Ok(());
        }

        if let Some(sf) = &self.static_files {
            if let Ok((bytes, content_type)) = sf.load(&parsed.path) {
                info!(path = %parsed.path, content_type, "static file served");
                write_bytes(res, 200, content_type, bytes);
                return Ok(());
            }
        }

        let page = render(&self.pages, &parsed.raw_path, parsed.query);
        let document = to_document(&self.shell, &page);
        write_html(res, page.status, document);
        Ok(())
    }
}
