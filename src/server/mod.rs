//! HTTP boundary.
//!
//! Each incoming request is parsed once, then dispatched: health check,
//! catalog API, static file, and finally live server-side render. All
//! request-scoped routing state lives in routers built per call, so the
//! service itself stays a cheap, cloneable bundle of shared tables.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use service::AppService;
