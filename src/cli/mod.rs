//! # CLI Module
//!
//! Command-line interface for the storefront binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the SSR server:
//!
//! ```bash
//! shopfront serve --addr 0.0.0.0:8080 --static-dir dist
//! ```
//!
//! ### `generate`
//!
//! Pre-render the site to a directory:
//!
//! ```bash
//! shopfront generate --output dist --pages 9
//! ```
//!
//! ### `routes`
//!
//! Print the page and API route tables for a given base path.
//!
//! All commands accept `--catalog <FILE>` to load products from a JSON
//! file instead of the built-in demo catalog, and `--base-path` to mount
//! the storefront under a URL prefix.

mod commands;

pub use commands::{run, Cli, Commands};
