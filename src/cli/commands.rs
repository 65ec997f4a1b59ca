use crate::catalog::{api_routes, Catalog};
use crate::pages::register_routes;
use crate::render::SHELL;
use crate::server::{AppService, HttpServer};
use crate::ssg::{generate, SsgConfig, DEFAULT_PAGE_LIMIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the storefront.
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(about = "Dual-mode (SSR/SSG) storefront", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the SSR server
    Serve {
        /// Address and port to bind to
        #[arg(long, env = "SHOPFRONT_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,

        /// URL prefix the storefront is mounted under, e.g. `/shop`
        #[arg(long, env = "SHOPFRONT_BASE_PATH", default_value = "")]
        base_path: String,

        /// Directory of pre-generated pages served before falling back
        /// to live rendering
        #[arg(long, env = "SHOPFRONT_STATIC_DIR")]
        static_dir: Option<PathBuf>,

        /// Product catalog JSON file (defaults to the built-in demo set)
        #[arg(long, env = "SHOPFRONT_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Pre-render the site to static files
    Generate {
        /// Output directory (created if missing)
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// URL prefix baked into generated links
        #[arg(long, env = "SHOPFRONT_BASE_PATH", default_value = "")]
        base_path: String,

        /// Maximum number of product detail pages to generate
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        pages: usize,

        /// Product catalog JSON file (defaults to the built-in demo set)
        #[arg(long, env = "SHOPFRONT_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Print the page and API route tables
    Routes {
        /// URL prefix the storefront is mounted under
        #[arg(long, env = "SHOPFRONT_BASE_PATH", default_value = "")]
        base_path: String,

        /// Product catalog JSON file (defaults to the built-in demo set)
        #[arg(long, env = "SHOPFRONT_CATALOG")]
        catalog: Option<PathBuf>,
    },
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<Arc<Catalog>> {
    Ok(Arc::new(match path {
        Some(p) => Catalog::load(p)?,
        None => Catalog::builtin(),
    }))
}

/// Execute the parsed command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the server cannot
/// bind, or generation cannot write its output.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Serve {
            addr,
            base_path,
            static_dir,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let pages = Arc::new(register_routes(Arc::clone(&catalog), base_path));
            let api = Arc::new(api_routes(catalog));
            let mut service = AppService::new(pages, api, SHELL);
            if let Some(dir) = static_dir {
                service = service.with_static_dir(dir);
            }
            info!(%addr, %base_path, "starting server");
            let handle = HttpServer(service).start(addr.as_str())?;
            handle
                .join()
                .map_err(|e| anyhow::anyhow!("server panicked: {e:?}"))?;
            Ok(())
        }
        Commands::Generate {
            output,
            base_path,
            pages,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let table = Arc::new(register_routes(Arc::clone(&catalog), base_path));
            let summary = generate(
                &table,
                &catalog,
                SHELL,
                &SsgConfig {
                    out_dir: output.clone(),
                    base_path: base_path.clone(),
                    page_limit: *pages,
                },
            )?;
            println!(
                "generated {} pages into {} ({} with errors)",
                summary.written.len(),
                output.display(),
                summary.errors
            );
            Ok(())
        }
        Commands::Routes { base_path, catalog } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let pages = register_routes(Arc::clone(&catalog), base_path);
            let api = api_routes(catalog);
            println!("pages:");
            for entry in pages.routes() {
                println!("  {}", entry.template());
            }
            println!("api:");
            for entry in api.routes() {
                println!("  {}", entry.template());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["shopfront", "serve"]);
        match cli.command {
            Commands::Serve {
                addr, base_path, ..
            } => {
                assert_eq!(addr, "0.0.0.0:8080");
                assert_eq!(base_path, "");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from([
            "shopfront",
            "generate",
            "--output",
            "out",
            "--pages",
            "3",
            "--base-path",
            "/shop",
        ]);
        match cli.command {
            Commands::Generate {
                output,
                base_path,
                pages,
                ..
            } => {
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(base_path, "/shop");
                assert_eq!(pages, 3);
            }
            _ => panic!("expected generate"),
        }
    }
}
