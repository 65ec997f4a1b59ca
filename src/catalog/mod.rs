//! # Catalog Module
//!
//! The product catalog collaborator: an in-memory dataset with the
//! filter/sort/paginate semantics the storefront pages and the JSON API
//! share. A small demo dataset is embedded at compile time; a different
//! one can be loaded from disk at startup.

mod api;

pub use api::{api_routes, ApiHandler, ApiResponse};

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::router::Query;

/// Default page size when the query does not carry `limit`.
pub const DEFAULT_LIMIT: usize = 20;

/// Default sort order when the query does not carry `sort`.
pub const DEFAULT_SORT: &str = "price_asc";

/// One catalog item. `lprice` stays a string on the wire, matching the
/// upstream shopping feed format; it is parsed only for sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub title: String,
    pub link: String,
    pub image: String,
    pub lprice: String,
    pub brand: String,
    pub category1: String,
    pub category2: String,
}

impl Product {
    fn price(&self) -> u64 {
        self.lprice.parse().unwrap_or(0)
    }
}

/// Parsed listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: usize,
    pub limit: usize,
    pub search: String,
    pub category1: String,
    pub category2: String,
    pub sort: String,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            category1: String::new(),
            category2: String::new(),
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl ProductQuery {
    /// Read listing parameters out of a URL query. Unparsable numbers fall
    /// back to the defaults; `current` is accepted as an alias for `page`.
    #[must_use]
    pub fn from_query(query: &Query) -> Self {
        let defaults = Self::default();
        let page = query
            .get("current")
            .or_else(|| query.get("page"))
            .and_then(|v| v.parse().ok())
            .filter(|&p| p > 0)
            .unwrap_or(defaults.page);
        let limit = query
            .get("limit")
            .and_then(|v| v.parse().ok())
            .filter(|&l| l > 0)
            .unwrap_or(defaults.limit);
        Self {
            page,
            limit,
            search: query.get("search").unwrap_or_default().to_string(),
            category1: query.get("category1").unwrap_or_default().to_string(),
            category2: query.get("category2").unwrap_or_default().to_string(),
            sort: query
                .get("sort")
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SORT)
                .to_string(),
        }
    }
}

/// Pagination summary attached to every listing response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Product>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    let catalog = Catalog::from_json_str(include_str!("../../assets/products.json"))
        .expect("embedded product dataset is valid JSON");
    catalog
});

impl Catalog {
    /// Parse a catalog from a JSON array of products.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let items: Vec<Product> =
            serde_json::from_str(raw).context("failed to parse product dataset")?;
        Ok(Self { items })
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            products = catalog.items.len(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    /// The demo dataset embedded in the binary.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Number of products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All product ids in dataset order (SSG enumerates these).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|p| p.product_id.as_str())
    }

    /// Look up a single product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.product_id == id)
    }

    /// Filter, sort, and paginate the catalog.
    ///
    /// `search` is case-insensitive title containment; categories are
    /// exact matches; `sort` is one of `price_asc` (default), `price_desc`,
    /// `name_asc`, `name_desc` - anything else falls back to `price_asc`.
    #[must_use]
    pub fn products(&self, query: &ProductQuery) -> ProductsPage {
        let needle = query.search.to_lowercase();
        let mut matched: Vec<&Product> = self
            .items
            .iter()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .filter(|p| query.category1.is_empty() || p.category1 == query.category1)
            .filter(|p| query.category2.is_empty() || p.category2 == query.category2)
            .collect();

        match query.sort.as_str() {
            "price_desc" => matched.sort_by(|a, b| b.price().cmp(&a.price())),
            "name_asc" => matched.sort_by(|a, b| a.title.cmp(&b.title)),
            "name_desc" => matched.sort_by(|a, b| b.title.cmp(&a.title)),
            _ => matched.sort_by(|a, b| a.price().cmp(&b.price())),
        }

        // The fields are public, so a hand-built query may carry zeros.
        let limit = query.limit.max(1);
        let page = query.page.max(1);

        let total = matched.len();
        let total_pages = total.div_ceil(limit);
        let start = (page - 1).saturating_mul(limit);
        let products: Vec<Product> = matched
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        ProductsPage {
            products,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
                has_next: page < total_pages,
            },
        }
    }

    /// Category tree: top-level category to its sorted second levels.
    #[must_use]
    pub fn categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut tree: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for product in &self.items {
            let seconds = tree.entry(product.category1.clone()).or_default();
            if !seconds.contains(&product.category2) {
                seconds.push(product.category2.clone());
            }
        }
        for seconds in tree.values_mut() {
            seconds.sort();
        }
        tree
    }
}
