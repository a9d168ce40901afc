use serde::{Deserialize, Serialize};

use crate::Character;

/// Pagination metadata reported by the catalog.
///
/// Replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items matching the remote-expressible predicates.
    pub total_count: u64,
    /// Total number of pages at the catalog's page size.
    pub total_pages: u32,
}

/// One fetched page of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<Character>,
    pub meta: PageMeta,
}

impl CatalogPage {
    /// A page with no items and zeroed metadata.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
        }
    }
}
