//! Domain types shared across the castdex crates.
//!
//! This crate holds the catalog data model (characters, filters, pages) and
//! the pure client-side created-date filter. It has minimal dependencies and
//! is intended to be depended on by every other crate in the workspace.

pub mod domain;

pub use domain::*;
