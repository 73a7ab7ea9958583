//! Encyclopedia lookup module
//!
//! Queries the revisions API for a page and extracts its short description
//! from the raw wikitext.

mod client;
mod header;
mod title;
mod types;

pub use client::WikiClient;
pub use types::PageSummary;
