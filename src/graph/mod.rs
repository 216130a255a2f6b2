//! Link graph construction
//!
//! - Link extraction from raw document text
//! - Identifier normalization for handles and link targets
//! - Parallel adjacency matrix construction

pub mod builder;
pub mod extract;
pub mod normalize;

/// Dense document identifier in `[0, N)`
pub type DocumentId = usize;

// Re-export main types
pub use builder::{GraphBuilder, LinkGraph, SkippedLink};
pub use extract::{extract_links, Links};
pub use normalize::Normalizer;
