//! Multi-field sort comparators for Lucene-style top hits collection.
//!
//! A [Sort][search::Sort] builds one comparator per sort field over a segment's
//! [field caches][index::SegmentFieldCaches]. The comparators come in three families that store and
//! return the same values in different ways ([boxing][search::comparators::boxing],
//! [unboxed][search::comparators::unboxed] and [wrapped][search::comparators::wrapped]); a
//! [RowAssembler][search::RowAssembler] reads rows of sort values from any of them.

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod error;

/// Per-segment field value caches.
pub mod index;

/// Sort configuration, comparators and row assembly.
pub mod search;

/// Numeric utilities.
pub mod util;

pub use error::*;
