/// Comparators that hand out each value boxed behind a sealed [boxing::SortValue] trait object.
pub mod boxing;

/// Comparators over native values, tagged by [unboxed::UnboxedComparator].
pub mod unboxed;

/// Comparators whose slots share the segment's cached [Number][crate::search::number::Number] wrappers.
pub mod wrapped;
