mod field_cache;

pub use field_cache::*;
