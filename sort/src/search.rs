/// The three comparator families.
pub mod comparators;

/// Wrapped numeric values.
pub mod number;

mod field_comparator;
mod field_comparator_source;
mod field_value;
mod row_assembler;
mod sort;
mod sort_field;
mod workload;

pub use {
    field_comparator::*, field_comparator_source::*, field_value::*, row_assembler::*, sort::*, sort_field::*,
    workload::*,
};
