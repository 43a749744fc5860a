//! Comparators whose erased channel boxes every value.
//!
//! All comparators implement the object-safe [FieldComparator] trait, so a sort over mixed field
//! types is just a `Vec<Box<dyn FieldComparator>>`. The price is paid on the erased channel:
//! [FieldComparator::value] allocates a fresh `Box<dyn SortValue>` on every call. The typed
//! `value_at` accessors do not allocate.

use {
    crate::{
        index::FieldValueCache,
        search::{ErasedComparator, FieldValue, SortFieldType},
        util::numeric_utils::compare_floats,
        SortError, SortResult,
    },
    std::{cmp::Ordering, fmt::Debug, sync::Arc},
};

mod sealed {
    use std::sync::Arc;

    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for Arc<str> {}
}

/// A sort value of one of the supported field types, behind a trait object.
///
/// Only `i32`, `f32` and `Arc<str>` implement this trait. A receiver gets at the native value through
/// the conversion for the type it expects; the other conversions return `None`.
pub trait SortValue: Debug + Send + Sync + sealed::Sealed {
    /// Returns the type tag of this value.
    fn field_type(&self) -> SortFieldType;

    /// Returns the value if it is an integer.
    fn as_int(&self) -> Option<i32> {
        None
    }

    /// Returns the value if it is a float.
    fn as_float(&self) -> Option<f32> {
        None
    }

    /// Returns the value if it is a string.
    fn as_str(&self) -> Option<&Arc<str>> {
        None
    }

    /// Converts this value into the tagged [FieldValue].
    fn to_field_value(&self) -> FieldValue;
}

impl SortValue for i32 {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Int
    }

    fn as_int(&self) -> Option<i32> {
        Some(*self)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Int(*self)
    }
}

impl SortValue for f32 {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Float
    }

    fn as_float(&self) -> Option<f32> {
        Some(*self)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl SortValue for Arc<str> {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::String
    }

    fn as_str(&self) -> Option<&Arc<str>> {
        Some(self)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(Arc::clone(self))
    }
}

/// A field comparator with a boxed erased channel.
pub trait FieldComparator: Debug {
    /// Returns the type of the values this comparator sorts.
    fn field_type(&self) -> SortFieldType;

    /// Returns the number of slots.
    fn num_hits(&self) -> usize;

    /// Copies the value of `doc` from the field cache into `slot`.
    fn copy(&mut self, slot: usize, doc: usize);

    /// Sets the top value, converting it to the comparator's native type.
    ///
    /// # Errors
    /// Returns [SortError::TypeMismatch] if `value` is of another field type.
    fn set_top_value(&mut self, value: &dyn SortValue) -> SortResult<()>;

    /// Returns the value in `slot`, boxed.
    fn value(&self, slot: usize) -> Box<dyn SortValue>;

    /// Compares the values in `slot1` and `slot2`.
    fn compare(&self, slot1: usize, slot2: usize) -> Ordering;
}

fn mismatch(expected: SortFieldType, value: &dyn SortValue) -> SortError {
    SortError::TypeMismatch {
        expected,
        actual: value.field_type(),
    }
}

/// Sorts by `i32` field values.
#[derive(Debug)]
pub struct Int32Comparator {
    values: Box<[i32]>,
    top_value: i32,
    reader_values: FieldValueCache<i32>,
}

impl Int32Comparator {
    /// Creates a comparator with `num_hits` slots reading from `reader_values`.
    pub fn new(num_hits: usize, reader_values: FieldValueCache<i32>) -> Self {
        Self {
            values: vec![0; num_hits].into_boxed_slice(),
            top_value: 0,
            reader_values,
        }
    }

    /// Returns the value in `slot`.
    #[inline]
    pub fn value_at(&self, slot: usize) -> i32 {
        self.values[slot]
    }

    /// Returns the current top value.
    #[inline]
    pub fn top_value(&self) -> i32 {
        self.top_value
    }
}

impl FieldComparator for Int32Comparator {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Int
    }

    fn num_hits(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = *self.reader_values.value_at(doc);
    }

    fn set_top_value(&mut self, value: &dyn SortValue) -> SortResult<()> {
        self.top_value = value.as_int().ok_or_else(|| mismatch(SortFieldType::Int, value))?;
        Ok(())
    }

    fn value(&self, slot: usize) -> Box<dyn SortValue> {
        Box::new(self.values[slot])
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.values[slot1].cmp(&self.values[slot2])
    }
}

/// Sorts by `f32` field values.
#[derive(Debug)]
pub struct FloatComparator {
    values: Box<[f32]>,
    top_value: f32,
    reader_values: FieldValueCache<f32>,
}

impl FloatComparator {
    /// Creates a comparator with `num_hits` slots reading from `reader_values`.
    pub fn new(num_hits: usize, reader_values: FieldValueCache<f32>) -> Self {
        Self {
            values: vec![0.0; num_hits].into_boxed_slice(),
            top_value: 0.0,
            reader_values,
        }
    }

    /// Returns the value in `slot`.
    #[inline]
    pub fn value_at(&self, slot: usize) -> f32 {
        self.values[slot]
    }

    /// Returns the current top value.
    #[inline]
    pub fn top_value(&self) -> f32 {
        self.top_value
    }
}

impl FieldComparator for FloatComparator {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Float
    }

    fn num_hits(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = *self.reader_values.value_at(doc);
    }

    fn set_top_value(&mut self, value: &dyn SortValue) -> SortResult<()> {
        self.top_value = value.as_float().ok_or_else(|| mismatch(SortFieldType::Float, value))?;
        Ok(())
    }

    fn value(&self, slot: usize) -> Box<dyn SortValue> {
        Box::new(self.values[slot])
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        compare_floats(self.values[slot1], self.values[slot2])
    }
}

/// Sorts by string field values.
#[derive(Debug)]
pub struct StringComparator {
    values: Box<[Arc<str>]>,
    top_value: Arc<str>,
    reader_values: FieldValueCache<Arc<str>>,
}

impl StringComparator {
    /// Creates a comparator with `num_hits` slots reading from `reader_values`.
    pub fn new(num_hits: usize, reader_values: FieldValueCache<Arc<str>>) -> Self {
        let empty: Arc<str> = Arc::from("");
        Self {
            values: vec![Arc::clone(&empty); num_hits].into_boxed_slice(),
            top_value: empty,
            reader_values,
        }
    }

    /// Returns the value in `slot`.
    #[inline]
    pub fn value_at(&self, slot: usize) -> &str {
        &self.values[slot]
    }

    /// Returns the current top value.
    #[inline]
    pub fn top_value(&self) -> &str {
        &self.top_value
    }
}

impl FieldComparator for StringComparator {
    fn field_type(&self) -> SortFieldType {
        SortFieldType::String
    }

    fn num_hits(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = Arc::clone(self.reader_values.value_at(doc));
    }

    fn set_top_value(&mut self, value: &dyn SortValue) -> SortResult<()> {
        let top_value = value.as_str().ok_or_else(|| mismatch(SortFieldType::String, value))?;
        self.top_value = Arc::clone(top_value);
        Ok(())
    }

    fn value(&self, slot: usize) -> Box<dyn SortValue> {
        Box::new(Arc::clone(&self.values[slot]))
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.values[slot1].cmp(&self.values[slot2])
    }
}

impl ErasedComparator for Box<dyn FieldComparator> {
    type Value = Box<dyn SortValue>;

    fn value_type(value: &Self::Value) -> SortFieldType {
        value.field_type()
    }

    fn field_type(&self) -> SortFieldType {
        (**self).field_type()
    }

    fn num_hits(&self) -> usize {
        (**self).num_hits()
    }

    fn copy(&mut self, slot: usize, doc: usize) {
        (**self).copy(slot, doc)
    }

    fn set_top_value(&mut self, value: &Self::Value) -> SortResult<()> {
        (**self).set_top_value(&**value)
    }

    fn read_value(&self, slot: usize) -> Self::Value {
        (**self).value(slot)
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        (**self).compare(slot1, slot2)
    }
}
