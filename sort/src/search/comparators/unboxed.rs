//! Comparators with no shared erased surface at all.
//!
//! [Int32Comparator], [FloatComparator] and [StringComparator] are independent types: their
//! `copy`, `set_top_value` and `value_at` work on native values only, so nothing is boxed or
//! erased. Code that needs to walk a mixed list of them goes through [UnboxedComparator], a
//! tagged union that dispatches each operation on the field type.

use {
    crate::{
        index::FieldValueCache,
        search::{ErasedComparator, FieldValue, SortFieldType},
        util::numeric_utils::compare_floats,
        SortResult,
    },
    std::{cmp::Ordering, sync::Arc},
};

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

    /// Returns the number of slots.
    #[inline]
    pub fn num_hits(&self) -> usize {
        self.values.len()
    }

    /// Copies the value of `doc` into `slot`.
    #[inline]
    pub fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = *self.reader_values.value_at(doc);
    }

    /// Sets the top value.
    #[inline]
    pub fn set_top_value(&mut self, value: i32) {
        self.top_value = value;
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

    /// Compares the values in `slot1` and `slot2`.
    #[inline]
    pub fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
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

    /// Returns the number of slots.
    #[inline]
    pub fn num_hits(&self) -> usize {
        self.values.len()
    }

    /// Copies the value of `doc` into `slot`.
    #[inline]
    pub fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = *self.reader_values.value_at(doc);
    }

    /// Sets the top value.
    #[inline]
    pub fn set_top_value(&mut self, value: f32) {
        self.top_value = value;
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

    /// Compares the values in `slot1` and `slot2`.
    #[inline]
    pub fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
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

    /// Returns the number of slots.
    #[inline]
    pub fn num_hits(&self) -> usize {
        self.values.len()
    }

    /// Copies the value of `doc` into `slot`.
    #[inline]
    pub fn copy(&mut self, slot: usize, doc: usize) {
        self.values[slot] = Arc::clone(self.reader_values.value_at(doc));
    }

    /// Sets the top value.
    #[inline]
    pub fn set_top_value(&mut self, value: Arc<str>) {
        self.top_value = value;
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

    /// Compares the values in `slot1` and `slot2`.
    #[inline]
    pub fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.values[slot1].cmp(&self.values[slot2])
    }
}

/// One of the unboxed comparators, tagged by field type.
///
/// Every operation is a single match over the closed set of field types. Adding a field type means
/// adding a variant here and an arm to each of these functions.
#[derive(Debug)]
pub enum UnboxedComparator {
    /// An `i32` comparator.
    Int32(Int32Comparator),
    /// An `f32` comparator.
    Float(FloatComparator),
    /// A string comparator.
    String(StringComparator),
}

impl UnboxedComparator {
    /// Returns the `i32` comparator, or `None` if this is another type.
    pub fn as_int32(&self) -> Option<&Int32Comparator> {
        match self {
            Self::Int32(comparator) => Some(comparator),
            _ => None,
        }
    }

    /// Returns the `f32` comparator, or `None` if this is another type.
    pub fn as_float(&self) -> Option<&FloatComparator> {
        match self {
            Self::Float(comparator) => Some(comparator),
            _ => None,
        }
    }

    /// Returns the string comparator, or `None` if this is another type.
    pub fn as_string(&self) -> Option<&StringComparator> {
        match self {
            Self::String(comparator) => Some(comparator),
            _ => None,
        }
    }

    /// Returns the `i32` comparator.
    ///
    /// # Panics
    /// Panics if this is another type. Comparator types are fixed when the sort is built, so this
    /// indicates a bug in the caller.
    pub fn expect_int32(&self) -> &Int32Comparator {
        match self {
            Self::Int32(comparator) => comparator,
            other => panic!("Unexpected comparator type: expected int, got {}", other.field_type()),
        }
    }

    /// Returns the `f32` comparator.
    ///
    /// # Panics
    /// Panics if this is another type.
    pub fn expect_float(&self) -> &FloatComparator {
        match self {
            Self::Float(comparator) => comparator,
            other => panic!("Unexpected comparator type: expected float, got {}", other.field_type()),
        }
    }

    /// Returns the string comparator.
    ///
    /// # Panics
    /// Panics if this is another type.
    pub fn expect_string(&self) -> &StringComparator {
        match self {
            Self::String(comparator) => comparator,
            other => panic!("Unexpected comparator type: expected string, got {}", other.field_type()),
        }
    }
}

impl From<Int32Comparator> for UnboxedComparator {
    fn from(comparator: Int32Comparator) -> Self {
        Self::Int32(comparator)
    }
}

impl From<FloatComparator> for UnboxedComparator {
    fn from(comparator: FloatComparator) -> Self {
        Self::Float(comparator)
    }
}

impl From<StringComparator> for UnboxedComparator {
    fn from(comparator: StringComparator) -> Self {
        Self::String(comparator)
    }
}

impl ErasedComparator for UnboxedComparator {
    type Value = FieldValue;

    fn field_type(&self) -> SortFieldType {
        match self {
            Self::Int32(_) => SortFieldType::Int,
            Self::Float(_) => SortFieldType::Float,
            Self::String(_) => SortFieldType::String,
        }
    }

    fn value_type(value: &FieldValue) -> SortFieldType {
        value.field_type()
    }

    fn num_hits(&self) -> usize {
        match self {
            Self::Int32(comparator) => comparator.num_hits(),
            Self::Float(comparator) => comparator.num_hits(),
            Self::String(comparator) => comparator.num_hits(),
        }
    }

    #[inline]
    fn copy(&mut self, slot: usize, doc: usize) {
        match self {
            Self::Int32(comparator) => comparator.copy(slot, doc),
            Self::Float(comparator) => comparator.copy(slot, doc),
            Self::String(comparator) => comparator.copy(slot, doc),
        }
    }

    fn set_top_value(&mut self, value: &FieldValue) -> SortResult<()> {
        match self {
            Self::Int32(comparator) => comparator.set_top_value(value.to_int()?),
            Self::Float(comparator) => comparator.set_top_value(value.to_float()?),
            Self::String(comparator) => comparator.set_top_value(Arc::clone(value.to_str()?)),
        }
        Ok(())
    }

    fn read_value(&self, slot: usize) -> FieldValue {
        match self {
            Self::Int32(comparator) => FieldValue::Int(comparator.value_at(slot)),
            Self::Float(comparator) => FieldValue::Float(comparator.value_at(slot)),
            Self::String(comparator) => FieldValue::String(Arc::clone(&comparator.values[slot])),
        }
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        match self {
            Self::Int32(comparator) => comparator.compare(slot1, slot2),
            Self::Float(comparator) => comparator.compare(slot1, slot2),
            Self::String(comparator) => comparator.compare(slot1, slot2),
        }
    }
}
