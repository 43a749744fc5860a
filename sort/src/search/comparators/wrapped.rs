//! Comparators whose numeric sort keys are shared wrapper objects.
//!
//! The field cache owns one immutable [Int32]/[Float32] wrapper per document. `copy` stores a
//! reference to the cache's wrapper in the slot, so [FieldComparator::value] can hand the same
//! reference out again without allocating. A slot is only ever re-pointed at another wrapper, never
//! written through, which keeps rows that still hold the old reference intact.
//!
//! The top value is different: each numeric comparator owns exactly one wrapper for it, created with
//! the comparator, and `set_top_value` overwrites that wrapper's value in place.

use {
    crate::{
        index::FieldValueCache,
        search::{
            number::{Float32, Int32, Number},
            ErasedComparator, FieldValue, SortFieldType,
        },
        util::numeric_utils::compare_floats,
        SortError, SortResult,
    },
    std::{cmp::Ordering, fmt::Debug, sync::Arc},
};

/// A sort value as handed out by the wrapped comparators: a shared reference, never a copy.
#[derive(Clone, Debug)]
pub enum WrappedValue {
    /// A numeric value, readable through [Number].
    Number(Arc<dyn Number>),
    /// A string value.
    String(Arc<str>),
}

impl WrappedValue {
    /// Returns the type tag of this value.
    pub fn field_type(&self) -> SortFieldType {
        match self {
            Self::Number(number) => number.field_type(),
            Self::String(_) => SortFieldType::String,
        }
    }

    /// Returns the numeric capability of this value, or `None` for strings.
    pub fn as_number(&self) -> Option<&dyn Number> {
        match self {
            Self::Number(number) => Some(number.as_ref()),
            Self::String(_) => None,
        }
    }

    /// Returns the string value, or `None` for numbers.
    pub fn as_str(&self) -> Option<&Arc<str>> {
        match self {
            Self::Number(_) => None,
            Self::String(value) => Some(value),
        }
    }

    /// Converts this value into the tagged [FieldValue].
    pub fn to_field_value(&self) -> FieldValue {
        match self {
            Self::Number(number) => match number.field_type() {
                SortFieldType::Float => FieldValue::Float(number.to_f32()),
                _ => FieldValue::Int(number.to_i32()),
            },
            Self::String(value) => FieldValue::String(Arc::clone(value)),
        }
    }

    fn number_of_type(&self, expected: SortFieldType) -> SortResult<&dyn Number> {
        match self.as_number() {
            Some(number) if number.field_type() == expected => Ok(number),
            _ => Err(SortError::TypeMismatch {
                expected,
                actual: self.field_type(),
            }),
        }
    }
}

impl From<Arc<Int32>> for WrappedValue {
    fn from(value: Arc<Int32>) -> Self {
        Self::Number(value)
    }
}

impl From<Arc<Float32>> for WrappedValue {
    fn from(value: Arc<Float32>) -> Self {
        Self::Number(value)
    }
}

impl From<Arc<str>> for WrappedValue {
    fn from(value: Arc<str>) -> Self {
        Self::String(value)
    }
}

/// A field comparator whose erased channel returns shared references.
pub trait FieldComparator: Debug {
    /// Returns the type of the values this comparator sorts.
    fn field_type(&self) -> SortFieldType;

    /// Returns the number of slots.
    fn num_hits(&self) -> usize;

    /// Points `slot` at the cache's value for `doc`.
    fn copy(&mut self, slot: usize, doc: usize);

    /// Sets the top value from a wrapped value of the same field type.
    ///
    /// # Errors
    /// Returns [SortError::TypeMismatch] if `value` is of another field type.
    fn set_top_value(&mut self, value: &WrappedValue) -> SortResult<()>;

    /// Returns a reference to the value in `slot`.
    fn value(&self, slot: usize) -> WrappedValue;

    /// Compares the values in `slot1` and `slot2`.
    fn compare(&self, slot1: usize, slot2: usize) -> Ordering;
}

/// Sorts by `i32` field values held in [Int32] wrappers.
#[derive(Debug)]
pub struct Int32Comparator {
    values: Box<[Arc<Int32>]>,
    top_value: Int32,
    reader_values: FieldValueCache<Arc<Int32>>,
}

impl Int32Comparator {
    /// Creates a comparator with `num_hits` slots reading from `reader_values`. Every slot starts out
    /// pointing at a single shared zero wrapper.
    pub fn new(num_hits: usize, reader_values: FieldValueCache<Arc<Int32>>) -> Self {
        Self {
            values: vec![Arc::new(Int32::default()); num_hits].into_boxed_slice(),
            top_value: Int32::default(),
            reader_values,
        }
    }

    /// Returns the value in `slot`.
    #[inline]
    pub fn value_at(&self, slot: usize) -> i32 {
        self.values[slot].get()
    }

    /// Returns the wrapper currently referenced by `slot`.
    #[inline]
    pub fn wrapper_at(&self, slot: usize) -> &Arc<Int32> {
        &self.values[slot]
    }

    /// Sets the top value from a native `i32`.
    #[inline]
    pub fn set_top_value_native(&mut self, value: i32) {
        self.top_value.set(value);
    }

    /// Returns the current top value.
    #[inline]
    pub fn top_value(&self) -> i32 {
        self.top_value.get()
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
        self.values[slot] = Arc::clone(self.reader_values.value_at(doc));
    }

    fn set_top_value(&mut self, value: &WrappedValue) -> SortResult<()> {
        let number = value.number_of_type(SortFieldType::Int)?;
        self.top_value.set(number.to_i32());
        Ok(())
    }

    fn value(&self, slot: usize) -> WrappedValue {
        WrappedValue::Number(self.values[slot].clone())
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.values[slot1].get().cmp(&self.values[slot2].get())
    }
}

/// Sorts by `f32` field values held in [Float32] wrappers.
#[derive(Debug)]
pub struct FloatComparator {
    values: Box<[Arc<Float32>]>,
    top_value: Float32,
    reader_values: FieldValueCache<Arc<Float32>>,
}

impl FloatComparator {
    /// Creates a comparator with `num_hits` slots reading from `reader_values`. Every slot starts out
    /// pointing at a single shared zero wrapper.
    pub fn new(num_hits: usize, reader_values: FieldValueCache<Arc<Float32>>) -> Self {
        Self {
            values: vec![Arc::new(Float32::default()); num_hits].into_boxed_slice(),
            top_value: Float32::default(),
            reader_values,
        }
    }

    /// Returns the value in `slot`.
    #[inline]
    pub fn value_at(&self, slot: usize) -> f32 {
        self.values[slot].get()
    }

    /// Returns the wrapper currently referenced by `slot`.
    #[inline]
    pub fn wrapper_at(&self, slot: usize) -> &Arc<Float32> {
        &self.values[slot]
    }

    /// Sets the top value from a native `f32`.
    #[inline]
    pub fn set_top_value_native(&mut self, value: f32) {
        self.top_value.set(value);
    }

    /// Returns the current top value.
    #[inline]
    pub fn top_value(&self) -> f32 {
        self.top_value.get()
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
        self.values[slot] = Arc::clone(self.reader_values.value_at(doc));
    }

    fn set_top_value(&mut self, value: &WrappedValue) -> SortResult<()> {
        let number = value.number_of_type(SortFieldType::Float)?;
        self.top_value.set(number.to_f32());
        Ok(())
    }

    fn value(&self, slot: usize) -> WrappedValue {
        WrappedValue::Number(self.values[slot].clone())
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        compare_floats(self.values[slot1].get(), self.values[slot2].get())
    }
}

/// Sorts by string field values. Strings are already shared references, so there is no wrapper.
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

    fn set_top_value(&mut self, value: &WrappedValue) -> SortResult<()> {
        let top_value = value.as_str().ok_or(SortError::TypeMismatch {
            expected: SortFieldType::String,
            actual: value.field_type(),
        })?;
        self.top_value = Arc::clone(top_value);
        Ok(())
    }

    fn value(&self, slot: usize) -> WrappedValue {
        WrappedValue::String(Arc::clone(&self.values[slot]))
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.values[slot1].cmp(&self.values[slot2])
    }
}

impl ErasedComparator for Box<dyn FieldComparator> {
    type Value = WrappedValue;

    fn value_type(value: &WrappedValue) -> SortFieldType {
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

    fn set_top_value(&mut self, value: &WrappedValue) -> SortResult<()> {
        (**self).set_top_value(value)
    }

    fn read_value(&self, slot: usize) -> WrappedValue {
        (**self).value(slot)
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        (**self).compare(slot1, slot2)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{FieldComparator, FloatComparator, Int32Comparator, StringComparator, WrappedValue},
        crate::{
            index::FieldValueCache,
            search::{
                number::{Float32, Int32},
                FieldValue, SortFieldType,
            },
            SortError,
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    fn int_cache(values: &[i32]) -> FieldValueCache<Arc<Int32>> {
        values.iter().map(|value| Arc::new(Int32::new(*value))).collect()
    }

    #[test]
    fn test_copy_shares_cache_wrapper() {
        let cache = int_cache(&[10, 20, 30]);
        let mut comparator = Int32Comparator::new(3, cache.clone());
        comparator.copy(0, 2);
        comparator.copy(1, 0);
        comparator.copy(2, 1);
        assert_eq!(comparator.value_at(0), 30);
        assert_eq!(comparator.value_at(1), 10);
        assert_eq!(comparator.value_at(2), 20);
        assert!(Arc::ptr_eq(comparator.wrapper_at(0), cache.value_at(2)));

        match comparator.value(1) {
            WrappedValue::Number(number) => assert_eq!(number.to_i32(), 10),
            other => panic!("Expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_value_survives_overwrite() {
        let mut comparator = Int32Comparator::new(1, int_cache(&[5, 6]));
        comparator.copy(0, 0);
        let before = comparator.value(0);
        comparator.copy(0, 1);
        assert_eq!(before.to_field_value(), FieldValue::Int(5));
        assert_eq!(comparator.value(0).to_field_value(), FieldValue::Int(6));
    }

    #[test]
    fn test_top_value_mutated_in_place() {
        let cache: FieldValueCache<Arc<Float32>> = [1.5f32, 2.5].iter().map(|v| Arc::new(Float32::new(*v))).collect();
        let mut comparator = FloatComparator::new(2, cache.clone());
        comparator.copy(0, 1);

        let top = comparator.value(0);
        comparator.set_top_value(&top).unwrap();
        comparator.set_top_value_native(9.0);
        assert_eq!(comparator.top_value(), 9.0);
        assert_eq!(cache.value_at(1).get(), 2.5);
        assert_eq!(top.to_field_value(), FieldValue::Float(2.5));
        assert_eq!(comparator.value_at(0), 2.5);
    }

    #[test]
    fn test_set_top_value_requires_same_type() {
        let mut comparator = Int32Comparator::new(1, int_cache(&[1]));
        let float = WrappedValue::from(Arc::new(Float32::new(3.0)));
        assert_eq!(
            comparator.set_top_value(&float),
            Err(SortError::TypeMismatch {
                expected: SortFieldType::Int,
                actual: SortFieldType::Float,
            })
        );

        let mut comparator = StringComparator::new(1, ["x"].into_iter().map(Arc::from).collect());
        let int = WrappedValue::from(Arc::new(Int32::new(3)));
        assert!(comparator.set_top_value(&int).is_err());
        comparator.set_top_value(&WrappedValue::from(Arc::<str>::from("y"))).unwrap();
        assert_eq!(comparator.top_value(), "y");
    }
}
