use {
    crate::{
        search::{
            number::{Float32, Int32},
            SortFieldType,
        },
        SortError, SortResult,
    },
    log::debug,
    once_cell::sync::OnceCell,
    std::{collections::HashMap, slice::Iter, sync::Arc},
};

/// A read-only, per-segment array of a field's values, indexed by document ordinal.
///
/// Cloning a cache is cheap and shares the underlying values; comparators hold a clone for the
/// duration of a collection pass and never modify it.
#[derive(Debug)]
pub struct FieldValueCache<T> {
    values: Arc<[T]>,
}

impl<T> FieldValueCache<T> {
    /// Returns the value for the given document.
    ///
    /// # Panics
    /// Panics if `doc` is not a valid ordinal for this cache.
    #[inline]
    pub fn value_at(&self, doc: usize) -> &T {
        &self.values[doc]
    }

    /// Returns the number of documents in this cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Indicates whether this cache holds no documents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the values in document order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter()
    }
}

impl<T> Clone for FieldValueCache<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T> From<Vec<T>> for FieldValueCache<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl<T> FromIterator<T> for FieldValueCache<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
enum FieldCacheEntry {
    Int {
        values: FieldValueCache<i32>,
        wrapped: OnceCell<FieldValueCache<Arc<Int32>>>,
    },
    Float {
        values: FieldValueCache<f32>,
        wrapped: OnceCell<FieldValueCache<Arc<Float32>>>,
    },
    String(FieldValueCache<Arc<str>>),
}

impl FieldCacheEntry {
    fn field_type(&self) -> SortFieldType {
        match self {
            Self::Int {
                ..
            } => SortFieldType::Int,
            Self::Float {
                ..
            } => SortFieldType::Float,
            Self::String(_) => SortFieldType::String,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Int {
                values,
                ..
            } => values.len(),
            Self::Float {
                values,
                ..
            } => values.len(),
            Self::String(values) => values.len(),
        }
    }
}

/// The field caches of one segment, keyed by field name.
///
/// Wrapper caches for numeric fields are derived from the native values the first time they are
/// requested and shared afterwards.
#[derive(Debug, Default)]
pub struct SegmentFieldCaches {
    fields: HashMap<String, FieldCacheEntry>,
}

impl SegmentFieldCaches {
    /// Creates an empty set of caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the `i32` values of a field, replacing any previous cache for it.
    pub fn add_int<V: Into<FieldValueCache<i32>>>(&mut self, field: impl Into<String>, values: V) -> &mut Self {
        let entry = FieldCacheEntry::Int {
            values: values.into(),
            wrapped: OnceCell::new(),
        };
        self.fields.insert(field.into(), entry);
        self
    }

    /// Registers the `f32` values of a field, replacing any previous cache for it.
    pub fn add_float<V: Into<FieldValueCache<f32>>>(&mut self, field: impl Into<String>, values: V) -> &mut Self {
        let entry = FieldCacheEntry::Float {
            values: values.into(),
            wrapped: OnceCell::new(),
        };
        self.fields.insert(field.into(), entry);
        self
    }

    /// Registers the text values of a field, replacing any previous cache for it.
    pub fn add_string<I, S>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values.into_iter().map(|s| Arc::<str>::from(s.as_ref())).collect();
        self.fields.insert(field.into(), FieldCacheEntry::String(values));
        self
    }

    /// Returns the type of the values cached for `field`.
    pub fn field_type(&self, field: &str) -> SortResult<SortFieldType> {
        self.entry(field).map(FieldCacheEntry::field_type)
    }

    /// Returns the number of documents covered by the largest cache in this segment.
    pub fn max_doc(&self) -> usize {
        self.fields.values().map(FieldCacheEntry::len).max().unwrap_or(0)
    }

    /// Returns the `i32` cache for `field`.
    pub fn int(&self, field: &str) -> SortResult<FieldValueCache<i32>> {
        match self.entry(field)? {
            FieldCacheEntry::Int {
                values,
                ..
            } => Ok(values.clone()),
            other => Err(mismatch(field, SortFieldType::Int, other)),
        }
    }

    /// Returns the `f32` cache for `field`.
    pub fn float(&self, field: &str) -> SortResult<FieldValueCache<f32>> {
        match self.entry(field)? {
            FieldCacheEntry::Float {
                values,
                ..
            } => Ok(values.clone()),
            other => Err(mismatch(field, SortFieldType::Float, other)),
        }
    }

    /// Returns the text cache for `field`.
    pub fn string(&self, field: &str) -> SortResult<FieldValueCache<Arc<str>>> {
        match self.entry(field)? {
            FieldCacheEntry::String(values) => Ok(values.clone()),
            other => Err(mismatch(field, SortFieldType::String, other)),
        }
    }

    /// Returns the per-document [Int32] wrappers for `field`, building them on first use.
    pub fn wrapped_int(&self, field: &str) -> SortResult<FieldValueCache<Arc<Int32>>> {
        match self.entry(field)? {
            FieldCacheEntry::Int {
                values,
                wrapped,
            } => Ok(wrapped
                .get_or_init(|| {
                    debug!("Building Int32 wrapper cache for field {field:?} with {} docs", values.len());
                    values.iter().map(|value| Arc::new(Int32::new(*value))).collect()
                })
                .clone()),
            other => Err(mismatch(field, SortFieldType::Int, other)),
        }
    }

    /// Returns the per-document [Float32] wrappers for `field`, building them on first use.
    pub fn wrapped_float(&self, field: &str) -> SortResult<FieldValueCache<Arc<Float32>>> {
        match self.entry(field)? {
            FieldCacheEntry::Float {
                values,
                wrapped,
            } => Ok(wrapped
                .get_or_init(|| {
                    debug!("Building Float32 wrapper cache for field {field:?} with {} docs", values.len());
                    values.iter().map(|value| Arc::new(Float32::new(*value))).collect()
                })
                .clone()),
            other => Err(mismatch(field, SortFieldType::Float, other)),
        }
    }

    fn entry(&self, field: &str) -> SortResult<&FieldCacheEntry> {
        self.fields.get(field).ok_or_else(|| SortError::UnknownField(field.to_string()))
    }
}

fn mismatch(field: &str, expected: SortFieldType, entry: &FieldCacheEntry) -> SortError {
    SortError::FieldTypeMismatch {
        field: field.to_string(),
        expected,
        actual: entry.field_type(),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{FieldValueCache, SegmentFieldCaches},
        crate::{search::SortFieldType, SortError},
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    fn caches() -> SegmentFieldCaches {
        let mut caches = SegmentFieldCaches::new();
        caches.add_int("year", vec![1999, 2004, 2021]).add_float("rating", vec![4.5, 3.0]).add_string(
            "title",
            ["b", "a", "c", "d"],
        );
        caches
    }

    #[test]
    fn test_value_cache() {
        let cache: FieldValueCache<i32> = (0..5).map(|i| i * 10).collect();
        assert_eq!(cache.len(), 5);
        assert!(!cache.is_empty());
        assert_eq!(*cache.value_at(3), 30);
        assert_eq!(cache.clone().iter().copied().collect::<Vec<_>>(), vec![0, 10, 20, 30, 40]);
    }

    #[test]
    #[should_panic]
    fn test_value_cache_out_of_range() {
        let cache = FieldValueCache::from(vec![1, 2]);
        cache.value_at(2);
    }

    #[test]
    fn test_lookup() {
        let caches = caches();
        assert_eq!(caches.max_doc(), 4);
        assert_eq!(caches.field_type("rating"), Ok(SortFieldType::Float));
        assert_eq!(*caches.int("year").unwrap().value_at(1), 2004);
        assert_eq!(&**caches.string("title").unwrap().value_at(2), "c");
        assert_eq!(caches.int("missing").unwrap_err(), SortError::UnknownField("missing".to_string()));
        assert_eq!(
            caches.float("title").unwrap_err(),
            SortError::FieldTypeMismatch {
                field: "title".to_string(),
                expected: SortFieldType::Float,
                actual: SortFieldType::String,
            }
        );
    }

    #[test]
    fn test_wrapped_cache_built_once() {
        let caches = caches();
        let first = caches.wrapped_int("year").unwrap();
        let second = caches.wrapped_int("year").unwrap();
        assert_eq!(first.value_at(2).get(), 2021);
        assert!(Arc::ptr_eq(first.value_at(0), second.value_at(0)));
        assert_eq!(caches.wrapped_float("rating").unwrap().value_at(0).get(), 4.5);
        assert!(caches.wrapped_float("year").is_err());
    }
}
