use {
    crate::{
        index::SegmentFieldCaches,
        search::{
            comparators::{boxing, unboxed, wrapped},
            ErasedComparator, SortField, SortFieldType,
        },
        SortResult,
    },
    log::debug,
    std::fmt::Debug,
};

/// Creates the comparator for a [SortField] over one segment's field caches.
///
/// There is one source per comparator family; a [Sort][crate::search::Sort] uses a source to build
/// the comparators for all of its fields in one go.
pub trait FieldComparatorSource: Debug {
    /// The comparator type produced by this source.
    type Comparator: ErasedComparator;

    /// Creates a comparator with `num_hits` slots for `field`.
    ///
    /// # Errors
    /// Returns [SortError::UnknownField][crate::SortError::UnknownField] if `caches` has no values for
    /// the field, or [SortError::FieldTypeMismatch][crate::SortError::FieldTypeMismatch] if they are
    /// not of the sort field's type.
    fn new_comparator(
        &self,
        caches: &SegmentFieldCaches,
        field: &SortField,
        num_hits: usize,
    ) -> SortResult<Self::Comparator>;
}

/// Builds [boxing] comparators.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxingComparatorSource;

impl FieldComparatorSource for BoxingComparatorSource {
    type Comparator = Box<dyn boxing::FieldComparator>;

    fn new_comparator(
        &self,
        caches: &SegmentFieldCaches,
        field: &SortField,
        num_hits: usize,
    ) -> SortResult<Self::Comparator> {
        debug!("Creating boxing comparator for {field} with {num_hits} slots");
        let name = field.field();
        let comparator: Self::Comparator = match field.field_type() {
            SortFieldType::Int => Box::new(boxing::Int32Comparator::new(num_hits, caches.int(name)?)),
            SortFieldType::Float => Box::new(boxing::FloatComparator::new(num_hits, caches.float(name)?)),
            SortFieldType::String => Box::new(boxing::StringComparator::new(num_hits, caches.string(name)?)),
        };
        Ok(comparator)
    }
}

/// Builds [unboxed] comparators, tagged as [unboxed::UnboxedComparator].
#[derive(Clone, Copy, Debug, Default)]
pub struct UnboxedComparatorSource;

impl FieldComparatorSource for UnboxedComparatorSource {
    type Comparator = unboxed::UnboxedComparator;

    fn new_comparator(
        &self,
        caches: &SegmentFieldCaches,
        field: &SortField,
        num_hits: usize,
    ) -> SortResult<Self::Comparator> {
        debug!("Creating unboxed comparator for {field} with {num_hits} slots");
        let name = field.field();
        let comparator: Self::Comparator = match field.field_type() {
            SortFieldType::Int => unboxed::Int32Comparator::new(num_hits, caches.int(name)?).into(),
            SortFieldType::Float => unboxed::FloatComparator::new(num_hits, caches.float(name)?).into(),
            SortFieldType::String => unboxed::StringComparator::new(num_hits, caches.string(name)?).into(),
        };
        Ok(comparator)
    }
}

/// Builds [wrapped] comparators. Numeric fields read from the segment's wrapper caches.
#[derive(Clone, Copy, Debug, Default)]
pub struct WrappedComparatorSource;

impl FieldComparatorSource for WrappedComparatorSource {
    type Comparator = Box<dyn wrapped::FieldComparator>;

    fn new_comparator(
        &self,
        caches: &SegmentFieldCaches,
        field: &SortField,
        num_hits: usize,
    ) -> SortResult<Self::Comparator> {
        debug!("Creating wrapped comparator for {field} with {num_hits} slots");
        let name = field.field();
        let comparator: Self::Comparator = match field.field_type() {
            SortFieldType::Int => Box::new(wrapped::Int32Comparator::new(num_hits, caches.wrapped_int(name)?)),
            SortFieldType::Float => Box::new(wrapped::FloatComparator::new(num_hits, caches.wrapped_float(name)?)),
            SortFieldType::String => Box::new(wrapped::StringComparator::new(num_hits, caches.string(name)?)),
        };
        Ok(comparator)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{BoxingComparatorSource, FieldComparatorSource, UnboxedComparatorSource, WrappedComparatorSource},
        crate::{
            index::SegmentFieldCaches,
            search::{ErasedComparator, SortField, SortFieldType},
            SortError,
        },
        pretty_assertions::assert_eq,
        test_log::test,
    };

    #[test]
    fn test_sources_match_field_type() {
        let mut caches = SegmentFieldCaches::new();
        caches.add_float("rating", vec![1.0, 2.0]);
        let field = SortField::new("rating", SortFieldType::Float).unwrap();

        let boxing = BoxingComparatorSource.new_comparator(&caches, &field, 4).unwrap();
        let unboxed = UnboxedComparatorSource.new_comparator(&caches, &field, 4).unwrap();
        let wrapped = WrappedComparatorSource.new_comparator(&caches, &field, 4).unwrap();
        assert_eq!(ErasedComparator::field_type(&boxing), SortFieldType::Float);
        assert_eq!(unboxed.field_type(), SortFieldType::Float);
        assert_eq!(ErasedComparator::num_hits(&wrapped), 4);
    }

    #[test]
    fn test_source_reports_cache_errors() {
        let mut caches = SegmentFieldCaches::new();
        caches.add_string("title", ["a"]);
        let field = SortField::new("title", SortFieldType::Int).unwrap();
        assert_eq!(
            UnboxedComparatorSource.new_comparator(&caches, &field, 1).unwrap_err(),
            SortError::FieldTypeMismatch {
                field: "title".to_string(),
                expected: SortFieldType::Int,
                actual: SortFieldType::String,
            }
        );

        let field = SortField::new("year", SortFieldType::Int).unwrap();
        assert!(matches!(
            WrappedComparatorSource.new_comparator(&caches, &field, 1),
            Err(SortError::UnknownField(_))
        ));
    }
}
