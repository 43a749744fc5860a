use {
    crate::{search::ErasedComparator, SortError, SortResult},
    log::trace,
    std::cmp::Ordering,
};

/// Holds the comparators of a multi-field sort, in sort order, and turns slots into rows of sort
/// values.
///
/// This is the piece of a field-sorted hit queue that fills in the sort values of each hit: it only
/// sees the comparators through [ErasedComparator], so it works the same for every comparator
/// family.
#[derive(Debug)]
pub struct RowAssembler<C> {
    comparators: Vec<C>,
    reverse: Vec<bool>,
}

impl<C: ErasedComparator> RowAssembler<C> {
    /// Creates an assembler where every field sorts in natural order.
    pub fn new(comparators: Vec<C>) -> Self {
        let reverse = vec![false; comparators.len()];
        Self {
            comparators,
            reverse,
        }
    }

    /// Creates an assembler from `(comparator, reverse)` pairs.
    pub fn with_reverse(fields: impl IntoIterator<Item = (C, bool)>) -> Self {
        let (comparators, reverse) = fields.into_iter().unzip();
        Self {
            comparators,
            reverse,
        }
    }

    /// Returns the comparators in sort order.
    #[inline]
    pub fn comparators(&self) -> &[C] {
        &self.comparators
    }

    /// Returns the comparators in sort order, mutably.
    #[inline]
    pub fn comparators_mut(&mut self) -> &mut [C] {
        &mut self.comparators
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Indicates whether there are no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Returns the number of slots every comparator can hold.
    pub fn num_hits(&self) -> usize {
        self.comparators.iter().map(ErasedComparator::num_hits).min().unwrap_or(0)
    }

    /// Copies `doc` into `slot` of every comparator.
    pub fn copy(&mut self, slot: usize, doc: usize) {
        for comparator in self.comparators.iter_mut() {
            comparator.copy(slot, doc);
        }
    }

    /// Gives every comparator its top value, taken position by position from `row`.
    ///
    /// Every value is checked before any comparator is touched, so on error no top value changes.
    ///
    /// # Errors
    /// Returns [SortError::TypeMismatch][crate::SortError::TypeMismatch] for the first value whose
    /// type differs from its comparator's field type.
    ///
    /// # Panics
    /// Panics if `row` does not have one value per comparator.
    pub fn set_top_values(&mut self, row: &[C::Value]) -> SortResult<()> {
        assert_eq!(row.len(), self.comparators.len(), "top value row must have one value per sort field");
        if let Some((comparator, value)) = self.comparators.iter().zip(row).find(|(c, v)| !c.accepts(v)) {
            return Err(SortError::TypeMismatch {
                expected: comparator.field_type(),
                actual: C::value_type(value),
            });
        }

        trace!("Setting top values on {} comparators", row.len());
        for (comparator, value) in self.comparators.iter_mut().zip(row) {
            comparator.set_top_value(value)?;
        }
        Ok(())
    }

    /// Returns a new row holding the value of `slot` from each comparator, in sort order.
    pub fn assemble_row(&self, slot: usize) -> Vec<C::Value> {
        self.comparators.iter().map(|comparator| comparator.read_value(slot)).collect()
    }

    /// Like [RowAssembler::assemble_row], but writes into `fields`, which is cleared first.
    pub fn fill_fields(&self, slot: usize, fields: &mut Vec<C::Value>) {
        fields.clear();
        fields.extend(self.comparators.iter().map(|comparator| comparator.read_value(slot)));
    }

    /// Compares the hits in two slots field by field. Later fields only break ties left by earlier
    /// ones; a reversed field inverts its comparator's order.
    pub fn compare_slots(&self, slot1: usize, slot2: usize) -> Ordering {
        for (comparator, reverse) in self.comparators.iter().zip(&self.reverse) {
            let ordering = comparator.compare(slot1, slot2);
            if ordering != Ordering::Equal {
                return if *reverse {
                    ordering.reverse()
                } else {
                    ordering
                };
            }
        }

        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use {
        super::RowAssembler,
        crate::{
            search::{
                comparators::unboxed::{Int32Comparator, StringComparator, UnboxedComparator},
                FieldValue, SortFieldType,
            },
            SortError,
        },
        pretty_assertions::assert_eq,
        std::{cmp::Ordering, sync::Arc},
        test_log::test,
    };

    fn year_title_assembler(reverse_title: bool) -> RowAssembler<UnboxedComparator> {
        let year = Int32Comparator::new(3, vec![2001, 1999, 2001].into());
        let title = StringComparator::new(3, ["b", "c", "a"].into_iter().map(Arc::from).collect());
        let mut assembler = RowAssembler::with_reverse([(year.into(), false), (title.into(), reverse_title)]);
        for doc in 0..3 {
            assembler.copy(doc, doc);
        }
        assembler
    }

    #[test]
    fn test_assemble_row() {
        let assembler = year_title_assembler(false);
        assert_eq!(assembler.len(), 2);
        assert_eq!(assembler.num_hits(), 3);
        assert_eq!(assembler.assemble_row(1), vec![FieldValue::from(1999i32), FieldValue::from("c")]);

        let mut fields = vec![FieldValue::from(0i32); 5];
        assembler.fill_fields(2, &mut fields);
        assert_eq!(fields, vec![FieldValue::from(2001i32), FieldValue::from("a")]);
    }

    #[test]
    fn test_compare_slots() {
        let assembler = year_title_assembler(false);
        assert_eq!(assembler.compare_slots(1, 0), Ordering::Less);
        assert_eq!(assembler.compare_slots(0, 2), Ordering::Greater);
        assert_eq!(assembler.compare_slots(2, 2), Ordering::Equal);

        let assembler = year_title_assembler(true);
        assert_eq!(assembler.compare_slots(1, 0), Ordering::Less);
        assert_eq!(assembler.compare_slots(0, 2), Ordering::Less);
    }

    #[test]
    fn test_set_top_values() {
        let mut assembler = year_title_assembler(false);
        let row = assembler.assemble_row(0);
        assembler.set_top_values(&row).unwrap();
        assert_eq!(assembler.comparators()[0].expect_int32().top_value(), 2001);

        let bad_row = vec![FieldValue::from("x"), FieldValue::from("y")];
        assert!(assembler.set_top_values(&bad_row).is_err());
        assert_eq!(assembler.comparators()[0].expect_int32().top_value(), 2001);
        assert_eq!(assembler.assemble_row(0), row);
    }

    #[test]
    fn test_set_top_values_rejects_whole_row() {
        let mut assembler = year_title_assembler(false);
        assert_eq!(
            assembler.set_top_values(&[FieldValue::from(42i32), FieldValue::from(5i32)]),
            Err(SortError::TypeMismatch {
                expected: SortFieldType::String,
                actual: SortFieldType::Int,
            })
        );
        assert_eq!(assembler.comparators()[0].expect_int32().top_value(), 0);
        assert_eq!(assembler.comparators()[1].expect_string().top_value(), "");
    }
}
