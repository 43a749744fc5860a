use {
    crate::{
        index::SegmentFieldCaches,
        search::{FieldComparatorSource, RowAssembler, SortField},
        SortError, SortResult,
    },
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Encapsulates sort criteria for returned hits.
///
/// A `Sort` holds one or more [SortField]s in succession: the first SortField is checked first, but
/// if it produces a tie, then the second SortField is used to break the tie, etc.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sort {
    fields: Vec<SortField>,
}

impl Sort {
    /// Sets the sort to the given criteria in succession.
    ///
    /// # Errors
    /// Returns [SortError::MissingSortDirectives] if `fields` is empty.
    pub fn new(fields: Vec<SortField>) -> SortResult<Self> {
        if fields.is_empty() {
            return Err(SortError::MissingSortDirectives);
        }

        Ok(Self {
            fields,
        })
    }

    /// Returns the sort criteria.
    pub fn get_sort(&self) -> &[SortField] {
        &self.fields
    }

    /// Creates one comparator per sort field from `source`, each with `num_hits` slots, and returns
    /// them in sort order.
    ///
    /// # Errors
    /// Returns the first error reported by `source`, typically because `caches` has no values (or
    /// values of another type) for one of the fields.
    pub fn comparators<S: FieldComparatorSource>(
        &self,
        source: &S,
        caches: &SegmentFieldCaches,
        num_hits: usize,
    ) -> SortResult<RowAssembler<S::Comparator>> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            fields.push((source.new_comparator(caches, field, num_hits)?, field.reverse()));
        }

        Ok(RowAssembler::with_reverse(fields))
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::Sort,
        crate::{
            index::SegmentFieldCaches,
            search::{FieldValue, SortField, SortFieldType, UnboxedComparatorSource},
            SortError,
        },
        pretty_assertions::assert_eq,
        std::cmp::Ordering,
        test_log::test,
    };

    #[test]
    fn test_empty_sort() {
        assert_eq!(Sort::new(vec![]), Err(SortError::MissingSortDirectives));
    }

    #[test]
    fn test_comparators_follow_sort_order() {
        let mut caches = SegmentFieldCaches::new();
        caches.add_int("year", vec![2020, 2020, 2019]).add_string("title", ["b", "a", "c"]);

        let sort = Sort::new(vec![
            SortField::reversed("year", SortFieldType::Int).unwrap(),
            SortField::new("title", SortFieldType::String).unwrap(),
        ])
        .unwrap();
        assert_eq!(sort.to_string(), "<int: \"year\">!,<string: \"title\">");

        let mut assembler = sort.comparators(&UnboxedComparatorSource, &caches, 3).unwrap();
        for doc in 0..3 {
            assembler.copy(doc, doc);
        }

        assert_eq!(assembler.assemble_row(2), vec![FieldValue::Int(2019), FieldValue::from("c")]);
        // Newer years first, then titles ascending.
        assert_eq!(assembler.compare_slots(1, 0), Ordering::Less);
        assert_eq!(assembler.compare_slots(2, 0), Ordering::Greater);
    }

    #[test]
    fn test_comparators_missing_field() {
        let caches = SegmentFieldCaches::new();
        let sort = Sort::new(vec![SortField::new("year", SortFieldType::Int).unwrap()]).unwrap();
        assert_eq!(
            sort.comparators(&UnboxedComparatorSource, &caches, 1).unwrap_err(),
            SortError::UnknownField("year".to_string())
        );
    }
}
