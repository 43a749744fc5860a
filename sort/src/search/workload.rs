use {
    crate::{
        index::SegmentFieldCaches,
        search::{
            comparators::{boxing, unboxed::UnboxedComparator, wrapped},
            number::Number,
            BoxingComparatorSource, ErasedComparator, RowAssembler, Sort, SortField, SortFieldType,
            UnboxedComparatorSource, WrappedComparatorSource,
        },
        SortError, SortResult,
    },
    log::debug,
};

/// Position of the `i32` comparator in each of the workload's comparator sets.
pub const INT32_COMPARATOR_INDEX: usize = 0;

/// Position of the `f32` comparator in each of the workload's comparator sets.
pub const FLOAT_COMPARATOR_INDEX: usize = 1;

/// Position of the string comparator in each of the workload's comparator sets.
pub const STRING_COMPARATOR_INDEX: usize = 2;

const INT32_FIELD: &str = "int32";
const FLOAT_FIELD: &str = "float";
const STRING_FIELD: &str = "string";

/// The same three-field sort (`i32`, `f32`, string) built once per comparator family over one
/// segment, with as many slots as documents.
///
/// Document `i` holds `i`, `i as f32` and the decimal string of `i`. The operations below drive all
/// three families through identical sequences so their results can be compared.
#[derive(Debug)]
pub struct ComparatorWorkload {
    docs: usize,
    caches: SegmentFieldCaches,
    sort: Sort,
    boxing: RowAssembler<Box<dyn boxing::FieldComparator>>,
    unboxed: RowAssembler<UnboxedComparator>,
    wrapped: RowAssembler<Box<dyn wrapped::FieldComparator>>,
}

impl ComparatorWorkload {
    /// Builds the caches and comparators for `docs` documents.
    ///
    /// # Errors
    /// Returns [SortError::TooManyDocs] if `docs` does not fit in an `i32`, since document `i` stores
    /// `i` in its `i32` field.
    pub fn new(docs: usize) -> SortResult<Self> {
        let max_doc = i32::try_from(docs).map_err(|_| SortError::TooManyDocs(docs))?;

        let mut caches = SegmentFieldCaches::new();
        caches
            .add_int(INT32_FIELD, (0..max_doc).collect::<Vec<_>>())
            .add_float(FLOAT_FIELD, (0..docs).map(|i| i as f32).collect::<Vec<_>>())
            .add_string(STRING_FIELD, (0..docs).map(|i| i.to_string()));

        let sort = Sort::new(vec![
            SortField::new(INT32_FIELD, SortFieldType::Int)?,
            SortField::new(FLOAT_FIELD, SortFieldType::Float)?,
            SortField::new(STRING_FIELD, SortFieldType::String)?,
        ])?;

        debug!("Building comparator workload over {docs} docs, sorted by {sort}");
        Ok(Self {
            docs,
            boxing: sort.comparators(&BoxingComparatorSource, &caches, docs)?,
            unboxed: sort.comparators(&UnboxedComparatorSource, &caches, docs)?,
            wrapped: sort.comparators(&WrappedComparatorSource, &caches, docs)?,
            caches,
            sort,
        })
    }

    /// Replaces every comparator with a fresh one, as at the start of a new collection pass.
    pub fn reset(&mut self) -> SortResult<()> {
        self.boxing = self.sort.comparators(&BoxingComparatorSource, &self.caches, self.docs)?;
        self.unboxed = self.sort.comparators(&UnboxedComparatorSource, &self.caches, self.docs)?;
        self.wrapped = self.sort.comparators(&WrappedComparatorSource, &self.caches, self.docs)?;
        Ok(())
    }

    /// Returns the number of documents (and slots).
    pub fn docs(&self) -> usize {
        self.docs
    }

    /// Returns the boxing comparators.
    pub fn boxing(&self) -> &RowAssembler<Box<dyn boxing::FieldComparator>> {
        &self.boxing
    }

    /// Returns the boxing comparators, mutably.
    pub fn boxing_mut(&mut self) -> &mut RowAssembler<Box<dyn boxing::FieldComparator>> {
        &mut self.boxing
    }

    /// Returns the unboxed comparators.
    pub fn unboxed(&self) -> &RowAssembler<UnboxedComparator> {
        &self.unboxed
    }

    /// Returns the unboxed comparators, mutably.
    pub fn unboxed_mut(&mut self) -> &mut RowAssembler<UnboxedComparator> {
        &mut self.unboxed
    }

    /// Returns the wrapped comparators.
    pub fn wrapped(&self) -> &RowAssembler<Box<dyn wrapped::FieldComparator>> {
        &self.wrapped
    }

    /// Returns the wrapped comparators, mutably.
    pub fn wrapped_mut(&mut self) -> &mut RowAssembler<Box<dyn wrapped::FieldComparator>> {
        &mut self.wrapped
    }

    /// Copies document `j` into slot `j` of every comparator of every family.
    ///
    /// The unboxed comparators have no common copy method, so each one is matched on its type first.
    pub fn copy_values(&mut self) {
        for comparator in self.unboxed.comparators_mut() {
            for j in 0..self.docs {
                match comparator {
                    UnboxedComparator::Int32(c) => c.copy(j, j),
                    UnboxedComparator::Float(c) => c.copy(j, j),
                    UnboxedComparator::String(c) => c.copy(j, j),
                }
            }
        }

        copy_all(&mut self.boxing, self.docs);
        copy_all(&mut self.wrapped, self.docs);
    }

    /// Reads the `i32` column through the unboxed comparator's typed accessor.
    ///
    /// # Panics
    /// Panics if the comparator at [INT32_COMPARATOR_INDEX] is not an `i32` comparator.
    pub fn int32_column_unboxed(&self) -> Vec<i32> {
        let comparator = self.unboxed.comparators()[INT32_COMPARATOR_INDEX].expect_int32();
        (0..self.docs).map(|slot| comparator.value_at(slot)).collect()
    }

    /// Reads the `f32` column through the unboxed comparator's typed accessor.
    ///
    /// # Panics
    /// Panics if the comparator at [FLOAT_COMPARATOR_INDEX] is not an `f32` comparator.
    pub fn float_column_unboxed(&self) -> Vec<f32> {
        let comparator = self.unboxed.comparators()[FLOAT_COMPARATOR_INDEX].expect_float();
        (0..self.docs).map(|slot| comparator.value_at(slot)).collect()
    }

    /// Reads the `i32` column through the boxing comparator's erased channel.
    pub fn int32_column_boxing(&self) -> SortResult<Vec<i32>> {
        let comparator = &self.boxing.comparators()[INT32_COMPARATOR_INDEX];
        (0..self.docs)
            .map(|slot| {
                let value = comparator.value(slot);
                value.as_int().ok_or(SortError::TypeMismatch {
                    expected: SortFieldType::Int,
                    actual: value.field_type(),
                })
            })
            .collect()
    }

    /// Reads the `f32` column through the boxing comparator's erased channel.
    pub fn float_column_boxing(&self) -> SortResult<Vec<f32>> {
        let comparator = &self.boxing.comparators()[FLOAT_COMPARATOR_INDEX];
        (0..self.docs)
            .map(|slot| {
                let value = comparator.value(slot);
                value.as_float().ok_or(SortError::TypeMismatch {
                    expected: SortFieldType::Float,
                    actual: value.field_type(),
                })
            })
            .collect()
    }

    /// Reads the `i32` column through the wrapped comparator's erased channel and [Number].
    pub fn int32_column_wrapped(&self) -> SortResult<Vec<i32>> {
        let comparator = &self.wrapped.comparators()[INT32_COMPARATOR_INDEX];
        number_column(&**comparator, self.docs, SortFieldType::Int, |number| number.to_i32())
    }

    /// Reads the `f32` column through the wrapped comparator's erased channel and [Number].
    pub fn float_column_wrapped(&self) -> SortResult<Vec<f32>> {
        let comparator = &self.wrapped.comparators()[FLOAT_COMPARATOR_INDEX];
        number_column(&**comparator, self.docs, SortFieldType::Float, |number| number.to_f32())
    }
}

/// Reads the first `slots` values of a wrapped comparator, converting each with `read`. Every value
/// must be a number of the `expected` type; another number type is not converted.
fn number_column<T>(
    comparator: &dyn wrapped::FieldComparator,
    slots: usize,
    expected: SortFieldType,
    read: fn(&dyn Number) -> T,
) -> SortResult<Vec<T>> {
    (0..slots)
        .map(|slot| {
            let value = comparator.value(slot);
            match value.as_number() {
                Some(number) if number.field_type() == expected => Ok(read(number)),
                _ => Err(SortError::TypeMismatch {
                    expected,
                    actual: value.field_type(),
                }),
            }
        })
        .collect()
}

/// Assembles the row of every slot, in slot order.
pub fn fill_all_fields<C: ErasedComparator>(assembler: &RowAssembler<C>) -> Vec<Vec<C::Value>> {
    let mut rows = Vec::with_capacity(assembler.num_hits());
    let mut fields = Vec::with_capacity(assembler.len());
    for slot in 0..assembler.num_hits() {
        assembler.fill_fields(slot, &mut fields);
        rows.push(std::mem::replace(&mut fields, Vec::with_capacity(assembler.len())));
    }
    rows
}

fn copy_all<C: ErasedComparator>(assembler: &mut RowAssembler<C>, docs: usize) {
    for comparator in assembler.comparators_mut() {
        for j in 0..docs {
            comparator.copy(j, j);
        }
    }
}
