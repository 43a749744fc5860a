use {
    crate::{search::SortFieldType, SortResult},
    std::cmp::Ordering,
};

/// The uniform surface of a per-field sort comparator, as seen by code that handles many fields
/// of different types at once (the [RowAssembler][crate::search::RowAssembler] in particular).
///
/// A comparator owns a fixed number of slots, one per competitive hit, plus a top value:
///
/// * [ErasedComparator::copy]: Installs a new hit into a slot. The collector calls this when a
///   document becomes competitive; the slot's previous value is overwritten.
/// * [ErasedComparator::set_top_value]: Records the value of the current boundary hit, as
///   delivered by a previously assembled row.
/// * [ErasedComparator::read_value]: Returns a slot's value through the erased channel.
/// * [ErasedComparator::compare]: Compares the values held in two slots.
///
/// Each comparator family decides what the erased value looks like through [ErasedComparator::Value].
/// Every concrete comparator also has a typed `value_at` that bypasses this trait entirely.
///
/// Slots and document ordinals are always produced by the collector; passing one that is out of
/// range panics.
pub trait ErasedComparator {
    /// The erased representation of a sort value.
    type Value;

    /// Returns the type of the values this comparator sorts.
    fn field_type(&self) -> SortFieldType;

    /// Returns the number of slots.
    fn num_hits(&self) -> usize;

    /// Returns the field type carried by an erased value.
    fn value_type(value: &Self::Value) -> SortFieldType;

    /// Indicates whether [ErasedComparator::set_top_value] would accept `value`.
    fn accepts(&self, value: &Self::Value) -> bool {
        Self::value_type(value) == self.field_type()
    }

    /// Copies the value of `doc` from the field cache into `slot`.
    fn copy(&mut self, slot: usize, doc: usize);

    /// Sets the top value from an erased value. The slots are not touched.
    ///
    /// # Errors
    /// Returns [SortError::TypeMismatch][crate::SortError::TypeMismatch] if `value` is not of this
    /// comparator's field type.
    fn set_top_value(&mut self, value: &Self::Value) -> SortResult<()>;

    /// Returns the value stored in `slot`.
    fn read_value(&self, slot: usize) -> Self::Value;

    /// Compares the values in `slot1` and `slot2` by their natural order.
    fn compare(&self, slot1: usize, slot2: usize) -> Ordering;
}
