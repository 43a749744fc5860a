use {
    crate::search::SortFieldType,
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A wrapped numeric sort value that can be read back as either supported native number type.
///
/// This is the only capability a caller gets when it receives a number through the erased channel
/// of the wrapped comparators; instead of casting to a concrete wrapper, it asks for the native
/// value it wants.
pub trait Number: Debug + Send + Sync {
    /// The field type this number was read from.
    fn field_type(&self) -> SortFieldType;

    /// Returns the value as an `i32`. Floats are truncated toward zero, saturating at the `i32`
    /// bounds; NaN becomes `0`.
    fn to_i32(&self) -> i32;

    /// Returns the value as an `f32`.
    fn to_f32(&self) -> f32;
}

/// A mutable holder for an `i32` sort value.
///
/// Field caches hand these out behind an `Arc`, one immutable instance per document; a comparator
/// keeps one of its own for the top value and updates it with [Int32::set].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Int32 {
    value: i32,
}

impl Int32 {
    /// Creates a new holder.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self {
            value,
        }
    }

    /// Returns the held value.
    #[inline]
    pub fn get(&self) -> i32 {
        self.value
    }

    /// Replaces the held value in place.
    #[inline]
    pub fn set(&mut self, value: i32) {
        self.value = value;
    }
}

impl Number for Int32 {
    #[inline]
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Int
    }

    #[inline]
    fn to_i32(&self) -> i32 {
        self.value
    }

    #[inline]
    fn to_f32(&self) -> f32 {
        self.value as f32
    }
}

impl Display for Int32 {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}

/// A mutable holder for an `f32` sort value. See [Int32] for the ownership rules.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Float32 {
    value: f32,
}

impl Float32 {
    /// Creates a new holder.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
        }
    }

    /// Returns the held value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Replaces the held value in place.
    #[inline]
    pub fn set(&mut self, value: f32) {
        self.value = value;
    }
}

impl Number for Float32 {
    #[inline]
    fn field_type(&self) -> SortFieldType {
        SortFieldType::Float
    }

    #[inline]
    fn to_i32(&self) -> i32 {
        self.value as i32
    }

    #[inline]
    fn to_f32(&self) -> f32 {
        self.value
    }
}

impl Display for Float32 {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}
