use {
    crate::{search::SortFieldType, SortError, SortResult},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

/// Rust-only enum to encapsulate the type and value of a sort key.
///
/// Lucene hands sort values around as `java.lang.Object`; here the set of field types is closed, so
/// the erased value is a tagged union and converting it back is a match on the tag rather than a
/// cast.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Represents an integer value.
    Int(i32),
    /// Represents a float value.
    Float(f32),
    /// Represents a string value. Shared with the field cache it was read from.
    String(Arc<str>),
}

impl FieldValue {
    /// Returns the type tag of this value.
    pub fn field_type(&self) -> SortFieldType {
        match self {
            Self::Int(_) => SortFieldType::Int,
            Self::Float(_) => SortFieldType::Float,
            Self::String(_) => SortFieldType::String,
        }
    }

    /// Returns the integer value, or a [SortError::TypeMismatch] if this is not an integer.
    pub fn to_int(&self) -> SortResult<i32> {
        match self {
            Self::Int(value) => Ok(*value),
            _ => Err(self.mismatch(SortFieldType::Int)),
        }
    }

    /// Returns the float value, or a [SortError::TypeMismatch] if this is not a float.
    pub fn to_float(&self) -> SortResult<f32> {
        match self {
            Self::Float(value) => Ok(*value),
            _ => Err(self.mismatch(SortFieldType::Float)),
        }
    }

    /// Returns the string value, or a [SortError::TypeMismatch] if this is not a string.
    pub fn to_str(&self) -> SortResult<&Arc<str>> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(self.mismatch(SortFieldType::String)),
        }
    }

    fn mismatch(&self, expected: SortFieldType) -> SortError {
        SortError::TypeMismatch {
            expected,
            actual: self.field_type(),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<Arc<str>> for FieldValue {
    fn from(value: Arc<str>) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::FieldValue,
        crate::{search::SortFieldType, SortError},
        pretty_assertions::assert_eq,
        test_log::test,
    };

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from(7i32).to_int(), Ok(7));
        assert_eq!(FieldValue::from(1.5f32).to_float(), Ok(1.5));
        assert_eq!(&**FieldValue::from("alpha").to_str().unwrap(), "alpha");
        assert_eq!(
            FieldValue::from("alpha").to_int(),
            Err(SortError::TypeMismatch {
                expected: SortFieldType::Int,
                actual: SortFieldType::String,
            })
        );
        assert_eq!(FieldValue::from(7i32).to_string(), "7");
        assert_eq!(FieldValue::from("alpha").to_string(), "\"alpha\"");
    }
}
