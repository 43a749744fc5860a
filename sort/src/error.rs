use {
    crate::search::SortFieldType,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Errors that can occur while configuring or feeding sort comparators.
///
/// Out-of-range slots and document ordinals are not represented here: those indices are always
/// produced by the collector, so a bad one is a defect upstream and panics instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SortError {
    /// A value passed through the erased channel does not have the comparator's field type.
    TypeMismatch {
        /// The comparator's field type.
        expected: SortFieldType,
        /// The type of the value that was supplied.
        actual: SortFieldType,
    },

    /// A field cache was requested with a type other than the one it holds.
    FieldTypeMismatch {
        /// The name of the field.
        field: String,
        /// The type requested by the caller.
        expected: SortFieldType,
        /// The type of the values held by the cache.
        actual: SortFieldType,
    },

    /// No field cache is registered under the given name.
    UnknownField(String),

    /// A sort field type name could not be parsed.
    UnknownSortFieldType(String),

    /// A sort field specification was invalid.
    InvalidSortField(String /* message */),

    /// A sort was created without any sort fields.
    MissingSortDirectives,

    /// More documents were requested than `i32` document values can number.
    TooManyDocs(usize),
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::TypeMismatch {
                expected,
                actual,
            } => write!(f, "Type mismatch: expected {expected}, got {actual}"),
            Self::FieldTypeMismatch {
                field,
                expected,
                actual,
            } => write!(f, "Field {field:?} holds {actual} values, not {expected} values"),
            Self::UnknownField(field) => write!(f, "Unknown field: {field:?}"),
            Self::UnknownSortFieldType(name) => write!(f, "Unknown sort field type: {name}"),
            Self::InvalidSortField(message) => write!(f, "Invalid sort field: {message}"),
            Self::MissingSortDirectives => write!(f, "Missing sort directives"),
            Self::TooManyDocs(docs) => write!(f, "Too many documents: {docs}"),
        }
    }
}

impl Error for SortError {}

/// A type alias for a `Result` with a [SortError].
pub type SortResult<T> = Result<T, SortError>;

#[cfg(test)]
mod tests {
    use {super::SortError, crate::search::SortFieldType, pretty_assertions::assert_eq, test_log::test};

    #[test]
    fn test_display() {
        let e = SortError::TypeMismatch {
            expected: SortFieldType::Int,
            actual: SortFieldType::String,
        };
        assert_eq!(e.to_string(), "Type mismatch: expected int, got string");

        let e = SortError::FieldTypeMismatch {
            field: "price".to_string(),
            expected: SortFieldType::Float,
            actual: SortFieldType::Int,
        };
        assert_eq!(e.to_string(), "Field \"price\" holds int values, not float values");
        assert_eq!(SortError::MissingSortDirectives.to_string(), "Missing sort directives");
    }
}
