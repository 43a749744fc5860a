use {
    crate::{SortError, SortResult},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Specifies the type of the values to be sorted.
///
/// The set is closed: every comparator, erased value, and field cache is one of these three kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SortFieldType {
    /// Sort using values as 32-bit integers (i32). Lower values are at the front.
    Int,

    /// Sort using values as 32-bit floats (f32). Lower values are at the front; NaN sorts after
    /// positive infinity.
    Float,

    /// Sort using values as Strings, compared bytewise. Lower values are at the front.
    String,
}

impl SortFieldType {
    /// Returns the lowercase name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl Display for SortFieldType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for SortFieldType {
    type Err = SortError;

    fn from_str(s: &str) -> SortResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            _ => Err(SortError::UnknownSortFieldType(s.to_string())),
        }
    }
}

/// Stores information about how to sort documents by the values of an individual field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortField {
    field: String,
    field_type: SortFieldType,
    reverse: bool,
}

impl SortField {
    /// Creates a sort by the natural order of the field's values.
    ///
    /// # Errors
    /// Returns [SortError::InvalidSortField] if `field` is empty.
    pub fn new(field: impl Into<String>, field_type: SortFieldType) -> SortResult<Self> {
        Self::with_reverse(field, field_type, false)
    }

    /// Creates a sort by the reversed natural order of the field's values.
    pub fn reversed(field: impl Into<String>, field_type: SortFieldType) -> SortResult<Self> {
        Self::with_reverse(field, field_type, true)
    }

    fn with_reverse(field: impl Into<String>, field_type: SortFieldType, reverse: bool) -> SortResult<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(SortError::InvalidSortField(format!("{field_type} sort field must have a name")));
        }

        Ok(Self {
            field,
            field_type,
            reverse,
        })
    }

    /// Returns the name of the field.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the type of contents in the field.
    #[inline]
    pub fn field_type(&self) -> SortFieldType {
        self.field_type
    }

    /// Returns whether the sort should be reversed.
    #[inline]
    pub fn reverse(&self) -> bool {
        self.reverse
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "<{}: {:?}>", self.field_type, self.field)?;
        if self.reverse {
            f.write_str("!")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{SortField, SortFieldType},
        crate::SortError,
        pretty_assertions::assert_eq,
        test_log::test,
    };

    #[test]
    fn test_parse_type() {
        assert_eq!("int".parse::<SortFieldType>(), Ok(SortFieldType::Int));
        assert_eq!("Float".parse::<SortFieldType>(), Ok(SortFieldType::Float));
        assert_eq!("STRING".parse::<SortFieldType>(), Ok(SortFieldType::String));
        assert_eq!("long".parse::<SortFieldType>(), Err(SortError::UnknownSortFieldType("long".to_string())));
    }

    #[test]
    fn test_sort_field() {
        let field = SortField::reversed("price", SortFieldType::Float).unwrap();
        assert_eq!(field.field(), "price");
        assert_eq!(field.field_type(), SortFieldType::Float);
        assert!(field.reverse());
        assert_eq!(field.to_string(), "<float: \"price\">!");

        assert!(!SortField::new("title", SortFieldType::String).unwrap().reverse());
        assert!(matches!(SortField::new("", SortFieldType::Int), Err(SortError::InvalidSortField(_))));
    }
}
