/// Conversions between floating-point values and integers with the same sort order.
pub mod numeric_utils;
