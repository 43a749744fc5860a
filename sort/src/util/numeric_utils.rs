use std::cmp::Ordering;

/// Converts an `f32` value to a sortable signed `i32`. The value is
/// converted by getting their IEEE 754 floating-point "float format" bit layout and then
/// some bits are swapped, to be able to compare the result as i32. By this the precision is not
/// reduced, but the value can easily used as an i32. The sort order places [f32::NAN] greater than
/// positive infinity and `-0.0` before `0.0`.
#[inline]
pub fn float_to_sortable_int(value: f32) -> i32 {
    sortable_float_bits(f32::to_bits(value) as i32)
}

/// Converts a sortable `i32` produced by [float_to_sortable_int] back to an `f32`.
#[inline]
pub fn sortable_int_to_float(encoded: i32) -> f32 {
    f32::from_bits(sortable_float_bits(encoded) as u32)
}

/// Compares two floats by their sortable encoding, so every value (including NaN) has a place in
/// the order.
#[inline]
pub fn compare_floats(a: f32, b: f32) -> Ordering {
    float_to_sortable_int(a).cmp(&float_to_sortable_int(b))
}

/// Converts IEEE 754 representation of a float to sortable order (or back to the original)
#[inline]
pub fn sortable_float_bits(bits: i32) -> i32 {
    bits ^ (bits >> 31) & 0x7fffffff
}

#[cfg(test)]
mod tests {
    use {
        super::{compare_floats, float_to_sortable_int, sortable_int_to_float},
        pretty_assertions::assert_eq,
        std::cmp::Ordering,
        test_log::test,
    };

    #[test]
    fn test_sortable_order() {
        let values = [f32::NEG_INFINITY, -1.5, -0.0, 0.0, f32::MIN_POSITIVE, 1.0, 2.5e10, f32::INFINITY, f32::NAN];
        for pair in values.windows(2) {
            assert!(
                float_to_sortable_int(pair[0]) < float_to_sortable_int(pair[1]),
                "{} should sort before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_sortable_round_trip() {
        for value in [-3.25f32, -0.0, 0.0, 7.0, f32::MAX] {
            assert_eq!(sortable_int_to_float(float_to_sortable_int(value)).to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_compare_floats() {
        assert_eq!(compare_floats(1.0, 2.0), Ordering::Less);
        assert_eq!(compare_floats(-0.0, 0.0), Ordering::Less);
        assert_eq!(compare_floats(f32::NAN, f32::INFINITY), Ordering::Greater);
        assert_eq!(compare_floats(f32::NAN, f32::NAN), Ordering::Equal);
    }
}
