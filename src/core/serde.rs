/*!
 * Serde Helpers
 * Predicates for `skip_serializing_if` on report and status types
 */

/// Skip serializing if bool is false
pub fn is_false(value: &bool) -> bool {
    !*value
}

/// Skip serializing if Vec is empty
pub fn is_empty_vec<T>(value: &[T]) -> bool {
    value.is_empty()
}

/// Skip serializing if usize is zero
pub fn is_zero_usize(value: &usize) -> bool {
    *value == 0
}
