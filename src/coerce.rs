use crate::errors::CoercionFailure;

/// Parses a boolean literal, ignoring ASCII case.
///
/// Accepts `true`/`false`, `t`/`f`, `1`/`0`, `yes`/`no`, `y`/`n` and `on`/`off`.
pub fn parse_bool(value: &str) -> Result<bool, CoercionFailure> {
    const TRUTHY: [&str; 6] = ["true", "t", "1", "yes", "y", "on"];
    const FALSY: [&str; 6] = ["false", "f", "0", "no", "n", "off"];

    if TRUTHY.iter().any(|lit| lit.eq_ignore_ascii_case(value)) {
        Ok(true)
    } else if FALSY.iter().any(|lit| lit.eq_ignore_ascii_case(value)) {
        Ok(false)
    } else {
        Err(CoercionFailure::InvalidBool)
    }
}

/// Parses a base-10 signed integer in the 32-bit range.
pub fn parse_int(value: &str) -> Result<i32, CoercionFailure> {
    Ok(value.parse::<i32>()?)
}
