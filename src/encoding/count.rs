//! Procedure-count encoding (`총 시술 횟수` and friends).
//!
//! Counts arrive as `"<N>회"` strings, the open-ended bucket `"6회 이상"`, or
//! plain numbers when a reader has already inferred a numeric column.

use crate::error::{EncodeError, Result};

/// Value for a count that was not recorded. Distinct from a real count of 0.
pub const MISSING_COUNT: i64 = -1;

/// The open-ended "six or more" bucket and the value it encodes to.
pub const SIX_OR_MORE: &str = "6회 이상";
const SIX_OR_MORE_VALUE: i64 = 6;

const COUNT_UNIT: char = '회';

/// 2^63, the first float magnitude outside the `i64` range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// One raw count cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCount<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
}

/// Encodes a raw count cell into an integer.
///
/// - missing or NaN → [`MISSING_COUNT`]
/// - `"6회 이상"` → 6
/// - `"<N>회"` → N
/// - integers pass through; floats without a fractional part are accepted
///
/// # Errors
///
/// Returns [`EncodeError::InvalidCount`] when the value is not an integer
/// once the `회` unit has been removed.
pub fn encode_count(value: Option<RawCount<'_>>) -> Result<i64> {
    match value {
        None => Ok(MISSING_COUNT),
        Some(RawCount::Integer(n)) => Ok(n),
        Some(RawCount::Float(f)) => float_count(f),
        Some(RawCount::Text(s)) if s == SIX_OR_MORE => Ok(SIX_OR_MORE_VALUE),
        Some(RawCount::Text(s)) => parse_count_text(s),
    }
}

fn parse_count_text(text: &str) -> Result<i64> {
    let digits = text.replace(COUNT_UNIT, "");
    digits
        .trim()
        .parse::<i64>()
        .map_err(|_err| EncodeError::InvalidCount {
            value: text.to_owned(),
            location: None,
        })
}

fn float_count(value: f64) -> Result<i64> {
    if value.is_nan() {
        Ok(MISSING_COUNT)
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < I64_BOUND {
        Ok(value as i64)
    } else {
        Err(EncodeError::InvalidCount {
            value: value.to_string(),
            location: None,
        })
    }
}
