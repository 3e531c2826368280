//! Ordinal encoding for the two age-bracket fields.
//!
//! Brackets map to consecutive integers in ascending age order. Treatment and
//! donor brackets are separate scales: `3` for a patient and `3` for a donor
//! do not describe the same ages.

/// Value for a missing, unknown, or unrecognised bracket.
pub const UNKNOWN_ORDINAL: i64 = -1;

/// Patient age brackets, youngest first.
pub const TREATMENT_AGE_BRACKETS: [&str; 6] = [
    "만18-34세",
    "만35-37세",
    "만38-39세",
    "만40-42세",
    "만43-44세",
    "만45-50세",
];

/// Donor age brackets, youngest first.
pub const DONOR_AGE_BRACKETS: [&str; 6] = [
    "만20세 이하",
    "만21-25세",
    "만26-30세",
    "만31-35세",
    "만36-40세",
    "만41-45세",
];

fn ordinal_of(brackets: &[&str], bracket: &str) -> i64 {
    brackets
        .iter()
        .position(|b| *b == bracket)
        .and_then(|idx| i64::try_from(idx).ok())
        .unwrap_or(UNKNOWN_ORDINAL)
}

/// Encodes the patient's age bracket at the time of treatment.
///
/// Returns `0..=5` for a bracket in [`TREATMENT_AGE_BRACKETS`] and
/// [`UNKNOWN_ORDINAL`] for anything else, including `알 수 없음`.
pub fn encode_treatment_age(bracket: &str) -> i64 {
    ordinal_of(&TREATMENT_AGE_BRACKETS, bracket)
}

/// Encodes the egg donor's age bracket.
///
/// Returns `0..=5` for a bracket in [`DONOR_AGE_BRACKETS`] and
/// [`UNKNOWN_ORDINAL`] for anything else.
pub fn encode_donor_age(bracket: &str) -> i64 {
    ordinal_of(&DONOR_AGE_BRACKETS, bracket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::columns::UNKNOWN_LABEL;

    #[test]
    fn test_treatment_age_is_strictly_increasing() {
        let codes: Vec<i64> = TREATMENT_AGE_BRACKETS
            .iter()
            .map(|b| encode_treatment_age(b))
            .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_donor_age_is_strictly_increasing() {
        let codes: Vec<i64> = DONOR_AGE_BRACKETS
            .iter()
            .map(|b| encode_donor_age(b))
            .collect();
        assert!(codes.windows(2).all(|w| w.first() < w.last()));
        assert_eq!(codes.first(), Some(&0));
        assert_eq!(codes.last(), Some(&5));
    }

    #[test]
    fn test_unknown_and_unrecognised_brackets() {
        assert_eq!(encode_treatment_age(UNKNOWN_LABEL), UNKNOWN_ORDINAL);
        assert_eq!(encode_donor_age(UNKNOWN_LABEL), UNKNOWN_ORDINAL);
        assert_eq!(encode_treatment_age(""), UNKNOWN_ORDINAL);
        assert_eq!(encode_treatment_age(" 만18-34세"), UNKNOWN_ORDINAL);
    }

    #[test]
    fn test_scales_do_not_overlap() {
        for bracket in DONOR_AGE_BRACKETS {
            assert_eq!(encode_treatment_age(bracket), UNKNOWN_ORDINAL, "{bracket}");
        }
        for bracket in TREATMENT_AGE_BRACKETS {
            assert_eq!(encode_donor_age(bracket), UNKNOWN_ORDINAL, "{bracket}");
        }
    }
}
