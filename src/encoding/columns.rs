//! Column names recognised in the raw treatment records.
//!
//! Every list is compiled in; the orchestrator skips names that are not
//! present in the input frame.

/// Numeric columns copied to the output unchanged.
pub const PASSTHROUGH_COLUMNS: [&str; 7] = [
    "총 생성 배아 수",
    "미세주입된 난자 수",
    "이식된 배아 수",
    "저장된 배아 수",
    "난자 채취 경과일",
    "배아 이식 경과일",
    "임신 성공 여부",
];

/// Categorical columns expanded into one-hot indicator columns.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["시술 시기 코드", "난자 출처", "정자 출처"];

/// Patient age at the time of treatment.
pub const TREATMENT_AGE_COLUMN: &str = "시술 당시 나이";

/// Age of the egg donor.
pub const DONOR_AGE_COLUMN: &str = "난자 기증자 나이";

/// Procedure count columns (`<N>회` strings).
pub const COUNT_COLUMNS: [&str; 3] = ["총 시술 횟수", "총 임신 횟수", "총 출산 횟수"];

/// Delimited list of treatment types.
pub const TREATMENT_TYPE_COLUMN: &str = "특정 시술 유형";

/// Delimited list of reasons the embryos were created.
pub const EMBRYO_PURPOSE_COLUMN: &str = "배아 생성 주요 이유";

/// Label that stands in for a missing or unrecognised category.
pub const UNKNOWN_LABEL: &str = "알 수 없음";

/// Every column name the encoder reads.
pub fn recognised_columns() -> impl Iterator<Item = &'static str> {
    PASSTHROUGH_COLUMNS
        .into_iter()
        .chain(CATEGORICAL_COLUMNS)
        .chain([TREATMENT_AGE_COLUMN, DONOR_AGE_COLUMN])
        .chain(COUNT_COLUMNS)
        .chain([TREATMENT_TYPE_COLUMN, EMBRYO_PURPOSE_COLUMN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_recognised_columns_are_unique() {
        let all: Vec<_> = recognised_columns().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 17);
        assert_eq!(unique.len(), all.len());
    }
}
