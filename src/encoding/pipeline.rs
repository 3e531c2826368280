//! Orchestration: picks the recognised columns out of a raw frame, runs the
//! matching field encoder over each, and assembles the numeric output frame.

use super::columns::{
    CATEGORICAL_COLUMNS, COUNT_COLUMNS, DONOR_AGE_COLUMN, EMBRYO_PURPOSE_COLUMN,
    PASSTHROUGH_COLUMNS, TREATMENT_AGE_COLUMN, TREATMENT_TYPE_COLUMN,
};
use super::count::{MISSING_COUNT, RawCount, encode_count};
use super::impute::{ImputedColumn, impute_means};
use super::multi_label::{
    LabelFlags, PURPOSE_FLAGS, TREATMENT_FLAGS, encode_embryo_purpose, encode_treatment_type,
};
use super::nan_as_null;
use super::one_hot::encode_one_hot;
use super::ordinal::{UNKNOWN_ORDINAL, encode_donor_age, encode_treatment_age};
use crate::config::{CountPolicy, EncoderConfig};
use crate::error::{EncodeError, Result};
use polars::prelude::*;
use std::time::{Duration, Instant};

/// Report generated by one [`Encoder::encode`] call
#[derive(Debug, Clone)]
pub struct EncodeReport {
    /// Rows in the input frame
    pub rows: usize,

    pub input_columns: usize,

    pub output_columns: usize,

    /// Recognised source columns that were present and encoded
    pub encoded_fields: Vec<String>,

    /// Recognised source columns absent from the input
    pub skipped_fields: Vec<String>,

    /// Output columns whose missing cells were mean-imputed
    pub imputed: Vec<ImputedColumn>,

    /// Malformed count cells encoded as missing under
    /// [`CountPolicy::TreatAsMissing`]
    pub coerced_counts: usize,

    pub duration: Duration,
}

impl EncodeReport {
    /// Create a summary message
    pub fn summary(&self) -> String {
        format!(
            "Encoded {} rows: {} → {} columns, {} fields encoded, {} absent, {} columns imputed, {} counts coerced, {:.3}s",
            self.rows,
            self.input_columns,
            self.output_columns,
            self.encoded_fields.len(),
            self.skipped_fields.len(),
            self.imputed.len(),
            self.coerced_counts,
            self.duration.as_secs_f64()
        )
    }
}

/// Encoded frame together with its report.
#[derive(Debug, Clone)]
pub struct EncodedTable {
    pub df: DataFrame,
    pub report: EncodeReport,
}

/// Encodes raw treatment records with a fixed [`EncoderConfig`].
///
/// The encoder holds no state between calls; every call sees only its own
/// batch, including for one-hot categories and imputed means.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// # Errors
    ///
    /// Returns [`EncodeError::Config`] if the config fails validation.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes `df` into a numeric frame with one row per input row.
    ///
    /// Output columns, in order: passthrough numerics, one-hot indicators,
    /// age ordinals, counts, treatment-type flags, embryo-purpose flags.
    /// Groups whose source column is absent are left out.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidCount`] for a malformed count under
    ///   [`CountPolicy::Fail`]
    /// - [`EncodeError::NonNumericColumn`] for a passthrough or count column
    ///   that cannot be read as numbers
    /// - [`EncodeError::Polars`] if the frame cannot be assembled
    pub fn encode(&self, df: &DataFrame) -> Result<EncodedTable> {
        let start = Instant::now();
        let mut assembly = Assembly::default();

        assembly.passthrough(df)?;
        assembly.one_hot(df, &self.config)?;
        assembly.ordinals(df)?;
        assembly.counts(df, self.config.count_policy)?;
        assembly.flags(df)?;

        let Assembly {
            columns,
            encoded_fields,
            skipped_fields,
            coerced_counts,
        } = assembly;

        let (encoded, imputed) = impute_means(DataFrame::new(columns)?)?;

        let report = EncodeReport {
            rows: df.height(),
            input_columns: df.width(),
            output_columns: encoded.width(),
            encoded_fields,
            skipped_fields,
            imputed,
            coerced_counts,
            duration: start.elapsed(),
        };
        tracing::info!("{}", report.summary());

        Ok(EncodedTable {
            df: encoded,
            report,
        })
    }
}

/// Encodes `df` with the default configuration.
///
/// # Errors
///
/// Fails on the first malformed count cell; see [`Encoder::encode`].
pub fn encode_data(df: &DataFrame) -> Result<DataFrame> {
    Ok(Encoder::default().encode(df)?.df)
}

/// Output columns accumulated while walking the recognised fields.
#[derive(Default)]
struct Assembly {
    columns: Vec<Column>,
    encoded_fields: Vec<String>,
    skipped_fields: Vec<String>,
    coerced_counts: usize,
}

impl Assembly {
    fn lookup<'a>(&mut self, df: &'a DataFrame, name: &str) -> Option<&'a Column> {
        if let Ok(column) = df.column(name) {
            self.encoded_fields.push(name.to_owned());
            Some(column)
        } else {
            tracing::debug!(column = name, "Column absent, skipping");
            self.skipped_fields.push(name.to_owned());
            None
        }
    }

    fn passthrough(&mut self, df: &DataFrame) -> Result<()> {
        for name in PASSTHROUGH_COLUMNS {
            if let Some(column) = self.lookup(df, name) {
                self.columns.push(numeric_passthrough(column)?);
            }
        }
        Ok(())
    }

    fn one_hot(&mut self, df: &DataFrame, config: &EncoderConfig) -> Result<()> {
        for name in CATEGORICAL_COLUMNS {
            if let Some(column) = self.lookup(df, name) {
                let vocabulary = config.fixed_categories(name);
                self.columns
                    .extend(encode_one_hot(column, vocabulary.as_deref())?);
            }
        }
        Ok(())
    }

    fn ordinals(&mut self, df: &DataFrame) -> Result<()> {
        let ordinal_fields: [(&str, fn(&str) -> i64); 2] = [
            (TREATMENT_AGE_COLUMN, encode_treatment_age),
            (DONOR_AGE_COLUMN, encode_donor_age),
        ];
        for (name, encode) in ordinal_fields {
            if let Some(column) = self.lookup(df, name) {
                self.columns.push(ordinal_column(column, encode)?);
            }
        }
        Ok(())
    }

    fn counts(&mut self, df: &DataFrame, policy: CountPolicy) -> Result<()> {
        for name in COUNT_COLUMNS {
            if let Some(column) = self.lookup(df, name) {
                let (encoded, coerced) = count_column(column, policy)?;
                self.columns.push(encoded);
                self.coerced_counts += coerced;
            }
        }
        Ok(())
    }

    fn flags(&mut self, df: &DataFrame) -> Result<()> {
        let flag_fields: [(&str, &'static [&'static str], fn(Option<&str>) -> LabelFlags); 2] = [
            (TREATMENT_TYPE_COLUMN, &TREATMENT_FLAGS, encode_treatment_type),
            (EMBRYO_PURPOSE_COLUMN, &PURPOSE_FLAGS, encode_embryo_purpose),
        ];
        for (name, flag_names, encode) in flag_fields {
            if let Some(column) = self.lookup(df, name) {
                self.columns
                    .extend(flag_columns(column, flag_names, encode)?);
            }
        }
        Ok(())
    }
}

/// Copies a numeric column, turning float NaN into null so imputation sees
/// it as missing. Booleans become 0/1; numeric text is parsed strictly.
fn numeric_passthrough(column: &Column) -> Result<Column> {
    let series = column.as_materialized_series();
    let dtype = series.dtype();

    let numeric = if dtype.is_float() || dtype.is_string() || *dtype == DataType::Null {
        let as_float = series
            .strict_cast(&DataType::Float64)
            .map_err(|_err| EncodeError::NonNumericColumn {
                column: series.name().to_string(),
                dtype: dtype.clone(),
            })?;
        nan_as_null(&as_float)?
    } else if dtype.is_bool() {
        series.cast(&DataType::Int32)?
    } else if dtype.is_integer() {
        series.clone()
    } else {
        return Err(EncodeError::NonNumericColumn {
            column: series.name().to_string(),
            dtype: dtype.clone(),
        });
    };

    Ok(Column::from(numeric))
}

fn ordinal_column(column: &Column, encode: fn(&str) -> i64) -> Result<Column> {
    let text = column.as_materialized_series().cast(&DataType::String)?;
    let codes: Vec<i64> = text
        .str()?
        .into_iter()
        .map(|v| v.map_or(UNKNOWN_ORDINAL, encode))
        .collect();
    Ok(Column::from(Series::new(column.name().clone(), codes)))
}

/// Encodes a count column, returning it with the number of cells coerced to
/// missing.
fn count_column(column: &Column, policy: CountPolicy) -> Result<(Column, usize)> {
    let series = column.as_materialized_series();
    let name = series.name().as_str();
    let mut coerced = 0_usize;
    let mut codes = Vec::with_capacity(series.len());

    for (row, raw) in raw_counts(series)?.into_iter().enumerate() {
        match encode_count(raw) {
            Ok(code) => codes.push(code),
            Err(err @ EncodeError::InvalidCount { .. })
                if policy == CountPolicy::TreatAsMissing =>
            {
                tracing::warn!(column = name, row, "{err}, encoding as missing");
                coerced += 1;
                codes.push(MISSING_COUNT);
            }
            Err(err) => return Err(err.at(name, row)),
        }
    }

    Ok((Column::from(Series::new(name.into(), codes)), coerced))
}

fn raw_counts(series: &Series) -> Result<Vec<Option<RawCount<'_>>>> {
    let dtype = series.dtype();

    let raw = if dtype.is_string() {
        series
            .str()?
            .into_iter()
            .map(|v| v.map(RawCount::Text))
            .collect()
    } else if dtype.is_integer() {
        series
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|v| v.map(RawCount::Integer))
            .collect()
    } else if dtype.is_float() {
        series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.map(RawCount::Float))
            .collect()
    } else if *dtype == DataType::Null {
        vec![None; series.len()]
    } else {
        return Err(EncodeError::NonNumericColumn {
            column: series.name().to_string(),
            dtype: dtype.clone(),
        });
    };

    Ok(raw)
}

/// Expands a multi-label column into one `Int32` column per declared flag.
fn flag_columns(
    column: &Column,
    flag_names: &'static [&'static str],
    encode: fn(Option<&str>) -> LabelFlags,
) -> Result<Vec<Column>> {
    let text = column.as_materialized_series().cast(&DataType::String)?;
    let rows: Vec<LabelFlags> = text.str()?.into_iter().map(encode).collect();

    debug_assert!(
        rows.iter().all(|flags| flags.names() == flag_names),
        "encoder produced flags outside its declared set"
    );

    let columns = flag_names
        .iter()
        .map(|flag| {
            let values: Vec<i32> = rows
                .iter()
                .map(|flags| flags.get(flag).map_or(0, i32::from))
                .collect();
            Column::from(Series::new((*flag).into(), values))
        })
        .collect();

    Ok(columns)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, clippy::indexing_slicing)]
    use super::*;

    fn i64_values(df: &DataFrame, name: &str) -> Vec<i64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    fn i32_values(df: &DataFrame, name: &str) -> Vec<i32> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_ordinal_and_count_columns() -> anyhow::Result<()> {
        let df = df!(
            "시술 당시 나이" => &[Some("만18-34세"), Some("만45-50세"), Some("알 수 없음"), None],
            "총 시술 횟수" => &[Some("0회"), Some("6회 이상"), Some("3회"), None]
        )?;

        let out = encode_data(&df)?;

        assert_eq!(out.height(), 4);
        assert_eq!(i64_values(&out, "시술 당시 나이"), vec![0, 5, -1, -1]);
        assert_eq!(i64_values(&out, "총 시술 횟수"), vec![0, 6, 3, -1]);
        Ok(())
    }

    #[test]
    fn test_flag_columns_use_declared_names() -> anyhow::Result<()> {
        let df = df!("특정 시술 유형" => &[Some("IVF:ICSI/신선"), None])?;

        let out = encode_data(&df)?;

        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, TREATMENT_FLAGS.to_vec());
        assert_eq!(i32_values(&out, "is_IVF"), vec![1, 0]);
        assert_eq!(i32_values(&out, "is_ICSI"), vec![1, 0]);
        assert_eq!(i32_values(&out, "is_Unknown"), vec![0, 1]);
        Ok(())
    }

    #[test]
    fn test_column_groups_follow_fixed_order() -> anyhow::Result<()> {
        let df = df!(
            "배아 생성 주요 이유" => &["현재 시술용"],
            "총 임신 횟수" => &["1회"],
            "난자 기증자 나이" => &["만26-30세"],
            "정자 출처" => &["배우자 제공"],
            "이식된 배아 수" => &[2_i64]
        )?;

        let out = encode_data(&df)?;
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        assert_eq!(names[0], "이식된 배아 수");
        assert_eq!(names[1], "정자 출처_배우자 제공");
        assert_eq!(names[2], "난자 기증자 나이");
        assert_eq!(names[3], "총 임신 횟수");
        assert_eq!(names[4..], PURPOSE_FLAGS.map(str::to_owned));
        Ok(())
    }

    #[test]
    fn test_unrecognised_columns_are_dropped() -> anyhow::Result<()> {
        let df = df!(
            "ID" => &["TRAIN_000001", "TRAIN_000002"],
            "임신 성공 여부" => &[0_i64, 1]
        )?;

        let table = Encoder::default().encode(&df)?;

        assert_eq!(table.df.width(), 1);
        assert_eq!(table.report.encoded_fields, vec!["임신 성공 여부"]);
        assert_eq!(table.report.skipped_fields.len(), 16);
        Ok(())
    }

    #[test]
    fn test_no_recognised_columns_gives_empty_frame() -> anyhow::Result<()> {
        let df = df!("ID" => &["TRAIN_000001", "TRAIN_000002", "TRAIN_000003"])?;
        let table = Encoder::default().encode(&df)?;
        assert_eq!(table.df.width(), 0);
        assert_eq!(table.report.rows, 3);
        Ok(())
    }

    #[test]
    fn test_malformed_count_fails_with_location() -> anyhow::Result<()> {
        let df = df!("총 출산 횟수" => &["1회", "많음"])?;

        let err = encode_data(&df).unwrap_err();

        match err {
            EncodeError::InvalidCount {
                value,
                location: Some(loc),
            } => {
                assert_eq!(value, "많음");
                assert_eq!(loc.column, "총 출산 횟수");
                assert_eq!(loc.row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_treat_as_missing_policy_coerces() -> anyhow::Result<()> {
        let df = df!("총 출산 횟수" => &["1회", "많음", "2회"])?;
        let encoder =
            Encoder::new(EncoderConfig::default().with_count_policy(CountPolicy::TreatAsMissing))?;

        let table = encoder.encode(&df)?;

        assert_eq!(i64_values(&table.df, "총 출산 횟수"), vec![1, -1, 2]);
        assert_eq!(table.report.coerced_counts, 1);
        Ok(())
    }

    #[test]
    fn test_numeric_count_columns() -> anyhow::Result<()> {
        let df = df!(
            "총 시술 횟수" => &[Some(2_i64), None],
            "총 임신 횟수" => &[Some(1.0_f64), Some(0.0)]
        )?;

        let out = encode_data(&df)?;

        assert_eq!(i64_values(&out, "총 시술 횟수"), vec![2, -1]);
        assert_eq!(i64_values(&out, "총 임신 횟수"), vec![1, 0]);
        Ok(())
    }

    #[test]
    fn test_nan_count_is_missing() -> anyhow::Result<()> {
        let df = df!("총 시술 횟수" => &[Some(2.0_f64), Some(f64::NAN), None])?;

        let table = Encoder::default().encode(&df)?;

        assert_eq!(i64_values(&table.df, "총 시술 횟수"), vec![2, -1, -1]);
        assert_eq!(table.report.coerced_counts, 0);
        Ok(())
    }

    #[test]
    fn test_one_hot_float_nan_joins_unknown() -> anyhow::Result<()> {
        let df = df!("정자 출처" => &[Some(1.0_f64), Some(f64::NAN), None])?;

        let out = encode_data(&df)?;

        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["정자 출처_1.0", "정자 출처_알 수 없음"]);
        assert_eq!(i32_values(&out, "정자 출처_알 수 없음"), vec![0, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_passthrough_nan_is_imputed() -> anyhow::Result<()> {
        let df = df!("저장된 배아 수" => &[Some(2.0_f64), Some(f64::NAN), None, Some(4.0)])?;

        let table = Encoder::default().encode(&df)?;

        let values: Vec<f64> = table
            .df
            .column("저장된 배아 수")?
            .as_materialized_series()
            .f64()?
            .into_no_null_iter()
            .collect();
        assert_eq!(values, vec![2.0, 3.0, 3.0, 4.0]);
        assert_eq!(table.report.imputed.len(), 1);
        assert_eq!(table.report.imputed[0].filled, 2);
        Ok(())
    }

    #[test]
    fn test_passthrough_numeric_text_is_parsed() -> anyhow::Result<()> {
        let df = df!("난자 채취 경과일" => &[Some("0"), None, Some("2")])?;
        let out = encode_data(&df)?;
        let values: Vec<f64> = out
            .column("난자 채취 경과일")?
            .as_materialized_series()
            .f64()?
            .into_no_null_iter()
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_passthrough_rejects_free_text() -> anyhow::Result<()> {
        let df = df!("총 생성 배아 수" => &["3", "many"])?;
        let err = encode_data(&df).unwrap_err();
        assert!(matches!(err, EncodeError::NonNumericColumn { .. }), "{err}");
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EncoderConfig::default().with_vocabulary("ID", ["x"]);
        assert!(Encoder::new(config).is_err());
    }

    #[test]
    fn test_report_summary() -> anyhow::Result<()> {
        let df = df!("임신 성공 여부" => &[Some(1_i64), None])?;
        let table = Encoder::default().encode(&df)?;
        let summary = table.report.summary();
        assert!(summary.starts_with("Encoded 2 rows: 1 → 1 columns"), "{summary}");
        assert!(summary.contains("1 columns imputed"), "{summary}");
        Ok(())
    }
}
