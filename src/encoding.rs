//! Feature encoding for fertility-treatment records.
//!
//! # Overview
//!
//! Each recognised source column has one field encoder:
//!
//! - **Passthrough**: numeric columns copied as-is
//! - **One-hot**: `시술 시기 코드`, `난자 출처`, `정자 출처`
//! - **Ordinal**: `시술 당시 나이`, `난자 기증자 나이`
//! - **Count**: `총 시술 횟수`, `총 임신 횟수`, `총 출산 횟수`
//! - **Multi-label**: `특정 시술 유형`, `배아 생성 주요 이유`
//!
//! The [`pipeline`] module runs them over a frame and mean-imputes whatever
//! is still missing.
//!
//! # Example
//!
//! ```no_run
//! use hfea_encode::encoding::encode_data;
//! use polars::prelude::*;
//!
//! let raw = df!(
//!     "시술 당시 나이" => &["만35-37세", "알 수 없음"],
//!     "총 시술 횟수" => &["2회", "6회 이상"],
//!     "특정 시술 유형" => &["ICSI", "IVF:FER"]
//! )?;
//!
//! let encoded = encode_data(&raw)?;
//! assert_eq!(encoded.height(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod columns;
pub mod count;
pub mod impute;
pub mod multi_label;
pub mod one_hot;
pub mod ordinal;
pub mod pipeline;

pub use count::{MISSING_COUNT, RawCount, encode_count};
pub use impute::{ImputedColumn, impute_means};
pub use multi_label::{
    LabelFlags, PURPOSE_FLAGS, TREATMENT_FLAGS, encode_embryo_purpose, encode_treatment_type,
};
pub use one_hot::encode_one_hot;
pub use ordinal::{
    DONOR_AGE_BRACKETS, TREATMENT_AGE_BRACKETS, UNKNOWN_ORDINAL, encode_donor_age,
    encode_treatment_age,
};
pub use pipeline::{EncodeReport, EncodedTable, Encoder, encode_data};

use crate::error::Result;
use polars::prelude::*;

/// Casts a float series to `Float64` with every NaN turned into null.
pub(crate) fn nan_as_null(series: &Series) -> Result<Series> {
    let values: Float64Chunked = series
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values.with_name(series.name().clone()).into_series())
}
