//! Mean imputation over the encoded frame.

use crate::error::Result;
use polars::prelude::*;

/// A column whose missing cells were filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedColumn {
    pub name: String,
    /// Mean of the observed cells, written into every missing cell.
    pub mean: f64,
    /// Number of cells filled.
    pub filled: usize,
}

/// Replaces the nulls of every column with that column's mean over the
/// non-null cells of this frame.
///
/// Filled columns become `Float64`; columns without nulls keep their dtype. A
/// column with no observed value has no mean and is returned unchanged.
pub fn impute_means(df: DataFrame) -> Result<(DataFrame, Vec<ImputedColumn>)> {
    let mut imputed = Vec::new();
    let mut exprs = Vec::new();

    for column in df.get_columns() {
        let filled = column.null_count();
        if filled == 0 {
            continue;
        }

        let name = column.name().as_str();
        if let Some(mean) = column.as_materialized_series().mean() {
            exprs.push(
                col(name)
                    .cast(DataType::Float64)
                    .fill_null(lit(mean))
                    .alias(name),
            );
            imputed.push(ImputedColumn {
                name: name.to_owned(),
                mean,
                filled,
            });
        } else {
            tracing::warn!(column = name, "No observed values, column left unimputed");
        }
    }

    if exprs.is_empty() {
        return Ok((df, imputed));
    }

    let df = df.lazy().with_columns(exprs).collect()?;
    Ok((df, imputed))
}
