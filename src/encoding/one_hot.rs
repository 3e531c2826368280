//! One-hot encoding for the categorical columns.
//!
//! By default the indicator columns are whatever categories the current batch
//! contains, so two batches of the same logical column can produce different
//! column sets. A fixed vocabulary pins the set instead.

use super::columns::UNKNOWN_LABEL;
use super::nan_as_null;
use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Name of the indicator column for `category` of `column`.
pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{column}_{category}")
}

/// Expands a categorical column into `Int32` 0/1 indicator columns.
///
/// Nulls and float NaN are encoded as [`UNKNOWN_LABEL`]. Without a
/// vocabulary there is one indicator per distinct value in ascending order.
/// With a vocabulary the indicators follow it exactly and any value outside it
/// counts as the unknown label, which the vocabulary is expected to contain (see
/// `EncoderConfig::fixed_categories`).
pub fn encode_one_hot(column: &Column, vocabulary: Option<&[String]>) -> Result<Vec<Column>> {
    let name = column.name().clone();
    let mut labels = category_labels(column)?;

    let categories: Vec<String> = match vocabulary {
        Some(vocab) => {
            let mut outside = 0_usize;
            for label in &mut labels {
                if !vocab.contains(label) {
                    UNKNOWN_LABEL.clone_into(label);
                    outside += 1;
                }
            }
            if outside > 0 {
                tracing::debug!(column = name.as_str(), outside, "Values outside fixed vocabulary");
            }
            vocab.to_vec()
        }
        None => labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let indicators: Vec<Expr> = categories
        .iter()
        .map(|category| {
            when(col(name.clone()).eq(lit(category.as_str())))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias(indicator_name(&name, category))
        })
        .collect();

    let encoded = DataFrame::new(vec![Column::new(name, labels)])?
        .lazy()
        .select(indicators)
        .collect()?;

    Ok(encoded.take_columns())
}

/// Row labels as strings. Nulls, and NaN in float columns, become the unknown
/// label.
fn category_labels(column: &Column) -> Result<Vec<String>> {
    let series = column.as_materialized_series();
    let series = if series.dtype().is_float() {
        nan_as_null(series)?
    } else {
        series.clone()
    };

    let as_text = series.cast(&DataType::String)?;
    let labels = as_text
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(UNKNOWN_LABEL).to_owned())
        .collect();
    Ok(labels)
}
