//! # hfea_encode
//!
//! Turns raw fertility-treatment records (Korean-language categorical fields
//! for age brackets, treatment types, embryo purposes, and procedure counts)
//! into a fully numeric feature frame for statistical or predictive models.
//!
//! Reading and writing files is left to the caller: the input and output are
//! in-memory polars [`DataFrame`](polars::prelude::DataFrame)s.
//!
//! ```no_run
//! use hfea_encode::encoding::encode_data;
//! use polars::prelude::*;
//!
//! let raw = LazyCsvReader::new("train.csv")
//!     .with_has_header(true)
//!     .finish()?
//!     .collect()?;
//!
//! let features = encode_data(&raw)?;
//! println!("{} features", features.width());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`encoding`]: field encoders and the orchestrating [`encoding::Encoder`]
//! - [`config`]: opt-in encoder policies and logging settings
//! - [`error`]: error types and handling utilities
//! - [`logging`]: `tracing` subscriber setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod logging;
