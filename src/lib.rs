//! Technical indicator analysis over OHLCV price frames.
//!
//! Indicators are declared once in a [`catalog`], resolved to the best
//! available [`backend`] (TA-Lib, then the `ta` crate, then native formulas)
//! and computed by the [`analysis`] orchestrator, which reports every
//! indicator it could not compute instead of failing the request.

pub mod analysis;
pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod indicators;
pub mod report;
pub mod resolver;
pub mod source;
pub mod utils;

#[cfg(feature = "ta-crate")]
pub mod ta_adapter;
#[cfg(feature = "talib")]
pub mod talib_bindings;

pub use analysis::{AnalysisResult, Analyzer, SkippedIndicator};
pub use backend::{Availability, Backend};
pub use catalog::Catalog;
pub use dispatch::{FailureReason, Params};
pub use frame::{Bar, Column, PriceFrame};
