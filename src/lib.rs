//! spendtrack - monthly analytics for personal expenses
//!
//! This library turns a user's raw expense records into monthly summaries,
//! category breakdowns, multi-month trends and a dashboard snapshot. The
//! aggregation itself is pure; storage and presentation sit around it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup
//! - `models`: Core data models (money, expenses, categories, users, months)
//! - `storage`: JSON file storage layer and the read seams analytics uses
//! - `analytics`: the aggregation engine
//! - `services`: Business logic layer
//! - `display`: terminal tables
//! - `export`: JSON, YAML and CSV output
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spendtrack::analytics::AnalyticsEngine;
//! use spendtrack::models::MonthPeriod;
//!
//! let engine = AnalyticsEngine::default();
//! let summary = engine.summarize_single_period(&rows, MonthPeriod::parse("2025-04")?);
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::SpendError;
