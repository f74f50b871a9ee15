//! costwatch - periodic cost ledger and report generator
//!
//! This library turns raw per-entity cost observations into a cross-period
//! comparison report: a period-keyed cost ledger with a computed grand
//! total, a display projection that folds non-featured entities into an
//! "Others" bucket, period-over-period percent-change annotations, and a
//! merged overall/tag-filtered breakdown by sub-category, rendered as a
//! self-contained HTML document with a plain-text fallback.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Core value types (money, periods, entities, records)
//! - `ledger`: The ledger/delta/merge engine
//! - `render`: HTML and plain-text rendering
//! - `query`: Cost query interface and the CSV-backed source
//! - `mail`: Delivery interface and the filesystem outbox
//! - `pipeline`: Per-run orchestration
//!
//! # Example
//!
//! ```rust,ignore
//! use costwatch::config::{CostwatchPaths, Settings};
//! use costwatch::models::PeriodIndex;
//!
//! let paths = CostwatchPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let window = PeriodIndex::trailing(settings.granularity, settings.window_periods, today);
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod mail;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod render;

pub use error::{CostwatchError, CostwatchResult};
