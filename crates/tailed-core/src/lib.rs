//! Core types, configuration, and error handling for Tail'ed profile analytics.
//!
//! This crate provides the shared foundation used by the other Tail'ed crates:
//! - [`TailedError`] — unified error type using `thiserror`
//! - [`TailedConfig`] — configuration loaded from `.tailed.toml`
//! - Shared types: [`ContributionDay`], [`CalendarWeek`], [`WeeklyBucket`],
//!   [`StreakState`], [`ContributionSummary`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{GitHubConfig, TailedConfig};
pub use error::TailedError;
pub use types::{
    CalendarWeek, ContributionDay, ContributionSummary, MonthlyActivity, MostProductiveDay,
    OutputFormat, StreakState, WeeklyBucket, DATE_FORMAT,
};

/// A convenience `Result` type for Tail'ed operations.
pub type Result<T> = std::result::Result<T, TailedError>;
