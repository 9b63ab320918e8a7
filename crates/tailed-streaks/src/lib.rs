//! Contribution calendar analysis: streaks, activity histograms, and summaries.
//!
//! Takes the two year-long windows of a contributions calendar, merges them
//! without deduplication, and derives the statistics stored on a student's
//! profile. Every function here is pure and total over well-typed input.

pub mod activity;
pub mod merge;
pub mod streaks;
pub mod summary;

pub use summary::analyze;
