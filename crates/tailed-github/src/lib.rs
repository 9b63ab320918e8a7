//! GitHub contributions calendar retrieval.
//!
//! Fetches the two adjacent one-year windows of a user's contribution
//! calendar from the GitHub GraphQL API. The windows are requested
//! concurrently, and a window that fails is replaced by an empty one so a
//! profile refresh always gets something to analyze.

pub mod calendar;
pub mod client;
pub mod fetch;
