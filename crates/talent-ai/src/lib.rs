//! Lifecycle engine for a two-sided talent marketplace: job postings,
//! seeker applications, review tracking, and the operations console API.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
