//! Application intake, review-status tracking, and the reviewer note
//! ledger.

pub mod domain;
pub mod intake;
pub mod review;
pub mod router;

#[cfg(test)]
mod tests;
