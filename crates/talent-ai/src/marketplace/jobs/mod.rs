//! Job posting lifecycle: slug allocation, publication state, and the
//! console CRUD surface.

pub mod domain;
pub mod router;
pub mod service;
pub mod slug;

#[cfg(test)]
mod tests;
