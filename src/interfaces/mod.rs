//! Presentation of submission results.

pub mod presenter;
