//! Application layer orchestrating payment submissions.
//!
//! `SubmissionController` owns the submission state machine defined in
//! `state` and hands requests to whichever `DecisionService` it was built with.

pub mod controller;
pub mod state;
