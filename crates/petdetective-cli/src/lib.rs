//! Pet Detective CLI library.
//!
//! Holds argument-to-request conversion and output formatting for the
//! `petdetective-cli` binary so both can be tested without spawning it.

pub mod output;
pub mod solve;
