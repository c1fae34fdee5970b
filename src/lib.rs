//! Ranks ski resorts by current conditions from per-webcam ratings.
//!
//! The analysis pipeline publishes a [`document::ResultsDocument`]; this
//! crate loads it, aggregates every resort's camera ratings into per-field
//! averages and a composite score, ranks the resorts, and renders or
//! republishes the ranking.

pub mod document;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod source;
