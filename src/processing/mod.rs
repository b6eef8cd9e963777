//! Matching engine: technology extraction, capability projection, scoring
//! and gap insights

pub mod dictionary;
pub mod extractor;
pub mod aggregator;
pub mod scorer;
pub mod insights;
pub mod risk;
pub mod analyzer;
