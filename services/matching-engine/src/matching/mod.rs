//! Matching logic
//!
//! Strict price-time priority: best price wins, FIFO within a level, and
//! every fill executes at the maker's resting price.

pub mod algorithm;
pub mod crossing;

pub use algorithm::MatchingAlgorithm;
pub use crossing::crosses;
