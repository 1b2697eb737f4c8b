//! Sentiment analysis abstraction layer for review scoring providers.
//!
//! This crate provides trait-based abstractions for sentiment scoring:
//! - An `Analyzer` trait implemented by remote scoring clients
//! - A deterministic keyword analyzer for tests and offline operation
//! - A chaining analyzer that falls through an ordered provider list
//!
//! The design is provider-agnostic, enabling applications to swap between
//! different scoring services without changing orchestration code.

pub mod chain;
pub mod error;
pub mod keyword;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use chain::ChainAnalyzer;
pub use error::Error;
pub use keyword::KeywordAnalyzer;
pub use traits::analyzer::Analyzer;
pub use types::analysis::{Analysis, Label};
