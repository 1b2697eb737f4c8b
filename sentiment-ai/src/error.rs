//! Error types for sentiment analysis operations.

use std::fmt;

/// Universal error type that abstracts provider-specific failures into common
/// variants.
///
/// All analyzer implementations map their native errors to these variants,
/// preserving context while keeping callers provider-agnostic. The analyzer
/// layer performs no retries; callers own the retry policy.
#[derive(Debug)]
pub enum Error {
    /// Network connectivity issues, DNS failures, or connection timeouts.
    /// Typically transient; the job worker retries these up to its attempt cap.
    Network(String),

    /// The provider answered with a non-success status or an explicit error body.
    Provider(String),

    /// The provider response was malformed, carried no usable sentiment result,
    /// or contained a label outside the recognized label set.
    InvalidResponse(String),

    /// The input text was empty; remote providers reject empty submissions.
    EmptyInput,

    /// Missing or invalid analyzer configuration (e.g. a bad API URL).
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Error::EmptyInput => write!(f, "Sentiment text is empty"),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
