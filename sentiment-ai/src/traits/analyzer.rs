//! Sentiment analyzer trait.

use crate::types::analysis::Analysis;
use crate::Error;
use async_trait::async_trait;

/// Abstraction over sentiment scoring backends.
///
/// Implementations are stateless with respect to individual calls and perform
/// no retries; the job worker owns the retry policy. Output is normalized: the
/// label always belongs to the defined label set and the score is clamped to
/// [-1.0, 1.0].
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Score the sentiment of a piece of text.
    ///
    /// Fails when the backing provider returns a non-success status, the body
    /// is malformed, or no usable sentiment result is present.
    async fn analyze(&self, text: &str) -> Result<Analysis, Error>;

    /// Short identifier for this analyzer (e.g. "remote", "keyword", "chain").
    ///
    /// Used for logging and chain diagnostics. Lowercase, alphanumeric with
    /// underscores only.
    fn analyzer_id(&self) -> &str;
}
