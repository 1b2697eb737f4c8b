//! Chaining analyzer that falls through an ordered provider list.

use crate::traits::analyzer::Analyzer;
use crate::types::analysis::Analysis;
use crate::Error;
use async_trait::async_trait;
use log::*;
use std::sync::Arc;

/// Tries each wrapped analyzer in order and returns the first success.
///
/// If every analyzer fails, a neutral default is returned instead of an error.
/// This trades precision for robustness; deployments that prefer hard failures
/// should use a single analyzer directly.
pub struct ChainAnalyzer {
    analyzers: Vec<Arc<dyn Analyzer>>,
}

impl ChainAnalyzer {
    pub fn new(analyzers: Vec<Arc<dyn Analyzer>>) -> Self {
        Self { analyzers }
    }
}

#[async_trait]
impl Analyzer for ChainAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis, Error> {
        for analyzer in &self.analyzers {
            match analyzer.analyze(text).await {
                Ok(analysis) => {
                    debug!("Analyzer '{}' produced a result", analyzer.analyzer_id());
                    return Ok(analysis);
                }
                Err(e) => {
                    warn!("Analyzer '{}' failed: {}", analyzer.analyzer_id(), e);
                }
            }
        }

        warn!("All analyzers in the chain failed, returning neutral default");
        Ok(Analysis::neutral())
    }

    fn analyzer_id(&self) -> &str {
        "chain"
    }
}
