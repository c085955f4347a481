// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Analysis Facade
 * Single entry point combining classification, aggregation, and
 * suggestion ranking into one result object
 *
 * The engine is stateless and reentrant: the knowledge base is
 * read-only after construction and shared without locking across
 * concurrent callers. Debouncing of high-frequency invocations is
 * the host's concern, not the engine's.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::builtin;
use crate::catalog::KnowledgeBase;
use crate::classifier;
use crate::errors::{EngineError, EngineResult};
use crate::scoring;
use crate::suggestions;
use crate::types::{AnalysisResult, AnalyzeOptions, AnalyzeRequest};

/// The context analysis engine. Construct once, share by reference.
pub struct AnalysisEngine {
    kb: Arc<KnowledgeBase>,
}

impl AnalysisEngine {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb: Arc::new(kb) }
    }

    /// Engine backed by the shipped knowledge base.
    pub fn with_builtin() -> EngineResult<Self> {
        Ok(Self::new(builtin::knowledge_base()?))
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Analyze one input. Short or empty input is not an error: below
    /// `min_input_length` (after trimming) the call short-circuits to
    /// an empty result, bounding noise from keystroke-driven callers.
    ///
    /// Does not log, persist, or transmit the analyzed text.
    pub fn analyze(&self, input: &str, options: &AnalyzeOptions) -> AnalysisResult {
        let input_length = input.chars().count();
        if input.trim().chars().count() < options.min_input_length {
            debug!(
                "[Engine] Input below minimum length ({} < {}), skipping",
                input_length, options.min_input_length
            );
            return AnalysisResult::empty(input_length);
        }

        let contexts = classifier::classify(&self.kb, input);
        let (overall_severity, overall_confidence) = scoring::aggregate(&contexts);
        let suggestions = suggestions::rank(&contexts, &self.kb, options);

        debug!(
            "[Engine] {} contexts, overall severity {}, {} suggestions",
            contexts.len(),
            overall_severity,
            suggestions.len()
        );

        AnalysisResult {
            contexts,
            overall_severity,
            overall_confidence,
            suggestions,
            timestamp: Utc::now(),
            input_length,
        }
    }

    /// Analyze a request that arrived across a serialization
    /// boundary, where the text field is nullable. An absent text is
    /// a caller bug (`InvalidInput`); legitimate text, including the
    /// empty string, never triggers it.
    pub fn analyze_request(&self, request: &AnalyzeRequest) -> EngineResult<AnalysisResult> {
        let text = request.text.as_deref().ok_or(EngineError::InvalidInput)?;
        let options = request.options.clone().unwrap_or_default();
        Ok(self.analyze(text, &options))
    }
}

/// Shared handle owning the load-before-use lifecycle.
///
/// Replaces any ambient "loaded data" global: hosts construct one
/// handle, install an engine when data is ready, and hand the handle
/// to every caller. Analysis before `install` is `DataNotLoaded`.
pub struct EngineHandle {
    inner: RwLock<Option<Arc<AnalysisEngine>>>,
}

impl EngineHandle {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Install (or replace) the engine. Callers holding an `Arc` to
    /// the previous engine keep a consistent view until they drop it.
    pub fn install(&self, engine: AnalysisEngine) {
        *self.inner.write() = Some(Arc::new(engine));
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_some()
    }

    /// The current engine, for callers that batch several calls.
    pub fn engine(&self) -> EngineResult<Arc<AnalysisEngine>> {
        self.inner.read().clone().ok_or(EngineError::DataNotLoaded)
    }

    pub fn analyze(&self, input: &str, options: &AnalyzeOptions) -> EngineResult<AnalysisResult> {
        Ok(self.engine()?.analyze(input, options))
    }

    pub fn analyze_request(&self, request: &AnalyzeRequest) -> EngineResult<AnalysisResult> {
        self.engine()?.analyze_request(request)
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}
