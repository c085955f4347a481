// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Suggestion Ranker
 * Selects a bounded payload list for the top-confidence contexts
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::catalog::KnowledgeBase;
use crate::types::{AnalyzeOptions, ContextMatch};

/// Rank payload suggestions for an already-sorted match set.
///
/// Only the top `max_suggestion_contexts` matches contribute, each
/// with the first `payloads_per_context` entries of its catalog list
/// in curated order (no re-ranking within a context). The
/// concatenation is truncated to `max_suggestions`, so the result
/// always favors the highest-confidence context first. No matches,
/// no suggestions.
pub fn rank(
    matches: &[ContextMatch],
    kb: &KnowledgeBase,
    options: &AnalyzeOptions,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    for context_match in matches.iter().take(options.max_suggestion_contexts) {
        if let Some(payloads) = kb.payloads_for(&context_match.id) {
            suggestions.extend(
                payloads
                    .iter()
                    .take(options.payloads_per_context)
                    .cloned(),
            );
        }
    }

    suggestions.truncate(options.max_suggestions);
    suggestions
}
