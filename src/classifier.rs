// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Context Classifier
 * Evaluates every context rule against an input and produces a
 * deterministically ordered match set
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

use crate::catalog::KnowledgeBase;
use crate::types::ContextMatch;

/// Classify an input against every context definition.
///
/// Contexts are not mutually exclusive; one input may match several.
/// Ordering: confidence descending, then severity descending, then
/// rule-declaration order. Stable across repeated calls.
pub fn classify(kb: &KnowledgeBase, input: &str) -> Vec<ContextMatch> {
    let mut matches: Vec<(usize, ContextMatch)> = kb
        .contexts()
        .iter()
        .enumerate()
        .filter_map(|(ordinal, definition)| {
            let outcome = definition.rule.evaluate(input);
            outcome.matched.then(|| {
                (
                    ordinal,
                    ContextMatch {
                        id: definition.id.clone(),
                        severity: definition.severity,
                        confidence: outcome.confidence,
                        description: definition.description.clone(),
                    },
                )
            })
        })
        .collect();

    sort_matches(&mut matches);
    debug!(
        "[Classifier] {} of {} contexts matched (input length {})",
        matches.len(),
        kb.context_count(),
        input.len()
    );
    matches.into_iter().map(|(_, m)| m).collect()
}

/// Parallel variant for throughput-sensitive hosts. Rules are
/// independent, so evaluation order is free; the declared-ordinal
/// sort key makes the output identical to `classify`.
pub fn classify_parallel(kb: &KnowledgeBase, input: &str) -> Vec<ContextMatch> {
    let mut matches: Vec<(usize, ContextMatch)> = kb
        .contexts()
        .par_iter()
        .enumerate()
        .filter_map(|(ordinal, definition)| {
            let outcome = definition.rule.evaluate(input);
            outcome.matched.then(|| {
                (
                    ordinal,
                    ContextMatch {
                        id: definition.id.clone(),
                        severity: definition.severity,
                        confidence: outcome.confidence,
                        description: definition.description.clone(),
                    },
                )
            })
        })
        .collect();

    sort_matches(&mut matches);
    matches.into_iter().map(|(_, m)| m).collect()
}

fn sort_matches(matches: &mut [(usize, ContextMatch)]) {
    matches.sort_by(|(ordinal_a, a), (ordinal_b, b)| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.severity.cmp(&a.severity))
            .then_with(|| ordinal_a.cmp(ordinal_b))
    });
}
