// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Severity Aggregator
 * Reduces a match set to one overall severity and confidence
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::{ContextMatch, Severity};

/// Aggregate matched contexts into the overall verdict.
///
/// Both values are ceilings, not averages: the risk posed by an input
/// is driven by its worst applicable context, and a single critical
/// match must not be diluted by low-confidence co-matches. Empty
/// match set yields (`Severity::None`, 0.0).
pub fn aggregate(matches: &[ContextMatch]) -> (Severity, f64) {
    let overall_severity = matches
        .iter()
        .map(|m| m.severity)
        .max()
        .unwrap_or(Severity::None);
    let overall_confidence = matches.iter().map(|m| m.confidence).fold(0.0, f64::max);
    (overall_severity, overall_confidence)
}
