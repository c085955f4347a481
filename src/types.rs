// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity tier assigned to a matched injection context.
///
/// `None` exists only for the no-detection case and sorts below every
/// real tier; variant order drives `Ord`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::None
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::None => write!(f, "none"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// One matched injection context. Immutable value object; confidence
/// is derived from rule evaluation and never adjusted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextMatch {
    pub id: String,
    pub severity: Severity,
    pub confidence: f64,
    pub description: String,
}

/// Aggregate result of one analysis call.
///
/// Field names and ordering are a compatibility contract for
/// consumers on the other side of a process or network boundary.
/// Carries the input's length rather than the raw text so results can
/// be logged or forwarded without re-exposing secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub contexts: Vec<ContextMatch>,
    pub overall_severity: Severity,
    pub overall_confidence: f64,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub input_length: usize,
}

impl AnalysisResult {
    /// Result for input below the minimum analyzable length.
    pub fn empty(input_length: usize) -> Self {
        Self {
            contexts: Vec::new(),
            overall_severity: Severity::None,
            overall_confidence: 0.0,
            suggestions: Vec::new(),
            timestamp: Utc::now(),
            input_length,
        }
    }
}

/// Recognized analysis options with their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzeOptions {
    /// Inputs shorter than this (after trimming) are never analyzed,
    /// to bound noise on keystroke-triggered callers.
    #[serde(default = "default_min_input_length")]
    pub min_input_length: usize,

    /// Only the top N matched contexts contribute payload suggestions.
    #[serde(default = "default_max_suggestion_contexts")]
    pub max_suggestion_contexts: usize,

    /// Payloads taken from each contributing context, in catalog order.
    #[serde(default = "default_payloads_per_context")]
    pub payloads_per_context: usize,

    /// Hard cap on the concatenated suggestion list.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_min_input_length() -> usize {
    3
}

fn default_max_suggestion_contexts() -> usize {
    2
}

fn default_payloads_per_context() -> usize {
    3
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            min_input_length: 3,
            max_suggestion_contexts: 2,
            payloads_per_context: 3,
            max_suggestions: 5,
        }
    }
}

/// Analysis request as received across a serialization boundary.
/// `text` is optional there; an absent value is a caller bug, never
/// produced by legitimate input (empty strings included).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<AnalyzeOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(serde_json::to_string(&Severity::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_options_defaults() {
        let opts: AnalyzeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, AnalyzeOptions::default());
        assert_eq!(opts.min_input_length, 3);
        assert_eq!(opts.max_suggestion_contexts, 2);
        assert_eq!(opts.payloads_per_context, 3);
        assert_eq!(opts.max_suggestions, 5);
    }

    #[test]
    fn test_empty_result_shape() {
        let result = AnalysisResult::empty(2);
        assert!(result.contexts.is_empty());
        assert_eq!(result.overall_severity, Severity::None);
        assert_eq!(result.overall_confidence, 0.0);
        assert!(result.suggestions.is_empty());
        assert_eq!(result.input_length, 2);
    }
}
