// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Detection Rule Model
 * Tagged-variant detection rules with load-time compilation
 *
 * Rule kinds:
 * - regex (case-insensitive unless specified)
 * - substring
 * - all_of (AND, weakest-link confidence)
 * - any_of (OR, strongest-signal confidence)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Detection rule as declared in a rule-set document. New context
/// types are added by data, not by code change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionRule {
    Regex {
        pattern: String,
        #[serde(default)]
        case_sensitive: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
    Substring {
        value: String,
        #[serde(default)]
        case_sensitive: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
    AllOf {
        rules: Vec<DetectionRule>,
    },
    AnyOf {
        rules: Vec<DetectionRule>,
    },
}

impl DetectionRule {
    /// Validate a declared rule without compiling it.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            DetectionRule::Regex {
                pattern,
                confidence,
                ..
            } => {
                if pattern.is_empty() {
                    return Err("regex rule has empty pattern".to_string());
                }
                if let Err(e) = Regex::new(pattern) {
                    return Err(format!("invalid regex pattern '{}': {}", pattern, e));
                }
                validate_confidence(*confidence)
            }
            DetectionRule::Substring { value, confidence, .. } => {
                if value.is_empty() {
                    return Err("substring rule has empty value".to_string());
                }
                validate_confidence(*confidence)
            }
            DetectionRule::AllOf { rules } | DetectionRule::AnyOf { rules } => {
                if rules.is_empty() {
                    return Err("composite rule must have at least one sub-rule".to_string());
                }
                for rule in rules {
                    rule.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Compile into an evaluation-ready form. Regexes are compiled
    /// here, once, and never re-parsed on the analyze path.
    /// `default_confidence` fills in leaf rules that declare none.
    pub fn compile(&self, default_confidence: f64) -> Result<CompiledRule, String> {
        match self {
            DetectionRule::Regex {
                pattern,
                case_sensitive,
                confidence,
            } => {
                let full_pattern = if *case_sensitive {
                    pattern.clone()
                } else {
                    format!("(?i){}", pattern)
                };
                let regex = Regex::new(&full_pattern)
                    .map_err(|e| format!("invalid regex pattern '{}': {}", pattern, e))?;
                Ok(CompiledRule::Regex {
                    regex,
                    confidence: confidence.unwrap_or(default_confidence),
                })
            }
            DetectionRule::Substring {
                value,
                case_sensitive,
                confidence,
            } => Ok(CompiledRule::Substring {
                value: value.clone(),
                case_sensitive: *case_sensitive,
                confidence: confidence.unwrap_or(default_confidence),
            }),
            DetectionRule::AllOf { rules } => Ok(CompiledRule::AllOf(
                rules
                    .iter()
                    .map(|r| r.compile(default_confidence))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            DetectionRule::AnyOf { rules } => Ok(CompiledRule::AnyOf(
                rules
                    .iter()
                    .map(|r| r.compile(default_confidence))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        }
    }
}

fn validate_confidence(confidence: Option<f64>) -> Result<(), String> {
    match confidence {
        Some(c) if !(0.0..=1.0).contains(&c) => {
            Err(format!("confidence {} outside [0, 1]", c))
        }
        _ => Ok(()),
    }
}

/// Outcome of evaluating one rule against one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOutcome {
    pub matched: bool,
    pub confidence: f64,
}

impl RuleOutcome {
    fn miss() -> Self {
        Self {
            matched: false,
            confidence: 0.0,
        }
    }
}

/// Evaluation-ready rule. Pure and stateless: same rule + same input
/// always yields the same outcome.
#[derive(Debug, Clone)]
pub enum CompiledRule {
    Regex {
        regex: Regex,
        confidence: f64,
    },
    Substring {
        value: String,
        case_sensitive: bool,
        confidence: f64,
    },
    AllOf(Vec<CompiledRule>),
    AnyOf(Vec<CompiledRule>),
}

impl CompiledRule {
    pub fn evaluate(&self, input: &str) -> RuleOutcome {
        match self {
            CompiledRule::Regex { regex, confidence } => {
                // A single hit is sufficient signal; confidence is the
                // fixed base value, never proportional to match count.
                if regex.is_match(input) {
                    RuleOutcome {
                        matched: true,
                        confidence: *confidence,
                    }
                } else {
                    RuleOutcome::miss()
                }
            }
            CompiledRule::Substring {
                value,
                case_sensitive,
                confidence,
            } => {
                let hit = if *case_sensitive {
                    input.contains(value.as_str())
                } else {
                    input.to_lowercase().contains(&value.to_lowercase())
                };
                if hit {
                    RuleOutcome {
                        matched: true,
                        confidence: *confidence,
                    }
                } else {
                    RuleOutcome::miss()
                }
            }
            CompiledRule::AllOf(rules) => {
                // Weakest-link policy: all must match, confidence is
                // the minimum across branches.
                let mut min_confidence = f64::INFINITY;
                for rule in rules {
                    let outcome = rule.evaluate(input);
                    if !outcome.matched {
                        return RuleOutcome::miss();
                    }
                    min_confidence = min_confidence.min(outcome.confidence);
                }
                RuleOutcome {
                    matched: true,
                    confidence: min_confidence,
                }
            }
            CompiledRule::AnyOf(rules) => {
                // Strongest-signal policy. No short-circuit: the
                // confidence is the maximum over all matched branches.
                let mut max_confidence: Option<f64> = None;
                for rule in rules {
                    let outcome = rule.evaluate(input);
                    if outcome.matched {
                        max_confidence = Some(match max_confidence {
                            Some(c) => c.max(outcome.confidence),
                            None => outcome.confidence,
                        });
                    }
                }
                match max_confidence {
                    Some(confidence) => RuleOutcome {
                        matched: true,
                        confidence,
                    },
                    None => RuleOutcome::miss(),
                }
            }
        }
    }
}
