// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Knowledge Base
 * Typed rule set and payload catalog with all-or-nothing validation
 *
 * Built once at startup from external documents (JSON/YAML/TOML) or
 * from the shipped built-in data; read-only for the rest of the
 * process lifetime.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::{EngineError, EngineResult};
use crate::rules::{CompiledRule, DetectionRule};
use crate::types::Severity;

/// One context entry as declared in a rule-set document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_confidence: Option<f64>,
    pub rule: DetectionRule,
}

/// Rule-set document: context identifiers mapped to detection rules
/// and severity metadata. Declaration order is significant and is
/// preserved through loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub contexts: Vec<ContextEntry>,
}

/// Payload document: context identifier to ordered payload list. List
/// order is the curated priority order within that context.
pub type PayloadDocument = HashMap<String, Vec<String>>;

/// Compiled, immutable context definition.
#[derive(Debug, Clone)]
pub struct ContextDefinition {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub description: String,
    pub rule: CompiledRule,
}

/// The immutable knowledge base the engine classifies against.
#[derive(Debug)]
pub struct KnowledgeBase {
    version: String,
    contexts: Vec<ContextDefinition>,
    payloads: HashMap<String, Vec<String>>,
}

impl KnowledgeBase {
    /// Build a knowledge base from already-parsed documents.
    ///
    /// Load is all-or-nothing: any structural or referential
    /// inconsistency fails the whole load with `MalformedData`;
    /// there is no partial or best-effort mode.
    pub fn from_documents(
        rules: RuleSetDocument,
        payloads: PayloadDocument,
    ) -> EngineResult<Self> {
        if rules.contexts.is_empty() {
            return Err(EngineError::malformed("rule set declares no contexts"));
        }

        let mut seen_ids: HashSet<String> = HashSet::new();
        for entry in &rules.contexts {
            if entry.id.is_empty() {
                return Err(EngineError::malformed("context with empty identifier"));
            }
            if !seen_ids.insert(entry.id.clone()) {
                return Err(EngineError::malformed(format!(
                    "duplicate context identifier '{}'",
                    entry.id
                )));
            }
            if entry.severity == Severity::None {
                return Err(EngineError::malformed(format!(
                    "context '{}' declares severity 'none', which is reserved for the no-detection case",
                    entry.id
                )));
            }
            if let Some(c) = entry.base_confidence {
                if !(0.0..=1.0).contains(&c) {
                    return Err(EngineError::malformed(format!(
                        "context '{}' base confidence {} outside [0, 1]",
                        entry.id, c
                    )));
                }
            }
            entry.rule.validate().map_err(|e| {
                EngineError::malformed(format!("context '{}': {}", entry.id, e))
            })?;
        }

        // Every payload entry must reference a declared context.
        for context_id in payloads.keys() {
            if !seen_ids.contains(context_id) {
                return Err(EngineError::malformed(format!(
                    "payload catalog references unknown context '{}'",
                    context_id
                )));
            }
        }

        let mut contexts = Vec::with_capacity(rules.contexts.len());
        for entry in rules.contexts {
            let default_confidence = entry.base_confidence.unwrap_or(1.0);
            let rule = entry.rule.compile(default_confidence).map_err(|e| {
                EngineError::malformed(format!("context '{}': {}", entry.id, e))
            })?;
            if !payloads.contains_key(&entry.id) {
                warn!("[KnowledgeBase] Context '{}' has no payload entry", entry.id);
            }
            contexts.push(ContextDefinition {
                id: entry.id,
                title: entry.title,
                severity: entry.severity,
                description: entry.description,
                rule,
            });
        }

        let version = rules.version.unwrap_or_else(|| "unversioned".to_string());
        info!(
            "[KnowledgeBase] Loaded {} contexts, {} payload lists (version {})",
            contexts.len(),
            payloads.len(),
            version
        );

        Ok(Self {
            version,
            contexts,
            payloads,
        })
    }

    /// Context definitions in declared order.
    pub fn contexts(&self) -> &[ContextDefinition] {
        &self.contexts
    }

    /// Curated payload list for one context, in priority order.
    pub fn payloads_for(&self, context_id: &str) -> Option<&[String]> {
        self.payloads.get(context_id).map(|p| p.as_slice())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }
}

/// Loads knowledge-base documents from disk, with format detection by
/// file extension.
pub struct KnowledgeBaseLoader {
    rules_path: PathBuf,
    payloads_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Toml,
    Json,
}

impl KnowledgeBaseLoader {
    pub fn new<P: AsRef<Path>>(rules_path: P, payloads_path: P) -> Self {
        Self {
            rules_path: rules_path.as_ref().to_path_buf(),
            payloads_path: payloads_path.as_ref().to_path_buf(),
        }
    }

    fn detect_format(path: &Path) -> Result<DocumentFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine document format for {:?}", path))?;

        match extension {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(anyhow::anyhow!("Unsupported document format: {}", extension)),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {:?}", path))?;

        match format {
            DocumentFormat::Yaml => {
                serde_yaml::from_str(&content).context("Failed to parse YAML document")
            }
            DocumentFormat::Toml => {
                toml::from_str(&content).context("Failed to parse TOML document")
            }
            DocumentFormat::Json => {
                serde_json::from_str(&content).context("Failed to parse JSON document")
            }
        }
    }

    /// Load and validate both documents into a knowledge base.
    pub fn load(&self) -> Result<KnowledgeBase> {
        let rules: RuleSetDocument = Self::parse(&self.rules_path)?;
        let payloads: PayloadDocument = Self::parse(&self.payloads_path)?;

        let kb = KnowledgeBase::from_documents(rules, payloads)?;
        info!(
            "[Loader] Knowledge base ready from {:?} + {:?}",
            self.rules_path, self.payloads_path
        );
        Ok(kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_rules() -> RuleSetDocument {
        RuleSetDocument {
            version: Some("test".to_string()),
            contexts: vec![ContextEntry {
                id: "html_content".to_string(),
                title: "HTML Content".to_string(),
                severity: Severity::Critical,
                description: "Script tag injection in HTML content".to_string(),
                base_confidence: Some(0.95),
                rule: DetectionRule::Regex {
                    pattern: r"<script[^>]*>".to_string(),
                    case_sensitive: false,
                    confidence: None,
                },
            }],
        }
    }

    #[test]
    fn test_from_documents_accepts_minimal() {
        let mut payloads = PayloadDocument::new();
        payloads.insert(
            "html_content".to_string(),
            vec!["<script>alert('XSS')</script>".to_string()],
        );
        let kb = KnowledgeBase::from_documents(minimal_rules(), payloads).unwrap();
        assert_eq!(kb.context_count(), 1);
        assert_eq!(kb.version(), "test");
        assert_eq!(kb.payloads_for("html_content").unwrap().len(), 1);
        assert!(kb.payloads_for("missing").is_none());
    }

    #[test]
    fn test_unknown_payload_context_rejected() {
        let mut payloads = PayloadDocument::new();
        payloads.insert("url_context".to_string(), vec!["javascript:alert(1)".to_string()]);
        let err = KnowledgeBase::from_documents(minimal_rules(), payloads).unwrap_err();
        assert!(matches!(err, EngineError::MalformedData { .. }));
        assert!(err.to_string().contains("url_context"));
    }

    #[test]
    fn test_duplicate_context_id_rejected() {
        let mut rules = minimal_rules();
        rules.contexts.push(rules.contexts[0].clone());
        let err = KnowledgeBase::from_documents(rules, PayloadDocument::new()).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_rule_set_rejected() {
        let rules = RuleSetDocument {
            version: None,
            contexts: vec![],
        };
        assert!(KnowledgeBase::from_documents(rules, PayloadDocument::new()).is_err());
    }

    #[test]
    fn test_reserved_none_severity_rejected() {
        let mut rules = minimal_rules();
        rules.contexts[0].severity = Severity::None;
        let err = KnowledgeBase::from_documents(rules, PayloadDocument::new()).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_invalid_regex_rejected_at_load() {
        let mut rules = minimal_rules();
        rules.contexts[0].rule = DetectionRule::Regex {
            pattern: "[broken".to_string(),
            case_sensitive: false,
            confidence: None,
        };
        let err = KnowledgeBase::from_documents(rules, PayloadDocument::new()).unwrap_err();
        assert!(matches!(err, EngineError::MalformedData { .. }));
    }

    #[test]
    fn test_context_without_payloads_is_allowed() {
        let kb = KnowledgeBase::from_documents(minimal_rules(), PayloadDocument::new()).unwrap();
        assert!(kb.payloads_for("html_content").is_none());
    }
}
