//! Rule-based relation extractor
//!
//! Normalizes the text once, then applies every rule in rule-set order.
//! Output is rule-major: all matches of the first rule (in text order),
//! then all matches of the second, and so on.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::normalize::normalize;
use crate::rules::RuleSet;
use crate::RelationExtractor;
use gossip_core::RelationTriple;

/// Extractor driven by an ordered [`RuleSet`]
#[derive(Debug, Clone)]
pub struct RuleBasedExtractor {
    rules: Arc<RuleSet>,
}

impl RuleBasedExtractor {
    /// Create an extractor over the shared built-in rules
    pub fn new() -> Self {
        Self {
            rules: RuleSet::shared(),
        }
    }

    /// Create an extractor over a custom rule set
    pub fn with_rules(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str) -> Vec<RelationTriple> {
        let normalized = normalize(text);
        let mut triples = Vec::new();

        for rule in self.rules.iter() {
            for caps in rule.captures_iter(&normalized) {
                let (Some(subject), Some(object)) = (caps.name("subject"), caps.name("object"))
                else {
                    continue;
                };

                // Self-relations and blank captures are dropped here
                match RelationTriple::new(subject.as_str(), object.as_str(), rule.kind()) {
                    Some(triple) => {
                        trace!(rule = rule.name(), %triple, "matched relation");
                        triples.push(triple);
                    }
                    None => {
                        trace!(rule = rule.name(), subject = subject.as_str(), "discarded match");
                    }
                }
            }
        }

        debug!(
            chars = normalized.chars().count(),
            triples = triples.len(),
            "extracted relations"
        );
        triples
    }
}
