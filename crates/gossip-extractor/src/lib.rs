//! GossipGraph Extractor - Relation extraction pipeline
//!
//! Turns free narrative text (Chinese, English, or a mixture) into typed
//! relation triples using an ordered set of connector patterns.

use gossip_core::RelationTriple;

/// Trait for relation extractors
pub trait RelationExtractor: Send + Sync {
    /// Extract every relation triple found in `text`.
    ///
    /// Extraction is total: text without any recognizable relation yields
    /// an empty vector.
    fn extract(&self, text: &str) -> Vec<RelationTriple>;
}

pub mod extractor;
pub mod name;
pub mod normalize;
pub mod rules;

pub use extractor::RuleBasedExtractor;
pub use normalize::normalize;
pub use rules::{RelationRule, RuleSet};

/// Extract relations from `text` with the built-in rule set
pub fn extract(text: &str) -> Vec<RelationTriple> {
    RuleBasedExtractor::new().extract(text)
}
