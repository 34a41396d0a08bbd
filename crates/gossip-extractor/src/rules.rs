//! Relation rule set
//!
//! An ordered list of connector patterns, grouped by relation kind
//! (love, couple, rival, betray, support). Within a kind the English
//! variants come first, then the Chinese ones. Every pattern binds a
//! `subject` and an `object` name around a fixed connector vocabulary.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Regex, RegexBuilder};

use crate::name::{name_group, Span};
use gossip_core::{GossipError, RelationKind, Result};

// ============================================================================
// Rule Table
// ============================================================================

/// Script a rule's connector vocabulary is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Matched case-insensitively
    Latin,
    Han,
}

/// `{S}` and `{O}` mark where the subject and object names go
const RULE_TABLE: &[(&str, RelationKind, Script, &str)] = &[
    // love
    (
        "love_en",
        RelationKind::Love,
        Script::Latin,
        r"{S}\s+(?:loves?|likes|is in love with)\s+{O}",
    ),
    (
        "love_zh",
        RelationKind::Love,
        Script::Han,
        r"{S}\s*(?:喜欢|爱上了?|爱了|暗恋)\s*{O}",
    ),
    // couple
    (
        "couple_en",
        RelationKind::Couple,
        Script::Latin,
        r"{S}\s+(?:is|are)?\s*(?:together with|with|dating|married to|in a relationship with)\s+{O}",
    ),
    (
        "couple_zh",
        RelationKind::Couple,
        Script::Han,
        r"{S}\s*(?:和|与)\s*{O}\s*(?:在一起|成亲|结婚)",
    ),
    // rival
    (
        "rival_en_jealous",
        RelationKind::Rival,
        Script::Latin,
        r"{S}\s+(?:is\s+)?(?:jealous|envious)\s*(?:of\s+)?{O}",
    ),
    (
        "rival_en_hostile",
        RelationKind::Rival,
        Script::Latin,
        r"{S}\s+(?:hates?|dislikes?|is\s+hostile\s+(?:to|towards)|feuds?\s+with|is\s+against)\s+{O}",
    ),
    (
        "rival_zh",
        RelationKind::Rival,
        Script::Han,
        r"{S}\s*(?:嫉妒|吃醋|妒忌|敌视|仇恨)\s*{O}",
    ),
    // betray
    (
        "betray_en",
        RelationKind::Betray,
        Script::Latin,
        r"{S}\s+(?:betray(?:ed|s)?|backstabbed|framed|set\s+up|cheated\s+on)\s+{O}",
    ),
    (
        "betray_zh",
        RelationKind::Betray,
        Script::Han,
        r"{S}\s*(?:背叛|陷害|害)了?\s*{O}",
    ),
    // support
    (
        "support_en",
        RelationKind::Support,
        Script::Latin,
        r"{S}\s+(?:supports?|helps?|protects?|backs|stands\s+by)\s+{O}",
    ),
    (
        "support_zh",
        RelationKind::Support,
        Script::Han,
        r"{S}\s*(?:支持|帮助|维护|偏向)\s*{O}",
    ),
];

// ============================================================================
// Rules
// ============================================================================

/// A single (pattern, kind) rule
#[derive(Debug, Clone)]
pub struct RelationRule {
    name: &'static str,
    kind: RelationKind,
    script: Script,
    pattern: Regex,
}

impl RelationRule {
    /// Compile a rule from a `{S}`/`{O}` template
    pub fn compile(
        name: &'static str,
        kind: RelationKind,
        script: Script,
        template: &str,
    ) -> Result<Self> {
        let source = template
            .replace("{S}", &name_group("subject", Span::Shortest))
            .replace("{O}", &name_group("object", Span::Longest));

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(script == Script::Latin)
            .build()
            .map_err(|e| GossipError::Pattern(format!("{name}: {e}")))?;

        Ok(Self {
            name,
            kind,
            script,
            pattern,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// All non-overlapping matches in `text`, in position order
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CaptureMatches<'r, 't> {
        self.pattern.captures_iter(text)
    }
}

/// The ordered, immutable collection of relation rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<RelationRule>,
}

static BUILTIN: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    Arc::new(RuleSet::builtin().expect("built-in relation patterns compile"))
});

impl RuleSet {
    /// Compile the built-in bilingual rule table
    pub fn builtin() -> Result<Self> {
        let rules = RULE_TABLE
            .iter()
            .map(|(name, kind, script, template)| {
                RelationRule::compile(*name, *kind, *script, template)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The process-wide built-in rule set, compiled on first use
    pub fn shared() -> Arc<RuleSet> {
        Arc::clone(&BUILTIN)
    }

    /// Build a rule set from already compiled rules, kept in the given order
    pub fn from_rules(rules: Vec<RelationRule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RelationRule;
    type IntoIter = std::slice::Iter<'a, RelationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
