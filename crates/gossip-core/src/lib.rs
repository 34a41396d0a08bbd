//! GossipGraph Core - Relation types, edge styles, and shared errors
//!
//! This crate defines the vocabulary shared by every other crate:
//! - Relation kinds and their dominance priority
//! - Relation triples produced by extraction
//! - Visual edge styles consumed by exporters
//! - Common error types
//! - Configuration management

pub mod config;
pub mod style;

pub use config::{AppConfig, ConfigError, LoggingConfig, OutputConfig, RenderConfig};
pub use style::EdgeStyle;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for GossipGraph operations
#[derive(Error, Debug)]
pub enum GossipError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid relation pattern: {0}")]
    Pattern(String),

    #[error("Unknown relation kind: {0}")]
    UnknownKind(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GossipError>;

// ============================================================================
// Relation Kinds
// ============================================================================

/// The closed set of social relations the extractor recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Love,
    Couple,
    Rival,
    Betray,
    Support,
}

impl RelationKind {
    /// All kinds, in the order their rules are applied
    pub const ALL: [RelationKind; 5] = [
        Self::Love,
        Self::Couple,
        Self::Rival,
        Self::Betray,
        Self::Support,
    ];

    /// Dominance priority, highest first
    pub const PRIORITY: [RelationKind; 5] = [
        Self::Betray,
        Self::Rival,
        Self::Couple,
        Self::Love,
        Self::Support,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Couple => "couple",
            Self::Rival => "rival",
            Self::Betray => "betray",
            Self::Support => "support",
        }
    }

    /// Position in [`RelationKind::PRIORITY`]; lower outranks higher
    pub fn rank(&self) -> usize {
        match self {
            Self::Betray => 0,
            Self::Rival => 1,
            Self::Couple => 2,
            Self::Love => 3,
            Self::Support => 4,
        }
    }

    /// Pick the dominant kind among `kinds`.
    ///
    /// Scans the priority list and returns the first kind present, so the
    /// result depends only on which kinds occur, never on their order.
    /// An empty input yields `Support`.
    pub fn dominant<'a, I>(kinds: I) -> RelationKind
    where
        I: IntoIterator<Item = &'a RelationKind>,
    {
        let present: Vec<RelationKind> = kinds.into_iter().copied().collect();
        Self::PRIORITY
            .into_iter()
            .find(|k| present.contains(k))
            .unwrap_or(Self::Support)
    }

    /// Visual style used when this kind dominates an edge
    pub fn style(&self) -> EdgeStyle {
        EdgeStyle::for_kind(*self)
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = GossipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "love" => Ok(Self::Love),
            "couple" => Ok(Self::Couple),
            "rival" => Ok(Self::Rival),
            "betray" => Ok(Self::Betray),
            "support" => Ok(Self::Support),
            _ => Err(GossipError::UnknownKind(s.to_string())),
        }
    }
}

// ============================================================================
// Relation Triples
// ============================================================================

/// A directed, typed assertion: `subject` relates to `object` as `kind`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationTriple {
    subject: String,
    object: String,
    kind: RelationKind,
}

impl RelationTriple {
    /// Build a triple from raw captures.
    ///
    /// Both names are trimmed. Returns `None` when either name is empty or
    /// both name the same entity, so a self-relation can never exist.
    pub fn new(subject: &str, object: &str, kind: RelationKind) -> Option<Self> {
        let subject = subject.trim();
        let object = object.trim();

        if subject.is_empty() || object.is_empty() || subject == object {
            return None;
        }

        Some(Self {
            subject: subject.to_string(),
            object: object.to_string(),
            kind,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

impl std::fmt::Display for RelationTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.object, self.kind)
    }
}

// ============================================================================
// Tests
// ============================================================================
