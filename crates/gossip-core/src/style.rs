//! Edge styles for graph export
//!
//! Maps each relation kind to the Graphviz attributes used when that kind
//! dominates an edge.

use serde::Serialize;

use crate::RelationKind;

/// Visual attributes of a rendered edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    /// Stroke color (hex RGB)
    pub color: &'static str,
    /// Pen width in points
    pub pen_width: u8,
    /// Graphviz line style (`solid`, `bold`, `dashed`, `dotted`)
    pub line_style: &'static str,
    /// Graphviz arrowhead shape
    pub arrowhead: &'static str,
}

impl EdgeStyle {
    /// Style for a relation kind
    pub const fn for_kind(kind: RelationKind) -> Self {
        match kind {
            // magenta
            RelationKind::Love => Self::new("#d81b60", 2, "solid", "normal"),
            // heavy purple
            RelationKind::Couple => Self::new("#8e24aa", 3, "bold", "normal"),
            // blue dashes
            RelationKind::Rival => Self::new("#3949ab", 2, "dashed", "normal"),
            // red with a sharp arrow
            RelationKind::Betray => Self::new("#e53935", 3, "solid", "vee"),
            // green dots
            RelationKind::Support => Self::new("#00897b", 2, "dotted", "normal"),
        }
    }

    /// Style for a kind given by name; unknown names get the `support` style
    pub fn for_name(name: &str) -> Self {
        name.parse::<RelationKind>()
            .map(Self::for_kind)
            .unwrap_or_else(|_| Self::for_kind(RelationKind::Support))
    }

    const fn new(
        color: &'static str,
        pen_width: u8,
        line_style: &'static str,
        arrowhead: &'static str,
    ) -> Self {
        Self {
            color,
            pen_width,
            line_style,
            arrowhead,
        }
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::for_kind(RelationKind::Support)
    }
}
