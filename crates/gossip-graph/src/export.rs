//! Graph export
//!
//! Writes a [`RelationGraph`] as a Graphviz DOT description or as JSON.
//! Vertices get ASCII-safe ids (`n1`, `n2`, ...) and carry the original
//! name as their label, so Chinese names survive any Graphviz build.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::RelationGraph;
use gossip_core::{GossipError, Result};

/// Default separator between kinds in an edge label
pub const DEFAULT_DELIMITER: &str = "|";

/// DOT exporter
#[derive(Debug, Clone)]
pub struct DotExporter {
    delimiter: String,
}

impl DotExporter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Use a custom separator for merged edge labels
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Write the DOT description to `out`
    pub fn write_dot<W: Write>(&self, graph: &RelationGraph, out: &mut W) -> io::Result<()> {
        writeln!(out, "strict digraph G {{")?;

        for (i, name) in graph.entities().enumerate() {
            writeln!(
                out,
                "  {} [ label={} shape=\"box\" style=\"rounded\" ];",
                vertex_id(i),
                quote(name)
            )?;
        }

        for e in graph.edges() {
            let (Some(from), Some(to)) = (graph.entity_position(e.from), graph.entity_position(e.to))
            else {
                continue;
            };
            let style = e.edge.dominant().style();
            writeln!(
                out,
                "  {} -> {} [ label={} color={} penwidth=\"{}\" style={} arrowhead={} ];",
                vertex_id(from),
                vertex_id(to),
                quote(&e.edge.label(&self.delimiter)),
                quote(style.color),
                style.pen_width,
                quote(style.line_style),
                quote(style.arrowhead),
            )?;
        }

        writeln!(out, "}}")
    }

    /// Render the DOT description into a string
    pub fn to_dot_string(&self, graph: &RelationGraph) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dot(graph, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the DOT description to a file, replacing any existing one
    pub fn export_to_file(&self, graph: &RelationGraph, path: &Path) -> Result<()> {
        let io_err = |source| GossipError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.write_dot(graph, &mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        info!(
            path = %path.display(),
            entities = graph.entity_count(),
            edges = graph.edge_count(),
            "exported DOT graph"
        );
        Ok(())
    }
}

impl Default for DotExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize the graph as pretty-printed JSON
pub fn to_json(graph: &RelationGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).map_err(|e| GossipError::Serialization(e.to_string()))
}

/// Write the graph as JSON to a file
pub fn export_json_to_file(graph: &RelationGraph, path: &Path) -> Result<()> {
    let json = to_json(graph)?;
    std::fs::write(path, json).map_err(|source| GossipError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = %path.display(), "exported JSON graph");
    Ok(())
}

fn vertex_id(position: usize) -> String {
    format!("n{}", position + 1)
}

/// Double-quote a DOT attribute value
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge;
    use gossip_core::{RelationKind, RelationTriple};

    fn triple(s: &str, o: &str, k: RelationKind) -> RelationTriple {
        RelationTriple::new(s, o, k).unwrap()
    }

    #[test]
    fn test_dot_output() {
        let graph = merge(vec![
            triple("甄嬛", "果郡王", RelationKind::Love),
            triple("安陵容", "甄嬛", RelationKind::Rival),
            triple("安陵容", "甄嬛", RelationKind::Betray),
        ]);

        let dot = DotExporter::new().to_dot_string(&graph);
        let expected = "\
strict digraph G {
  n1 [ label=\"甄嬛\" shape=\"box\" style=\"rounded\" ];
  n2 [ label=\"果郡王\" shape=\"box\" style=\"rounded\" ];
  n3 [ label=\"安陵容\" shape=\"box\" style=\"rounded\" ];
  n1 -> n2 [ label=\"love\" color=\"#d81b60\" penwidth=\"2\" style=\"solid\" arrowhead=\"normal\" ];
  n3 -> n1 [ label=\"rival|betray\" color=\"#e53935\" penwidth=\"3\" style=\"solid\" arrowhead=\"vee\" ];
}
";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_custom_delimiter() {
        let graph = merge(vec![
            triple("A", "B", RelationKind::Support),
            triple("A", "B", RelationKind::Love),
        ]);

        let dot = DotExporter::new().with_delimiter(" / ").to_dot_string(&graph);
        assert!(dot.contains("label=\"support / love\""));
        assert!(dot.contains("color=\"#d81b60\""));
    }

    #[test]
    fn test_empty_graph_dot() {
        let dot = DotExporter::default().to_dot_string(&RelationGraph::new());
        assert_eq!(dot, "strict digraph G {\n}\n");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");
        let graph = merge(vec![triple("A", "B", RelationKind::Couple)]);

        DotExporter::new().export_to_file(&graph, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("strict digraph G {"));
        assert!(written.contains("n1 -> n2"));
        assert!(written.contains("style=\"bold\""));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("graph.dot");
        let graph = merge(vec![triple("A", "B", RelationKind::Couple)]);

        let err = DotExporter::new().export_to_file(&graph, &path).unwrap_err();
        assert!(matches!(err, GossipError::Io { .. }));
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let graph = merge(vec![triple("A", "B", RelationKind::Love)]);

        export_json_to_file(&graph, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["edges"][0]["dominant"], "love");
        assert_eq!(value["entities"].as_array().unwrap().len(), 2);
    }
}
