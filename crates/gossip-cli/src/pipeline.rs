//! Text-to-graph pipeline driven by the CLI
//!
//! extract -> merge -> export -> (optionally) render

use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use tracing::info;

use gossip_extractor::RelationExtractor;
use gossip_graph::{export, DotExporter, RelationGraph};
use gossip_render::RenderManager;

/// Built-in passage used by `gossip demo`
pub const DEMO_TEXT: &str = "ZhenHuan loves King GuoJun. \
    YongZheng loves ZhenHuan. \
    HuaFei is jealous of ZhenHuan. \
    AnLingRong betrayed ZhenHuan. \
    ZhenHuan is together with YongZheng. \
    King GuoJun is hostile to YongZheng. \
    ShenMeiZhuang supports ZhenHuan.";

/// Graph description format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Dot,
    Json,
}

/// One extraction + export run
#[derive(Debug, Clone)]
pub struct GraphJob {
    pub out: PathBuf,
    /// Image to render; `None` skips rendering
    pub image: Option<PathBuf>,
    pub format: OutputFormat,
    pub delimiter: String,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub out: PathBuf,
    /// Set only when an image was actually rendered
    pub image: Option<PathBuf>,
    pub triples: usize,
    pub entities: usize,
    pub edges: usize,
}

impl ExportSummary {
    /// Line printed after a successful run
    pub fn message(&self) -> String {
        match &self.image {
            Some(image) => format!("Generated {} & {}", self.out.display(), image.display()),
            None => format!("Generated {}", self.out.display()),
        }
    }
}

/// Run the whole pipeline over `text`
pub fn run(
    text: &str,
    job: &GraphJob,
    extractor: &dyn RelationExtractor,
    renderer: &RenderManager,
) -> anyhow::Result<ExportSummary> {
    let triples = extractor.extract(text);
    let triple_count = triples.len();
    let graph = RelationGraph::merge(triples);

    info!(
        triples = triple_count,
        entities = graph.entity_count(),
        edges = graph.edge_count(),
        "built relation graph"
    );

    let written = match job.format {
        OutputFormat::Dot => DotExporter::new()
            .with_delimiter(job.delimiter.clone())
            .export_to_file(&graph, &job.out),
        OutputFormat::Json => export::export_json_to_file(&graph, &job.out),
    };
    written.with_context(|| format!("failed to write graph to {}", job.out.display()))?;

    // Only DOT output can be handed to Graphviz
    let image = match (&job.image, job.format) {
        (Some(image), OutputFormat::Dot) if renderer.render(&job.out, image) => {
            Some(image.clone())
        }
        _ => None,
    };

    Ok(ExportSummary {
        out: job.out.clone(),
        image,
        triples: triple_count,
        entities: graph.entity_count(),
        edges: graph.edge_count(),
    })
}
