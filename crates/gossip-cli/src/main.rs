//! GossipGraph CLI - Command-line interface
//!
//! Usage:
//!   gossip                      (runs the demo)
//!   gossip demo
//!   gossip graph --text="A loves B. B betrayed C." --out=graph.dot
//!   gossip graph --file=data/story.txt --out=graph.dot --png=graph.png

mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gossip_core::{AppConfig, LoggingConfig};
use gossip_extractor::RuleBasedExtractor;
use gossip_render::RenderManager;
use pipeline::{GraphJob, OutputFormat, DEMO_TEXT};

#[derive(Parser)]
#[command(name = "gossip")]
#[command(about = "Extract character relationship graphs from Chinese/English narrative text")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a relationship graph from text
    Graph(GraphArgs),
    /// Build the graph for the built-in demo passage
    Demo(OutputArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct GraphArgs {
    /// Text to analyze
    #[arg(long)]
    text: Option<String>,

    /// UTF-8 file to analyze
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Default)]
struct OutputArgs {
    /// Graph description output path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rendered image output path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Skip the Graphviz rendering step
    #[arg(long)]
    no_render: bool,

    /// Graph description format
    #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_tracing(&config.logging);

    let (text, output) = match cli.command {
        Some(Commands::Graph(args)) => {
            let text = match (args.text, args.file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("graph mode needs --text=\"...\" or --file=path"),
            };
            (text, args.output)
        }
        Some(Commands::Demo(output)) => (DEMO_TEXT.to_string(), output),
        None => (DEMO_TEXT.to_string(), OutputArgs::default()),
    };

    let job = build_job(&config, output);
    let renderer = RenderManager::from_config(&config.render);
    let summary = pipeline::run(&text, &job, &RuleBasedExtractor::new(), &renderer)?;

    println!("{}", summary.message());
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Combine CLI flags with configuration; flags win
fn build_job(config: &AppConfig, output: OutputArgs) -> GraphJob {
    let out = output.out.unwrap_or_else(|| match output.format {
        OutputFormat::Dot => config.output.dot_path.clone(),
        OutputFormat::Json => config.output.dot_path.with_extension("json"),
    });

    let image = if output.no_render || !config.render.enabled {
        None
    } else {
        Some(output.png.unwrap_or_else(|| config.output.png_path.clone()))
    };

    GraphJob {
        out,
        image,
        format: output.format,
        delimiter: config.output.label_delimiter.clone(),
    }
}
