//! GossipGraph Render - External graph renderer integration
//!
//! Rasterizes an exported DOT file by shelling out to a locally installed
//! Graphviz `dot`. Rendering is strictly best-effort: a missing or failing
//! renderer is logged and skipped, never reported to the caller as an error.

use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};

use gossip_core::RenderConfig;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Renderer not available: {0}")]
    NotAvailable(String),

    #[error("Renderer execution failed: {0}")]
    ExecutionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Trait for graph renderers
pub trait GraphRenderer: Send + Sync {
    /// Render the DOT file at `dot_path` into `output_path`
    fn render(&self, dot_path: &Path, output_path: &Path) -> Result<()>;

    /// Check if the renderer is available on the system
    fn is_available(&self) -> bool;

    /// Get the renderer name
    fn name(&self) -> &str;
}

// ============================================================================
// Graphviz Renderer
// ============================================================================

/// Graphviz renderer configuration
#[derive(Debug, Clone)]
pub struct GraphvizConfig {
    /// Path to (or name of) the `dot` executable
    pub executable: String,
    /// Output format passed as `-T<format>`
    pub format: String,
    /// Additional arguments placed before the input file
    pub extra_args: Vec<String>,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            executable: "dot".to_string(),
            format: "png".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl GraphvizConfig {
    /// Set executable
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// Graphviz `dot` wrapper
pub struct GraphvizRenderer {
    config: GraphvizConfig,
}

impl GraphvizRenderer {
    /// Create a renderer using `dot` from `PATH`
    pub fn new() -> Self {
        Self {
            config: GraphvizConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: GraphvizConfig) -> Self {
        Self { config }
    }

    /// Build command arguments
    fn build_args(&self, dot_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![format!("-T{}", self.config.format)];
        args.extend(self.config.extra_args.clone());
        args.push(dot_path.display().to_string());
        args.push("-o".to_string());
        args.push(output_path.display().to_string());
        args
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, dot_path: &Path, output_path: &Path) -> Result<()> {
        let args = self.build_args(dot_path, output_path);

        // `output()` drains stdout and stderr before waiting on the child
        let output = Command::new(&self.config.executable)
            .args(&args)
            .output()
            .map_err(|e| RenderError::NotAvailable(format!("{}: {e}", self.config.executable)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ExecutionFailed(format!(
                "{} exited with {}: {}",
                self.config.executable,
                output.status,
                stderr.trim()
            )));
        }

        if !output_path.exists() {
            return Err(RenderError::ExecutionFailed(format!(
                "{} produced no file at {}",
                self.config.executable,
                output_path.display()
            )));
        }

        Ok(())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.config.executable)
            .arg("-V")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        &self.config.executable
    }
}

// ============================================================================
// Render Manager
// ============================================================================

/// Tries each registered renderer in order until one succeeds
pub struct RenderManager {
    renderers: Vec<Box<dyn GraphRenderer>>,
}

impl RenderManager {
    /// Create a manager with no renderers; every render is skipped
    pub fn empty() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Register one Graphviz renderer per configured executable
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut manager = Self::empty();
        if !config.enabled {
            return manager;
        }

        for exe in &config.executables {
            manager.register(GraphvizRenderer::with_config(
                GraphvizConfig::default()
                    .with_executable(exe.clone())
                    .with_format(config.format.clone()),
            ));
        }

        manager
    }

    /// Register a renderer
    pub fn register<R: GraphRenderer + 'static>(&mut self, renderer: R) {
        self.renderers.push(Box::new(renderer));
    }

    /// Registered renderer names, in trial order
    pub fn renderer_names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Render `dot_path` into `output_path` with the first renderer that works.
    ///
    /// Returns whether an image was produced. Failures are logged, never
    /// returned.
    pub fn render(&self, dot_path: &Path, output_path: &Path) -> bool {
        for renderer in &self.renderers {
            match renderer.render(dot_path, output_path) {
                Ok(()) => {
                    info!(
                        renderer = renderer.name(),
                        output = %output_path.display(),
                        "rendered graph image"
                    );
                    return true;
                }
                Err(e) => {
                    debug!(renderer = renderer.name(), error = %e, "renderer failed");
                }
            }
        }

        if !self.renderers.is_empty() {
            warn!("no graph renderer succeeded; skipping image output");
        }
        false
    }
}

impl Default for RenderManager {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingRenderer {
        calls: Arc<AtomicUsize>,
    }

    impl GraphRenderer for FailingRenderer {
        fn render(&self, _dot: &Path, _out: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RenderError::ExecutionFailed("boom".to_string()))
        }

        fn is_available(&self) -> bool {
            false
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Copies the DOT text into the output path
    struct CopyRenderer;

    impl GraphRenderer for CopyRenderer {
        fn render(&self, dot: &Path, out: &Path) -> Result<()> {
            std::fs::copy(dot, out)?;
            Ok(())
        }

        fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "copy"
        }
    }

    #[test]
    fn test_graphviz_config() {
        let config = GraphvizConfig::default();
        assert_eq!(config.executable, "dot");
        assert_eq!(config.format, "png");

        let custom = GraphvizConfig::default()
            .with_executable("/opt/graphviz/bin/dot")
            .with_format("svg");
        assert_eq!(custom.executable, "/opt/graphviz/bin/dot");
        assert_eq!(custom.format, "svg");
    }

    #[test]
    fn test_build_args() {
        let renderer = GraphvizRenderer::new();
        let args = renderer.build_args(Path::new("graph.dot"), Path::new("graph.png"));
        assert_eq!(args, vec!["-Tpng", "graph.dot", "-o", "graph.png"]);
    }

    #[test]
    fn test_missing_executable_is_an_error() {
        let renderer = GraphvizRenderer::with_config(
            GraphvizConfig::default().with_executable("gossip-no-such-dot-binary"),
        );
        assert!(!renderer.is_available());

        let err = renderer
            .render(Path::new("graph.dot"), Path::new("graph.png"))
            .unwrap_err();
        assert!(matches!(err, RenderError::NotAvailable(_)));
    }

    #[test]
    fn test_manager_swallows_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut manager = RenderManager::empty();
        manager.register(FailingRenderer {
            calls: Arc::clone(&calls),
        });
        manager.register(FailingRenderer {
            calls: Arc::clone(&calls),
        });

        assert!(!manager.render(Path::new("a.dot"), Path::new("a.png")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_manager_stops_at_first_success() {
        let dir = tempfile::tempdir().unwrap();
        let dot = dir.path().join("graph.dot");
        let out = dir.path().join("graph.png");
        std::fs::write(&dot, "strict digraph G {\n}\n").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let mut manager = RenderManager::empty();
        manager.register(CopyRenderer);
        manager.register(FailingRenderer {
            calls: Arc::clone(&calls),
        });

        assert!(manager.render(&dot, &out));
        assert!(out.exists());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_manager_renders_nothing() {
        let manager = RenderManager::empty();
        assert!(manager.renderer_names().is_empty());
        assert!(!manager.render(Path::new("a.dot"), Path::new("a.png")));
    }

    #[test]
    fn test_from_config() {
        let manager = RenderManager::from_config(&RenderConfig::default());
        assert_eq!(manager.renderer_names().len(), 3);
        assert_eq!(manager.renderer_names()[0], "dot");

        let disabled = RenderConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(RenderManager::from_config(&disabled)
            .renderer_names()
            .is_empty());
    }
}
