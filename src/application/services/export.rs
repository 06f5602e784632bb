//! Hierarchy export service
//!
//! Loads a backend result document, validates the hierarchy, flattens it and
//! writes the CSV to disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::application::document::locate_hierarchy;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::ExportConfig;
use crate::domain::{
    count_rows, flatten_table, node_from_value, render_csv, truncated_nodes, HierarchyNode,
    ValidationMode, BOM, MAX_DEPTH,
};
use crate::infrastructure::traits::FileSystem;

/// Where an export is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Directory; the file name is derived from the export time
    Directory(PathBuf),
    /// Exact file path
    File(PathBuf),
}

/// Service for turning hierarchy documents into CSV files.
pub struct ExportService {
    fs: Arc<dyn FileSystem>,
    config: ExportConfig,
    mode: ValidationMode,
}

impl ExportService {
    /// Create a new export service.
    pub fn new(fs: Arc<dyn FileSystem>, config: ExportConfig, mode: ValidationMode) -> Self {
        Self { fs, config, mode }
    }

    /// Read, locate and validate the hierarchy stored in `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<HierarchyNode> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read hierarchy", path)?;
        self.parse(&content)
    }

    /// Locate and validate the hierarchy in a JSON document.
    pub fn parse(&self, content: &str) -> ApplicationResult<HierarchyNode> {
        let doc: Value = serde_json::from_str(content)?;
        let root = locate_hierarchy(&doc)?;
        let node = node_from_value(root, self.mode)?;
        debug!(
            "parsed hierarchy '{}': {} top-level topics, depth {}",
            node.name,
            node.children.len(),
            node.depth()
        );
        Ok(node)
    }

    /// Flatten and render the hierarchy as CSV text (no byte-order mark).
    #[instrument(level = "debug", skip_all, fields(root = %root.name))]
    pub fn render(&self, root: &HierarchyNode) -> String {
        let dropped = truncated_nodes(root);
        if dropped > 0 {
            warn!(
                "{} node(s) below depth {} omitted from export",
                dropped, MAX_DEPTH
            );
        }
        let table = flatten_table(root);
        info!("flattened hierarchy into {} row(s)", table.len());
        render_csv(&table.rows)
    }

    /// Number of data rows the export would contain.
    pub fn row_count(&self, root: &HierarchyNode) -> usize {
        count_rows(root)
    }

    /// Export file name for the given local time: `<prefix>-YYYY-MM-DD-HH-MM-SS.csv`.
    pub fn export_file_name(&self, now: DateTime<Local>) -> String {
        format!(
            "{}-{}.csv",
            self.config.file_prefix,
            now.format("%Y-%m-%d-%H-%M-%S")
        )
    }

    /// Default target from configuration.
    pub fn default_target(&self) -> ExportTarget {
        ExportTarget::Directory(self.config.output_dir.clone())
    }

    /// Write the hierarchy as CSV and return the written path.
    #[instrument(level = "debug", skip(self, root))]
    pub fn export(&self, root: &HierarchyNode, target: ExportTarget) -> ApplicationResult<PathBuf> {
        self.export_at(root, target, Local::now())
    }

    /// Like `export`, with an explicit timestamp for the generated file name.
    pub fn export_at(
        &self,
        root: &HierarchyNode,
        target: ExportTarget,
        now: DateTime<Local>,
    ) -> ApplicationResult<PathBuf> {
        let path = match target {
            ExportTarget::Directory(dir) => {
                if !self.fs.is_dir(&dir) {
                    self.fs
                        .create_dir_all(&dir)
                        .with_path_context("create output directory", &dir)?;
                }
                dir.join(self.export_file_name(now))
            }
            ExportTarget::File(path) => {
                self.fs
                    .ensure_parent(&path)
                    .with_path_context("create parent directory", &path)?;
                path
            }
        };

        let csv = self.render(root);
        let content = if self.config.bom {
            format!("{}{}", BOM, csv)
        } else {
            csv
        };

        self.fs
            .write(&path, &content)
            .with_path_context("write export", &path)?;
        info!("exported {}", path.display());
        Ok(path)
    }
}
