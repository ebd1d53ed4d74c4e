use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::plugin_system::error::PluginSystemError;

/// Entry module used when a manifest names neither `exports` nor `main`.
pub const DEFAULT_ENTRY_POINT: &str = "./index.js";

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Parsed plugin package manifest.
///
/// Only the fields this core consumes are modelled; anything else in the
/// package manifest is ignored. Every field except `name` is optional, with
/// `version` defaulting to `"0.0.0"`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Package name, optionally scoped (`@scope/name`).
    pub name: String,

    /// Package version
    #[serde(default = "default_version")]
    pub version: String,

    /// Legacy entry module; overridden by `exports` when that resolves.
    #[serde(default)]
    pub main: Option<String>,

    /// Modern entry point declaration: a plain path or a conditions table.
    #[serde(default)]
    pub exports: Option<ExportsField>,

    /// Declared module format, relevant for ambiguous `.js` entry points.
    #[serde(default, rename = "type")]
    pub module_type: Option<ModuleType>,

    /// Host and runtime version requirements (`hearth`, `node`).
    #[serde(default)]
    pub engines: HashMap<String, String>,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: HashMap<String, String>,

    /// Peer dependencies; may stand in for a missing host engine declaration
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: HashMap<String, String>,
}

impl PluginManifest {
    /// Read and parse a single, already-located package manifest.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PluginSystemError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PluginSystemError::ManifestError {
                path: path.to_path_buf(),
                message: format!("failed to read manifest: {}", e),
                source: Some(Box::new(e)),
            })?;
        serde_json::from_str(&content).map_err(|e| PluginSystemError::ManifestError {
            path: path.to_path_buf(),
            message: format!("failed to parse manifest JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Resolve the entry module and classify its format. Pure function of
    /// the manifest data; performs no I/O.
    pub fn resolve_entry_point(&self) -> EntryPoint {
        let main = self
            .exports
            .as_ref()
            .and_then(ExportsField::resolve)
            .map(str::to_owned)
            .or_else(|| self.main.clone())
            .unwrap_or_else(|| DEFAULT_ENTRY_POINT.to_string());
        let format = self.classify(&main);
        EntryPoint { main, format }
    }

    fn classify(&self, main: &str) -> ModuleFormat {
        if main.ends_with(".mjs")
            || (main.ends_with(".js") && self.module_type == Some(ModuleType::Module))
        {
            ModuleFormat::EsModule
        } else {
            ModuleFormat::CommonJs
        }
    }
}

/// The `type` field of a package manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ModuleType {
    Module,
    Commonjs,
    /// Any other declared type; treated like an absent declaration.
    Other,
}

impl From<String> for ModuleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "module" => ModuleType::Module,
            "commonjs" => ModuleType::Commonjs,
            _ => ModuleType::Other,
        }
    }
}

/// The `exports` field: a plain entry path or a conditions table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExportsField {
    Path(String),
    Conditions(ExportConditions),
}

impl ExportsField {
    /// Entry path selected by this declaration, if any.
    ///
    /// Selection picks the first present condition and resolves inside it
    /// without backtracking; an unresolvable selection falls through to the
    /// manifest's `main` fallback.
    pub fn resolve(&self) -> Option<&str> {
        match self {
            ExportsField::Path(path) => Some(path),
            ExportsField::Conditions(conditions) => {
                conditions.select().and_then(ExportTarget::resolve)
            }
        }
    }
}

/// Conditional exports table. Conditions are tried in fixed priority order:
/// `import`, `require`, `node`, `default`, then the `"."` subpath.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConditions {
    #[serde(default)]
    pub import: Option<ExportTarget>,
    #[serde(default)]
    pub require: Option<ExportTarget>,
    #[serde(default)]
    pub node: Option<ExportTarget>,
    #[serde(default)]
    pub default: Option<ExportTarget>,
    #[serde(default, rename = ".")]
    pub root: Option<ExportTarget>,
}

impl ExportConditions {
    fn select(&self) -> Option<&ExportTarget> {
        self.import
            .as_ref()
            .or(self.require.as_ref())
            .or(self.node.as_ref())
            .or(self.default.as_ref())
            .or(self.root.as_ref())
    }
}

/// A single condition target: a path, or a further nested conditions table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExportTarget {
    Path(String),
    Conditions(Box<ExportConditions>),
}

impl ExportTarget {
    fn resolve(&self) -> Option<&str> {
        match self {
            ExportTarget::Path(path) => Some(path),
            ExportTarget::Conditions(conditions) => {
                conditions.select().and_then(ExportTarget::resolve)
            }
        }
    }
}

/// Resolved entry module and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Path of the entry module, relative to the package root.
    pub main: String,
    pub format: ModuleFormat,
}

/// Format an entry module must be imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// ECMAScript module: `.mjs`, or `.js` under `"type": "module"`.
    EsModule,
    /// CommonJS module: everything else.
    CommonJs,
}
