//! # Hearth Core Plugin System Errors
//!
//! Defines error types specific to the Hearth Plugin System.
//!
//! [`PluginSystemError`] is the primary enum for everything that can go
//! wrong while resolving, gating, loading, initializing, or registering
//! against a plugin descriptor. Fatal and recoverable conditions are
//! distinct variants; the non-fatal, log-only conditions of version gating
//! never appear here.
use std::fmt;
use std::path::PathBuf;

use crate::plugin_system::descriptor::PluginIdentifier;
use crate::plugin_system::version::HOST_PACKAGE_NAME;

/// Kind of factory a registration or lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryKind {
    Accessory,
    Platform,
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryKind::Accessory => f.write_str("accessory"),
            FactoryKind::Platform => f.write_str("platform"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    /// Fatal: the manifest declares no host version requirement.
    #[error("plugin '{plugin}' does not declare an 'engines.{engine}' version requirement; refusing to load", engine = HOST_PACKAGE_NAME)]
    MissingHostEngine { plugin: PluginIdentifier },

    /// Fatal: the imported entry module exposes nothing invocable.
    #[error("plugin '{plugin}' exports no initializer from its entry module")]
    MissingInitializer { plugin: PluginIdentifier },

    /// Fatal usage error: `initialize` called before a successful `load`.
    #[error("tried to initialize plugin '{plugin}' before it was loaded")]
    NotLoaded { plugin: PluginIdentifier },

    /// Fatal usage error: `load` called a second time.
    #[error("load context of plugin '{plugin}' was already consumed")]
    LoadContextConsumed { plugin: PluginIdentifier },

    /// Recoverable: a factory name registered twice under the same kind.
    #[error("{kind} '{name}' was already registered by plugin '{plugin}'")]
    DuplicateRegistration {
        plugin: PluginIdentifier,
        kind: FactoryKind,
        name: String,
    },

    /// Recoverable: lookup of a factory name nobody registered.
    #[error("{kind} '{name}' is not registered by plugin '{plugin}'")]
    NotRegistered {
        plugin: PluginIdentifier,
        kind: FactoryKind,
        name: String,
    },

    /// The module resolver failed to import an entry module.
    #[error("failed to import module '{path}': {message}")]
    ImportError { path: PathBuf, message: String },

    /// A plugin's own initializer failed; propagated to the host unchanged.
    #[error("plugin '{plugin}' failed to initialize: {message}")]
    InitializationError {
        plugin: PluginIdentifier,
        message: String,
    },

    /// Reading or parsing a plugin manifest failed.
    #[error("plugin manifest error for '{path}': {message}")]
    ManifestError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
