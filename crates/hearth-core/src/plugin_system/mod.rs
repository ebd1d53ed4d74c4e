//! # Hearth Core Plugin System
//!
//! This module models one installed plugin package and hosts everything it
//! contributes to the bridge: entry-point resolution, version compatibility
//! gating, module loading, initialization, and the accessory/platform
//! factory registries plugin initializers populate.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`manifest`]**: Structured model of the plugin package manifest
//!   ([`PluginManifest`]), including the conditional `exports` shapes, and
//!   the pure entry-point resolution function.
//! - **[`descriptor`]**: The central [`PluginDescriptor`] type covering the
//!   plugin's identity, its load/initialize lifecycle, and its registries.
//! - **[`resolver`]**: The pluggable [`ModuleResolver`] seam through which
//!   entry modules are imported, and the initializer contract.
//! - **[`traits`]**: Object types plugins contribute through their
//!   initializers (accessories, platforms, dynamic platform instances).
//! - **[`version`]**: Host/runtime version data and the prerelease-inclusive
//!   range check used for compatibility gating.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError), the
//!   error type for every fallible plugin operation.
//!
//! A descriptor is constructed from already-discovered manifest data, then
//! driven by the host: `load` (may suspend on the module import), then
//! `initialize`, during which the plugin's initializer calls back into the
//! registration operations. The host is expected to run that sequence to
//! completion before issuing further calls into the same descriptor.
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod resolver;
pub mod traits;
pub mod version;

pub use descriptor::{LoadContext, PluginDescriptor, PluginIdentifier};
pub use manifest::{EntryPoint, ExportConditions, ExportTarget, ExportsField, ModuleFormat, ModuleType, PluginManifest};
pub use resolver::{sync_initializer, InitializerFuture, ModuleExports, ModuleResolver, PluginInitializer};
pub use traits::{
    AccessoryConstructor, AccessoryPlugin, DynamicPlatformPlugin, PlatformConstructor,
    PlatformInstance, PlatformPlugin,
};
pub use version::{HostVersions, HOST_PACKAGE_NAME, PROTOCOL_PACKAGE_NAME, RUNTIME_ENGINE_NAME};

// Test module declaration
#[cfg(test)]
mod tests;
