// Shared fixtures for plugin system tests.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use semver::Version;
use serde_json::Value;

use crate::accessory::{AccessoryHandle, Service};
use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manifest::{ModuleFormat, PluginManifest};
use crate::plugin_system::resolver::{
    sync_initializer, ModuleExports, ModuleResolver, PluginInitializer,
};
use crate::plugin_system::traits::{
    AccessoryConstructor, AccessoryPlugin, DynamicPlatformPlugin, PlatformConstructor,
    PlatformInstance, PlatformPlugin,
};
use crate::plugin_system::version::HostVersions;

pub fn manifest(json: Value) -> PluginManifest {
    serde_json::from_value(json).expect("manifest JSON should parse")
}

pub fn descriptor(json: Value) -> PluginDescriptor {
    PluginDescriptor::from_manifest(manifest(json), PathBuf::from("/var/lib/hearth/plugins/acme"))
}

pub fn host_versions() -> HostVersions {
    HostVersions::new(
        Version::parse("1.8.0").unwrap(),
        Version::parse("20.11.1").unwrap(),
    )
}

pub fn noop_initializer() -> PluginInitializer {
    sync_initializer(|_plugin, _api| Ok(()))
}

/// Resolver returning a canned export exactly once, counting imports.
pub struct StubResolver {
    exports: Mutex<Option<ModuleExports>>,
    imports: AtomicUsize,
}

impl StubResolver {
    pub fn returning(exports: ModuleExports) -> Self {
        Self {
            exports: Mutex::new(Some(exports)),
            imports: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            exports: Mutex::new(None),
            imports: AtomicUsize::new(0),
        }
    }

    pub fn imports(&self) -> usize {
        self.imports.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModuleResolver for StubResolver {
    async fn import(
        &self,
        path: &Path,
        _format: ModuleFormat,
    ) -> Result<ModuleExports, PluginSystemError> {
        self.imports.fetch_add(1, Ordering::SeqCst);
        self.exports
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| PluginSystemError::ImportError {
                path: path.to_path_buf(),
                message: "module not found".to_string(),
            })
    }
}

struct NullAccessory;

impl AccessoryPlugin for NullAccessory {
    fn services(&self) -> Vec<Service> {
        Vec::new()
    }
}

pub fn accessory_constructor() -> AccessoryConstructor {
    Arc::new(|_config| Box::new(NullAccessory) as Box<dyn AccessoryPlugin>)
}

struct NullPlatform;

impl PlatformPlugin for NullPlatform {}

pub fn platform_constructor() -> PlatformConstructor {
    Arc::new(|_config| Box::new(NullPlatform) as Box<dyn PlatformPlugin>)
}

pub struct RecordingPlatform {
    pub configured: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub fn instance() -> PlatformInstance {
        Arc::new(Self {
            configured: Mutex::new(Vec::new()),
        })
    }
}

impl PlatformPlugin for RecordingPlatform {}

impl DynamicPlatformPlugin for RecordingPlatform {
    fn configure_accessory(&self, accessory: AccessoryHandle) {
        self.configured
            .lock()
            .unwrap()
            .push(accessory.display_name().to_string());
    }
}
