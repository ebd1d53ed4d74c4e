use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use semver::VersionReq;

use crate::plugin_system::error::{FactoryKind, PluginSystemError};
use crate::plugin_system::manifest::{EntryPoint, ModuleFormat, PluginManifest};
use crate::plugin_system::resolver::{ModuleExports, ModuleResolver, PluginInitializer};
use crate::plugin_system::traits::{AccessoryConstructor, PlatformConstructor, PlatformInstance};
use crate::plugin_system::version::{
    satisfies_including_prerelease, HostVersions, HOST_PACKAGE_NAME, PROTOCOL_PACKAGE_NAME,
    RUNTIME_ENGINE_NAME,
};

/// Stable identifier of an installed plugin: optional scope plus package
/// name, rendered as `scope/name` when scoped.
///
/// Case-sensitive; uniqueness across the host's plugin set is enforced by
/// the surrounding registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginIdentifier {
    pub scope: Option<String>,
    pub name: String,
}

impl PluginIdentifier {
    /// Split an npm-style package name (`@scope/name`) into scope and name.
    pub fn parse(package_name: &str) -> Self {
        if let Some(rest) = package_name.strip_prefix('@') {
            if let Some((scope, name)) = rest.split_once('/') {
                return Self {
                    scope: Some(format!("@{scope}")),
                    name: name.to_string(),
                };
            }
        }
        Self {
            scope: None,
            name: package_name.to_string(),
        }
    }
}

impl fmt::Display for PluginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}/{}", scope, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for PluginIdentifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Manifest data needed only while loading.
///
/// Consumed exactly once by [`PluginDescriptor::load`] so a resident plugin
/// does not keep its whole manifest alive after startup.
#[derive(Debug, Clone, Default)]
pub struct LoadContext {
    pub engines: HashMap<String, String>,
    pub dependencies: HashMap<String, String>,
    pub peer_dependencies: HashMap<String, String>,
}

/// One installed plugin package: resolved entry point, version gates,
/// initializer, and the factory registries its initializer contributes to.
pub struct PluginDescriptor {
    identifier: PluginIdentifier,
    path: PathBuf,
    version: String,
    main: String,
    format: ModuleFormat,
    disabled: bool,
    load_context: Option<LoadContext>,
    initializer: Option<PluginInitializer>,
    accessory_constructors: HashMap<String, AccessoryConstructor>,
    platform_constructors: HashMap<String, PlatformConstructor>,
    active_dynamic_platforms: HashMap<String, Vec<PlatformInstance>>,
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("identifier", &self.identifier)
            .field("path", &self.path)
            .field("version", &self.version)
            .field("main", &self.main)
            .field("format", &self.format)
            .field("disabled", &self.disabled)
            .field("loaded", &self.initializer.is_some())
            .field("accessories", &self.accessory_constructors.len())
            .field("platforms", &self.platform_constructors.len())
            .finish_non_exhaustive()
    }
}

impl PluginDescriptor {
    /// Build a descriptor from parsed manifest data and the package's
    /// filesystem location.
    ///
    /// Entry-point resolution runs here, synchronously; no I/O happens
    /// until [`load`](Self::load).
    pub fn from_manifest(manifest: PluginManifest, path: PathBuf) -> Self {
        let identifier = PluginIdentifier::parse(&manifest.name);
        let EntryPoint { main, format } = manifest.resolve_entry_point();
        Self {
            identifier,
            path,
            version: manifest.version,
            main,
            format,
            disabled: false,
            load_context: Some(LoadContext {
                engines: manifest.engines,
                dependencies: manifest.dependencies,
                peer_dependencies: manifest.peer_dependencies,
            }),
            initializer: None,
            accessory_constructors: HashMap::new(),
            platform_constructors: HashMap::new(),
            active_dynamic_platforms: HashMap::new(),
        }
    }

    pub fn identifier(&self) -> &PluginIdentifier {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.identifier.name
    }

    pub fn scope(&self) -> Option<&str> {
        self.identifier.scope.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Entry module path, relative to the package root.
    pub fn main(&self) -> &str {
        &self.main
    }

    pub fn module_format(&self) -> ModuleFormat {
        self.format
    }

    /// Whether the entry module is an ECMAScript module.
    pub fn is_esm(&self) -> bool {
        self.format == ModuleFormat::EsModule
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled plugins keep registering silently; the registries stay
    /// authoritative either way.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether `load` has produced an initializer.
    pub fn is_loaded(&self) -> bool {
        self.initializer.is_some()
    }

    /// Gate the plugin against the running host and runtime versions,
    /// import its entry module through `resolver`, and extract the
    /// initializer.
    ///
    /// The load context is consumed up front; a second `load` is a usage
    /// error. A missing host version requirement aborts before any module
    /// is imported. Version mismatches are logged and loading continues.
    pub async fn load(
        &mut self,
        resolver: &dyn ModuleResolver,
        host: &HostVersions,
    ) -> Result<(), PluginSystemError> {
        let context = self.load_context.take().ok_or_else(|| {
            PluginSystemError::LoadContextConsumed {
                plugin: self.identifier.clone(),
            }
        })?;

        // Older plugins may only declare a peer dependency on the host;
        // synthesize the engine requirement from it.
        let host_requirement = context
            .engines
            .get(HOST_PACKAGE_NAME)
            .or_else(|| context.peer_dependencies.get(HOST_PACKAGE_NAME))
            .cloned()
            .ok_or_else(|| PluginSystemError::MissingHostEngine {
                plugin: self.identifier.clone(),
            })?;

        match VersionReq::parse(&host_requirement) {
            Ok(req) if satisfies_including_prerelease(&req, &host.host) => {}
            Ok(_) => {
                log::error!(
                    "The plugin '{}' requires a {} version of {} which does not satisfy the running \
                     version {}. You may experience unexpected issues or stability problems running \
                     this plugin.",
                    self.identifier,
                    HOST_PACKAGE_NAME,
                    host_requirement,
                    host.host
                );
            }
            Err(err) => {
                log::error!(
                    "The plugin '{}' declares an unparseable {} version requirement '{}': {}",
                    self.identifier,
                    HOST_PACKAGE_NAME,
                    host_requirement,
                    err
                );
            }
        }

        if let Some(runtime_requirement) = context.engines.get(RUNTIME_ENGINE_NAME) {
            match VersionReq::parse(runtime_requirement) {
                Ok(req) if req.matches(&host.runtime) => {}
                Ok(_) => log::warn!(
                    "The plugin '{}' requires a runtime version of {} which does not satisfy the \
                     running version {}.",
                    self.identifier,
                    runtime_requirement,
                    host.runtime
                ),
                Err(err) => log::warn!(
                    "The plugin '{}' declares an unparseable runtime version requirement '{}': {}",
                    self.identifier,
                    runtime_requirement,
                    err
                ),
            }
        }

        if context.dependencies.contains_key(HOST_PACKAGE_NAME)
            || context.dependencies.contains_key(PROTOCOL_PACKAGE_NAME)
        {
            log::error!(
                "The plugin '{}' lists '{}' or '{}' as a runtime dependency and therefore bundles \
                 its own copy. This can cause the plugin to misbehave; it should be moved to \
                 'peerDependencies'.",
                self.identifier,
                HOST_PACKAGE_NAME,
                PROTOCOL_PACKAGE_NAME
            );
        }

        let entry = self.path.join(&self.main);
        let exports = resolver.import(&entry, self.format).await?;
        self.initializer = Some(match exports {
            ModuleExports::Initializer(initializer) => initializer,
            ModuleExports::Namespace {
                default: Some(initializer),
            } => initializer,
            ModuleExports::Namespace { default: None } => {
                return Err(PluginSystemError::MissingInitializer {
                    plugin: self.identifier.clone(),
                });
            }
        });
        Ok(())
    }

    /// Invoke the stored initializer, passing this descriptor and the
    /// host's capability object, and return its result unchanged.
    ///
    /// Fatal usage error if [`load`](Self::load) has not produced an
    /// initializer yet. Overlapping calls into the same descriptor are a
    /// caller error; the host awaits each initialization to completion.
    pub async fn initialize(
        &mut self,
        api: &mut (dyn Any + Send),
    ) -> Result<(), PluginSystemError> {
        let initializer =
            self.initializer
                .clone()
                .ok_or_else(|| PluginSystemError::NotLoaded {
                    plugin: self.identifier.clone(),
                })?;
        initializer(self, api).await
    }

    /// Register a constructor for a statically declared accessory type.
    pub fn register_accessory(
        &mut self,
        name: impl Into<String>,
        constructor: AccessoryConstructor,
    ) -> Result<(), PluginSystemError> {
        let name = name.into();
        if self.accessory_constructors.contains_key(&name) {
            return Err(PluginSystemError::DuplicateRegistration {
                plugin: self.identifier.clone(),
                kind: FactoryKind::Accessory,
                name,
            });
        }
        if !self.disabled {
            log::info!("Registering accessory '{}.{}'", self.identifier, name);
        }
        self.accessory_constructors.insert(name, constructor);
        Ok(())
    }

    /// Register a constructor for a platform.
    pub fn register_platform(
        &mut self,
        name: impl Into<String>,
        constructor: PlatformConstructor,
    ) -> Result<(), PluginSystemError> {
        let name = name.into();
        if self.platform_constructors.contains_key(&name) {
            return Err(PluginSystemError::DuplicateRegistration {
                plugin: self.identifier.clone(),
                kind: FactoryKind::Platform,
                name,
            });
        }
        if !self.disabled {
            log::info!("Registering platform '{}.{}'", self.identifier, name);
        }
        self.platform_constructors.insert(name, constructor);
        Ok(())
    }

    /// Strip a qualified `plugin.Name` identifier down to the bare name.
    fn factory_name(identifier: &str) -> &str {
        identifier
            .split_once('.')
            .map_or(identifier, |(_, name)| name)
    }

    pub fn get_accessory_constructor(
        &self,
        identifier: &str,
    ) -> Result<AccessoryConstructor, PluginSystemError> {
        let name = Self::factory_name(identifier);
        self.accessory_constructors
            .get(name)
            .cloned()
            .ok_or_else(|| PluginSystemError::NotRegistered {
                plugin: self.identifier.clone(),
                kind: FactoryKind::Accessory,
                name: name.to_string(),
            })
    }

    /// Look up a platform constructor by (possibly qualified) name.
    ///
    /// Requesting the constructor of a platform that already has active
    /// dynamic instances signals the legacy pattern of configuring the same
    /// dynamic platform multiple times and draws a deprecation warning.
    pub fn get_platform_constructor(
        &self,
        identifier: &str,
    ) -> Result<PlatformConstructor, PluginSystemError> {
        let name = Self::factory_name(identifier);
        let constructor = self.platform_constructors.get(name).cloned().ok_or_else(|| {
            PluginSystemError::NotRegistered {
                plugin: self.identifier.clone(),
                kind: FactoryKind::Platform,
                name: name.to_string(),
            }
        })?;
        if self.active_dynamic_platforms.contains_key(name) {
            log::warn!(
                "The dynamic platform '{}.{}' was requested while instances of it are already \
                 active. Configuring the same dynamic platform multiple times is deprecated.",
                self.identifier,
                name
            );
        }
        Ok(constructor)
    }

    /// Record a newly activated dynamic platform instance.
    ///
    /// Instances are prepended: the most recently activated one wins
    /// single-instance lookups. Instances are never removed here.
    pub fn assign_dynamic_platform(&mut self, identifier: &str, instance: PlatformInstance) {
        let name = Self::factory_name(identifier).to_string();
        self.active_dynamic_platforms
            .entry(name)
            .or_default()
            .insert(0, instance);
    }

    /// Most recently activated instance of the named dynamic platform.
    pub fn get_active_dynamic_platform(&self, name: &str) -> Option<&PlatformInstance> {
        self.active_dynamic_platforms
            .get(Self::factory_name(name))
            .and_then(|instances| instances.first())
    }

    /// All activated instances of the named dynamic platform, newest first.
    pub fn active_dynamic_platforms(&self, name: &str) -> &[PlatformInstance] {
        match self.active_dynamic_platforms.get(Self::factory_name(name)) {
            Some(instances) => instances,
            None => &[],
        }
    }

    /// Names of the registered accessory types.
    pub fn accessory_names(&self) -> impl Iterator<Item = &str> {
        self.accessory_constructors.keys().map(String::as_str)
    }

    /// Names of the registered platforms.
    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platform_constructors.keys().map(String::as_str)
    }
}
