// Core subsystems of the hearth bridge: plugin hosting and accessory identity.
pub mod accessory;
pub mod plugin_system;

// Re-export key public types for hosts and plugin authors.
pub use accessory::{
    AccessoryCategory, AccessoryDelegate, AccessoryError, AccessoryHandle, DelegateProvider,
    SerializedAccessory, Service,
};
pub use plugin_system::error::PluginSystemError;
pub use plugin_system::{
    HostVersions, ModuleFormat, ModuleResolver, PluginDescriptor, PluginIdentifier, PluginManifest,
};
