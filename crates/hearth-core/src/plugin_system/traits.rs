//! Object types plugins contribute through their initializers.

use std::sync::Arc;

use serde_json::Value;

use crate::accessory::{AccessoryHandle, Service};

/// A statically configured virtual device published by an accessory plugin.
pub trait AccessoryPlugin: Send + Sync {
    /// Services the accessory exposes, in publication order.
    fn services(&self) -> Vec<Service>;

    /// Identify request forwarded from the protocol layer. Default is a
    /// no-op.
    fn identify(&self) {}
}

/// Base contract for platform plugins. The concrete platform surface
/// (static accessory lists, independent publication) is host policy; the
/// descriptor only needs a common object type to store constructors for.
pub trait PlatformPlugin: Send + Sync {}

/// A platform managing a changing set of accessories at runtime.
pub trait DynamicPlatformPlugin: PlatformPlugin {
    /// Hand back a cached accessory that belongs to this platform.
    fn configure_accessory(&self, accessory: AccessoryHandle);
}

/// Constructor registered for a statically declared accessory type.
/// Invoked by the host with the accessory's user configuration.
pub type AccessoryConstructor = Arc<dyn Fn(Value) -> Box<dyn AccessoryPlugin> + Send + Sync>;

/// Constructor registered for a platform. Invoked by the host with the
/// platform's user configuration.
pub type PlatformConstructor = Arc<dyn Fn(Value) -> Box<dyn PlatformPlugin> + Send + Sync>;

/// An activated dynamic platform instance.
pub type PlatformInstance = Arc<dyn DynamicPlatformPlugin>;
