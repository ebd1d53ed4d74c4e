//! Pluggable module loading seam.
//!
//! The descriptor's loading contract is resolve → gate → import → extract;
//! the import mechanism itself (embedded interpreter, subprocess isolation,
//! dynamic library loading) is supplied by the host through
//! [`ModuleResolver`]. The core never touches a loading primitive directly.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manifest::ModuleFormat;

/// Future returned by a plugin initializer.
pub type InitializerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), PluginSystemError>> + Send + 'a>>;

/// Initializer extracted from a plugin's entry module.
///
/// Receives the owning descriptor (its registration capability) together
/// with the opaque capability object the host passed to `initialize`, which
/// initializers downcast to the concrete API type the host hands out.
/// Failures are propagated to the caller of `initialize` unchanged.
pub type PluginInitializer = Arc<
    dyn for<'a> Fn(&'a mut PluginDescriptor, &'a mut (dyn Any + Send)) -> InitializerFuture<'a>
        + Send
        + Sync,
>;

/// Exports produced by importing an entry module.
pub enum ModuleExports {
    /// The module itself is the initializer.
    Initializer(PluginInitializer),
    /// A namespace object whose `default` slot may hold the initializer.
    Namespace { default: Option<PluginInitializer> },
}

impl fmt::Debug for ModuleExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleExports::Initializer(_) => f.write_str("ModuleExports::Initializer"),
            ModuleExports::Namespace { default } => f
                .debug_struct("ModuleExports::Namespace")
                .field("default", &default.is_some())
                .finish(),
        }
    }
}

/// Helper to wrap a synchronous initializer as a [`PluginInitializer`].
pub fn sync_initializer<F>(f: F) -> PluginInitializer
where
    F: Fn(&mut PluginDescriptor, &mut (dyn Any + Send)) -> Result<(), PluginSystemError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(move |plugin, api| {
        let result = f(plugin, api);
        Box::pin(async move { result })
    })
}

/// Imports entry modules on behalf of plugin descriptors.
#[async_trait]
pub trait ModuleResolver: Send + Sync {
    /// Import the module at `path` as `format` and return its exports.
    ///
    /// Suspends the calling load until the import completes. Cancellation
    /// and timeouts are the caller's concern: a hung import hangs the load.
    async fn import(
        &self,
        path: &Path,
        format: ModuleFormat,
    ) -> Result<ModuleExports, PluginSystemError>;
}
