use std::fmt;

use serde_json::{Map, Value};

use crate::accessory::category::AccessoryCategory;
use crate::accessory::delegate::{AccessoryDelegate, DelegateProvider, Service};
use crate::accessory::error::AccessoryError;
use crate::plugin_system::descriptor::PluginIdentifier;

/// Listener for identify events re-emitted by a handle. Receives no payload.
pub type IdentifyListener = Box<dyn Fn() + Send + Sync>;

/// Durable identity wrapper around one protocol-level accessory.
///
/// The handle mirrors the delegate's identity, carries plugin/platform
/// provenance and user-defined context across restarts, and forwards every
/// service operation to the delegate untouched. It is created fresh by
/// plugin code or reconstructed from a persisted record by the host.
pub struct AccessoryHandle {
    display_name: String,
    uuid: String,
    /// User-defined state, persisted verbatim. Opaque to this layer.
    pub context: Value,
    associated_plugin: Option<PluginIdentifier>,
    associated_platform: Option<String>,
    reachable: bool,
    delegate: Box<dyn AccessoryDelegate>,
    identify_listeners: Vec<IdentifyListener>,
}

impl fmt::Debug for AccessoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessoryHandle")
            .field("display_name", &self.display_name)
            .field("uuid", &self.uuid)
            .field("category", &self.category())
            .field("plugin", &self.associated_plugin)
            .field("platform", &self.associated_platform)
            .field("services", &self.delegate.services().len())
            .finish_non_exhaustive()
    }
}

impl AccessoryHandle {
    /// Create a fresh accessory, constructing a new delegate through
    /// `provider`.
    pub fn new(
        provider: &dyn DelegateProvider,
        display_name: impl Into<String>,
        uuid: impl Into<String>,
        category: Option<AccessoryCategory>,
    ) -> Self {
        let display_name = display_name.into();
        let uuid = uuid.into();
        Self::from_delegate(provider.create(&display_name, &uuid, category.unwrap_or_default()))
    }

    /// Build a handle around an already-constructed delegate.
    ///
    /// Used by the deserialization path, which must rebuild the delegate
    /// first. The mirrored identity is taken from the delegate.
    pub(crate) fn from_delegate(delegate: Box<dyn AccessoryDelegate>) -> Self {
        Self {
            display_name: delegate.display_name().to_string(),
            uuid: delegate.uuid().to_string(),
            context: Value::Object(Map::new()),
            associated_plugin: None,
            associated_platform: None,
            reachable: true,
            delegate,
            identify_listeners: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn category(&self) -> AccessoryCategory {
        self.delegate.category()
    }

    pub fn set_category(&mut self, category: AccessoryCategory) {
        self.delegate.set_category(category);
    }

    /// Owning plugin, set when the host registers the handle.
    pub fn associated_plugin(&self) -> Option<&PluginIdentifier> {
        self.associated_plugin.as_ref()
    }

    /// Owning platform; absent for externally published accessories.
    pub fn associated_platform(&self) -> Option<&str> {
        self.associated_platform.as_deref()
    }

    /// Tag the handle with its owning plugin and platform. Called by the
    /// host when the accessory is registered or rehydrated.
    pub fn associate(&mut self, plugin: PluginIdentifier, platform: Option<String>) {
        self.associated_plugin = Some(plugin);
        self.associated_platform = platform;
    }

    /// Rename the accessory.
    ///
    /// Empty input is ignored; otherwise both the mirrored name and the
    /// delegate are updated.
    pub fn update_display_name(&mut self, display_name: &str) {
        if display_name.is_empty() {
            return;
        }
        self.display_name = display_name.to_string();
        self.delegate.set_display_name(display_name);
    }

    pub fn services(&self) -> &[Service] {
        self.delegate.services()
    }

    pub fn add_service(&mut self, service: Service) -> Result<(), AccessoryError> {
        self.delegate.add_service(service)
    }

    pub fn remove_service(&mut self, service: &Service) -> Result<(), AccessoryError> {
        self.delegate.remove_service(service)
    }

    pub fn get_service(&self, display_name: &str) -> Option<&Service> {
        self.delegate.get_service(display_name)
    }

    pub fn get_service_by_id(&self, uuid: &str, subtype: Option<&str>) -> Option<&Service> {
        self.delegate.get_service_by_id(uuid, subtype)
    }

    /// Subscribe to identify events.
    pub fn on_identify<F>(&mut self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.identify_listeners.push(Box::new(listener));
    }

    /// Deliver an identify notification from the protocol layer.
    ///
    /// Every listener is notified without payload, then `done` is invoked.
    /// The completion always fires, even with no listener attached. The
    /// pairing flag is not forwarded.
    pub fn handle_identify(&self, _paired: bool, done: impl FnOnce()) {
        for listener in &self.identify_listeners {
            listener();
        }
        done();
    }

    /// Kept for backward compatibility; has no functional effect.
    pub fn reachable(&self) -> bool {
        self.reachable
    }

    /// Kept for backward compatibility; has no functional effect.
    pub fn update_reachability(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    pub(crate) fn delegate(&self) -> &dyn AccessoryDelegate {
        self.delegate.as_ref()
    }

    pub(crate) fn delegate_mut(&mut self) -> &mut dyn AccessoryDelegate {
        self.delegate.as_mut()
    }
}
