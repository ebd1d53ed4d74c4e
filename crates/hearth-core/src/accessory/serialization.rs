//! On-disk accessory record and the round trip into and out of it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::accessory::category::AccessoryCategory;
use crate::accessory::delegate::DelegateProvider;
use crate::accessory::error::AccessoryError;
use crate::accessory::handle::AccessoryHandle;
use crate::plugin_system::descriptor::PluginIdentifier;

/// Key the delegate uses for its persisted category code.
const CATEGORY_KEY: &str = "category";

/// Flat persisted form of one accessory: plugin/platform provenance, user
/// context, and whatever the delegate's own serialization produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedAccessory {
    /// Identifier of the owning plugin.
    pub plugin: String,
    /// Name of the owning platform.
    pub platform: String,
    /// User-defined state, verbatim.
    #[serde(default = "empty_object")]
    pub context: Value,
    /// Delegate-level fields (identity, category, services).
    #[serde(flatten)]
    pub accessory: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl AccessoryHandle {
    /// Produce the persisted record for this accessory.
    ///
    /// The mirrored display name is copied back into the delegate first so
    /// renames survive the round trip. Handles that were never associated
    /// with a plugin and platform cannot be persisted.
    pub fn serialize(&mut self) -> Result<SerializedAccessory, AccessoryError> {
        let plugin = self
            .associated_plugin()
            .cloned()
            .ok_or_else(|| AccessoryError::Unassociated {
                accessory: self.display_name().to_string(),
            })?;
        let platform = self
            .associated_platform()
            .map(str::to_owned)
            .ok_or_else(|| AccessoryError::Unassociated {
                accessory: self.display_name().to_string(),
            })?;

        let display_name = self.display_name().to_string();
        self.delegate_mut().set_display_name(&display_name);

        Ok(SerializedAccessory {
            plugin: plugin.to_string(),
            platform,
            context: self.context.clone(),
            accessory: self.delegate().serialize(),
        })
    }

    /// Rebuild an accessory from its persisted record.
    ///
    /// The delegate is restored from its own fields first; the handle is
    /// then constructed around it, and the persisted plugin, platform,
    /// context, and category are overlaid.
    pub fn deserialize(
        record: SerializedAccessory,
        provider: &dyn DelegateProvider,
    ) -> Result<AccessoryHandle, AccessoryError> {
        let delegate = provider.restore(&record.accessory)?;
        let mut handle = AccessoryHandle::from_delegate(delegate);

        handle.associate(PluginIdentifier::parse(&record.plugin), Some(record.platform));
        handle.context = record.context;
        if let Some(category) = record
            .accessory
            .get(CATEGORY_KEY)
            .and_then(Value::as_u64)
            .and_then(|code| u8::try_from(code).ok())
            .and_then(|code| AccessoryCategory::try_from(code).ok())
        {
            handle.set_category(category);
        }
        Ok(handle)
    }
}
