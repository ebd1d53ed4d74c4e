//! Seam to the protocol-level accessory engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::accessory::category::AccessoryCategory;
use crate::accessory::error::AccessoryError;

/// Protocol-side service definition, as much of it as this core forwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service type UUID.
    pub uuid: String,
    pub display_name: String,
    /// Distinguishes multiple services of the same type on one accessory.
    #[serde(default)]
    pub subtype: Option<String>,
}

impl Service {
    pub fn new(uuid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            display_name: display_name.into(),
            subtype: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }
}

/// The underlying protocol accessory an `AccessoryHandle` wraps.
///
/// The handle owns its delegate exclusively and forwards every service and
/// identity mutation to it; pairing, encoding, and transport happen behind
/// this trait.
pub trait AccessoryDelegate: Send + Sync {
    fn display_name(&self) -> &str;

    fn set_display_name(&mut self, display_name: &str);

    fn uuid(&self) -> &str;

    fn category(&self) -> AccessoryCategory;

    fn set_category(&mut self, category: AccessoryCategory);

    /// Services in publication order, owned by the delegate.
    fn services(&self) -> &[Service];

    fn add_service(&mut self, service: Service) -> Result<(), AccessoryError>;

    fn remove_service(&mut self, service: &Service) -> Result<(), AccessoryError>;

    fn get_service(&self, display_name: &str) -> Option<&Service>;

    fn get_service_by_id(&self, uuid: &str, subtype: Option<&str>) -> Option<&Service>;

    /// Delegate-level persisted fields (identity, category, services).
    ///
    /// Field names must not collide with the handle-level `plugin`,
    /// `platform`, and `context` keys.
    fn serialize(&self) -> Map<String, Value>;
}

/// Constructs delegates on behalf of the identity layer.
///
/// `restore` is the first phase of accessory rehydration: the delegate is
/// rebuilt from its own persisted fields before a handle is constructed
/// around it.
pub trait DelegateProvider: Send + Sync {
    fn create(
        &self,
        display_name: &str,
        uuid: &str,
        category: AccessoryCategory,
    ) -> Box<dyn AccessoryDelegate>;

    fn restore(&self, fields: &Map<String, Value>)
        -> Result<Box<dyn AccessoryDelegate>, AccessoryError>;
}
