// Shared fixtures for accessory tests: an in-memory delegate standing in
// for the protocol engine.
use serde_json::{json, Map, Value};

use crate::accessory::category::AccessoryCategory;
use crate::accessory::delegate::{AccessoryDelegate, DelegateProvider, Service};
use crate::accessory::error::AccessoryError;
use crate::accessory::handle::AccessoryHandle;

pub const INFORMATION_SERVICE_UUID: &str = "0000003E-0000-1000-8000-0026BB765291";
pub const LIGHTBULB_SERVICE_UUID: &str = "00000043-0000-1000-8000-0026BB765291";

pub struct TestDelegate {
    display_name: String,
    uuid: String,
    category: AccessoryCategory,
    services: Vec<Service>,
}

impl TestDelegate {
    pub fn new(display_name: &str, uuid: &str, category: AccessoryCategory) -> Self {
        Self {
            display_name: display_name.to_string(),
            uuid: uuid.to_string(),
            category,
            services: vec![Service::new(INFORMATION_SERVICE_UUID, display_name)],
        }
    }
}

impl AccessoryDelegate for TestDelegate {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn set_display_name(&mut self, display_name: &str) {
        self.display_name = display_name.to_string();
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn category(&self) -> AccessoryCategory {
        self.category
    }

    fn set_category(&mut self, category: AccessoryCategory) {
        self.category = category;
    }

    fn services(&self) -> &[Service] {
        &self.services
    }

    fn add_service(&mut self, service: Service) -> Result<(), AccessoryError> {
        if self
            .services
            .iter()
            .any(|s| s.uuid == service.uuid && s.subtype == service.subtype)
        {
            return Err(AccessoryError::ServiceError {
                accessory: self.display_name.clone(),
                message: format!("service {} already present", service.uuid),
            });
        }
        self.services.push(service);
        Ok(())
    }

    fn remove_service(&mut self, service: &Service) -> Result<(), AccessoryError> {
        let before = self.services.len();
        self.services.retain(|s| s != service);
        if self.services.len() == before {
            return Err(AccessoryError::ServiceError {
                accessory: self.display_name.clone(),
                message: format!("service {} not present", service.uuid),
            });
        }
        Ok(())
    }

    fn get_service(&self, display_name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.display_name == display_name)
    }

    fn get_service_by_id(&self, uuid: &str, subtype: Option<&str>) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.uuid == uuid && s.subtype.as_deref() == subtype)
    }

    fn serialize(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("displayName".to_string(), json!(self.display_name));
        fields.insert("UUID".to_string(), json!(self.uuid));
        fields.insert("category".to_string(), json!(u8::from(self.category)));
        fields.insert(
            "services".to_string(),
            serde_json::to_value(&self.services).unwrap(),
        );
        fields
    }
}

pub struct TestProvider;

impl DelegateProvider for TestProvider {
    fn create(
        &self,
        display_name: &str,
        uuid: &str,
        category: AccessoryCategory,
    ) -> Box<dyn AccessoryDelegate> {
        Box::new(TestDelegate::new(display_name, uuid, category))
    }

    fn restore(
        &self,
        fields: &Map<String, Value>,
    ) -> Result<Box<dyn AccessoryDelegate>, AccessoryError> {
        let display_name = fields
            .get("displayName")
            .and_then(Value::as_str)
            .ok_or_else(|| AccessoryError::MalformedRecord {
                message: "missing displayName".to_string(),
                source: None,
            })?;
        let uuid = fields
            .get("UUID")
            .and_then(Value::as_str)
            .ok_or_else(|| AccessoryError::MalformedRecord {
                message: "missing UUID".to_string(),
                source: None,
            })?;
        let category = fields
            .get("category")
            .and_then(Value::as_u64)
            .and_then(|code| u8::try_from(code).ok())
            .and_then(|code| AccessoryCategory::try_from(code).ok())
            .unwrap_or_default();
        let services = match fields.get("services") {
            Some(value) => serde_json::from_value::<Vec<Service>>(value.clone()).map_err(|e| {
                AccessoryError::MalformedRecord {
                    message: "invalid services".to_string(),
                    source: Some(Box::new(e)),
                }
            })?,
            None => Vec::new(),
        };

        let mut delegate = TestDelegate::new(display_name, uuid, category);
        delegate.services = services;
        Ok(Box::new(delegate))
    }
}

pub fn fresh_handle(display_name: &str) -> AccessoryHandle {
    AccessoryHandle::new(
        &TestProvider,
        display_name,
        "c5f42f2e-8c62-45f6-b6c8-9d4f2f2b2a10",
        Some(AccessoryCategory::Lightbulb),
    )
}
