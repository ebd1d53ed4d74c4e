//! Error types for the accessory identity layer.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessoryError {
    /// Serialization was requested for a handle the host never registered.
    #[error("accessory '{accessory}' has no associated plugin/platform; it was never registered")]
    Unassociated { accessory: String },

    /// A persisted record could not be turned back into a delegate.
    #[error("malformed accessory record: {message}")]
    MalformedRecord {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A service operation was rejected by the delegate.
    #[error("service operation failed on accessory '{accessory}': {message}")]
    ServiceError { accessory: String, message: String },
}
