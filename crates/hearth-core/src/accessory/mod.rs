//! # Hearth Core Accessory Identity
//!
//! Durable, serializable identity wrappers around protocol-level virtual
//! devices. An [`AccessoryHandle`] mirrors its delegate's identity, carries
//! plugin/platform provenance and user context across process restarts, and
//! forwards service operations and identify notifications untouched. The
//! protocol engine itself lives behind the [`AccessoryDelegate`] seam.
pub mod category;
pub mod delegate;
pub mod error;
pub mod handle;
pub mod serialization;

pub use category::AccessoryCategory;
pub use delegate::{AccessoryDelegate, DelegateProvider, Service};
pub use error::AccessoryError;
pub use handle::{AccessoryHandle, IdentifyListener};
pub use serialization::SerializedAccessory;

// Test module declaration
#[cfg(test)]
mod tests;
