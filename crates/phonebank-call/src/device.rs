use crate::error::DeviceError;
use async_trait::async_trait;

/// Boundary to the external device-control tool. The session tracker only
/// ever needs these three operations; everything else the concrete bridge
/// offers stays on the implementation.
#[async_trait]
pub trait DeviceController: Send + Sync {
    /// Places a call to the canonical number.
    async fn dial(&self, number: &str) -> Result<(), DeviceError>;

    /// Injects a key event on the device.
    async fn send_key(&self, key: &str) -> Result<(), DeviceError>;

    /// Returns the raw telephony diagnostic dump; callers parse it for the
    /// call-state indicator.
    async fn query_state(&self) -> Result<String, DeviceError>;
}
