//! Call orchestration against an Android device bridge.
//!
//! [`AdbController`] wraps the `adb` binary; [`CallSessionTracker`] layers
//! the call lifecycle (dial, end, hang-up, status) on top of any
//! [`DeviceController`] and records call history on contacts.

pub mod adb;
pub mod device;
pub mod error;
pub mod session;

pub use adb::AdbController;
pub use device::DeviceController;
pub use error::{CallError, DeviceError};
pub use session::{CallEnded, CallSessionTracker, CallStarted, CallStatus, HangUpOutcome};
