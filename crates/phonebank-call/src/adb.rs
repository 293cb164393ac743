use crate::device::DeviceController;
use crate::error::DeviceError;
use async_trait::async_trait;
use serde::Serialize;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_KEY_TIMEOUT: Duration = Duration::from_secs(5);

/// ADB bridge to the connected phone.
#[derive(Debug, Clone)]
pub struct AdbController {
    tool_path: String,
    command_timeout: Duration,
    verify_timeout: Duration,
    key_timeout: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceEntry {
    pub serial: String,
    pub state: String,
}

impl AdbController {
    pub fn new(tool_path: impl Into<String>) -> Self {
        Self {
            tool_path: tool_path.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
            key_timeout: DEFAULT_KEY_TIMEOUT,
        }
    }

    pub fn with_timeouts(
        mut self,
        command_timeout: Duration,
        verify_timeout: Duration,
        key_timeout: Duration,
    ) -> Self {
        self.command_timeout = command_timeout;
        self.verify_timeout = verify_timeout;
        self.key_timeout = key_timeout;
        self
    }

    /// Parses `adb devices` output into (serial, state) pairs. The header
    /// line and anything without a tab separator is skipped.
    pub async fn list_devices(&self) -> Result<Vec<DeviceEntry>, DeviceError> {
        let output = self.run(&["devices"], self.command_timeout).await?;
        let mut devices = Vec::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.eq_ignore_ascii_case("list of devices attached") {
                continue;
            }
            let Some((serial, state)) = line.split_once('\t') else {
                debug!(line, "skipping unexpected devices line");
                continue;
            };
            let serial = serial.trim();
            if !serial.is_empty() {
                devices.push(DeviceEntry {
                    serial: serial.to_string(),
                    state: state.trim().to_string(),
                });
            }
        }
        Ok(devices)
    }

    /// Reads the battery level from the device's battery dump.
    pub async fn battery_level(&self) -> Result<i32, DeviceError> {
        let output = self
            .run(&["shell", "dumpsys", "battery"], self.command_timeout)
            .await?;
        for line in output.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix("level:") {
                return value
                    .trim()
                    .parse()
                    .map_err(|_| DeviceError::Parse(line.to_string()));
            }
        }
        Err(DeviceError::Parse(
            "battery dump carries no level line".to_string(),
        ))
    }

    async fn run(&self, args: &[&str], limit: Duration) -> Result<String, DeviceError> {
        debug!(tool = %self.tool_path, ?args, "running device command");
        let mut command = Command::new(&self.tool_path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(limit, command.output()).await {
            Err(_) => return Err(DeviceError::Timeout(limit)),
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
                return Err(DeviceError::ToolMissing(self.tool_path.clone()))
            }
            Ok(Err(err)) => return Err(DeviceError::Io(err)),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(DeviceError::CommandFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl DeviceController for AdbController {
    async fn dial(&self, number: &str) -> Result<(), DeviceError> {
        // The dialer intent rejects spaced numbers.
        let compact: String = number.chars().filter(|ch| !ch.is_whitespace()).collect();
        let uri = format!("tel:{}", compact);
        self.run(
            &[
                "shell",
                "am",
                "start",
                "-a",
                "android.intent.action.CALL",
                "-d",
                &uri,
            ],
            self.command_timeout,
        )
        .await?;
        Ok(())
    }

    async fn send_key(&self, key: &str) -> Result<(), DeviceError> {
        self.run(&["shell", "input", "keyevent", key], self.key_timeout)
            .await?;
        Ok(())
    }

    async fn query_state(&self) -> Result<String, DeviceError> {
        self.run(
            &["shell", "dumpsys", "telephony.registry"],
            self.verify_timeout,
        )
        .await
    }
}
