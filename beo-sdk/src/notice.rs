//! User-facing notices about failed operations

use std::fmt;

/// How prominently a notice should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Best-effort control failed; the display self-corrects on the next event
    Warning,
    /// A failure the user should see
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A reported condition for the user interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    /// Display name of the device the operation targeted
    pub device: String,
    /// Operation that failed, e.g. `set_volume`
    pub operation: &'static str,
    pub message: String,
}

impl Notice {
    pub fn new(
        severity: Severity,
        device: impl Into<String>,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            device: device.into(),
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} on {}: {}",
            self.severity, self.operation, self.device, self.message
        )
    }
}
