//! Installation report
//!
//! Per-entry-point outcome of one install pass, kept for the overlay and for
//! diagnosing why a given game still sees input it shouldn't.

use serde::Serialize;

use crate::hooks::{EntryPoint, HookTarget};

/// Outcome for one entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum HookStatus {
    Installed,
    Failed(String),
    /// Disabled in config; never attempted
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookOutcome {
    pub entry_point: EntryPoint,
    pub module: String,
    pub symbol: String,
    #[serde(flatten)]
    pub status: HookStatus,
}

impl HookOutcome {
    pub fn new(target: &HookTarget, status: HookStatus) -> Self {
        Self {
            entry_point: target.entry_point,
            module: target.module.clone(),
            symbol: target.symbol.to_string(),
            status,
        }
    }
}

/// Result of installing the whole hook set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub hooks: Vec<HookOutcome>,
    /// Whether the enable-all step succeeded
    pub enabled: bool,
    pub enable_error: Option<String>,
}

impl InstallReport {
    pub fn outcome(&self, entry_point: EntryPoint) -> Option<&HookOutcome> {
        self.hooks.iter().find(|h| h.entry_point == entry_point)
    }

    pub fn installed(&self) -> impl Iterator<Item = EntryPoint> + '_ {
        self.hooks
            .iter()
            .filter(|h| h.status == HookStatus::Installed)
            .map(|h| h.entry_point)
    }

    pub fn failed(&self) -> impl Iterator<Item = &HookOutcome> {
        self.hooks
            .iter()
            .filter(|h| matches!(h.status, HookStatus::Failed(_)))
    }

    /// Every attempted hook installed and the set was enabled
    pub fn is_complete(&self) -> bool {
        self.enabled && self.failed().next().is_none()
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and enums cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = InstallReport {
            hooks: vec![
                HookOutcome::new(
                    &HookTarget::new(EntryPoint::XInputGetState, "xinput1_3"),
                    HookStatus::Failed("Module not found: xinput1_3".into()),
                ),
                HookOutcome::new(
                    &HookTarget::new(EntryPoint::GetMessageW, "xinput1_3"),
                    HookStatus::Installed,
                ),
            ],
            enabled: true,
            enable_error: None,
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["hooks"][0]["entry_point"], "XInputGetState");
        assert_eq!(json["hooks"][0]["status"], "failed");
        assert_eq!(json["hooks"][0]["reason"], "Module not found: xinput1_3");
        assert_eq!(json["hooks"][1]["module"], "user32");
        assert_eq!(json["hooks"][1]["status"], "installed");
        assert!(!report.is_complete());
    }

    #[test]
    fn test_installed_iterator() {
        let report = InstallReport {
            hooks: vec![
                HookOutcome::new(
                    &HookTarget::new(EntryPoint::SetCursorPos, "xinput1_3"),
                    HookStatus::Installed,
                ),
                HookOutcome::new(
                    &HookTarget::new(EntryPoint::GetCursorPos, "xinput1_3"),
                    HookStatus::Skipped,
                ),
            ],
            enabled: true,
            enable_error: None,
        };
        assert_eq!(
            report.installed().collect::<Vec<_>>(),
            vec![EntryPoint::SetCursorPos]
        );
        assert!(report.is_complete());
    }
}
