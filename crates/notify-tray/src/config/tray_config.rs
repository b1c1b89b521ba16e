use crate::config::default_tooltip;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What the tray icon shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Tooltip text; cut to the shell's buffer size when shown.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
    /// Optional `.ico`, `.bmp` or `.cur` file for the icon image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<PathBuf>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tooltip: default_tooltip(),
            icon_path: None,
        }
    }
}
