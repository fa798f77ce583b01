//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color for a reported device or workload phase
    pub fn get_phase_color(&self, phase: &str) -> TableColor {
        match phase.to_ascii_lowercase().as_str() {
            "running" | "started" | "up" => self.success,
            "registered" | "created" | "creating" | "pending" => self.info,
            "stopped" | "degraded" => self.warning,
            "failed" | "unregistered" | "error" => self.error,
            _ => self.muted,
        }
    }

    /// Get color based on running/total workload counts
    pub fn get_workload_color(&self, running: u32, total: u32) -> TableColor {
        if total == 0 {
            self.muted
        } else if running == total {
            self.success
        } else if running > 0 {
            self.warning
        } else {
            self.error
        }
    }
}
