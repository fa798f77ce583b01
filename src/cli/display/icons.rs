//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (running / healthy)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (stopped or partially running)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (failed / unregistered)
    pub const ERROR: &'static str = "✗";

    /// Pending icon (waiting)
    pub const PENDING: &'static str = "⏳";

    /// Unknown icon
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon for a reported phase
    pub fn get_phase_icon(phase: &str) -> &'static str {
        match phase.to_ascii_lowercase().as_str() {
            "running" | "started" | "up" => Self::SUCCESS,
            "registered" | "created" | "creating" | "pending" => Self::PENDING,
            "stopped" | "degraded" => Self::WARNING,
            "failed" | "unregistered" | "error" => Self::ERROR,
            _ => Self::UNKNOWN,
        }
    }
}
