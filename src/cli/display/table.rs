//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Device information for list display
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub namespace: String,
    pub phase: String,
    pub workloads_running: u32,
    pub workloads_total: u32,
    pub age: String,
}

/// Workload information for list display
#[derive(Debug, Clone)]
pub struct WorkloadInfo {
    pub name: String,
    pub device: String,
    pub image: String,
    pub phase: String,
    pub age: String,
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render devices list as a formatted table
    pub fn render_devices_list(&self, devices: &[DeviceInfo]) -> String {
        if devices.is_empty() {
            return "No edge devices found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("DEVICE").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("PHASE").set_alignment(CellAlignment::Center),
                Cell::new("WORKLOADS").set_alignment(CellAlignment::Center),
                Cell::new("AGE").set_alignment(CellAlignment::Right),
            ]);

        for device in devices {
            let phase_icon = StatusIcon::get_phase_icon(&device.phase);
            let phase_color = self.theme.get_phase_color(&device.phase);
            let workload_color = self
                .theme
                .get_workload_color(device.workloads_running, device.workloads_total);

            table.add_row(vec![
                Cell::new(&device.name),
                Cell::new(&device.namespace),
                Cell::new(format!("{} {}", phase_icon, device.phase)).fg(phase_color),
                Cell::new(format!(
                    "{}/{}",
                    device.workloads_running, device.workloads_total
                ))
                .fg(workload_color),
                Cell::new(&device.age),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Edge Devices {} ─╮\n",
            format!("[{} devices]", devices.len())
                .bright_black()
                .to_string()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Running  {} Pending  {} Stopped  {} Failed\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::PENDING.cyan(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::ERROR.red()
        ));

        output
    }

    /// Render workloads list as a formatted table
    pub fn render_workloads_list(&self, workloads: &[WorkloadInfo]) -> String {
        if workloads.is_empty() {
            return "No edge workloads found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("WORKLOAD").set_alignment(CellAlignment::Left),
                Cell::new("DEVICE").set_alignment(CellAlignment::Left),
                Cell::new("IMAGE").set_alignment(CellAlignment::Left),
                Cell::new("STATE").set_alignment(CellAlignment::Center),
                Cell::new("AGE").set_alignment(CellAlignment::Right),
            ]);

        for workload in workloads {
            let phase_icon = StatusIcon::get_phase_icon(&workload.phase);
            let phase_color = self.theme.get_phase_color(&workload.phase);

            table.add_row(vec![
                Cell::new(&workload.name),
                Cell::new(&workload.device),
                Cell::new(&workload.image),
                Cell::new(format!("{} {}", phase_icon, workload.phase)).fg(phase_color),
                Cell::new(&workload.age),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Edge Workloads {} ─╮\n",
            format!("[{} workloads]", workloads.len())
                .bright_black()
                .to_string()
        ));
        output.push_str(&table.to_string());

        output
    }
}

/// Compact kubectl-style age formatting
pub fn format_age(elapsed: chrono::Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);

    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{}d", seconds / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_devices() {
        let renderer = TableRenderer::new();
        let output = renderer.render_devices_list(&[]);
        assert!(output.contains("No edge devices found"));
    }

    #[test]
    fn test_render_single_device() {
        let renderer = TableRenderer::new();
        let devices = vec![DeviceInfo {
            name: "dev1".to_string(),
            namespace: "default".to_string(),
            phase: "started".to_string(),
            workloads_running: 2,
            workloads_total: 2,
            age: "5m".to_string(),
        }];

        let output = renderer.render_devices_list(&devices);
        assert!(output.contains("dev1"));
        assert!(output.contains("default"));
        assert!(output.contains("2/2"));
        assert!(output.contains("5m"));
    }

    #[test]
    fn test_render_workloads() {
        let renderer = TableRenderer::new();
        let workloads = vec![WorkloadInfo {
            name: "nginx-abcdefgh".to_string(),
            device: "dev1".to_string(),
            image: "quay.io/project-flotta/nginx:1.21.6".to_string(),
            phase: "Running".to_string(),
            age: "30s".to_string(),
        }];

        let output = renderer.render_workloads_list(&workloads);
        assert!(output.contains("nginx-abcdefgh"));
        assert!(output.contains("dev1"));
        assert!(output.contains("Running"));
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_age(chrono::Duration::seconds(90)), "1m");
        assert_eq!(format_age(chrono::Duration::seconds(7200)), "2h");
        assert_eq!(format_age(chrono::Duration::seconds(200_000)), "2d");
        assert_eq!(format_age(chrono::Duration::seconds(-5)), "0s");
    }
}
