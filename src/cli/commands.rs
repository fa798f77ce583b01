// CLI command definitions

use super::edge::{
    AddDeviceCommand, AddWorkloadCommand, DeleteDeviceCommand, DeleteWorkloadCommand,
    ListDevicesCommand, ListWorkloadsCommand, StartDeviceCommand, StatusDeviceCommand,
    StatusWorkloadCommand, StopDeviceCommand,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "flotta-kube",
    version,
    about = "Edge device management tool for Flotta",
    long_about = "A standalone CLI tool for managing Flotta edge devices and workloads on Kubernetes"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Add a new device or workload
    #[command(subcommand)]
    Add(AddCommands),

    /// Delete a device or workload
    #[command(subcommand)]
    Delete(DeleteCommands),

    /// Start a device
    #[command(subcommand)]
    Start(StartCommands),

    /// Stop a device
    #[command(subcommand)]
    Stop(StopCommands),

    /// List devices or workloads
    #[command(subcommand)]
    List(ListCommands),

    /// Show the full record of a resource
    #[command(subcommand)]
    Status(StatusCommands),
}

#[derive(clap::Subcommand, Debug)]
pub enum AddCommands {
    /// Register a new device
    #[command(alias = "devices")]
    Device(AddDeviceCommand),

    /// Add a new workload
    #[command(alias = "workloads")]
    Workload(AddWorkloadCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum DeleteCommands {
    /// Delete a device from the cluster
    #[command(alias = "devices")]
    Device(DeleteDeviceCommand),

    /// Delete a workload
    #[command(alias = "workloads")]
    Workload(DeleteWorkloadCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum StartCommands {
    /// Start a device
    #[command(alias = "devices")]
    Device(StartDeviceCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum StopCommands {
    /// Stop a device
    #[command(alias = "devices")]
    Device(StopDeviceCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum ListCommands {
    /// List devices
    #[command(alias = "device")]
    Devices(ListDevicesCommand),

    /// List workloads
    #[command(alias = "workload")]
    Workloads(ListWorkloadsCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum StatusCommands {
    /// Show a device record
    #[command(alias = "devices")]
    Device(StatusDeviceCommand),

    /// Show a workload record
    #[command(alias = "workloads")]
    Workload(StatusWorkloadCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_add_workload_requires_device() {
        assert!(CliArgs::try_parse_from(["flotta-kube", "add", "workload"]).is_err());

        let args =
            CliArgs::try_parse_from(["flotta-kube", "add", "workload", "--device", "dev1"])
                .unwrap();
        match args.command {
            Commands::Add(AddCommands::Workload(cmd)) => {
                assert_eq!(cmd.device, "dev1");
                assert!(cmd.name.is_none());
                assert!(cmd.image.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_device_requires_name() {
        assert!(CliArgs::try_parse_from(["flotta-kube", "delete", "device"]).is_err());

        let args =
            CliArgs::try_parse_from(["flotta-kube", "delete", "device", "-n", "dev1"]).unwrap();
        match args.command {
            Commands::Delete(DeleteCommands::Device(cmd)) => assert_eq!(cmd.name, "dev1"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_start_device_accepts_plural_alias() {
        let args =
            CliArgs::try_parse_from(["flotta-kube", "start", "devices", "-n", "dev1"]).unwrap();
        match args.command {
            Commands::Start(StartCommands::Device(cmd)) => assert_eq!(cmd.name, "dev1"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
