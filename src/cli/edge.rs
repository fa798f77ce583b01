//! Edge device and workload commands

use crate::domain::edge::{EdgeDeviceHandle, EdgeWorkloadHandle, PollConfig, WorkloadDescriptor};
use crate::domain::naming::{image_name_component, is_valid_name, normalize, random_suffix};
use crate::infrastructure::constants::{
    DEFAULT_NAMESPACE, DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_WAIT_TIMEOUT_SECONDS,
    DEFAULT_WORKLOAD_IMAGE, WORKLOAD_RUNNING_STATE,
};
use crate::infrastructure::kubernetes::{EdgeClient, EdgeClientImpl};
use anyhow::anyhow;
use clap::Parser;
use kube::ResourceExt;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
pub struct ConnectionArgs {
    /// Kubernetes namespace
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,
}

async fn connect(args: &ConnectionArgs) -> anyhow::Result<Arc<dyn EdgeClient>> {
    let client = EdgeClientImpl::new_with_config(
        args.namespace.clone(),
        args.kubeconfig.clone(),
        args.context.clone(),
    )
    .await
    .map_err(|e| anyhow!("Failed to create client: {}", e))?;

    Ok(Arc::new(client))
}

#[derive(Parser, Debug, Clone)]
pub struct AddDeviceCommand {
    /// Name of the device to add
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct AddWorkloadCommand {
    /// Device to run the workload on
    #[arg(long, short = 'd')]
    pub device: String,

    /// Name of the workload to add
    /// If not provided, a name is derived from the image reference
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Image of the workload
    #[arg(long, short = 'i')]
    pub image: Option<String>,

    /// Seconds to wait for the workload to report the running state
    #[arg(long, default_value_t = DEFAULT_WAIT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// Seconds between state polls
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECONDS)]
    pub poll_interval: u64,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteDeviceCommand {
    /// Name of the device to delete
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteWorkloadCommand {
    /// Name of the workload to delete
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct StartDeviceCommand {
    /// Name of the device to start
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct StopDeviceCommand {
    /// Name of the device to stop
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct ListDevicesCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct ListWorkloadsCommand {
    /// Only show workloads of this device
    #[arg(long, short = 'd')]
    pub device: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct StatusDeviceCommand {
    /// Name of the device to show
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct StatusWorkloadCommand {
    /// Name of the workload to show
    #[arg(long, short = 'n')]
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl AddDeviceCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let device = EdgeDeviceHandle::new(client, &self.name)?;

        let record = device
            .register()
            .await
            .map_err(|e| anyhow!("Register device '{}' failed: {}", self.name, e))?;

        println!(
            "device '{}' was added in namespace '{}'",
            record.name_any(),
            self.connection.namespace
        );
        Ok(())
    }
}

impl AddWorkloadCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let image = self
            .image
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKLOAD_IMAGE.to_string());

        // derive the workload name from the image name and tag unless one
        // was given explicitly
        let name = match &self.name {
            Some(name) => {
                if !is_valid_name(name) {
                    anyhow::bail!("'{}' is not a valid workload name", name);
                }
                name.clone()
            }
            None => {
                let normalized = normalize(image_name_component(&image))
                    .map_err(|e| anyhow!("image '{}' contains invalid characters: {}", image, e))?;
                format!("{}-{}", normalized, random_suffix())
            }
        };

        let client = connect(&self.connection).await?;

        let device = EdgeDeviceHandle::new(client.clone(), &self.device)?;
        device
            .get()
            .await
            .map_err(|e| anyhow!("Get device '{}' failed: {}", self.device, e))?;

        let workloads = EdgeWorkloadHandle::new(client);
        let descriptor = WorkloadDescriptor {
            name: name.clone(),
            device: self.device.clone(),
            image,
        };
        workloads
            .create(&descriptor)
            .await
            .map_err(|e| anyhow!("Create workload '{}' failed: {}", name, e))?;

        let poll = PollConfig::from_seconds(self.poll_interval, self.timeout);
        device
            .wait_for_workload_state(&name, WORKLOAD_RUNNING_STATE, poll)
            .await
            .map_err(|e| anyhow!("Waiting for workload '{}' failed: {}", name, e))?;

        println!("workload '{}' was added to device '{}'", name, self.device);
        Ok(())
    }
}

impl DeleteDeviceCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let device = EdgeDeviceHandle::new(client, &self.name)?;

        // the control plane requires decommissioning before the record is
        // removed; a failed unregister aborts the whole pipeline
        device
            .unregister()
            .await
            .map_err(|e| anyhow!("Unregister device '{}' failed: {}", self.name, e))?;

        device
            .remove()
            .await
            .map_err(|e| anyhow!("Remove device '{}' failed: {}", self.name, e))?;

        println!("device '{}' was deleted", device.name());
        Ok(())
    }
}

impl DeleteWorkloadCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let workloads = EdgeWorkloadHandle::new(client);

        workloads
            .delete(&self.name)
            .await
            .map_err(|e| anyhow!("Delete workload '{}' failed: {}", self.name, e))?;

        println!("workload '{}' was deleted", self.name);
        Ok(())
    }
}

impl StartDeviceCommand {
    // failures are reported on stdout and the exit status stays zero,
    // matching the historical behavior of `start device`
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = match connect(&self.connection).await {
            Ok(client) => client,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };

        let device = match EdgeDeviceHandle::new(client, &self.name) {
            Ok(device) => device,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };

        if let Err(e) = device.start().await {
            println!("Start device '{}' failed: {}", self.name, e);
            return Ok(());
        }

        println!("device '{}' was started", device.name());
        Ok(())
    }
}

impl StopDeviceCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let device = EdgeDeviceHandle::new(client, &self.name)?;

        device
            .stop()
            .await
            .map_err(|e| anyhow!("Stop device '{}' failed: {}", self.name, e))?;

        println!("device '{}' was stopped", device.name());
        Ok(())
    }
}

impl ListDevicesCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        use crate::cli::display::{table::DeviceInfo, TableRenderer};

        let client = connect(&self.connection).await?;
        let devices = client
            .list_devices()
            .await
            .map_err(|e| anyhow!("Failed to list devices: {}", e))?;

        if devices.is_empty() {
            println!(
                "No edge devices found in namespace '{}'",
                self.connection.namespace
            );
            return Ok(());
        }

        let infos: Vec<DeviceInfo> = devices
            .iter()
            .map(|device| {
                let (running, total) = device
                    .status
                    .as_ref()
                    .map(|status| {
                        let total = status.workloads.len() as u32;
                        let running = status
                            .workloads
                            .iter()
                            .filter(|w| w.phase == WORKLOAD_RUNNING_STATE)
                            .count() as u32;
                        (running, total)
                    })
                    .unwrap_or((0, 0));

                DeviceInfo {
                    name: device.name_any(),
                    namespace: self.connection.namespace.clone(),
                    phase: device.reported_phase(),
                    workloads_running: running,
                    workloads_total: total,
                    age: age_of(device.metadata.creation_timestamp.as_ref()),
                }
            })
            .collect();

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_devices_list(&infos));

        Ok(())
    }
}

impl ListWorkloadsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        use crate::cli::display::{table::WorkloadInfo, TableRenderer};

        let client = connect(&self.connection).await?;
        let workloads = EdgeWorkloadHandle::new(client);

        let records = workloads
            .list(self.device.as_deref())
            .await
            .map_err(|e| anyhow!("Failed to list workloads: {}", e))?;

        if records.is_empty() {
            println!(
                "No edge workloads found in namespace '{}'",
                self.connection.namespace
            );
            return Ok(());
        }

        let infos: Vec<WorkloadInfo> = records
            .iter()
            .map(|workload| WorkloadInfo {
                name: workload.name_any(),
                device: workload.spec.device.clone(),
                image: workload.spec.image.clone(),
                phase: workload
                    .status
                    .as_ref()
                    .and_then(|s| s.phase.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                age: age_of(workload.metadata.creation_timestamp.as_ref()),
            })
            .collect();

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_workloads_list(&infos));

        Ok(())
    }
}

impl StatusDeviceCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let device = EdgeDeviceHandle::new(client, &self.name)?;

        let record = device
            .get()
            .await
            .map_err(|e| anyhow!("Get device '{}' failed: {}", self.name, e))?;

        let yaml = serde_yaml::to_string(&record)
            .map_err(|e| anyhow!("Failed to render device '{}': {}", self.name, e))?;
        print!("{}", yaml);

        Ok(())
    }
}

impl StatusWorkloadCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let client = connect(&self.connection).await?;
        let workloads = EdgeWorkloadHandle::new(client);

        let record = workloads
            .get(&self.name)
            .await
            .map_err(|e| anyhow!("Get workload '{}' failed: {}", self.name, e))?;

        let yaml = serde_yaml::to_string(&record)
            .map_err(|e| anyhow!("Failed to render workload '{}': {}", self.name, e))?;
        print!("{}", yaml);

        Ok(())
    }
}

fn age_of(creation: Option<&k8s_openapi::apimachinery::pkg::apis::meta::v1::Time>) -> String {
    use crate::cli::display::table::format_age;

    match creation {
        Some(time) => format_age(chrono::Utc::now() - time.0),
        None => "-".to_string(),
    }
}
