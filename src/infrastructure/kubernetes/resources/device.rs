// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// EdgeDevice custom resource.
///
/// The spec carries the desired lifecycle phase; the device agent reports
/// the observed phase and the state of every workload scheduled onto the
/// device through the status subresource.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "management.project-flotta.io",
    version = "v1alpha1",
    kind = "EdgeDevice",
    plural = "edgedevices",
    namespaced,
    status = "EdgeDeviceStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDeviceSpec {
    /// Desired lifecycle phase
    #[serde(default)]
    pub lifecycle: DeviceLifecycle,

    /// Seconds between device heartbeats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_period_seconds: Option<u32>,
}

impl Default for EdgeDeviceSpec {
    fn default() -> Self {
        Self {
            lifecycle: DeviceLifecycle::Registered,
            heartbeat_period_seconds: None,
        }
    }
}

/// Desired lifecycle phase of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeviceLifecycle {
    #[default]
    Registered,
    Started,
    Stopped,
    Unregistered,
}

impl std::fmt::Display for DeviceLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            DeviceLifecycle::Registered => "registered",
            DeviceLifecycle::Started => "started",
            DeviceLifecycle::Stopped => "stopped",
            DeviceLifecycle::Unregistered => "unregistered",
        };
        f.write_str(phase)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDeviceStatus {
    /// Phase reported by the device agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Per-workload state as reported by the device
    #[serde(default)]
    pub workloads: Vec<WorkloadObservation>,
}

/// One entry of the device-side workload state report
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadObservation {
    pub name: String,
    pub phase: String,
}

impl EdgeDevice {
    /// Reported state of a named workload, if the device has reported it yet
    pub fn workload_phase(&self, workload: &str) -> Option<&str> {
        self.status
            .as_ref()?
            .workloads
            .iter()
            .find(|w| w.name == workload)
            .map(|w| w.phase.as_str())
    }

    /// Observed phase, falling back to the desired lifecycle when the agent
    /// has not reported yet
    pub fn reported_phase(&self) -> String {
        self.status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_else(|| self.spec.lifecycle.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_with_workloads(workloads: Vec<WorkloadObservation>) -> EdgeDevice {
        let mut device = EdgeDevice::new("dev1", EdgeDeviceSpec::default());
        device.status = Some(EdgeDeviceStatus {
            phase: Some("started".to_string()),
            workloads,
        });
        device
    }

    #[test]
    fn test_workload_phase_lookup() {
        let device = device_with_workloads(vec![
            WorkloadObservation {
                name: "nginx-abc".to_string(),
                phase: "Running".to_string(),
            },
            WorkloadObservation {
                name: "nginx-def".to_string(),
                phase: "Created".to_string(),
            },
        ]);

        assert_eq!(device.workload_phase("nginx-abc"), Some("Running"));
        assert_eq!(device.workload_phase("nginx-def"), Some("Created"));
        assert_eq!(device.workload_phase("missing"), None);
    }

    #[test]
    fn test_reported_phase_falls_back_to_lifecycle() {
        let device = EdgeDevice::new("dev1", EdgeDeviceSpec::default());
        assert_eq!(device.reported_phase(), "registered");

        let device = device_with_workloads(Vec::new());
        assert_eq!(device.reported_phase(), "started");
    }

    #[test]
    fn test_crd_metadata() {
        use crate::infrastructure::constants::{API_GROUP, API_VERSION, KIND_DEVICE};
        use kube::Resource;

        assert_eq!(EdgeDevice::group(&()), API_GROUP);
        assert_eq!(EdgeDevice::version(&()), API_VERSION);
        assert_eq!(EdgeDevice::kind(&()), KIND_DEVICE);
        assert_eq!(EdgeDevice::plural(&()), "edgedevices");
    }

    #[test]
    fn test_lifecycle_serializes_lowercase() {
        let spec = EdgeDeviceSpec {
            lifecycle: DeviceLifecycle::Unregistered,
            heartbeat_period_seconds: None,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["lifecycle"], "unregistered");
    }
}
