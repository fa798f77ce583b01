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

use crate::domain::edge::wait::{poll_until, PollConfig, PollState};
use crate::domain::naming::is_valid_name;
use crate::infrastructure::constants::{LABEL_TYPE, LABEL_TYPE_VALUE};
use crate::infrastructure::kubernetes::client::EdgeClient;
use crate::infrastructure::kubernetes::resources::{DeviceLifecycle, EdgeDevice, EdgeDeviceSpec};
use crate::shared::error::EdgeError;
use std::sync::Arc;

/// Local handle to one named EdgeDevice resource.
///
/// Holds no state beyond the name; every operation goes straight to the
/// remote API through the shared client.
pub struct EdgeDeviceHandle {
    client: Arc<dyn EdgeClient>,
    name: String,
}

impl EdgeDeviceHandle {
    pub fn new(client: Arc<dyn EdgeClient>, name: &str) -> Result<Self, EdgeError> {
        if !is_valid_name(name) {
            return Err(EdgeError::Validation(format!(
                "'{}' is not a valid device name",
                name
            )));
        }

        Ok(Self {
            client,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the current remote record
    pub async fn get(&self) -> Result<EdgeDevice, EdgeError> {
        self.client.get_device(&self.name).await
    }

    /// Create the device record, then fetch it back to confirm the API
    /// accepted it
    pub async fn register(&self) -> Result<EdgeDevice, EdgeError> {
        let mut device = EdgeDevice::new(&self.name, EdgeDeviceSpec::default());
        device
            .metadata
            .labels
            .get_or_insert_with(Default::default)
            .insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());

        self.client.create_device(&device).await?;
        self.get().await
    }

    /// Mark the device for decommissioning. Must precede [`remove`] in the
    /// delete workflow; the ordering is required by the control plane.
    ///
    /// [`remove`]: EdgeDeviceHandle::remove
    pub async fn unregister(&self) -> Result<(), EdgeError> {
        self.client
            .patch_device_lifecycle(&self.name, DeviceLifecycle::Unregistered)
            .await
    }

    /// Delete the remote record
    pub async fn remove(&self) -> Result<(), EdgeError> {
        self.client.delete_device(&self.name).await
    }

    pub async fn start(&self) -> Result<(), EdgeError> {
        self.client
            .patch_device_lifecycle(&self.name, DeviceLifecycle::Started)
            .await
    }

    pub async fn stop(&self) -> Result<(), EdgeError> {
        self.client
            .patch_device_lifecycle(&self.name, DeviceLifecycle::Stopped)
            .await
    }

    /// Poll the device's workload state report until `workload` reaches
    /// `desired`, a transport error occurs, or the poll deadline passes.
    pub async fn wait_for_workload_state(
        &self,
        workload: &str,
        desired: &str,
        poll: PollConfig,
    ) -> Result<(), EdgeError> {
        let what = format!(
            "workload '{}' state '{}' on device '{}'",
            workload, desired, self.name
        );

        poll_until(poll, &what, || async move {
            let device = self.get().await?;
            Ok(match device.workload_phase(workload) {
                Some(phase) if phase == desired => PollState::Ready(()),
                Some(phase) => PollState::Pending(format!("observed '{}'", phase)),
                None => PollState::Pending(format!("workload '{}' not reported yet", workload)),
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::resources::{
        EdgeDeviceStatus, EdgeWorkload, WorkloadObservation,
    };
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Client double that serves a scripted sequence of get_device results
    struct ScriptedClient {
        gets: Mutex<VecDeque<Result<EdgeDevice, EdgeError>>>,
        lifecycle_patches: AtomicU32,
        deletes: AtomicU32,
    }

    impl ScriptedClient {
        fn new(gets: Vec<Result<EdgeDevice, EdgeError>>) -> Arc<Self> {
            Arc::new(Self {
                gets: Mutex::new(gets.into()),
                lifecycle_patches: AtomicU32::new(0),
                deletes: AtomicU32::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl EdgeClient for ScriptedClient {
        async fn get_device(&self, _name: &str) -> Result<EdgeDevice, EdgeError> {
            self.gets
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected get_device call")
        }

        async fn create_device(&self, _device: &EdgeDevice) -> Result<(), EdgeError> {
            Ok(())
        }

        async fn delete_device(&self, _name: &str) -> Result<(), EdgeError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn patch_device_lifecycle(
            &self,
            _name: &str,
            _lifecycle: DeviceLifecycle,
        ) -> Result<(), EdgeError> {
            self.lifecycle_patches.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list_devices(&self) -> Result<Vec<EdgeDevice>, EdgeError> {
            Ok(Vec::new())
        }

        async fn get_workload(&self, name: &str) -> Result<EdgeWorkload, EdgeError> {
            Err(EdgeError::not_found("EdgeWorkload", name, "default"))
        }

        async fn create_workload(
            &self,
            workload: &EdgeWorkload,
        ) -> Result<EdgeWorkload, EdgeError> {
            Ok(workload.clone())
        }

        async fn delete_workload(&self, _name: &str) -> Result<(), EdgeError> {
            Ok(())
        }

        async fn list_workloads(
            &self,
            _label_selector: Option<&str>,
        ) -> Result<Vec<EdgeWorkload>, EdgeError> {
            Ok(Vec::new())
        }

        fn namespace(&self) -> &str {
            "default"
        }
    }

    fn device_reporting(workloads: Vec<(&str, &str)>) -> EdgeDevice {
        let mut device = EdgeDevice::new("dev1", EdgeDeviceSpec::default());
        device.status = Some(EdgeDeviceStatus {
            phase: Some("started".to_string()),
            workloads: workloads
                .into_iter()
                .map(|(name, phase)| WorkloadObservation {
                    name: name.to_string(),
                    phase: phase.to_string(),
                })
                .collect(),
        });
        device
    }

    fn quick_poll() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(10),
            timeout: Duration::from_millis(100),
        }
    }

    #[test]
    fn test_handle_rejects_invalid_names() {
        let client = ScriptedClient::new(Vec::new());
        for name in ["", "UPPER", "has space", "-edge"] {
            let result = EdgeDeviceHandle::new(client.clone(), name);
            assert!(matches!(result, Err(EdgeError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_wait_stops_on_first_desired_observation() {
        let client = ScriptedClient::new(vec![
            Ok(device_reporting(vec![("web", "Created")])),
            Ok(device_reporting(vec![("web", "Running")])),
        ]);
        let handle = EdgeDeviceHandle::new(client.clone(), "dev1").unwrap();

        handle
            .wait_for_workload_state("web", "Running", quick_poll())
            .await
            .unwrap();
        assert!(client.gets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wait_times_out_when_workload_never_appears() {
        let client = ScriptedClient::new(
            (0..20)
                .map(|_| Ok(device_reporting(Vec::new())))
                .collect(),
        );
        let handle = EdgeDeviceHandle::new(client, "dev1").unwrap();

        let result = handle
            .wait_for_workload_state("web", "Running", quick_poll())
            .await;
        match result {
            Err(EdgeError::Timeout(msg)) => assert!(msg.contains("not reported")),
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_wait_propagates_transport_errors() {
        let client = ScriptedClient::new(vec![Err(EdgeError::Kube("boom".to_string()))]);
        let handle = EdgeDeviceHandle::new(client.clone(), "dev1").unwrap();

        let result = handle
            .wait_for_workload_state("web", "Running", quick_poll())
            .await;
        assert!(matches!(result, Err(EdgeError::Kube(_))));
        assert!(client.gets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_operations_patch_and_delete() {
        let client = ScriptedClient::new(Vec::new());
        let handle = EdgeDeviceHandle::new(client.clone(), "dev1").unwrap();

        handle.start().await.unwrap();
        handle.stop().await.unwrap();
        handle.unregister().await.unwrap();
        assert_eq!(client.lifecycle_patches.load(Ordering::SeqCst), 3);

        handle.remove().await.unwrap();
        assert_eq!(client.deletes.load(Ordering::SeqCst), 1);
    }
}
