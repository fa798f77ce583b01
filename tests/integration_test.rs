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

#[cfg(test)]
mod tests {
    use flotta_kube::*;
    use std::sync::Arc;

    async fn test_client() -> Arc<dyn EdgeClient> {
        let client = EdgeClientImpl::new("default".to_string())
            .await
            .expect("Failed to create client");
        Arc::new(client)
    }

    fn test_name(prefix: &str) -> String {
        format!("{}-{}", prefix, random_suffix())
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster with the edge CRDs installed
    async fn test_device_lifecycle_flow() {
        let client = test_client().await;
        let name = test_name("itest-dev");
        let device = EdgeDeviceHandle::new(client, &name).expect("invalid device name");

        let record = device.register().await.expect("register failed");
        assert_eq!(record.spec.lifecycle, DeviceLifecycle::Registered);

        device.start().await.expect("start failed");
        let record = device.get().await.expect("get failed");
        assert_eq!(record.spec.lifecycle, DeviceLifecycle::Started);

        device.stop().await.expect("stop failed");
        device.unregister().await.expect("unregister failed");
        device.remove().await.expect("remove failed");

        let result = device.get().await;
        assert!(matches!(result, Err(EdgeError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster with the edge CRDs installed
    async fn test_add_workload_to_missing_device_fails_before_create() {
        let client = test_client().await;
        let device =
            EdgeDeviceHandle::new(client.clone(), &test_name("no-such-dev")).expect("name");

        // the device check must fail before any workload is created
        let result = device.get().await;
        assert!(matches!(result, Err(EdgeError::NotFound { .. })));

        let workloads = client
            .list_workloads(Some(&format!("device={}", device.name())))
            .await
            .expect("list failed");
        assert!(workloads.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster with the edge CRDs installed
    async fn test_workload_creation_is_rejected_for_duplicate_names() {
        let client = test_client().await;
        let device_name = test_name("itest-dev");
        let device = EdgeDeviceHandle::new(client.clone(), &device_name).expect("name");
        device.register().await.expect("register failed");

        let workloads = EdgeWorkloadHandle::new(client);
        let descriptor = WorkloadDescriptor {
            name: test_name("itest-wl"),
            device: device_name,
            image: "quay.io/project-flotta/nginx:1.21.6".to_string(),
        };

        workloads.create(&descriptor).await.expect("create failed");
        let result = workloads.create(&descriptor).await;
        assert!(matches!(result, Err(EdgeError::AlreadyExists { .. })));

        workloads.delete(&descriptor.name).await.expect("cleanup");
        device.unregister().await.expect("cleanup");
        device.remove().await.expect("cleanup");
    }
}
