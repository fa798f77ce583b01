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

use crate::infrastructure::constants::{KIND_DEVICE, KIND_WORKLOAD};
use crate::infrastructure::kubernetes::resources::{DeviceLifecycle, EdgeDevice, EdgeWorkload};
use crate::shared::error::EdgeError;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::{Api, Client};
use tracing::debug;

#[async_trait::async_trait]
pub trait EdgeClient: Send + Sync {
    async fn get_device(&self, name: &str) -> Result<EdgeDevice, EdgeError>;

    async fn create_device(&self, device: &EdgeDevice) -> Result<(), EdgeError>;

    async fn delete_device(&self, name: &str) -> Result<(), EdgeError>;

    async fn patch_device_lifecycle(
        &self,
        name: &str,
        lifecycle: DeviceLifecycle,
    ) -> Result<(), EdgeError>;

    async fn list_devices(&self) -> Result<Vec<EdgeDevice>, EdgeError>;

    async fn get_workload(&self, name: &str) -> Result<EdgeWorkload, EdgeError>;

    async fn create_workload(&self, workload: &EdgeWorkload) -> Result<EdgeWorkload, EdgeError>;

    async fn delete_workload(&self, name: &str) -> Result<(), EdgeError>;

    async fn list_workloads(
        &self,
        label_selector: Option<&str>,
    ) -> Result<Vec<EdgeWorkload>, EdgeError>;

    fn namespace(&self) -> &str;
}

pub struct EdgeClientImpl {
    client: Client,
    namespace: String,
}

impl EdgeClientImpl {
    pub async fn new(namespace: String) -> Result<Self, EdgeError> {
        let client = Client::try_default().await.map_err(|e| {
            EdgeError::connection(format!("Failed to create Kubernetes client: {}", e))
        })?;
        debug!(namespace = %namespace, "connected with default client configuration");

        Ok(Self { client, namespace })
    }

    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, EdgeError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new(namespace).await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| EdgeError::connection(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| EdgeError::connection(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                EdgeError::connection(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            EdgeError::connection(format!("Failed to create Kubernetes client: {}", e))
        })?;
        debug!(namespace = %namespace, "connected with custom kubeconfig");

        Ok(Self { client, namespace })
    }

    fn devices(&self) -> Api<EdgeDevice> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn workloads(&self) -> Api<EdgeWorkload> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn map_api_error(&self, e: kube::Error, kind: &str, name: &str) -> EdgeError {
        match e {
            kube::Error::Api(ae) if ae.code == 404 => {
                EdgeError::not_found(kind, name, &self.namespace)
            }
            kube::Error::Api(ae) if ae.code == 409 => {
                EdgeError::already_exists(kind, name, &self.namespace)
            }
            kube::Error::Api(ae) => EdgeError::Kube(ae.message),
            e => EdgeError::Kube(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl EdgeClient for EdgeClientImpl {
    async fn get_device(&self, name: &str) -> Result<EdgeDevice, EdgeError> {
        self.devices()
            .get(name)
            .await
            .map_err(|e| self.map_api_error(e, KIND_DEVICE, name))
    }

    async fn create_device(&self, device: &EdgeDevice) -> Result<(), EdgeError> {
        let name = device.metadata.name.as_deref().unwrap_or_default();
        let pp = PostParams::default();

        self.devices()
            .create(&pp, device)
            .await
            .map_err(|e| self.map_api_error(e, KIND_DEVICE, name))?;
        Ok(())
    }

    async fn delete_device(&self, name: &str) -> Result<(), EdgeError> {
        let dp = DeleteParams::default();

        self.devices()
            .delete(name, &dp)
            .await
            .map_err(|e| self.map_api_error(e, KIND_DEVICE, name))?;
        Ok(())
    }

    async fn patch_device_lifecycle(
        &self,
        name: &str,
        lifecycle: DeviceLifecycle,
    ) -> Result<(), EdgeError> {
        let patch = serde_json::json!({ "spec": { "lifecycle": lifecycle } });
        debug!(device = %name, lifecycle = %lifecycle, "patching device lifecycle");

        self.devices()
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| self.map_api_error(e, KIND_DEVICE, name))?;
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<EdgeDevice>, EdgeError> {
        let lp = ListParams::default();

        self.devices()
            .list(&lp)
            .await
            .map(|list| list.items)
            .map_err(|e| EdgeError::Kube(e.to_string()))
    }

    async fn get_workload(&self, name: &str) -> Result<EdgeWorkload, EdgeError> {
        self.workloads()
            .get(name)
            .await
            .map_err(|e| self.map_api_error(e, KIND_WORKLOAD, name))
    }

    async fn create_workload(&self, workload: &EdgeWorkload) -> Result<EdgeWorkload, EdgeError> {
        let name = workload.metadata.name.as_deref().unwrap_or_default();
        let pp = PostParams::default();

        self.workloads()
            .create(&pp, workload)
            .await
            .map_err(|e| self.map_api_error(e, KIND_WORKLOAD, name))
    }

    async fn delete_workload(&self, name: &str) -> Result<(), EdgeError> {
        let dp = DeleteParams::default();

        self.workloads()
            .delete(name, &dp)
            .await
            .map_err(|e| self.map_api_error(e, KIND_WORKLOAD, name))?;
        Ok(())
    }

    async fn list_workloads(
        &self,
        label_selector: Option<&str>,
    ) -> Result<Vec<EdgeWorkload>, EdgeError> {
        let lp = match label_selector {
            Some(selector) => ListParams::default().labels(selector),
            None => ListParams::default(),
        };

        self.workloads()
            .list(&lp)
            .await
            .map(|list| list.items)
            .map_err(|e| EdgeError::Kube(e.to_string()))
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}
