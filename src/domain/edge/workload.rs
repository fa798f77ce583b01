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

use crate::domain::naming::is_valid_name;
use crate::infrastructure::constants::{LABEL_DEVICE, LABEL_TYPE, LABEL_TYPE_VALUE};
use crate::infrastructure::kubernetes::client::EdgeClient;
use crate::infrastructure::kubernetes::resources::{EdgeWorkload, EdgeWorkloadSpec};
use crate::shared::error::EdgeError;
use std::sync::Arc;

/// Declarative description of a workload to create
#[derive(Debug, Clone)]
pub struct WorkloadDescriptor {
    pub name: String,
    pub device: String,
    pub image: String,
}

/// Local handle for EdgeWorkload operations
pub struct EdgeWorkloadHandle {
    client: Arc<dyn EdgeClient>,
}

impl EdgeWorkloadHandle {
    pub fn new(client: Arc<dyn EdgeClient>) -> Self {
        Self { client }
    }

    /// Create the workload described by `descriptor` and return the record
    /// the API server accepted
    pub async fn create(&self, descriptor: &WorkloadDescriptor) -> Result<EdgeWorkload, EdgeError> {
        if !is_valid_name(&descriptor.name) {
            return Err(EdgeError::Validation(format!(
                "'{}' is not a valid workload name",
                descriptor.name
            )));
        }

        let mut workload = EdgeWorkload::new(
            &descriptor.name,
            EdgeWorkloadSpec {
                device: descriptor.device.clone(),
                image: descriptor.image.clone(),
            },
        );
        let labels = workload.metadata.labels.get_or_insert_with(Default::default);
        labels.insert(LABEL_DEVICE.to_string(), descriptor.device.clone());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());

        self.client.create_workload(&workload).await
    }

    pub async fn get(&self, name: &str) -> Result<EdgeWorkload, EdgeError> {
        self.client.get_workload(name).await
    }

    pub async fn delete(&self, name: &str) -> Result<(), EdgeError> {
        self.client.delete_workload(name).await
    }

    /// List workloads, optionally restricted to one device
    pub async fn list(&self, device: Option<&str>) -> Result<Vec<EdgeWorkload>, EdgeError> {
        let selector = device.map(|d| format!("{}={}", LABEL_DEVICE, d));
        self.client.list_workloads(selector.as_deref()).await
    }
}
