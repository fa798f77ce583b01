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

/// EdgeWorkload custom resource.
///
/// A workload is pinned to exactly one device. Its observed state is
/// reported through the owning EdgeDevice's status, not through this
/// resource's own status subresource.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "management.project-flotta.io",
    version = "v1alpha1",
    kind = "EdgeWorkload",
    plural = "edgeworkloads",
    namespaced,
    status = "EdgeWorkloadStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct EdgeWorkloadSpec {
    /// Device the workload runs on
    pub device: String,

    /// Container image reference
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeWorkloadStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_serializes_camel_case() {
        let spec = EdgeWorkloadSpec {
            device: "dev1".to_string(),
            image: "quay.io/project-flotta/nginx:1.21.6".to_string(),
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["device"], "dev1");
        assert_eq!(json["image"], "quay.io/project-flotta/nginx:1.21.6");
    }
}
