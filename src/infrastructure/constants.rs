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

/// API group and version of the edge resources
pub const API_GROUP: &str = "management.project-flotta.io";
pub const API_VERSION: &str = "v1alpha1";

/// Resource kinds
pub const KIND_DEVICE: &str = "EdgeDevice";
pub const KIND_WORKLOAD: &str = "EdgeWorkload";

/// Default namespace for all commands
pub const DEFAULT_NAMESPACE: &str = "default";

/// Image used when a workload is added without --image
pub const DEFAULT_WORKLOAD_IMAGE: &str = "quay.io/project-flotta/nginx:1.21.6";

/// Workload state a freshly added workload must reach before success is reported
pub const WORKLOAD_RUNNING_STATE: &str = "Running";

/// Resource name constraints (RFC 1123 subdomain length)
pub const MAX_NAME_LENGTH: usize = 253;

/// Length of the random suffix appended to derived workload names
pub const NAME_SUFFIX_LENGTH: usize = 8;

/// Workload state polling
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 2;
pub const DEFAULT_WAIT_TIMEOUT_SECONDS: u64 = 60;

/// Resource labels
pub const LABEL_DEVICE: &str = "device";
pub const LABEL_TYPE: &str = "type";
pub const LABEL_TYPE_VALUE: &str = "flotta-edge";
