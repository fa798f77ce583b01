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

use crate::infrastructure::constants::{
    DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_WAIT_TIMEOUT_SECONDS,
};
use crate::shared::error::EdgeError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Fixed-interval, deadline-bounded polling parameters
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECONDS),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECONDS),
        }
    }
}

impl PollConfig {
    pub fn from_seconds(interval: u64, timeout: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval),
            timeout: Duration::from_secs(timeout),
        }
    }
}

/// One probe outcome: done, or not yet with a description of what was seen
pub enum PollState<T> {
    Ready(T),
    Pending(String),
}

/// Repeatedly run `probe` until it yields [`PollState::Ready`], a transport
/// error occurs, or the deadline passes. The first ready observation
/// returns immediately without a trailing sleep; probe errors are never
/// retried.
pub async fn poll_until<T, F, Fut>(
    config: PollConfig,
    what: &str,
    mut probe: F,
) -> Result<T, EdgeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollState<T>, EdgeError>>,
{
    let deadline = Instant::now() + config.timeout;
    let mut last_seen = String::from("nothing observed yet");

    loop {
        match probe().await? {
            PollState::Ready(value) => return Ok(value),
            PollState::Pending(seen) => {
                debug!(what = %what, seen = %seen, "still waiting");
                last_seen = seen;
            }
        }

        if Instant::now() + config.interval > deadline {
            return Err(EdgeError::Timeout(format!(
                "{} was not reached within {}s ({})",
                what,
                config.timeout.as_secs(),
                last_seen
            )));
        }
        sleep(config.interval).await;
    }
}
