//! Request executor port definition.

use async_trait::async_trait;

use crate::domain::entities::{RequestConfig, RequestOutcome};

/// Performs exactly one network call under the config's deadline.
///
/// Implementations never fail out-of-band: every result, including
/// transport errors and timeouts, is reported as a [`RequestOutcome`].
#[async_trait]
pub trait RequestExecutorPort: Send + Sync {
    /// Executes the request.
    async fn execute(&self, config: &RequestConfig) -> RequestOutcome;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use serde_json::Value;
    use tokio::time::Instant;

    /// Executor replaying a fixed script of outcomes.
    #[derive(Clone, Default)]
    pub struct ScriptedExecutor {
        script: Arc<Mutex<VecDeque<RequestOutcome>>>,
        calls: Arc<Mutex<Vec<(Instant, RequestConfig)>>>,
    }

    impl ScriptedExecutor {
        /// Creates an executor returning `outcomes` in order, then `200 null`.
        pub fn new(outcomes: impl IntoIterator<Item = RequestOutcome>) -> Self {
            Self {
                script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
                calls: Arc::default(),
            }
        }

        /// Number of calls so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        /// Configs seen, in call order.
        pub fn configs(&self) -> Vec<RequestConfig> {
            self.calls.lock().iter().map(|(_, c)| c.clone()).collect()
        }

        /// Instants of each call, in call order.
        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().iter().map(|(t, _)| *t).collect()
        }
    }

    #[async_trait]
    impl RequestExecutorPort for ScriptedExecutor {
        async fn execute(&self, config: &RequestConfig) -> RequestOutcome {
            self.calls.lock().push((Instant::now(), config.clone()));
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| RequestOutcome::success(200, Value::Null))
        }
    }
}
