//! Property tests for coordinator caching
//!
//! For any sequence of refresh outcomes, the cache holds the value of the
//! most recent successful refresh, and a failed refresh never changes it.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use emby_api::ApiError;
use emby_state::{Coordinator, CoordinatorConfig, Resource};
use parking_lot::Mutex;
use proptest::prelude::*;

struct Scripted {
    outcomes: Mutex<VecDeque<Option<u32>>>,
}

#[async_trait]
impl Resource for Scripted {
    type Snapshot = u32;

    async fn fetch(&self) -> Result<u32, ApiError> {
        match self.outcomes.lock().pop_front().flatten() {
            Some(value) => Ok(value),
            None => Err(ApiError::NetworkError("unreachable".to_string())),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_failed_refresh_preserves_previous_snapshot(
        outcomes in proptest::collection::vec(proptest::option::of(any::<u32>()), 1..20)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let coordinator = Coordinator::new(
                Scripted { outcomes: Mutex::new(outcomes.clone().into()) },
                CoordinatorConfig::new("prop", Duration::from_secs(30))
                    .with_min_refresh_interval(Duration::ZERO),
            )
            .unwrap();

            let mut expected: Option<u32> = None;
            for outcome in &outcomes {
                let before = coordinator.get_cached();
                let result = coordinator.refresh().await;

                match outcome {
                    Some(value) => {
                        prop_assert!(result.is_ok());
                        expected = Some(*value);
                    }
                    None => {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(coordinator.get_cached(), before);
                    }
                }

                prop_assert_eq!(coordinator.get_cached().map(|s| *s), expected);
                prop_assert_eq!(coordinator.last_update_success(), outcome.is_some());
            }
            Ok(())
        })?;
    }
}
