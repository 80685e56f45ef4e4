//! Mock plan store for testing.

use crate::error::{PlatformError, Result};
use crate::providers::PlanStore;
use crate::state::{Plan, PlanId, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock plan store.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone, Default)]
pub struct MockPlanStore {
    plans: Arc<Mutex<HashMap<PlanId, Plan>>>,
}

impl MockPlanStore {
    /// Create a new mock plan store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn plan_count(&self) -> Result<usize> {
        Ok(self
            .plans
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .len())
    }
}

fn newest_first(mut plans: Vec<Plan>) -> Vec<Plan> {
    plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    plans
}

impl PlanStore for MockPlanStore {
    fn insert(&self, plan: &Plan) -> impl Future<Output = Result<()>> + Send {
        let plans = Arc::clone(&self.plans);
        let plan = plan.clone();

        async move {
            plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .insert(plan.id, plan);
            Ok(())
        }
    }

    fn get(&self, plan_id: PlanId) -> impl Future<Output = Result<Option<Plan>>> + Send {
        let plans = Arc::clone(&self.plans);

        async move {
            Ok(plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .get(&plan_id)
                .cloned())
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<Plan>>> + Send {
        let plans = Arc::clone(&self.plans);

        async move {
            let guard = plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;
            Ok(newest_first(guard.values().cloned().collect()))
        }
    }

    fn list_by_trainer(
        &self,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<Vec<Plan>>> + Send {
        let plans = Arc::clone(&self.plans);

        async move {
            let guard = plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;
            Ok(newest_first(
                guard
                    .values()
                    .filter(|plan| plan.trainer_id == trainer_id)
                    .cloned()
                    .collect(),
            ))
        }
    }

    fn list_by_trainers(
        &self,
        trainer_ids: &[UserId],
    ) -> impl Future<Output = Result<Vec<Plan>>> + Send {
        let plans = Arc::clone(&self.plans);
        let trainer_ids = trainer_ids.to_vec();

        async move {
            let guard = plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;
            Ok(newest_first(
                guard
                    .values()
                    .filter(|plan| trainer_ids.contains(&plan.trainer_id))
                    .cloned()
                    .collect(),
            ))
        }
    }

    fn update(&self, plan: &Plan) -> impl Future<Output = Result<()>> + Send {
        let plans = Arc::clone(&self.plans);
        let plan = plan.clone();

        async move {
            let mut guard = plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            if !guard.contains_key(&plan.id) {
                return Err(PlatformError::not_found("Plan"));
            }

            guard.insert(plan.id, plan);
            Ok(())
        }
    }

    fn delete(&self, plan_id: PlanId) -> impl Future<Output = Result<bool>> + Send {
        let plans = Arc::clone(&self.plans);

        async move {
            Ok(plans
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .remove(&plan_id)
                .is_some())
        }
    }
}
