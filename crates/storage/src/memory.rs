use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{
        PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use log::debug;
use setwise_domain as domain;

/// Repository keeping all data in memory.
///
/// A disconnected repository fails every operation with [`domain::StorageError::NoConnection`].
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
    disconnected: AtomicBool,
}

#[derive(Debug, Default)]
struct State {
    exercises: Vec<domain::Exercise>,
    muscles: BTreeSet<domain::MuscleID>,
    profiles: BTreeMap<domain::UserID, domain::UserProfile>,
    plans: BTreeMap<domain::UserID, Vec<domain::DailyPlan>>,
    session_logs: BTreeMap<domain::SessionLogID, domain::SessionLog>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new(exercises: Vec<domain::Exercise>, muscles: BTreeSet<domain::MuscleID>) -> Self {
        Self {
            state: RwLock::new(State {
                exercises,
                muscles,
                ..State::default()
            }),
            disconnected: AtomicBool::new(false),
        }
    }

    pub fn insert_profile(&self, profile: domain::UserProfile) {
        self.write().profiles.insert(profile.user_id, profile);
    }

    pub fn insert_session_log(&self, id: domain::SessionLogID, log: domain::SessionLog) {
        self.write().session_logs.insert(id, log);
    }

    #[must_use]
    pub fn profile(&self, user_id: domain::UserID) -> Option<domain::UserProfile> {
        self.read().profiles.get(&user_id).cloned()
    }

    /// Stored daily plans of a user, ordered by date.
    #[must_use]
    pub fn plans(&self, user_id: domain::UserID) -> Vec<domain::DailyPlan> {
        self.read().plans.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn insert_plan(&self, user_id: domain::UserID, plan: domain::DailyPlan) {
        let mut state = self.write();
        let plans = state.plans.entry(user_id).or_default();
        plans.push(plan);
        plans.sort_by_key(|p| p.date);
    }

    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    pub fn reconnect(&self) {
        self.disconnected.store(false, Ordering::SeqCst);
    }

    fn check_connection(&self) -> Result<(), domain::StorageError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(domain::StorageError::NoConnection);
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl domain::CatalogRepository for MemoryRepository {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.read().exercises.clone())
    }

    async fn read_muscles(&self) -> Result<BTreeSet<domain::MuscleID>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.read().muscles.clone())
    }
}

impl domain::ProfileRepository for MemoryRepository {
    async fn read_profile(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::UserProfile, domain::ReadError> {
        self.check_connection()?;
        self.profile(user_id).ok_or(domain::ReadError::NotFound)
    }

    async fn apply_proficiency_increments(
        &self,
        user_id: domain::UserID,
        groups: &BTreeSet<domain::GroupID>,
    ) -> Result<BTreeMap<domain::GroupID, domain::Level>, domain::UpdateError> {
        self.check_connection()?;
        let mut state = self.write();
        let profile = state
            .profiles
            .get_mut(&user_id)
            .ok_or(domain::UpdateError::NotFound)?;
        Ok(profile.proficiency.increment_all(groups))
    }
}

impl domain::PlanRepository for MemoryRepository {
    async fn replace_future_plan(
        &self,
        user_id: domain::UserID,
        window: domain::Interval,
        plan: domain::WeeklyPlan,
    ) -> Result<domain::WeeklyPlan, domain::UpdateError> {
        self.check_connection()?;
        let mut state = self.write();
        let plans = state.plans.entry(user_id).or_default();
        let previous = plans.len();

        plans.retain(|p| !window.contains(p.date));
        debug!(
            "replacing {} daily plans of user {user_id} from {} to {}",
            previous - plans.len(),
            window.first,
            window.last
        );
        plans.extend(plan.days.iter().cloned());
        plans.sort_by_key(|p| p.date);

        Ok(plan)
    }
}

impl domain::SessionLogRepository for MemoryRepository {
    async fn read_session_log(
        &self,
        id: domain::SessionLogID,
    ) -> Result<domain::SessionLog, domain::ReadError> {
        self.check_connection()?;
        self.read()
            .session_logs
            .get(&id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn read_session_logs(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::SessionLog>, domain::ReadError> {
        self.check_connection()?;
        Ok(self
            .read()
            .session_logs
            .values()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect())
    }
}
