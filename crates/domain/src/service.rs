use std::{cmp::Reverse, collections::BTreeMap};

use chrono::NaiveDate;
use log::{debug, error, info};

use crate::{
    Catalog, CatalogError, CatalogRepository, ConfigError, GroupID, Interval, Level, PlanError,
    PlanRepository, PlanService, PlanSummary, ProfileRepository, ProgressError,
    ProgressionService, ReadError, SchedulerConfig, SessionLog, SessionLogID,
    SessionLogRepository, SessionSummary, UpdateError, UserID, UserLocks, WeeklyPlan,
    WeeklyPlanner, leveled_groups,
};

pub struct Service<R> {
    repository: R,
    config: SchedulerConfig,
    locks: UserLocks,
}

impl<R> Service<R> {
    pub fn new(repository: R, config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            repository,
            config,
            locks: UserLocks::default(),
        })
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CatalogRepository> Service<R> {
    async fn read_catalog<E: From<ReadError> + From<CatalogError>>(&self) -> Result<Catalog, E> {
        let exercises = log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "read",
            "exercises"
        )?;
        let muscles = log_on_error!(
            self.repository.read_muscles(),
            ReadError,
            "read",
            "muscles"
        )?;
        Catalog::new(exercises, muscles).map_err(|err| {
            error!("invalid catalog: {err}");
            E::from(err)
        })
    }
}

impl<R> PlanService for Service<R>
where
    R: CatalogRepository + ProfileRepository + PlanRepository,
{
    async fn generate_weekly_plan(
        &self,
        user_id: UserID,
        today: NaiveDate,
    ) -> Result<WeeklyPlan, PlanError> {
        let _guard = self.locks.lock(user_id).await;

        let profile = log_on_error!(
            self.repository.read_profile(user_id),
            ReadError,
            "read",
            "profile"
        )
        .map_err(|err| PlanError::from_profile_read(user_id, err))?;
        let catalog = self.read_catalog::<PlanError>().await?;

        let plan = WeeklyPlanner::new(&catalog, self.config).plan(&profile, today);

        info!(
            "generated plan of {} days with {} minutes for user {user_id}",
            plan.days.len(),
            plan.used_time()
        );

        log_on_error!(
            self.repository.replace_future_plan(
                user_id,
                Interval::planning_window(today),
                plan
            ),
            UpdateError,
            "replace",
            "plan"
        )
        .map_err(PlanError::from)
    }

    async fn get_plan_summary(&self, plan: &WeeklyPlan) -> Result<PlanSummary, PlanError> {
        let catalog = self.read_catalog::<PlanError>().await?;
        Ok(PlanSummary::new(plan, &catalog))
    }
}

impl<R> ProgressionService for Service<R>
where
    R: CatalogRepository + ProfileRepository + SessionLogRepository,
{
    async fn apply_session_log(
        &self,
        log: &SessionLog,
    ) -> Result<BTreeMap<GroupID, Level>, ProgressError> {
        let _guard = self.locks.lock(log.user_id).await;

        let catalog = self.read_catalog::<ProgressError>().await?;
        let groups = leveled_groups(log, &catalog);

        if groups.is_empty() {
            return Ok(BTreeMap::new());
        }

        let levels = log_on_error!(
            self.repository
                .apply_proficiency_increments(log.user_id, &groups),
            UpdateError,
            "increment",
            "proficiency"
        )?;

        for (group_id, level) in &levels {
            info!(
                "raised proficiency of user {} in group {group_id} to level {level}",
                log.user_id
            );
        }

        Ok(levels)
    }

    async fn apply_logged_session(
        &self,
        id: SessionLogID,
    ) -> Result<BTreeMap<GroupID, Level>, ProgressError> {
        let log = log_on_error!(
            self.repository.read_session_log(id),
            ReadError,
            "read",
            "session log"
        )?;
        self.apply_session_log(&log).await
    }

    async fn get_session_history(
        &self,
        user_id: UserID,
    ) -> Result<Vec<SessionSummary>, ProgressError> {
        let catalog = self.read_catalog::<ProgressError>().await?;
        let mut logs = log_on_error!(
            self.repository.read_session_logs(user_id),
            ReadError,
            "read",
            "session logs"
        )?;
        logs.sort_by_key(|log| Reverse(log.date));

        Ok(logs
            .iter()
            .map(|log| SessionSummary::new(log, &catalog))
            .collect())
    }
}
