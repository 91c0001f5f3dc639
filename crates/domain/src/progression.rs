use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use derive_more::{Deref, Display};
use log::{debug, warn};
use uuid::Uuid;

use crate::{
    Catalog, ExerciseID, GroupID, Level, Proficiency, ProgressError, ReadError, Reps,
    SessionSummary, UserID, Weight,
};

#[allow(async_fn_in_trait)]
pub trait ProgressionService {
    /// Raise the proficiency of the user in every group leveled in the log.
    ///
    /// Returns the new level of each raised group.
    async fn apply_session_log(
        &self,
        log: &SessionLog,
    ) -> Result<BTreeMap<GroupID, Level>, ProgressError>;
    async fn apply_logged_session(
        &self,
        id: SessionLogID,
    ) -> Result<BTreeMap<GroupID, Level>, ProgressError>;
    /// Logged sessions of the user, newest first.
    async fn get_session_history(
        &self,
        user_id: UserID,
    ) -> Result<Vec<SessionSummary>, ProgressError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionLogRepository: Send + Sync + 'static {
    async fn read_session_log(&self, id: SessionLogID) -> Result<SessionLog, ReadError>;
    async fn read_session_logs(&self, user_id: UserID) -> Result<Vec<SessionLog>, ReadError>;
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionLogID(Uuid);

impl From<Uuid> for SessionLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Performance of a user in a completed training session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLog {
    pub user_id: UserID,
    pub date: NaiveDate,
    pub exercises: Vec<LoggedExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<LoggedSet>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedSet {
    pub set_number: u32,
    pub reps: Reps,
    pub weight: Option<Weight>,
}

/// Groups in which the user exceeded the rep threshold of an exercise in at least one set.
///
/// Exercises without a threshold or without a group never level up a group.
#[must_use]
pub fn leveled_groups(log: &SessionLog, catalog: &Catalog) -> BTreeSet<GroupID> {
    let mut groups = BTreeSet::new();

    for logged in &log.exercises {
        let Some(exercise) = catalog.get(logged.exercise_id) else {
            warn!("ignoring log of unknown exercise {}", logged.exercise_id);
            continue;
        };
        let (Some(group), Some(max_reps)) = (exercise.group, exercise.max_reps) else {
            continue;
        };

        if logged.sets.iter().any(|s| s.reps > max_reps) {
            debug!(
                "rep threshold of {} exceeded in group {}",
                exercise.id, group.group_id
            );
            groups.insert(group.group_id);
        }
    }

    groups
}

/// Raise the level of every leveled group by exactly one.
pub fn raise_proficiency(
    log: &SessionLog,
    catalog: &Catalog,
    proficiency: &mut Proficiency,
) -> BTreeMap<GroupID, Level> {
    proficiency.increment_all(&leveled_groups(log, catalog))
}
