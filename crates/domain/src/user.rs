use std::collections::{BTreeMap, BTreeSet};

use chrono::Weekday;
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{EquipmentID, GroupID, Level, Minutes, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProfileRepository: Send + Sync + 'static {
    async fn read_profile(&self, user_id: UserID) -> Result<UserProfile, ReadError>;
    /// Raise the level of each group by one, either for all groups or for none.
    ///
    /// Returns the new level of each group.
    async fn apply_proficiency_increments(
        &self,
        user_id: UserID,
        groups: &BTreeSet<GroupID>,
    ) -> Result<BTreeMap<GroupID, Level>, UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserID,
    pub equipment: BTreeSet<EquipmentID>,
    pub availability: Vec<Availability>,
    pub proficiency: Proficiency,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Minutes a user can train on a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub day: Weekday,
    pub minutes: Minutes,
}

impl Availability {
    pub fn parse(day: &str, minutes: u32) -> Result<Self, AvailabilityError> {
        let day = day
            .trim()
            .parse::<Weekday>()
            .map_err(|_| AvailabilityError::UnknownDay(day.to_string()))?;
        Ok(Self {
            day,
            minutes: Minutes::new(minutes),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AvailabilityError {
    #[error("unknown day \"{0}\"")]
    UnknownDay(String),
}

/// Level per proficiency group. Groups without an entry are at level one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Proficiency(BTreeMap<GroupID, Level>);

impl Proficiency {
    #[must_use]
    pub fn level(&self, group_id: GroupID) -> Level {
        self.0.get(&group_id).copied().unwrap_or_default()
    }

    pub fn increment(&mut self, group_id: GroupID) -> Level {
        let level = self.level(group_id).next();
        self.0.insert(group_id, level);
        level
    }

    /// Raise each group by exactly one level.
    pub fn increment_all(&mut self, groups: &BTreeSet<GroupID>) -> BTreeMap<GroupID, Level> {
        groups
            .iter()
            .map(|group_id| (*group_id, self.increment(*group_id)))
            .collect()
    }
}

impl From<BTreeMap<GroupID, Level>> for Proficiency {
    fn from(value: BTreeMap<GroupID, Level>) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[(GroupID, Level); N]> for Proficiency {
    fn from(value: [(GroupID, Level); N]) -> Self {
        Self(BTreeMap::from(value))
    }
}
