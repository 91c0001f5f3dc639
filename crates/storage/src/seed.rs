use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use setwise_domain as domain;

use crate::MemoryRepository;

const BUILTIN: &str = include_str!("../data/seed.json");

/// Initial content of a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub exercises: Vec<domain::Exercise>,
    pub muscles: BTreeSet<domain::MuscleID>,
    pub profiles: Vec<domain::UserProfile>,
    pub session_logs: Vec<(domain::SessionLogID, domain::SessionLog)>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seed: SeedFile = serde_json::from_str(json)?;
        Ok(Seed::try_from(seed)?)
    }

    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN)
    }
}

impl From<Seed> for MemoryRepository {
    fn from(value: Seed) -> Self {
        let repository = MemoryRepository::new(value.exercises, value.muscles);
        for profile in value.profiles {
            repository.insert_profile(profile);
        }
        for (id, log) in value.session_logs {
            repository.insert_session_log(id, log);
        }
        repository
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SeedFile {
    muscles: Vec<String>,
    exercises: Vec<Exercise>,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    sessions: Vec<Session>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Exercise {
    id: u64,
    code: String,
    name: String,
    modality: String,
    intensity: String,
    category: String,
    duration: u32,
    muscles: Vec<ExerciseMuscle>,
    #[serde(default)]
    equipment: Vec<u64>,
    max_reps: Option<u32>,
    group: Option<GroupMembership>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct ExerciseMuscle {
    muscle: String,
    rating: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct GroupMembership {
    id: u64,
    difficulty: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct User {
    id: u64,
    #[serde(default)]
    equipment: Vec<u64>,
    #[serde(default)]
    availability: Vec<Availability>,
    #[serde(default)]
    proficiency: Vec<Proficiency>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Availability {
    day: String,
    minutes: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Proficiency {
    group: u64,
    level: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Session {
    id: u64,
    user: u64,
    date: NaiveDate,
    exercises: Vec<SessionExercise>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SessionExercise {
    exercise: u64,
    sets: Vec<SessionSet>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SessionSet {
    reps: u32,
    #[serde(default)]
    weight: Option<f32>,
}

impl TryFrom<SeedFile> for Seed {
    type Error = anyhow::Error;

    fn try_from(value: SeedFile) -> Result<Self, Self::Error> {
        Ok(Self {
            muscles: value
                .muscles
                .iter()
                .map(|m| domain::MuscleID::try_from(m.as_str()))
                .collect::<Result<_, _>>()
                .context("invalid muscle")?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<_, _>>()?,
            profiles: value
                .users
                .into_iter()
                .map(domain::UserProfile::try_from)
                .collect::<Result<_, _>>()?,
            session_logs: value
                .sessions
                .into_iter()
                .map(<(domain::SessionLogID, domain::SessionLog)>::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = anyhow::Error;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        let context = || format!("invalid exercise {}", value.id);
        Ok(Self {
            id: u128::from(value.id).into(),
            code: domain::ExerciseCode::new(&value.code).with_context(context)?,
            name: domain::Name::new(&value.name).with_context(context)?,
            modality: domain::Modality::try_from(value.modality.as_str())
                .with_context(context)?,
            intensity: domain::Intensity::from(value.intensity.as_str()),
            category: domain::Category::try_from(value.category.as_str())
                .with_context(context)?,
            base_duration: domain::Minutes::new(value.duration),
            muscles: value
                .muscles
                .iter()
                .map(|m| {
                    domain::MuscleID::try_from(m.muscle.as_str()).map(|muscle_id| {
                        domain::ExerciseMuscle {
                            muscle_id,
                            rating: m.rating.into(),
                        }
                    })
                })
                .collect::<Result<_, _>>()
                .with_context(context)?,
            equipment: value
                .equipment
                .iter()
                .map(|id| u128::from(*id).into())
                .collect(),
            max_reps: value
                .max_reps
                .map(domain::Reps::new)
                .transpose()
                .with_context(context)?,
            group: value
                .group
                .map(|g| {
                    domain::Level::new(g.difficulty).map(|difficulty| domain::GroupMembership {
                        group_id: u128::from(g.id).into(),
                        difficulty,
                    })
                })
                .transpose()
                .with_context(context)?,
        })
    }
}

impl TryFrom<User> for domain::UserProfile {
    type Error = anyhow::Error;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        let user_id = domain::UserID::from(u128::from(value.id));
        Ok(Self {
            user_id,
            equipment: value
                .equipment
                .iter()
                .map(|id| u128::from(*id).into())
                .collect(),
            availability: value
                .availability
                .iter()
                .filter_map(
                    |a| match domain::Availability::parse(&a.day, a.minutes) {
                        Ok(availability) => Some(availability),
                        Err(err) => {
                            warn!("skipping availability of user {user_id}: {err}");
                            None
                        }
                    },
                )
                .collect(),
            proficiency: value
                .proficiency
                .iter()
                .map(|p| {
                    domain::Level::new(p.level).map(|level| (u128::from(p.group).into(), level))
                })
                .collect::<Result<BTreeMap<domain::GroupID, _>, _>>()
                .with_context(|| format!("invalid proficiency of user {user_id}"))?
                .into(),
        })
    }
}

impl TryFrom<Session> for (domain::SessionLogID, domain::SessionLog) {
    type Error = anyhow::Error;

    fn try_from(value: Session) -> Result<Self, Self::Error> {
        let context = || format!("invalid session {}", value.id);
        Ok((
            u128::from(value.id).into(),
            domain::SessionLog {
                user_id: u128::from(value.user).into(),
                date: value.date,
                exercises: value
                    .exercises
                    .iter()
                    .map(|e| -> anyhow::Result<domain::LoggedExercise> {
                        Ok(domain::LoggedExercise {
                            exercise_id: u128::from(e.exercise).into(),
                            sets: e
                                .sets
                                .iter()
                                .zip(1..)
                                .map(|(s, set_number)| -> anyhow::Result<domain::LoggedSet> {
                                    Ok(domain::LoggedSet {
                                        set_number,
                                        reps: domain::Reps::new(s.reps)?,
                                        weight: s.weight.map(domain::Weight::new).transpose()?,
                                    })
                                })
                                .collect::<anyhow::Result<_>>()?,
                        })
                    })
                    .collect::<anyhow::Result<_>>()
                    .with_context(context)?,
            },
        ))
    }
}
