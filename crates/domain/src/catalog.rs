use std::collections::{BTreeMap, BTreeSet};

use crate::{Exercise, ExerciseID, Minutes, MuscleID, ReadError};

#[allow(async_fn_in_trait)]
pub trait CatalogRepository: Send + Sync + 'static {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_muscles(&self) -> Result<BTreeSet<MuscleID>, ReadError>;
}

/// Validated, read-only collection of exercises together with the set of known muscles.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
    index: BTreeMap<ExerciseID, usize>,
    muscles: BTreeSet<MuscleID>,
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>, muscles: BTreeSet<MuscleID>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();

        for (position, exercise) in exercises.iter().enumerate() {
            if index.insert(exercise.id, position).is_some() {
                return Err(CatalogError::DuplicateExercise(exercise.id));
            }

            if let Some(m) = exercise
                .muscles
                .iter()
                .find(|m| !muscles.contains(&m.muscle_id))
            {
                return Err(CatalogError::UnknownMuscle(exercise.id, m.muscle_id));
            }

            match exercise
                .base_duration
                .checked_add(exercise.intensity.rest_time())
            {
                None => return Err(CatalogError::DurationOverflow(exercise.id)),
                Some(set_time) if set_time == Minutes::ZERO => {
                    return Err(CatalogError::ZeroDuration(exercise.id));
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            exercises,
            index,
            muscles,
        })
    }

    /// Exercises in catalog order.
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn muscles(&self) -> &BTreeSet<MuscleID> {
        &self.muscles
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&Exercise> {
        self.index.get(&id).map(|position| &self.exercises[*position])
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("duplicate exercise {0}")]
    DuplicateExercise(ExerciseID),
    #[error("exercise {0} rates unknown muscle {1:?}")]
    UnknownMuscle(ExerciseID, MuscleID),
    #[error("exercise {0} has a set time of zero minutes")]
    ZeroDuration(ExerciseID),
    #[error("set time of exercise {0} is out of range")]
    DurationOverflow(ExerciseID),
}
