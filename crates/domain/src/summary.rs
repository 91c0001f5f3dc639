use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;

use crate::{
    BalanceTracker, Catalog, Exercise, ExerciseID, Level, LoggedSet, Minutes, Modality, MuscleID,
    Name, Reps, SessionLog, Weight, WeeklyPlan,
};

/// Human-readable view of a weekly plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub days: Vec<DaySummary>,
    /// Sets times rating, accumulated over the whole week.
    pub muscle_points: BTreeMap<MuscleID, u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub budget: Minutes,
    pub used_time: Minutes,
    pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub sets: u32,
    pub duration: Minutes,
    pub muscles: Vec<MuscleID>,
    pub prescription: Prescription,
}

/// Default target of each set of a newly planned exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prescription {
    pub reps: Reps,
    pub load: Load,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Load {
    Weight(Weight),
    Level(Level),
    None,
}

impl From<&Exercise> for Prescription {
    fn from(exercise: &Exercise) -> Self {
        Self {
            reps: Reps::TARGET,
            load: match exercise.modality {
                Modality::Weighted => Load::Weight(Weight::STARTING),
                Modality::Bodyweight => Load::Level(exercise.difficulty().unwrap_or_default()),
                Modality::Isometric => Load::None,
            },
        }
    }
}

impl PlanSummary {
    #[must_use]
    pub fn new(plan: &WeeklyPlan, catalog: &Catalog) -> Self {
        let mut tracker = BalanceTracker::new(catalog.muscles());

        let days = plan
            .days
            .iter()
            .map(|day| DaySummary {
                date: day.date,
                budget: day.budget,
                used_time: day.used_time,
                exercises: day
                    .allocations
                    .iter()
                    .filter_map(|allocation| {
                        let Some(exercise) = catalog.get(allocation.exercise_id) else {
                            warn!("planned exercise {} not in catalog", allocation.exercise_id);
                            return None;
                        };
                        tracker.add(exercise, allocation.sets);
                        Some(PlannedExercise {
                            exercise_id: exercise.id,
                            name: exercise.name.clone(),
                            sets: allocation.sets,
                            duration: exercise.set_time() * allocation.sets,
                            muscles: exercise.muscles.iter().map(|m| m.muscle_id).collect(),
                            prescription: Prescription::from(exercise),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            days,
            muscle_points: tracker.points().clone(),
        }
    }
}

/// Human-readable view of a logged session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub exercises: Vec<PerformedExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformedExercise {
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub sets: Vec<LoggedSet>,
    pub muscles: Vec<MuscleID>,
    /// Set time, rest included, times the number of logged sets.
    pub total_duration: Minutes,
}

impl SessionSummary {
    #[must_use]
    pub fn new(log: &SessionLog, catalog: &Catalog) -> Self {
        Self {
            date: log.date,
            exercises: log
                .exercises
                .iter()
                .filter_map(|logged| {
                    let Some(exercise) = catalog.get(logged.exercise_id) else {
                        warn!("logged exercise {} not in catalog", logged.exercise_id);
                        return None;
                    };
                    let sets = u32::try_from(logged.sets.len()).unwrap_or(u32::MAX);
                    Some(PerformedExercise {
                        exercise_id: exercise.id,
                        name: exercise.name.clone(),
                        sets: logged.sets.clone(),
                        muscles: exercise.muscles.iter().map(|m| m.muscle_id).collect(),
                        total_duration: exercise.set_time() * sets,
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        Allocation, DailyPlan, Intensity, LoggedExercise,
        catalog::tests::{exercise, muscles, variant},
    };

    #[rstest]
    #[case(Modality::Weighted, None, Load::Weight(Weight::STARTING))]
    #[case(Modality::Bodyweight, Some(3), Load::Level(Level::new(3).unwrap()))]
    #[case(Modality::Bodyweight, None, Load::Level(Level::ONE))]
    #[case(Modality::Isometric, Some(2), Load::None)]
    fn test_prescription(
        #[case] modality: Modality,
        #[case] difficulty: Option<u32>,
        #[case] expected: Load,
    ) {
        let exercise = Exercise {
            modality,
            ..match difficulty {
                Some(difficulty) => variant(1, "a", 1, difficulty),
                None => exercise(1, "a", &[(MuscleID::Pecs, 3)]),
            }
        };

        assert_eq!(
            Prescription::from(&exercise),
            Prescription {
                reps: Reps::TARGET,
                load: expected
            }
        );
    }

    #[test]
    fn test_plan_summary() {
        let catalog = Catalog::new(
            vec![
                exercise(1, "a", &[(MuscleID::Pecs, 3)]),
                Exercise {
                    intensity: Intensity::High,
                    ..exercise(2, "b", &[(MuscleID::Lats, 3), (MuscleID::Pecs, 1)])
                },
            ],
            muscles(),
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let plan = WeeklyPlan {
            days: vec![DailyPlan {
                date,
                budget: Minutes::new(30),
                allocations: vec![
                    Allocation {
                        exercise_id: 1.into(),
                        sets: 2,
                    },
                    Allocation {
                        exercise_id: 2.into(),
                        sets: 1,
                    },
                    Allocation {
                        exercise_id: 3.into(),
                        sets: 1,
                    },
                ],
                used_time: Minutes::new(21),
            }],
        };

        let summary = PlanSummary::new(&plan, &catalog);

        assert_eq!(
            summary.days[0]
                .exercises
                .iter()
                .map(|e| (e.exercise_id, e.sets, e.duration, e.muscles.clone()))
                .collect::<Vec<_>>(),
            vec![
                (1.into(), 2, Minutes::new(12), vec![MuscleID::Pecs]),
                (
                    2.into(),
                    1,
                    Minutes::new(9),
                    vec![MuscleID::Lats, MuscleID::Pecs]
                ),
            ]
        );
        assert_eq!(summary.days[0].date, date);
        assert_eq!(summary.days[0].used_time, Minutes::new(21));
        assert_eq!(
            summary.muscle_points,
            BTreeMap::from([(MuscleID::Pecs, 7), (MuscleID::Lats, 3)])
        );
    }

    #[test]
    fn test_session_summary() {
        let catalog = Catalog::new(
            vec![
                exercise(1, "a", &[(MuscleID::Pecs, 3)]),
                Exercise {
                    modality: Modality::Weighted,
                    intensity: Intensity::Medium,
                    ..exercise(2, "b", &[(MuscleID::Lats, 3), (MuscleID::Pecs, 1)])
                },
            ],
            muscles(),
        )
        .unwrap();
        let set = |set_number, reps, weight: Option<f32>| LoggedSet {
            set_number,
            reps: Reps::new(reps).unwrap(),
            weight: weight.map(|w| Weight::new(w).unwrap()),
        };
        let log = SessionLog {
            user_id: 1.into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            exercises: vec![
                LoggedExercise {
                    exercise_id: 2.into(),
                    sets: vec![set(1, 10, Some(12.5)), set(2, 8, Some(12.5))],
                },
                LoggedExercise {
                    exercise_id: 3.into(),
                    sets: vec![set(1, 10, None)],
                },
                LoggedExercise {
                    exercise_id: 1.into(),
                    sets: vec![set(1, 12, None), set(2, 11, None), set(3, 9, None)],
                },
            ],
        };

        let summary = SessionSummary::new(&log, &catalog);

        assert_eq!(summary.date, log.date);
        assert_eq!(
            summary
                .exercises
                .iter()
                .map(|e| (e.exercise_id, e.sets.len(), e.total_duration, e.muscles.clone()))
                .collect::<Vec<_>>(),
            vec![
                (
                    2.into(),
                    2,
                    Minutes::new(14),
                    vec![MuscleID::Lats, MuscleID::Pecs]
                ),
                (1.into(), 3, Minutes::new(18), vec![MuscleID::Pecs]),
            ]
        );
        assert_eq!(summary.exercises[0].sets[0].weight, Weight::new(12.5).ok());
    }
}
