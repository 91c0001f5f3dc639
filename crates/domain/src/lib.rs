#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod balance;
mod calendar;
mod candidate;
mod catalog;
mod config;
mod daily;
mod error;
mod exercise;
mod lock;
mod name;
mod plan;
mod progression;
mod service;
mod summary;
mod training;
mod user;
mod weekly;

pub use balance::{BalanceTracker, imbalance};
pub use calendar::{Interval, next_occurrence};
pub use candidate::{Candidate, select_candidates};
pub use catalog::{Catalog, CatalogError, CatalogRepository};
pub use config::{BalanceScope, ConfigError, SchedulerConfig, SetCapScope, VariantFallback};
pub use daily::{Selection, SetCounts, fill_day, select_next};
pub use error::{PlanError, ProgressError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Category, EquipmentID, Exercise, ExerciseID, ExerciseMuscle, GroupID, GroupMembership,
    Intensity, Modality, MuscleID, Property, PropertyError, Rating,
};
pub use lock::{UserGuard, UserLocks};
pub use name::{ExerciseCode, ExerciseCodeError, Name, NameError};
pub use plan::{Allocation, DailyPlan, PlanRepository, PlanService, WeeklyPlan};
pub use progression::{
    LoggedExercise, LoggedSet, ProgressionService, SessionLog, SessionLogID,
    SessionLogRepository, leveled_groups, raise_proficiency,
};
pub use service::Service;
pub use summary::{
    DaySummary, Load, PerformedExercise, PlanSummary, PlannedExercise, Prescription,
    SessionSummary,
};
pub use training::{Level, LevelError, Minutes, Reps, RepsError, Weight, WeightError};
pub use user::{
    Availability, AvailabilityError, Proficiency, ProfileRepository, UserID, UserProfile,
};
pub use weekly::WeeklyPlanner;
