use chrono::NaiveDate;

use crate::{ExerciseID, Interval, Minutes, PlanError, PlanSummary, UpdateError, UserID};

#[allow(async_fn_in_trait)]
pub trait PlanService {
    /// Generate the plan of the next seven days starting with `today` and replace any
    /// previously generated plan for these days.
    async fn generate_weekly_plan(
        &self,
        user_id: UserID,
        today: NaiveDate,
    ) -> Result<WeeklyPlan, PlanError>;
    async fn get_plan_summary(&self, plan: &WeeklyPlan) -> Result<PlanSummary, PlanError>;
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository: Send + Sync + 'static {
    /// Replace all daily plans of the user within `window` by the days of `plan`.
    async fn replace_future_plan(
        &self,
        user_id: UserID,
        window: Interval,
        plan: WeeklyPlan,
    ) -> Result<WeeklyPlan, UpdateError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub exercise_id: ExerciseID,
    pub sets: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub budget: Minutes,
    pub allocations: Vec<Allocation>,
    pub used_time: Minutes,
}

impl DailyPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub days: Vec<DailyPlan>,
}

impl WeeklyPlan {
    #[must_use]
    pub fn used_time(&self) -> Minutes {
        self.days.iter().map(|d| d.used_time).sum()
    }
}
