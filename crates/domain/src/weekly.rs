use std::cmp::Reverse;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    Allocation, BalanceScope, BalanceTracker, Catalog, SchedulerConfig, SetCounts, UserProfile,
    WeeklyPlan, daily::fill_day, next_occurrence, select_candidates,
};

pub struct WeeklyPlanner<'a> {
    catalog: &'a Catalog,
    config: SchedulerConfig,
}

impl<'a> WeeklyPlanner<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: SchedulerConfig) -> Self {
        Self { catalog, config }
    }

    /// Plan the available days of a user, in the order of their availability.
    ///
    /// Workload is balanced across the whole week unless the balance scope is a single day.
    /// Each day is dated with the next occurrence of its weekday on or after `today`.
    #[must_use]
    pub fn plan(&self, profile: &UserProfile, today: NaiveDate) -> WeeklyPlan {
        let candidates =
            select_candidates(self.catalog, profile, self.config.no_eligible_variant);

        if candidates.is_empty() {
            warn!("no eligible exercises for user {}", profile.user_id);
        }

        let mut tracker = BalanceTracker::new(self.catalog.muscles());
        let mut counts = SetCounts::new(self.config.set_cap_scope);

        let days = profile
            .availability
            .iter()
            .map(|availability| {
                counts.start_day();

                if self.config.balance_scope == BalanceScope::Day {
                    tracker.reset();
                }

                let mut plan = fill_day(
                    next_occurrence(today, availability.day),
                    availability.minutes,
                    &candidates,
                    &mut tracker,
                    &mut counts,
                    &self.config,
                );
                self.order(&mut plan.allocations);

                if plan.is_empty() {
                    debug!("no exercise fits into {} minutes on {}", plan.budget, plan.date);
                } else {
                    debug!(
                        "planned {} exercises with {} of {} minutes on {}",
                        plan.allocations.len(),
                        plan.used_time,
                        plan.budget,
                        plan.date
                    );
                }

                plan
            })
            .collect();

        WeeklyPlan { days }
    }

    /// Sort by category priority and then by descending difficulty, keeping the order of ties.
    fn order(&self, allocations: &mut [Allocation]) {
        allocations.sort_by_key(|a| {
            self.catalog
                .get(a.exercise_id)
                .map(|e| (e.category.priority(), Reverse(e.difficulty())))
        });
    }
}
