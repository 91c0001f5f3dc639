use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, trace};

use crate::{
    Allocation, BalanceTracker, Candidate, DailyPlan, ExerciseID, Minutes, SchedulerConfig,
    SetCapScope,
};

/// Sets assigned per exercise on the current day and in the whole planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCounts {
    day: BTreeMap<ExerciseID, u32>,
    week: BTreeMap<ExerciseID, u32>,
    scope: SetCapScope,
}

impl SetCounts {
    #[must_use]
    pub fn new(scope: SetCapScope) -> Self {
        Self {
            day: BTreeMap::new(),
            week: BTreeMap::new(),
            scope,
        }
    }

    pub fn start_day(&mut self) {
        self.day.clear();
    }

    #[must_use]
    pub fn day(&self, exercise_id: ExerciseID) -> u32 {
        self.day.get(&exercise_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn week(&self, exercise_id: ExerciseID) -> u32 {
        self.week.get(&exercise_id).copied().unwrap_or(0)
    }

    /// Sets counted against the cap.
    #[must_use]
    pub fn scoped(&self, exercise_id: ExerciseID) -> u32 {
        match self.scope {
            SetCapScope::Day => self.day(exercise_id),
            SetCapScope::Week => self.week(exercise_id),
        }
    }

    pub fn add(&mut self, exercise_id: ExerciseID, sets: u32) {
        *self.day.entry(exercise_id).or_default() += sets;
        *self.week.entry(exercise_id).or_default() += sets;
    }
}

/// Allocation chosen by a single greedy step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Position of the chosen exercise in the candidate list.
    pub index: usize,
    pub sets: u32,
    /// Imbalance of the tracker after committing the allocation.
    pub imbalance: f64,
}

/// Choose the allocation that leaves the workload least imbalanced.
///
/// Each candidate fitting into `remaining` minutes is tried with as many sets as the cap and
/// the remaining time allow. Ties go to the earlier candidate. If every fitting candidate has
/// reached its cap, a single extra set is allowed, as long as the exercise is below the cap
/// for the current day.
#[must_use]
pub fn select_next(
    candidates: &[Candidate],
    tracker: &BalanceTracker,
    counts: &SetCounts,
    remaining: f64,
    cap: u32,
) -> Option<Selection> {
    best_allocation(candidates, tracker, remaining, |exercise_id| {
        cap.saturating_sub(counts.scoped(exercise_id))
    })
    .or_else(|| {
        let selection = best_allocation(candidates, tracker, remaining, |exercise_id| {
            u32::from(counts.day(exercise_id) < cap)
        });
        if let Some(selection) = selection {
            debug!(
                "exceeding cap of {} by one set",
                candidates[selection.index].exercise.id
            );
        }
        selection
    })
}

fn best_allocation(
    candidates: &[Candidate],
    tracker: &BalanceTracker,
    remaining: f64,
    max_additional: impl Fn(ExerciseID) -> u32,
) -> Option<Selection> {
    let mut best: Option<Selection> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let set_time = candidate.set_time.as_f64();

        if set_time > remaining {
            continue;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_by_time = (remaining / set_time).floor() as u32;
        let sets = max_additional(candidate.exercise.id).min(max_by_time);

        if sets < 1 {
            continue;
        }

        let imbalance = tracker.simulate(candidate.exercise, sets);

        if best.is_none_or(|b| imbalance < b.imbalance) {
            best = Some(Selection {
                index,
                sets,
                imbalance,
            });
        }
    }

    best
}

/// Fill one day greedily with sets of the given candidates.
///
/// The day may exceed `budget` by the margin multiplier and is considered full once the early
/// exit ratio of `budget` is used. The tracker and set counts are updated with every committed
/// allocation.
#[must_use]
pub fn fill_day(
    date: NaiveDate,
    budget: Minutes,
    candidates: &[Candidate],
    tracker: &mut BalanceTracker,
    counts: &mut SetCounts,
    config: &SchedulerConfig,
) -> DailyPlan {
    let limit = (budget.as_f64() * config.margin_multiplier).min(f64::from(u32::MAX));
    let full = budget.as_f64() * config.early_exit_ratio;
    let mut allocations: Vec<Allocation> = vec![];
    let mut used = Minutes::ZERO;

    while used.as_f64() < full {
        let remaining = limit - used.as_f64();
        let Some(selection) = select_next(candidates, tracker, counts, remaining, config.set_cap)
        else {
            break;
        };
        let candidate = &candidates[selection.index];
        let exercise_id = candidate.exercise.id;

        assert!(selection.sets >= 1, "allocation without sets");

        tracker.add(candidate.exercise, selection.sets);
        counts.add(exercise_id, selection.sets);
        used += candidate.set_time * selection.sets;

        assert!(used.as_f64() <= limit, "day exceeds its time limit");
        assert!(
            counts.day(exercise_id) <= config.set_cap,
            "exercise exceeds the daily set cap"
        );

        trace!(
            "{date}: {} sets of {exercise_id} (imbalance {:.3})",
            selection.sets, selection.imbalance
        );

        match allocations.iter_mut().find(|a| a.exercise_id == exercise_id) {
            Some(allocation) => allocation.sets += selection.sets,
            None => allocations.push(Allocation {
                exercise_id,
                sets: selection.sets,
            }),
        }
    }

    DailyPlan {
        date,
        budget,
        allocations,
        used_time: used,
    }
}
