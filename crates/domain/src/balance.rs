use std::collections::{BTreeMap, BTreeSet};

use crate::{Exercise, MuscleID};

/// Accumulated workload per muscle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceTracker {
    points: BTreeMap<MuscleID, u32>,
}

impl BalanceTracker {
    #[must_use]
    pub fn new(muscles: &BTreeSet<MuscleID>) -> Self {
        Self {
            points: muscles.iter().map(|m| (*m, 0)).collect(),
        }
    }

    #[must_use]
    pub fn imbalance(&self) -> f64 {
        imbalance(self.points.values().copied())
    }

    /// Imbalance after adding `sets` sets of `exercise`, without changing the tracker.
    #[must_use]
    pub fn simulate(&self, exercise: &Exercise, sets: u32) -> f64 {
        let mut simulated = self.clone();
        simulated.add(exercise, sets);
        simulated.imbalance()
    }

    pub fn add(&mut self, exercise: &Exercise, sets: u32) {
        for m in &exercise.muscles {
            *self.points.entry(m.muscle_id).or_default() += *m.rating * sets;
        }
    }

    pub fn reset(&mut self) {
        for points in self.points.values_mut() {
            *points = 0;
        }
    }

    #[must_use]
    pub fn points(&self) -> &BTreeMap<MuscleID, u32> {
        &self.points
    }
}

/// Spread of the workload relative to its mean, or infinity if there is no workload.
#[must_use]
pub fn imbalance(values: impl Iterator<Item = u32>) -> f64 {
    let mut count = 0_u32;
    let mut sum = 0_u64;
    let mut min = u32::MAX;
    let mut max = 0;

    for value in values {
        count += 1;
        sum += u64::from(value);
        min = min.min(value);
        max = max.max(value);
    }

    if sum == 0 {
        return f64::INFINITY;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / f64::from(count);

    f64::from(max - min) / mean
}
