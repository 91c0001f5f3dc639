use std::{
    cmp::Reverse,
    collections::{BTreeMap, btree_map::Entry},
};

use log::debug;

use crate::{Catalog, Exercise, ExerciseCode, Minutes, UserProfile, VariantFallback};

/// Exercise variant selected for a user, annotated with its per-set cost and workload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub exercise: &'a Exercise,
    pub set_time: Minutes,
    pub points_per_set: u32,
}

impl<'a> From<&'a Exercise> for Candidate<'a> {
    fn from(exercise: &'a Exercise) -> Self {
        Self {
            exercise,
            set_time: exercise.set_time(),
            points_per_set: exercise.points_per_set(),
        }
    }
}

/// Select the exercise variants a user can do with their equipment and proficiency.
///
/// Eligible exercises are grouped by code, in order of the first appearance of each code in
/// the catalog. Of the variants that belong to a proficiency group, only those at the hardest
/// tier the user has reached are kept. Variants without a group always pass and follow the
/// gated ones. If a code has no passing variant, `fallback` decides whether it is dropped or
/// whether all its variants are kept, hardest first.
#[must_use]
pub fn select_candidates<'a>(
    catalog: &'a Catalog,
    profile: &UserProfile,
    fallback: VariantFallback,
) -> Vec<Candidate<'a>> {
    let mut codes: Vec<(&ExerciseCode, Vec<&Exercise>)> = vec![];
    let mut positions: BTreeMap<&ExerciseCode, usize> = BTreeMap::new();

    for exercise in catalog
        .exercises()
        .iter()
        .filter(|e| e.is_available_with(&profile.equipment))
    {
        match positions.entry(&exercise.code) {
            Entry::Occupied(entry) => codes[*entry.get()].1.push(exercise),
            Entry::Vacant(entry) => {
                entry.insert(codes.len());
                codes.push((&exercise.code, vec![exercise]));
            }
        }
    }

    codes
        .into_iter()
        .flat_map(|(code, variants)| select_variants(code, &variants, profile, fallback))
        .map(Candidate::from)
        .collect()
}

fn select_variants<'a>(
    code: &ExerciseCode,
    variants: &[&'a Exercise],
    profile: &UserProfile,
    fallback: VariantFallback,
) -> Vec<&'a Exercise> {
    let (gated, ungated): (Vec<&Exercise>, Vec<&Exercise>) =
        variants.iter().copied().partition(|e| e.group.is_some());

    let allowed = gated
        .iter()
        .copied()
        .filter(|e| {
            e.group
                .is_some_and(|g| g.difficulty <= profile.proficiency.level(g.group_id))
        })
        .collect::<Vec<_>>();

    if allowed.is_empty() && ungated.is_empty() {
        return match fallback {
            VariantFallback::Drop => {
                debug!("dropping exercise code {code}: no variant at the user's proficiency");
                vec![]
            }
            VariantFallback::FallbackToAll => {
                debug!("keeping all variants of exercise code {code}");
                let mut all = gated;
                all.sort_by_key(|e| Reverse(e.difficulty()));
                all
            }
        };
    }

    let hardest = allowed.iter().filter_map(|e| e.difficulty()).max();

    allowed
        .into_iter()
        .filter(|e| e.difficulty() == hardest)
        .chain(ungated)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        Exercise, ExerciseID, Level, MuscleID, Proficiency,
        catalog::tests::{exercise, muscles, variant},
    };

    fn profile(proficiency: Proficiency) -> UserProfile {
        UserProfile {
            user_id: 1.into(),
            equipment: BTreeSet::new(),
            availability: vec![],
            proficiency,
        }
    }

    fn ids(candidates: &[Candidate]) -> Vec<ExerciseID> {
        candidates.iter().map(|c| c.exercise.id).collect()
    }

    #[test]
    fn test_select_candidates_equipment() {
        let catalog = Catalog::new(
            vec![
                exercise(1, "a", &[(MuscleID::Pecs, 3)]),
                Exercise {
                    equipment: BTreeSet::from([1.into()]),
                    ..exercise(2, "b", &[(MuscleID::Lats, 3)])
                },
            ],
            muscles(),
        )
        .unwrap();

        let candidates =
            select_candidates(&catalog, &profile(Proficiency::default()), VariantFallback::Drop);

        assert_eq!(ids(&candidates), vec![1.into()]);
        assert_eq!(candidates[0].set_time, Minutes::new(6));
        assert_eq!(candidates[0].points_per_set, 3);

        let candidates = select_candidates(
            &catalog,
            &UserProfile {
                equipment: BTreeSet::from([1.into(), 2.into()]),
                ..profile(Proficiency::default())
            },
            VariantFallback::Drop,
        );

        assert_eq!(ids(&candidates), vec![1.into(), 2.into()]);
    }

    #[rstest]
    #[case(1, vec![1.into()])]
    #[case(2, vec![2.into()])]
    #[case(5, vec![2.into()])]
    fn test_select_candidates_proficiency(#[case] level: u32, #[case] expected: Vec<ExerciseID>) {
        let catalog =
            Catalog::new(vec![variant(1, "a", 1, 1), variant(2, "a", 1, 2)], muscles()).unwrap();

        assert_eq!(
            ids(&select_candidates(
                &catalog,
                &profile(Proficiency::from([(1.into(), Level::new(level).unwrap())])),
                VariantFallback::Drop
            )),
            expected
        );
    }

    #[test]
    fn test_select_candidates_ties_in_catalog_order() {
        let catalog = Catalog::new(
            vec![
                variant(3, "a", 1, 2),
                variant(1, "a", 1, 1),
                variant(2, "a", 1, 2),
            ],
            muscles(),
        )
        .unwrap();

        assert_eq!(
            ids(&select_candidates(
                &catalog,
                &profile(Proficiency::from([(1.into(), Level::new(2).unwrap())])),
                VariantFallback::Drop
            )),
            vec![3.into(), 2.into()]
        );
    }

    #[rstest]
    #[case(VariantFallback::Drop, vec![3.into()])]
    #[case(VariantFallback::FallbackToAll, vec![2.into(), 1.into(), 3.into()])]
    fn test_select_candidates_no_eligible_variant(
        #[case] fallback: VariantFallback,
        #[case] expected: Vec<ExerciseID>,
    ) {
        let catalog = Catalog::new(
            vec![
                variant(1, "a", 1, 2),
                variant(2, "a", 1, 3),
                exercise(3, "b", &[(MuscleID::Lats, 3)]),
            ],
            muscles(),
        )
        .unwrap();

        assert_eq!(
            ids(&select_candidates(
                &catalog,
                &profile(Proficiency::default()),
                fallback
            )),
            expected
        );
    }

    #[test]
    fn test_select_candidates_ungated_variants() {
        let catalog = Catalog::new(
            vec![
                exercise(1, "a", &[(MuscleID::Pecs, 3)]),
                variant(2, "a", 1, 2),
                exercise(3, "a", &[(MuscleID::Lats, 3)]),
                variant(4, "a", 1, 1),
            ],
            muscles(),
        )
        .unwrap();

        assert_eq!(
            ids(&select_candidates(
                &catalog,
                &profile(Proficiency::default()),
                VariantFallback::Drop
            )),
            vec![4.into(), 1.into(), 3.into()]
        );
    }

    #[test]
    fn test_select_candidates_code_order() {
        let catalog = Catalog::new(
            vec![
                exercise(1, "b", &[(MuscleID::Pecs, 3)]),
                exercise(2, "a", &[(MuscleID::Lats, 3)]),
                exercise(3, "b", &[(MuscleID::Lats, 1)]),
            ],
            muscles(),
        )
        .unwrap();

        assert_eq!(
            ids(&select_candidates(
                &catalog,
                &profile(Proficiency::default()),
                VariantFallback::Drop
            )),
            vec![1.into(), 3.into(), 2.into()]
        );
    }

    #[test]
    fn test_select_candidates_deterministic() {
        let catalog = Catalog::new(
            vec![
                variant(1, "a", 1, 1),
                variant(2, "a", 1, 2),
                exercise(3, "b", &[(MuscleID::Lats, 3)]),
                variant(4, "c", 2, 1),
            ],
            muscles(),
        )
        .unwrap();
        let profile = profile(Proficiency::from([(1.into(), Level::new(2).unwrap())]));

        assert_eq!(
            select_candidates(&catalog, &profile, VariantFallback::Drop),
            select_candidates(&catalog, &profile, VariantFallback::Drop)
        );
    }
}
