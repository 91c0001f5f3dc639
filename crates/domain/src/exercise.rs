use std::{collections::BTreeSet, slice::Iter};

use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{ExerciseCode, Level, Minutes, Name, Reps};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub code: ExerciseCode,
    pub name: Name,
    pub modality: Modality,
    pub intensity: Intensity,
    pub category: Category,
    pub base_duration: Minutes,
    pub muscles: Vec<ExerciseMuscle>,
    pub equipment: BTreeSet<EquipmentID>,
    pub max_reps: Option<Reps>,
    pub group: Option<GroupMembership>,
}

impl Exercise {
    /// Time of one set including the rest after it.
    #[must_use]
    pub fn set_time(&self) -> Minutes {
        self.base_duration + self.intensity.rest_time()
    }

    #[must_use]
    pub fn points_per_set(&self) -> u32 {
        self.muscles.iter().map(|m| *m.rating).sum()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Level> {
        self.group.as_ref().map(|g| g.difficulty)
    }

    #[must_use]
    pub fn is_available_with(&self, owned_equipment: &BTreeSet<EquipmentID>) -> bool {
        self.equipment.is_subset(owned_equipment)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EquipmentID(Uuid);

impl From<Uuid> for EquipmentID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for EquipmentID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupID(Uuid);

impl From<Uuid> for GroupID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for GroupID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Membership of a variant in a proficiency group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMembership {
    pub group_id: GroupID,
    pub difficulty: Level,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseMuscle {
    pub muscle_id: MuscleID,
    pub rating: Rating,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u32);

impl From<u32> for Rating {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modality {
    Bodyweight,
    Weighted,
    Isometric,
}

impl Property for Modality {
    fn iter() -> Iter<'static, Modality> {
        static MODALITY: [Modality; 3] =
            [Modality::Bodyweight, Modality::Weighted, Modality::Isometric];
        MODALITY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Modality::Bodyweight => "Bodyweight",
            Modality::Weighted => "Weighted",
            Modality::Isometric => "Isometric",
        }
    }
}

impl TryFrom<&str> for Modality {
    type Error = PropertyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "bodyweight" => Ok(Modality::Bodyweight),
            "weight" | "weighted" => Ok(Modality::Weighted),
            "isometric" => Ok(Modality::Isometric),
            _ => Err(PropertyError::Unknown(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Intensity {
    Low,
    Medium,
    High,
    VeryHigh,
    Unrated,
}

impl Intensity {
    #[must_use]
    pub fn rest_time(self) -> Minutes {
        Minutes::new(match self {
            Intensity::Low => 1,
            Intensity::Medium => 2,
            Intensity::High => 4,
            Intensity::VeryHigh => 6,
            Intensity::Unrated => 0,
        })
    }
}

impl Property for Intensity {
    fn iter() -> Iter<'static, Intensity> {
        static INTENSITY: [Intensity; 4] = [
            Intensity::Low,
            Intensity::Medium,
            Intensity::High,
            Intensity::VeryHigh,
        ];
        INTENSITY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
            Intensity::VeryHigh => "Very High",
            Intensity::Unrated => "Unrated",
        }
    }
}

/// Unknown intensities are unrated.
impl From<&str> for Intensity {
    fn from(value: &str) -> Self {
        from_name(value).unwrap_or(Intensity::Unrated)
    }
}

/// Movement category determining where an exercise is placed within a day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    LowerBodyPush,
    LowerBodyPull,
    UpperBodyPull,
    HorizontalPush,
    VerticalPush,
    Core,
    ArmIsolation,
    ShoulderIsolation,
    Other,
}

impl Category {
    /// Position in the day, lower values first.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Category::LowerBodyPush | Category::LowerBodyPull => 0,
            Category::UpperBodyPull | Category::HorizontalPush => 1,
            Category::VerticalPush | Category::Core | Category::Other => 2,
            Category::ArmIsolation => 3,
            Category::ShoulderIsolation => 4,
        }
    }
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORY: [Category; 9] = [
            Category::LowerBodyPush,
            Category::LowerBodyPull,
            Category::UpperBodyPull,
            Category::HorizontalPush,
            Category::VerticalPush,
            Category::Core,
            Category::ArmIsolation,
            Category::ShoulderIsolation,
            Category::Other,
        ];
        CATEGORY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::LowerBodyPush => "Lower Body Push",
            Category::LowerBodyPull => "Lower Body Pull",
            Category::UpperBodyPull => "Upper Body Pull",
            Category::HorizontalPush => "Horizontal Push",
            Category::VerticalPush => "Vertical Push",
            Category::Core => "Core",
            Category::ArmIsolation => "Arm Isolation",
            Category::ShoulderIsolation => "Shoulder Isolation",
            Category::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = PropertyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        from_name(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleID {
    // Neck
    Neck = 1,
    // Chest
    Pecs = 11,
    // Back
    Traps = 21,
    Lats = 22,
    // Shoulders
    FrontDelts = 31,
    SideDelts = 32,
    RearDelts = 33,
    // Upper arms
    Biceps = 41,
    Triceps = 42,
    // Forearms
    Forearms = 51,
    // Waist
    Abs = 61,
    ErectorSpinae = 62,
    // Hips
    Glutes = 71,
    Abductors = 72,
    // Thighs
    Quads = 81,
    Hamstrings = 82,
    Adductors = 83,
    // Calves
    Calves = 91,
}

impl Property for MuscleID {
    fn iter() -> Iter<'static, MuscleID> {
        static MUSCLES: [MuscleID; 18] = [
            MuscleID::Neck,
            MuscleID::Pecs,
            MuscleID::Traps,
            MuscleID::Lats,
            MuscleID::FrontDelts,
            MuscleID::SideDelts,
            MuscleID::RearDelts,
            MuscleID::Biceps,
            MuscleID::Triceps,
            MuscleID::Forearms,
            MuscleID::Abs,
            MuscleID::ErectorSpinae,
            MuscleID::Glutes,
            MuscleID::Abductors,
            MuscleID::Quads,
            MuscleID::Hamstrings,
            MuscleID::Adductors,
            MuscleID::Calves,
        ];
        MUSCLES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleID::Neck => "Neck",
            MuscleID::Pecs => "Pecs",
            MuscleID::Traps => "Traps",
            MuscleID::Lats => "Lats",
            MuscleID::FrontDelts => "Front Delts",
            MuscleID::SideDelts => "Side Delts",
            MuscleID::RearDelts => "Rear Delts",
            MuscleID::Biceps => "Biceps",
            MuscleID::Triceps => "Triceps",
            MuscleID::Forearms => "Forearms",
            MuscleID::Abs => "Abs",
            MuscleID::ErectorSpinae => "Erector Spinae",
            MuscleID::Glutes => "Glutes",
            MuscleID::Abductors => "Abductors",
            MuscleID::Quads => "Quads",
            MuscleID::Hamstrings => "Hamstrings",
            MuscleID::Adductors => "Adductors",
            MuscleID::Calves => "Calves",
        }
    }
}

impl TryFrom<&str> for MuscleID {
    type Error = PropertyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        from_name(value)
    }
}

pub trait Property: Clone + Copy + Sized + 'static {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PropertyError {
    #[error("Unknown value \"{0}\"")]
    Unknown(String),
}

/// Look up a property by its name, ignoring case, spaces and underscores.
fn from_name<P: Property>(value: &str) -> Result<P, PropertyError> {
    let normalize = |s: &str| {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase()
    };
    let wanted = normalize(value);
    P::iter()
        .find(|p| normalize(p.name()) == wanted)
        .copied()
        .ok_or_else(|| PropertyError::Unknown(value.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise() -> Exercise {
        Exercise {
            id: 1.into(),
            code: ExerciseCode::new("row").unwrap(),
            name: Name::new("Ring Row").unwrap(),
            modality: Modality::Bodyweight,
            intensity: Intensity::High,
            category: Category::UpperBodyPull,
            base_duration: Minutes::new(3),
            muscles: vec![
                ExerciseMuscle {
                    muscle_id: MuscleID::Lats,
                    rating: 3.into(),
                },
                ExerciseMuscle {
                    muscle_id: MuscleID::Biceps,
                    rating: 1.into(),
                },
            ],
            equipment: BTreeSet::from([1.into(), 2.into()]),
            max_reps: Some(Reps::new(15).unwrap()),
            group: Some(GroupMembership {
                group_id: 1.into(),
                difficulty: Level::new(2).unwrap(),
            }),
        }
    }

    #[test]
    fn test_exercise_set_time() {
        assert_eq!(exercise().set_time(), Minutes::new(7));
    }

    #[test]
    fn test_exercise_points_per_set() {
        assert_eq!(exercise().points_per_set(), 4);
    }

    #[test]
    fn test_exercise_difficulty() {
        assert_eq!(exercise().difficulty(), Some(Level::new(2).unwrap()));
        assert_eq!(
            Exercise {
                group: None,
                ..exercise()
            }
            .difficulty(),
            None
        );
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&[1], false)]
    #[case(&[1, 2], true)]
    #[case(&[1, 2, 3], true)]
    fn test_exercise_is_available_with(#[case] owned: &[u128], #[case] expected: bool) {
        let owned = owned.iter().map(|id| EquipmentID::from(*id)).collect();
        assert_eq!(exercise().is_available_with(&owned), expected);
    }

    #[test]
    fn test_exercise_without_equipment_is_always_available() {
        let exercise = Exercise {
            equipment: BTreeSet::new(),
            ..exercise()
        };
        assert!(exercise.is_available_with(&BTreeSet::new()));
    }

    #[rstest]
    #[case(Intensity::Low, 1)]
    #[case(Intensity::Medium, 2)]
    #[case(Intensity::High, 4)]
    #[case(Intensity::VeryHigh, 6)]
    #[case(Intensity::Unrated, 0)]
    fn test_intensity_rest_time(#[case] intensity: Intensity, #[case] expected: u32) {
        assert_eq!(intensity.rest_time(), Minutes::new(expected));
    }

    #[rstest]
    #[case("low", Intensity::Low)]
    #[case("Medium", Intensity::Medium)]
    #[case("HIGH", Intensity::High)]
    #[case("very high", Intensity::VeryHigh)]
    #[case("very_high", Intensity::VeryHigh)]
    #[case("VeryHigh", Intensity::VeryHigh)]
    #[case("unrated", Intensity::Unrated)]
    #[case("extreme", Intensity::Unrated)]
    fn test_intensity_from_str(#[case] value: &str, #[case] expected: Intensity) {
        assert_eq!(Intensity::from(value), expected);
    }

    #[rstest]
    #[case("bodyweight", Ok(Modality::Bodyweight))]
    #[case("weight", Ok(Modality::Weighted))]
    #[case("Weighted", Ok(Modality::Weighted))]
    #[case("isometric", Ok(Modality::Isometric))]
    #[case("cardio", Err(PropertyError::Unknown("cardio".to_string())))]
    fn test_modality_try_from_str(
        #[case] value: &str,
        #[case] expected: Result<Modality, PropertyError>,
    ) {
        assert_eq!(Modality::try_from(value), expected);
    }

    #[rstest]
    #[case("Front Delts", Ok(MuscleID::FrontDelts))]
    #[case("front_delts", Ok(MuscleID::FrontDelts))]
    #[case("erector-spinae", Ok(MuscleID::ErectorSpinae))]
    #[case("chest", Err(PropertyError::Unknown("chest".to_string())))]
    fn test_muscle_id_try_from_str(
        #[case] value: &str,
        #[case] expected: Result<MuscleID, PropertyError>,
    ) {
        assert_eq!(MuscleID::try_from(value), expected);
    }

    #[test]
    fn test_muscle_id_name() {
        let mut names = HashSet::new();

        for muscle in MuscleID::iter() {
            let name = muscle.name();

            assert!(!name.is_empty());
            assert!(!names.contains(name));
            assert_eq!(MuscleID::try_from(name), Ok(*muscle));

            names.insert(name);
        }
    }

    #[test]
    fn test_category_name() {
        for category in Category::iter() {
            assert_eq!(Category::try_from(category.name()), Ok(*category));
        }
    }

    #[test]
    fn test_category_priority() {
        assert!(Category::LowerBodyPush.priority() < Category::UpperBodyPull.priority());
        assert_eq!(
            Category::UpperBodyPull.priority(),
            Category::HorizontalPush.priority()
        );
        assert!(Category::HorizontalPush.priority() < Category::ArmIsolation.priority());
        assert!(Category::ArmIsolation.priority() < Category::ShoulderIsolation.priority());
        assert!(
            Category::iter()
                .all(|c| c.priority() <= Category::ShoulderIsolation.priority())
        );
    }

    #[test]
    fn test_modality_and_intensity_names() {
        for modality in Modality::iter() {
            assert_eq!(Modality::try_from(modality.name()), Ok(*modality));
        }
        for intensity in Intensity::iter() {
            assert_eq!(Intensity::from(intensity.name()), *intensity);
        }
    }
}
