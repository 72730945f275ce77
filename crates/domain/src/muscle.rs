use std::slice::Iter;

use derive_more::Display;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MuscleGroup {
    #[display("chest")]
    Chest,
    #[display("back")]
    Back,
    #[display("biceps")]
    Biceps,
    #[display("triceps")]
    Triceps,
    #[display("shoulders")]
    Shoulders,
    #[display("forearms")]
    Forearms,
    #[display("abs")]
    Abs,
    #[display("quads")]
    Quads,
    #[display("hamstrings")]
    Hamstrings,
    #[display("calves")]
    Calves,
    #[display("misc")]
    Misc,
}

impl MuscleGroup {
    /// All muscle groups in display order.
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 11] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Shoulders,
            MuscleGroup::Forearms,
            MuscleGroup::Abs,
            MuscleGroup::Quads,
            MuscleGroup::Hamstrings,
            MuscleGroup::Calves,
            MuscleGroup::Misc,
        ];
        MUSCLE_GROUPS.iter()
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|group| group.to_string() == value)
            .copied()
            .ok_or_else(|| MuscleGroupError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Unknown muscle group \"{0}\"")]
    Unknown(String),
}
