use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Identifier shared by all difficulty variants of the same movement.
#[derive(AsRef, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseCode(String);

impl ExerciseCode {
    pub fn new(code: &str) -> Result<Self, ExerciseCodeError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(ExerciseCodeError::Empty);
        }

        if code.chars().any(char::is_whitespace) {
            return Err(ExerciseCodeError::Whitespace);
        }

        Ok(ExerciseCode(code.to_lowercase()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseCodeError {
    #[error("Exercise code must not be empty")]
    Empty,
    #[error("Exercise code must not contain whitespace")]
    Whitespace,
}
