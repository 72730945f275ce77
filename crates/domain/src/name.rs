use derive_more::{AsRef, Display};

/// Exercise name as entered by the user.
///
/// Surrounding whitespace is removed, the original spelling is kept.
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

    /// Pick the name of a newly typed exercise, falling back to an existing one.
    pub fn pick(new_name: &str, existing_name: &str) -> Result<Self, NameError> {
        if new_name.trim().is_empty() {
            Name::new(existing_name)
        } else {
            Name::new(new_name)
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
