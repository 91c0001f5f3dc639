use crate::{CatalogError, UserID};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("profile of user {0} not found")]
    ProfileNotFound(UserID),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Read(ReadError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl PlanError {
    pub(crate) fn from_profile_read(user_id: UserID, error: ReadError) -> Self {
        match error {
            ReadError::NotFound => PlanError::ProfileNotFound(user_id),
            error => PlanError::Read(error),
        }
    }
}

impl From<ReadError> for PlanError {
    fn from(value: ReadError) -> Self {
        PlanError::Read(value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ProgressError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}
