use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("point set has no depot")]
    NoDepot,
    #[error("point set has {count} depots, expected exactly one")]
    MultipleDepots { count: usize },
    #[error("point id {0} appears more than once")]
    DuplicateId(u32),
    #[error("point {0} has a non-finite coordinate")]
    NonFiniteCoordinate(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// True for the errors raised while validating a point set.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NoDepot
                | Error::MultipleDepots { .. }
                | Error::DuplicateId(_)
                | Error::NonFiniteCoordinate(_)
        )
    }
}
